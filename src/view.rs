//! The rendering surface that controllers hand their results to.
//!
//! A `Surface` can render a page, swap the visible page by route and open a modal overlay. The
//! `TerminalSurface` renders pages as text for the command line.

use crate::controllers::DisplayBill;
use crate::format;
use crate::routes::Route;
use serde::Serialize;
use std::cmp::Ordering;
use std::io::Write;
use tracing::{debug, error};

/// The caption of the modal that shows a bill's proof file.
pub const PROOF_CAPTION: &str = "Justificatif";

/// The heading of the bills page.
pub const BILLS_HEADING: &str = "Mes notes de frais";

/// The heading of the new-bill page.
pub const NEW_BILL_HEADING: &str = "Envoyer une note de frais";

/// What a `Surface` can be asked to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Loading,
    Bills { data: Vec<DisplayBill> },
    Error { error: String },
    NewBill,
}

/// A modal overlay showing an image with a caption.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Modal {
    pub caption: String,
    pub image_url: String,
}

impl Modal {
    /// The modal showing a bill's proof file.
    pub fn proof(image_url: impl Into<String>) -> Self {
        Self {
            caption: PROOF_CAPTION.to_string(),
            image_url: image_url.into(),
        }
    }
}

/// The rendering surface.
pub trait Surface: Send {
    fn render(&mut self, page: Page);
    fn navigate(&mut self, route: Route);
    fn open_modal(&mut self, modal: Modal);
}

/// How an error message is presented, keyed by the HTTP status phrase it contains.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPage {
    NotFound,
    ServerError,
    Other,
}

impl ErrorPage {
    pub fn classify(message: &str) -> Self {
        if message.contains("404") {
            ErrorPage::NotFound
        } else if message.contains("500") {
            ErrorPage::ServerError
        } else {
            ErrorPage::Other
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ErrorPage::NotFound => "Erreur 404 : la ressource demandée est introuvable",
            ErrorPage::ServerError => "Erreur 500 : le serveur a rencontré un problème",
            ErrorPage::Other => "Erreur",
        }
    }
}

/// Sorts bills most recent first by their raw, unformatted date. The sort is stable, so bills
/// with equal dates keep their relative order. Bills whose date cannot be parsed go last.
pub fn sort_by_date_desc(bills: &mut [DisplayBill]) {
    bills.sort_by(|a, b| {
        let a = format::parse_date(a.bill().date().as_str()).ok();
        let b = format::parse_date(b.bill().date().as_str()).ok();
        match (a, b) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

/// Renders pages as plain text to any writer, stdout by default.
pub struct TerminalSurface<W>
where
    W: Write + Send,
{
    out: W,
    route: Route,
}

impl TerminalSurface<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W> TerminalSurface<W>
where
    W: Write + Send,
{
    pub fn new(out: W) -> Self {
        Self {
            out,
            route: Route::default(),
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_page(&mut self, page: &Page) -> std::io::Result<()> {
        match page {
            Page::Loading => writeln!(self.out, "Chargement..."),
            Page::NewBill => writeln!(self.out, "{NEW_BILL_HEADING}"),
            Page::Error { error } => {
                writeln!(self.out, "{}", ErrorPage::classify(error).title())?;
                writeln!(self.out, "{error}")
            }
            Page::Bills { data } => {
                writeln!(self.out, "{BILLS_HEADING}")?;
                writeln!(
                    self.out,
                    "{:<24} {:<24} {:<12} {:>10} {:<12} Justificatif",
                    "Type", "Nom", "Date", "Montant", "Statut"
                )?;
                for row in data {
                    let bill = row.bill();
                    let amount = bill
                        .amount()
                        .map(|a| format!("{a} €"))
                        .unwrap_or_default();
                    writeln!(
                        self.out,
                        "{:<24} {:<24} {:<12} {:>10} {:<12} {}",
                        bill.expense_type(),
                        bill.name(),
                        row.date(),
                        amount,
                        row.status(),
                        bill.file_url().unwrap_or_default()
                    )?;
                }
                Ok(())
            }
        }
    }
}

impl<W> Surface for TerminalSurface<W>
where
    W: Write + Send,
{
    fn render(&mut self, page: Page) {
        if let Err(e) = self.write_page(&page) {
            error!("Unable to render page: {e}");
        }
    }

    fn navigate(&mut self, route: Route) {
        debug!("Navigating to {route}");
        self.route = route;
        let page = match route {
            Route::NewBill => Page::NewBill,
            _ => Page::Loading,
        };
        self.render(page);
    }

    fn open_modal(&mut self, modal: Modal) {
        if let Err(e) = writeln!(self.out, "{}\n{}", modal.caption, modal.image_url) {
            error!("Unable to render modal: {e}");
        }
    }
}
