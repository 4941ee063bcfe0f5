//! The bills page: listing the user's bills and the actions available on it.

use crate::api::Store;
use crate::controllers::{apply, Effect};
use crate::error::{ErrorType, IntoResult};
use crate::format::{format_date, format_status};
use crate::model::Bill;
use crate::routes::Route;
use crate::view::{self, Modal, Page, Surface};
use crate::Result;
use anyhow::Context;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// A bill with its date and status replaced by their display forms. The raw bill is kept so
/// that ordering can use the unformatted date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayBill {
    bill: Bill,
    date: String,
    status: String,
}

impl DisplayBill {
    /// The bill as read from the store.
    pub fn bill(&self) -> &Bill {
        &self.bill
    }

    /// The display date, or the raw date if it could not be formatted.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// The status label.
    pub fn status(&self) -> &str {
        &self.status
    }
}

/// A record whose date could not be formatted. The record is still listed with its raw date.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct DateFault {
    bill_id: String,
    raw: String,
    reason: String,
}

impl DateFault {
    pub fn bill_id(&self) -> &str {
        &self.bill_id
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// The outcome of fetching the bills list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Listing {
    bills: Vec<DisplayBill>,
    faults: Vec<DateFault>,
}

impl Listing {
    /// The display bills, in store order unless `sort` has been called.
    pub fn bills(&self) -> &[DisplayBill] {
        &self.bills
    }

    pub fn faults(&self) -> &[DateFault] {
        &self.faults
    }

    pub fn into_bills(self) -> Vec<DisplayBill> {
        self.bills
    }

    /// Orders the bills most recent first.
    pub fn sort(&mut self) {
        view::sort_by_date_desc(&mut self.bills);
    }

    pub fn find(&self, id: &str) -> Option<&DisplayBill> {
        self.bills.iter().find(|b| b.bill.id() == id)
    }
}

/// Formats `bill` for display. An unparsable date is reported as a `DateFault` and the raw date is
/// kept, so one corrupt record never spoils the list.
pub fn display_bill(bill: Bill) -> (DisplayBill, Option<DateFault>) {
    let status = format_status(bill.status());
    let (date, fault) = match format_date(bill.date().as_str()) {
        Ok(date) => (date, None),
        Err(e) => (
            bill.date().to_string(),
            Some(DateFault {
                bill_id: bill.id().to_string(),
                raw: bill.date().to_string(),
                reason: e.to_string(),
            }),
        ),
    };
    (DisplayBill { bill, date, status }, fault)
}

/// The effects of clicking the "new bill" button.
pub fn click_new_bill() -> Vec<Effect> {
    vec![Effect::Navigate(Route::NewBill)]
}

/// The receipt icon shown next to a bill. It carries the URL of the bill's proof file.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct EyeIcon {
    bill_url: Option<String>,
}

impl EyeIcon {
    pub fn new(bill_url: Option<String>) -> Self {
        Self { bill_url }
    }

    pub fn for_bill(bill: &DisplayBill) -> Self {
        Self::new(bill.bill().file_url().map(|s| s.to_string()))
    }

    pub fn bill_url(&self) -> Option<&str> {
        self.bill_url.as_deref()
    }
}

/// The effects of clicking a receipt icon: a modal showing the proof file. An icon without a URL
/// has nothing to show.
pub fn click_icon_eye(icon: &EyeIcon) -> Vec<Effect> {
    match icon.bill_url() {
        Some(url) => vec![Effect::OpenModal(Modal::proof(url))],
        None => Vec::new(),
    }
}

/// The controller of the bills page.
pub struct BillsController {
    store: Arc<dyn Store>,
    surface: Box<dyn Surface>,
}

impl BillsController {
    pub fn new(store: Arc<dyn Store>, surface: Box<dyn Surface>) -> Self {
        Self { store, surface }
    }

    /// Fetches the bills and formats them for display, in the order the store returned them.
    ///
    /// # Errors
    ///
    /// - Returns an `ErrorType::Transport` error if the store call fails. Date faults are not
    ///   errors; they are returned in the `Listing`.
    pub async fn get_bills(&self) -> Result<Listing> {
        let raw = self
            .store
            .list()
            .await
            .context("Unable to list bills")
            .pub_result(ErrorType::Transport)?;

        let mut listing = Listing::default();
        for bill in raw {
            let (display, fault) = display_bill(bill);
            if let Some(fault) = fault {
                warn!("{} for bill '{}'", fault.reason, fault.bill_id);
                listing.faults.push(fault);
            }
            listing.bills.push(display);
        }
        debug!("Listed {} bills", listing.bills.len());
        Ok(listing)
    }

    /// Fetches the bills and renders them most recent first, or renders the error page if the
    /// fetch fails.
    pub async fn load(&mut self) -> Result<Listing> {
        self.surface.render(Page::Loading);
        match self.get_bills().await {
            Ok(mut listing) => {
                listing.sort();
                self.surface.render(Page::Bills {
                    data: listing.bills.clone(),
                });
                Ok(listing)
            }
            Err(e) => {
                self.surface.render(Page::Error {
                    error: e.message(),
                });
                Err(e)
            }
        }
    }

    /// Navigates to the new-bill page.
    pub fn handle_click_new_bill(&mut self) {
        apply(self.surface.as_mut(), click_new_bill());
    }

    /// Opens the proof-file modal for the bill behind `icon`.
    pub fn handle_click_icon_eye(&mut self, icon: &EyeIcon) {
        let effects = click_icon_eye(icon);
        if effects.is_empty() {
            warn!("The selected bill has no proof file");
        }
        apply(self.surface.as_mut(), effects);
    }
}
