//! These structs provide the CLI interface for the billed CLI.

use crate::config::DEFAULT_API_URL;
use crate::model::{BillForm, UserType};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// billed: A command-line client for expense bills.
///
/// Employees list the bills they have sent, look at the proof file attached to a bill, and send a
/// new bill by uploading a proof file (a jpg or png image) and then filling in the bill's details.
///
/// Run `billed init` once, then `billed login` to say who you are.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration files.
    ///
    /// The data directory is $HOME/billed unless --billed-home or BILLED_HOME says otherwise.
    Init(InitArgs),
    /// Store the identity (and optionally the bearer token) used by the other commands.
    Login(LoginArgs),
    /// List your bills, most recent first.
    Bills(BillsArgs),
    /// Upload a proof file and send a new bill.
    NewBill(Box<NewBillArgs>),
    /// Show the proof file of a bill.
    Proof(ProofArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where billed configuration and session are held. Defaults to ~/billed
    #[arg(long, env = "BILLED_HOME", default_value_t = default_billed_home())]
    billed_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, billed_home: PathBuf) -> Self {
        Self {
            log_level,
            billed_home: billed_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn billed_home(&self) -> &DisplayPath {
        &self.billed_home
    }
}

/// Args for the `billed init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The base URL of the bills API.
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,
}

impl InitArgs {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

/// Args for the `billed login` command.
#[derive(Debug, Parser, Clone)]
pub struct LoginArgs {
    /// Your email address.
    #[arg(long)]
    email: String,

    /// What kind of user you are.
    #[arg(long, value_enum, default_value_t = UserType::Employee)]
    user_type: UserType,

    /// A bearer token for the bills API.
    #[arg(long)]
    jwt: Option<String>,
}

impl LoginArgs {
    pub fn new(email: impl Into<String>, user_type: UserType, jwt: Option<String>) -> Self {
        Self {
            email: email.into(),
            user_type,
            jwt,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    pub fn jwt(&self) -> Option<&str> {
        self.jwt.as_deref()
    }
}

/// Args for the `billed bills` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct BillsArgs {}

/// Args for the `billed new-bill` command. The fields other than `file` are sent as typed, just as
/// the new-bill form would send them.
#[derive(Debug, Default, Parser, Clone)]
pub struct NewBillArgs {
    /// The proof file, a jpg or png image.
    #[arg(long)]
    file: PathBuf,

    /// The expense type, e.g. "Transports" or "Restaurants et bars".
    #[arg(long)]
    expense_type: String,

    /// A name for the expense.
    #[arg(long, default_value = "")]
    name: String,

    /// The date of the expense, YYYY-MM-DD.
    #[arg(long)]
    date: String,

    /// The amount including VAT. Only the integer part is kept.
    #[arg(long)]
    amount: String,

    /// The VAT amount.
    #[arg(long, default_value = "")]
    vat: String,

    /// The VAT percentage. Defaults to 20 when blank.
    #[arg(long, default_value = "")]
    pct: String,

    /// A free comment.
    #[arg(long, default_value = "")]
    commentary: String,
}

impl NewBillArgs {
    pub fn new(file: impl Into<PathBuf>, form: BillForm) -> Self {
        Self {
            file: file.into(),
            expense_type: form.expense_type,
            name: form.name,
            date: form.date,
            amount: form.amount,
            vat: form.vat,
            pct: form.pct,
            commentary: form.commentary,
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// The form fields, as the new-bill page would read them.
    pub fn form(&self) -> BillForm {
        BillForm {
            expense_type: self.expense_type.clone(),
            name: self.name.clone(),
            date: self.date.clone(),
            amount: self.amount.clone(),
            vat: self.vat.clone(),
            pct: self.pct.clone(),
            commentary: self.commentary.clone(),
        }
    }
}

/// Args for the `billed proof` command.
#[derive(Debug, Parser, Clone)]
pub struct ProofArgs {
    /// The id of the bill.
    #[arg(long)]
    id: String,
}

impl ProofArgs {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

fn default_billed_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("billed"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --billed-home or BILLED_HOME instead of relying on the default \
                billed home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("billed")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
