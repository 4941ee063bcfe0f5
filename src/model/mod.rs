//! Types that represent the core data model, such as `Bill` and `Draft`.
mod bill;
mod draft;
mod expense_type;
mod raw_text;
mod status;
mod user;

pub use bill::Bill;
pub use draft::{BillForm, Draft, NewBill, SelectedFile, DEFAULT_PCT};
pub use expense_type::ExpenseType;
pub use raw_text::RawText;
pub use status::Status;
pub use user::{User, UserType};
