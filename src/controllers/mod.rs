//! The two page controllers.
//!
//! Each user action is modelled as a pure function from the current state and the event payload
//! to a new state and a list of `Effect`s. The controller structs are thin: they call the store,
//! run the pure function and hand the effects to their `Surface`.

pub mod bills;
pub mod new_bill;

pub use bills::{display_bill, BillsController, DateFault, DisplayBill, EyeIcon, Listing};
pub use new_bill::{FileCheck, FileOutcome, NewBillController, ACCEPTED_MEDIA_TYPES};

use crate::routes::Route;
use crate::view::{Modal, Surface};
use serde::Serialize;

/// A side effect requested by a controller action.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    Navigate(Route),
    OpenModal(Modal),
}

/// Performs `effects` against `surface`, in order.
pub(crate) fn apply(surface: &mut dyn Surface, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::Navigate(route) => surface.navigate(route),
            Effect::OpenModal(modal) => surface.open_modal(modal),
        }
    }
}
