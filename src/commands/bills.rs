use crate::api::{self, Mode, Store};
use crate::commands::{session, Out};
use crate::controllers::{BillsController, Listing};
use crate::view::Surface;
use crate::{Config, Result};
use std::sync::Arc;

/// Lists the bills, most recent first, on `surface`. When the list cannot be fetched the error
/// page is rendered and the error is returned.
pub async fn bills(config: Config, mode: Mode, surface: Box<dyn Surface>) -> Result<Out<Listing>> {
    let session = session(&config).await?;
    let store = api::store(&config, session.as_ref(), mode).await?;
    list_bills(store, surface).await
}

async fn list_bills(store: Arc<dyn Store>, surface: Box<dyn Surface>) -> Result<Out<Listing>> {
    let mut controller = BillsController::new(store, surface);
    let listing = controller.load().await?;

    let mut message = format!("Listed {} bills", listing.bills().len());
    if !listing.faults().is_empty() {
        message.push_str(&format!(
            ", {} with a date that could not be read",
            listing.faults().len()
        ));
    }
    Ok(Out::new(message, listing))
}
