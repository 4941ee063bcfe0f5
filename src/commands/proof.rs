use crate::api::{self, Mode};
use crate::args::ProofArgs;
use crate::commands::{session, Out};
use crate::controllers::{BillsController, EyeIcon};
use crate::error::{Error, ErrorType};
use crate::view::Surface;
use crate::{Config, Result};
use anyhow::anyhow;

/// Opens the proof file of the bill named in `args`, as clicking its eye icon on the bills page
/// would. The structure holds the URL of the proof file, if the bill has one.
pub async fn proof(
    config: Config,
    mode: Mode,
    args: &ProofArgs,
    surface: Box<dyn Surface>,
) -> Result<Out<String>> {
    let session = session(&config).await?;
    let store = api::store(&config, session.as_ref(), mode).await?;
    let mut controller = BillsController::new(store, surface);

    let listing = controller.get_bills().await?;
    let bill = listing.find(args.id()).ok_or_else(|| {
        Error::new(
            ErrorType::Validation,
            anyhow!("There is no bill with id '{}'", args.id()),
        )
    })?;

    let icon = EyeIcon::for_bill(bill);
    controller.handle_click_icon_eye(&icon);
    Ok(match icon.bill_url() {
        Some(url) => Out::new(format!("Proof file of bill '{}'", args.id()), url.to_string()),
        None => Out::new_message(format!("Bill '{}' has no proof file", args.id())),
    })
}
