use crate::api::{self, Mode};
use crate::args::NewBillArgs;
use crate::commands::{session, Out};
use crate::controllers::{FileOutcome, NewBillController};
use crate::error::{Error, ErrorType, IntoResult};
use crate::model::{Bill, SelectedFile};
use crate::view::Surface;
use crate::{utils, Config, Result};
use anyhow::{anyhow, Context};
use tracing::debug;

/// Sends a new bill: the proof file in `args` is uploaded first, then the other fields are
/// submitted against the bill that the upload created.
///
/// # Errors
/// - Returns an `ErrorType::Validation` error if the file cannot be read or is not a jpg or png
///   image. Nothing is sent in that case.
/// - Returns the controller's error if the upload or the submission fails.
pub async fn new_bill(
    config: Config,
    mode: Mode,
    args: NewBillArgs,
    surface: Box<dyn Surface>,
) -> Result<Out<Bill>> {
    let session = session(&config).await?;
    let store = api::store(&config, session.as_ref(), mode).await?;
    let mut controller = NewBillController::new(store, surface, session);

    let path = args.file().to_string_lossy().to_string();
    let bytes = utils::read_bytes(args.file())
        .await
        .with_context(|| format!("Unable to read the proof file '{path}'"))
        .pub_result(ErrorType::Validation)?;
    let file = SelectedFile::new(path.as_str(), utils::media_type_for(&path), bytes);

    match controller.handle_change_file(file).await? {
        FileOutcome::Rejected { media_type } => {
            return Err(Error::new(
                ErrorType::Validation,
                anyhow!("The proof file must be a jpg or png image, '{path}' is {media_type}"),
            ));
        }
        FileOutcome::Uploaded { file_url, bill_id } => {
            debug!("Proof file for bill '{bill_id}' is at {file_url}");
        }
    }

    let bill = controller.handle_submit(args.form()).await?;
    Ok(Out::new(format!("Sent bill '{}'", bill.id()), bill))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BillForm, ExpenseType};
    use crate::routes::Route;
    use crate::test::{RecordingSurface, TestEnv};
    use rust_decimal::Decimal;

    fn form() -> BillForm {
        BillForm {
            expense_type: "Transports".to_string(),
            name: "Vol Paris Londres".to_string(),
            date: "2022-04-22".to_string(),
            amount: "348".to_string(),
            vat: "70".to_string(),
            pct: "".to_string(),
            commentary: "".to_string(),
        }
    }

    #[tokio::test]
    async fn test_new_bill_in_test_mode() {
        let env = TestEnv::new().await;
        let file = env.dir().join("receipt.png");
        utils::write(&file, b"png").await.unwrap();
        let surface = RecordingSurface::default();

        let out = new_bill(
            env.config(),
            Mode::Test,
            NewBillArgs::new(&file, form()),
            Box::new(surface.clone()),
        )
        .await
        .unwrap();

        let bill = out.structure().unwrap();
        assert_eq!(bill.email(), "a@a");
        assert_eq!(bill.expense_type(), &ExpenseType::Transports);
        assert_eq!(bill.amount(), Some(Decimal::from(348)));
        assert_eq!(bill.pct(), Some(Decimal::from(20)));
        assert_eq!(bill.file_name(), Some("receipt.png"));
        assert_eq!(bill.status(), "pending");
        assert_eq!(surface.routes(), vec![Route::Bills]);
    }

    #[tokio::test]
    async fn test_new_bill_rejects_pdf() {
        let env = TestEnv::new().await;
        let file = env.dir().join("receipt.pdf");
        utils::write(&file, b"pdf").await.unwrap();
        let surface = RecordingSurface::default();

        let err = new_bill(
            env.config(),
            Mode::Test,
            NewBillArgs::new(&file, form()),
            Box::new(surface.clone()),
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ErrorType::Validation);
        assert!(err.message().contains("application/pdf"));
        assert!(surface.routes().is_empty());
    }

    #[tokio::test]
    async fn test_new_bill_missing_file() {
        let env = TestEnv::new().await;
        let err = new_bill(
            env.config(),
            Mode::Test,
            NewBillArgs::new(env.dir().join("nope.jpg"), form()),
            Box::new(RecordingSurface::default()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorType::Validation);
    }

    #[tokio::test]
    async fn test_new_bill_requires_login() {
        let env = TestEnv::logged_out().await;
        let file = env.dir().join("receipt.jpg");
        utils::write(&file, b"jpg").await.unwrap();

        let err = new_bill(
            env.config(),
            Mode::Test,
            NewBillArgs::new(&file, form()),
            Box::new(RecordingSurface::default()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorType::Session);
    }
}
