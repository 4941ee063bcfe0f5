//! The new-bill page: uploading a proof file, then submitting the rest of the form.
//!
//! Submission happens in two phases. Selecting a proof file creates the bill on the store, which
//! returns the file's URL and the bill's identifier. Submitting the form then attaches the
//! descriptive fields to that bill. A draft that has no identifier yet cannot be submitted.

use crate::api::{Created, Store, UpdateRequest, UploadForm};
use crate::controllers::{apply, Effect};
use crate::error::{Error, ErrorType, IntoResult};
use crate::model::{Bill, BillForm, Draft, NewBill, SelectedFile};
use crate::routes::Route;
use crate::session::Session;
use crate::view::Surface;
use crate::{Res, Result};
use anyhow::{ensure, Context};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};

/// The media types accepted for a proof file.
pub const ACCEPTED_MEDIA_TYPES: &[&str] = &["image/jpeg", "image/png", "image/jpg"];

/// The decision taken on a selected file before anything is sent.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FileCheck {
    Rejected { media_type: String },
    Upload(UploadForm),
}

/// The result of `NewBillController::handle_change_file`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileOutcome {
    /// The file's media type is not accepted. Nothing was sent.
    Rejected { media_type: String },
    /// The file was uploaded and the bill now exists on the store.
    Uploaded { file_url: String, bill_id: String },
}

pub fn is_accepted(media_type: &str) -> bool {
    ACCEPTED_MEDIA_TYPES.contains(&media_type)
}

/// Gates `file` on its media type and, if accepted, builds the upload payload stamped with
/// `email`.
pub fn check_file(file: &SelectedFile, email: &str) -> FileCheck {
    if !is_accepted(file.media_type()) {
        return FileCheck::Rejected {
            media_type: file.media_type().to_string(),
        };
    }
    FileCheck::Upload(UploadForm {
        file_name: file.file_name().to_string(),
        media_type: file.media_type().to_string(),
        bytes: file.bytes().to_vec(),
        email: email.to_string(),
    })
}

/// Records a successful upload in the draft.
pub fn apply_upload(mut draft: Draft, created: &Created, file_name: &str) -> Draft {
    draft.file_url = Some(created.file_url().to_string());
    draft.bill_id = Some(created.key().to_string());
    draft.file_name = Some(file_name.to_string());
    draft
}

/// Reads the submitted form into the draft and stamps the session email.
pub fn fill_form(mut draft: Draft, form: BillForm, email: &str) -> Draft {
    draft.form = form;
    draft.email = Some(email.to_string());
    draft
}

/// Builds the update payload for `draft`.
///
/// # Errors
///
/// - Returns an error if no proof file has been uploaded, since the bill does not exist yet.
pub fn build_submission(draft: &Draft) -> Res<UpdateRequest> {
    ensure!(
        draft.is_uploaded(),
        "A proof file must be uploaded before the bill can be submitted"
    );
    let email = draft.email().unwrap_or_default();
    Ok(UpdateRequest {
        selector: draft.bill_id().unwrap_or_default().to_string(),
        data: NewBill::from_draft(draft, email),
    })
}

/// The effects of a successful submission.
pub fn submitted() -> Vec<Effect> {
    vec![Effect::Navigate(Route::Bills)]
}

/// The controller of the new-bill page. It exclusively owns the page's `Draft`.
pub struct NewBillController {
    store: Arc<dyn Store>,
    surface: Box<dyn Surface>,
    session: Arc<dyn Session>,
    draft: Draft,
}

impl NewBillController {
    pub fn new(store: Arc<dyn Store>, surface: Box<dyn Surface>, session: Arc<dyn Session>) -> Self {
        Self {
            store,
            surface,
            session,
            draft: Draft::new(),
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Handles the selection of a proof file. Files that are not accepted images are rejected
    /// without any call to the store. Accepted files are uploaded together with the session email
    /// and the returned file URL and bill identifier are stored in the draft.
    ///
    /// # Errors
    ///
    /// - Returns an `ErrorType::Session` error if nobody is logged in.
    /// - Returns an `ErrorType::Transport` error if the upload fails. The draft is left unchanged.
    pub async fn handle_change_file(&mut self, file: SelectedFile) -> Result<FileOutcome> {
        let user = self.session.user().pub_result(ErrorType::Session)?;
        let form = match check_file(&file, user.email()) {
            FileCheck::Rejected { media_type } => {
                debug!("Rejected proof file '{}' of type {media_type}", file.file_name());
                return Ok(FileOutcome::Rejected { media_type });
            }
            FileCheck::Upload(form) => form,
        };

        let file_name = form.file_name().to_string();
        let created = match self.store.create(form).await {
            Ok(created) => created,
            Err(e) => {
                let e = Error::new(
                    ErrorType::Transport,
                    e.context("Unable to upload the proof file"),
                );
                error!("{e}");
                return Err(e);
            }
        };

        debug!("Uploaded '{file_name}' as bill '{}'", created.key());
        self.draft = apply_upload(std::mem::take(&mut self.draft), &created, &file_name);
        Ok(FileOutcome::Uploaded {
            file_url: created.file_url,
            bill_id: created.key,
        })
    }

    /// Handles the submission of the form. The fields are read into the draft, which is then sent
    /// to the store as an update of the bill created by the upload. On success the surface
    /// navigates back to the bills page.
    ///
    /// # Errors
    ///
    /// - Returns an `ErrorType::Session` error if nobody is logged in.
    /// - Returns an `ErrorType::Precondition` error if no proof file has been uploaded. Nothing is
    ///   sent to the store.
    /// - Returns an `ErrorType::Transport` error if the update fails. No navigation happens.
    pub async fn handle_submit(&mut self, form: BillForm) -> Result<Bill> {
        let user = self.session.user().pub_result(ErrorType::Session)?;
        self.draft = fill_form(std::mem::take(&mut self.draft), form, user.email());
        let request = build_submission(&self.draft).pub_result(ErrorType::Precondition)?;

        let bill = self
            .store
            .update(request)
            .await
            .context("Unable to submit the bill")
            .pub_result(ErrorType::Transport)
            .inspect_err(|e| error!("{e}"))?;

        apply(self.surface.as_mut(), submitted());
        Ok(bill)
    }
}
