use crate::model::{ExpenseType, Status};
use crate::utils;
use serde::{Deserialize, Serialize};

/// Default VAT percentage applied when the form leaves it blank.
pub const DEFAULT_PCT: u32 = 20;

/// The raw values of the new-bill form fields, exactly as entered.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BillForm {
    pub expense_type: String,
    pub name: String,
    pub date: String,
    pub amount: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

/// The in-progress bill being authored on the new-bill page.
///
/// `file_url`, `file_name` and `bill_id` start as `None` and are only set once the proof file has
/// been uploaded. A draft without a `bill_id` cannot be submitted.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Draft {
    pub(crate) form: BillForm,
    pub(crate) email: Option<String>,
    pub(crate) file_url: Option<String>,
    pub(crate) file_name: Option<String>,
    pub(crate) bill_id: Option<String>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &BillForm {
        &self.form
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn file_url(&self) -> Option<&str> {
        self.file_url.as_deref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn bill_id(&self) -> Option<&str> {
        self.bill_id.as_deref()
    }

    /// Whether the proof file has been uploaded and the bill has an identity.
    pub fn is_uploaded(&self) -> bool {
        self.bill_id.is_some()
    }
}

/// The descriptive fields attached to an already-created bill when the form is submitted.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    pub(crate) email: String,
    #[serde(rename = "type")]
    pub(crate) expense_type: ExpenseType,
    pub(crate) name: String,
    pub(crate) amount: Option<i64>,
    pub(crate) date: String,
    pub(crate) vat: String,
    pub(crate) pct: u32,
    pub(crate) commentary: String,
    pub(crate) file_url: Option<String>,
    pub(crate) file_name: Option<String>,
    pub(crate) status: Status,
}

impl NewBill {
    /// Builds the submission record from the form values, the session email and the upload
    /// results held by `draft`. The amount keeps only its integer part and a blank or
    /// non-numeric `pct` falls back to `DEFAULT_PCT`.
    pub(crate) fn from_draft(draft: &Draft, email: impl Into<String>) -> Self {
        let form = &draft.form;
        Self {
            email: email.into(),
            expense_type: ExpenseType::from(form.expense_type.as_str()),
            name: form.name.clone(),
            amount: utils::parse_int(&form.amount),
            date: form.date.clone(),
            vat: form.vat.clone(),
            pct: utils::parse_int(&form.pct)
                .and_then(|p| u32::try_from(p).ok())
                .unwrap_or(DEFAULT_PCT),
            commentary: form.commentary.clone(),
            file_url: draft.file_url.clone(),
            file_name: draft.file_name.clone(),
            status: Status::Pending,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn expense_type(&self) -> &ExpenseType {
        &self.expense_type
    }

    pub fn amount(&self) -> Option<i64> {
        self.amount
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn pct(&self) -> u32 {
        self.pct
    }

    pub fn file_url(&self) -> Option<&str> {
        self.file_url.as_deref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn status(&self) -> Status {
        self.status
    }
}

/// A proof file picked by the user. `path` is the value of the file input, which may be a full
/// path on any platform. Only its last segment is kept as the file name.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SelectedFile {
    path: String,
    media_type: String,
    bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(path: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        utils::file_name_from_path(&self.path)
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> BillForm {
        BillForm {
            expense_type: "Transports".to_string(),
            name: "Vol Paris Londres".to_string(),
            date: "2022-04-22".to_string(),
            amount: "348.90".to_string(),
            vat: "70".to_string(),
            pct: "".to_string(),
            commentary: "".to_string(),
        }
    }

    #[test]
    fn test_new_bill_from_draft() {
        let draft = Draft {
            form: form(),
            email: Some("a@a".to_string()),
            file_url: Some("https://localhost:3456/images/test.jpg".to_string()),
            file_name: Some("test.jpg".to_string()),
            bill_id: Some("1234".to_string()),
        };
        let bill = NewBill::from_draft(&draft, "a@a");
        assert_eq!(bill.email(), "a@a");
        assert_eq!(bill.expense_type(), &ExpenseType::Transports);
        assert_eq!(bill.amount(), Some(348));
        assert_eq!(bill.pct(), DEFAULT_PCT);
        assert_eq!(bill.status(), Status::Pending);
        assert_eq!(bill.file_name(), Some("test.jpg"));
    }

    #[test]
    fn test_new_bill_serializes_in_store_shape() {
        let mut draft = Draft::new();
        draft.form = form();
        draft.form.pct = "10".to_string();
        let bill = NewBill::from_draft(&draft, "a@a");
        let json = serde_json::to_value(&bill).unwrap();
        assert_eq!(json["type"], "Transports");
        assert_eq!(json["pct"], 10);
        assert_eq!(json["status"], "pending");
        assert_eq!(json["fileUrl"], serde_json::Value::Null);
    }

    #[test]
    fn test_selected_file_name() {
        let file = SelectedFile::new("C:\\fakepath\\ticket.png", "image/png", vec![1, 2, 3]);
        assert_eq!(file.file_name(), "ticket.png");
        assert_eq!(file.bytes().len(), 3);
    }
}
