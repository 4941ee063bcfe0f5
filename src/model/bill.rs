use crate::model::{ExpenseType, RawText};
use rust_decimal::Decimal;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

/// A bill as read from the remote store.
///
/// Every field is optional on the wire and may be `null`, e.g. a bill whose proof file was
/// uploaded but whose form was never submitted. `date` and `vat` are `RawText` because records
/// with malformed values in those fields exist and must still be listed.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Bill {
    #[serde(deserialize_with = "null_as_default")]
    pub(crate) id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub(crate) email: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub(crate) expense_type: ExpenseType,
    #[serde(deserialize_with = "null_as_default")]
    pub(crate) name: String,
    pub(crate) amount: Option<Decimal>,
    /// ISO-8601 date, e.g. `2004-04-04`, as stored. Never rewritten in place.
    pub(crate) date: RawText,
    pub(crate) vat: RawText,
    pub(crate) pct: Option<Decimal>,
    #[serde(deserialize_with = "null_as_default")]
    pub(crate) commentary: String,
    pub(crate) file_url: Option<String>,
    pub(crate) file_name: Option<String>,
    /// One of `pending`, `accepted` or `refused`, but kept raw so that unknown values pass
    /// through to the display unchanged.
    #[serde(deserialize_with = "null_as_default")]
    pub(crate) status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub(crate) comment_admin: String,
}

/// Reads `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Bill {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn expense_type(&self) -> &ExpenseType {
        &self.expense_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> Option<Decimal> {
        self.amount
    }

    pub fn date(&self) -> &RawText {
        &self.date
    }

    pub fn vat(&self) -> &RawText {
        &self.vat
    }

    pub fn pct(&self) -> Option<Decimal> {
        self.pct
    }

    pub fn commentary(&self) -> &str {
        &self.commentary
    }

    pub fn file_url(&self) -> Option<&str> {
        self.file_url.as_deref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn comment_admin(&self) -> &str {
        &self.comment_admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_store_record() {
        let json = r#"{
            "id": "47qAXb6fIm2zOKkLzMro",
            "vat": "80",
            "fileUrl": "https://localhost:3456/images/preview-facture-free-201801-pdf-1.jpg",
            "status": "pending",
            "type": "Hôtel et logement",
            "commentary": "séminaire billed",
            "name": "encore",
            "fileName": "preview-facture-free-201801-pdf-1.jpg",
            "date": "2004-04-04",
            "amount": 400,
            "commentAdmin": "ok",
            "email": "a@a",
            "pct": 20
        }"#;
        let bill: Bill = serde_json::from_str(json).unwrap();
        assert_eq!(bill.id(), "47qAXb6fIm2zOKkLzMro");
        assert_eq!(bill.expense_type(), &ExpenseType::Hotel);
        assert_eq!(bill.amount(), Some(Decimal::from(400)));
        assert_eq!(bill.pct(), Some(Decimal::from(20)));
        assert_eq!(bill.date().as_str(), "2004-04-04");
        assert_eq!(bill.vat().as_str(), "80");
        assert_eq!(bill.status(), "pending");
        assert_eq!(
            bill.file_name(),
            Some("preview-facture-free-201801-pdf-1.jpg")
        );
    }

    #[test]
    fn test_deserialize_malformed_record() {
        let json = r#"{ "id": "broken", "date": {}, "vat": 40, "fileUrl": null }"#;
        let bill: Bill = serde_json::from_str(json).unwrap();
        assert_eq!(bill.date().as_str(), "{}");
        assert_eq!(bill.vat().as_str(), "40");
        assert_eq!(bill.file_url(), None);
        assert_eq!(bill.amount(), None);
        assert_eq!(bill.status(), "");
    }

    #[test]
    fn test_deserialize_list_with_null_fields() {
        let json = r#"[
            { "id": "47qAXb6fIm2zOKkLzMro", "status": "pending", "date": "2004-04-04" },
            {
                "id": "abandoned",
                "email": "a@a",
                "status": "pending",
                "name": null,
                "type": null,
                "date": null,
                "vat": null,
                "amount": null,
                "pct": null,
                "commentary": null,
                "commentAdmin": null,
                "fileUrl": "https://localhost:3456/images/receipt.jpg",
                "fileName": "receipt.jpg"
            }
        ]"#;
        let bills: Vec<Bill> = serde_json::from_str(json).unwrap();
        assert_eq!(bills.len(), 2);
        let abandoned = &bills[1];
        assert_eq!(abandoned.id(), "abandoned");
        assert_eq!(abandoned.name(), "");
        assert_eq!(abandoned.expense_type(), &ExpenseType::default());
        assert_eq!(abandoned.date().as_str(), "");
        assert_eq!(abandoned.amount(), None);
        assert_eq!(abandoned.comment_admin(), "");
        assert_eq!(abandoned.file_name(), Some("receipt.jpg"));
    }
}
