//! Implements the `Store` trait using in-memory data.
//!
//! Note: this is compiled even in the "production" version of this app so that we can run the whole
//! app, top-to-bottom, without a bills API.

use crate::api::{Created, Store, UpdateRequest, UploadForm};
use crate::model::{Bill, RawText};
use crate::Res;
use anyhow::{bail, Context};
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::trace;
use uuid::Uuid;

/// Where uploaded proof files are said to be served from.
pub(crate) const FILE_HOST: &str = "https://localhost:3456";

/// An implementation of the `Store` trait that holds bills in memory and, by default, is seeded
/// with some existing bills.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub(crate) bills: Mutex<Vec<Bill>>,
}

impl MemoryStore {
    pub fn new(bills: Vec<Bill>) -> Self {
        Self {
            bills: Mutex::new(bills),
        }
    }

    /// Creates a store seeded with the bills from this module.
    pub fn seeded() -> Res<Self> {
        Ok(Self::new(seed_bills()?))
    }

    /// A copy of the bills currently held.
    pub async fn snapshot(&self) -> Vec<Bill> {
        self.bills.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn list(&self) -> Res<Vec<Bill>> {
        trace!("list");
        Ok(self.bills.lock().await.clone())
    }

    async fn select(&self, id: &str) -> Res<Bill> {
        trace!("select {id}");
        self.bills
            .lock()
            .await
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .with_context(|| format!("Erreur 404: bill '{id}' not found"))
    }

    async fn create(&self, form: UploadForm) -> Res<Created> {
        trace!("create for {} ({})", form.file_name, form.media_type);
        let key = Uuid::new_v4().simple().to_string();
        let file_url = format!("{FILE_HOST}/images/{}", form.file_name);
        let bill = Bill {
            id: key.clone(),
            email: form.email,
            file_url: Some(file_url.clone()),
            file_name: Some(form.file_name),
            status: "pending".to_string(),
            ..Default::default()
        };
        self.bills.lock().await.push(bill);
        Ok(Created { file_url, key })
    }

    async fn update(&self, request: UpdateRequest) -> Res<Bill> {
        trace!("update {}", request.selector);
        let mut bills = self.bills.lock().await;
        let bill = match bills.iter_mut().find(|b| b.id == request.selector) {
            Some(bill) => bill,
            None => bail!("Erreur 404: bill '{}' not found", request.selector),
        };
        let data = request.data;
        bill.email = data.email;
        bill.expense_type = data.expense_type;
        bill.name = data.name;
        bill.amount = data.amount.map(Decimal::from);
        bill.date = RawText::from(data.date);
        bill.vat = RawText::from(data.vat);
        bill.pct = Some(Decimal::from(data.pct));
        bill.commentary = data.commentary;
        bill.file_url = data.file_url.or(bill.file_url.take());
        bill.file_name = data.file_name.or(bill.file_name.take());
        bill.status = data.status.to_string();
        Ok(bill.clone())
    }
}

/// Parses the seed data from this module.
fn seed_bills() -> Res<Vec<Bill>> {
    serde_json::from_str(SEED_BILLS).context("Unable to parse the seed bills")
}

/// Seed bill data.
const SEED_BILLS: &str = r##"[
  {
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
  },
  {
    "id": "BeKy5Mo4jkmdfPGYpTxZ",
    "vat": "",
    "amount": 100,
    "name": "test1",
    "fileName": "1592770761.jpeg",
    "commentary": "plop",
    "pct": 20,
    "type": "Transports",
    "email": "a@a",
    "fileUrl": "https://localhost:3456/images/1592770761.jpeg",
    "date": "2001-01-01",
    "status": "refused",
    "commentAdmin": "en fait non"
  },
  {
    "id": "UIUZtnPQvnbFnB0ozvJh",
    "name": "test3",
    "email": "a@a",
    "type": "Services en ligne",
    "vat": "60",
    "pct": 20,
    "commentAdmin": "bon bah d'accord",
    "amount": 300,
    "status": "accepted",
    "date": "2003-03-03",
    "commentary": "",
    "fileName": "facture-client-php-exportee-dans-document-pdf-enregistre-sur-disque-dur.png",
    "fileUrl": "https://localhost:3456/images/facture-client-php-exportee-dans-document-pdf-enregistre-sur-disque-dur.png"
  },
  {
    "id": "qcCK3SzECmaZAGRrHjaC",
    "status": "refused",
    "pct": 20,
    "amount": 200,
    "email": "a@a",
    "name": "test2",
    "vat": "40",
    "fileName": "preview-facture-free-201801-pdf-1.jpg",
    "date": "2002-02-02",
    "commentAdmin": "pas la bonne facture",
    "commentary": "test2",
    "type": "Restaurants et bars",
    "fileUrl": "https://localhost:3456/images/preview-facture-free-201801-pdf-1.jpg"
  }
]"##;
