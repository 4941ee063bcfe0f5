//! The remote collection of bills and the ways of reaching it.
//!
//! Controllers only see the `Store` trait. `HttpStore` talks to the bills API over HTTP and
//! `MemoryStore` holds bills in memory so that the whole program can run without a server.

mod http_store;
mod memory_store;

pub use http_store::HttpStore;
pub use memory_store::MemoryStore;

use crate::error::{ErrorType, IntoResult};
use crate::model::{Bill, NewBill};
use crate::session::Session;
use crate::{Config, Res, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// When this environment variable is set and non-empty, the program uses `MemoryStore`.
pub const TEST_MODE_ENV: &str = "BILLED_IN_TEST_MODE";

/// The collection-style interface over bills. Each call may fail with an error whose message is
/// the only available diagnostic, e.g. `Erreur 404`.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// All bills visible to the session, in the order the store returns them.
    async fn list(&self) -> Res<Vec<Bill>>;

    /// A single bill by its identifier.
    async fn select(&self, id: &str) -> Res<Bill>;

    /// Uploads a proof file, creating the bill that will later be completed by `update`.
    async fn create(&self, form: UploadForm) -> Res<Created>;

    /// Attaches the descriptive fields to the bill identified by `request.selector`.
    async fn update(&self, request: UpdateRequest) -> Res<Bill>;
}

/// The multipart payload of a `create` call: the binary proof file and the acting user's email.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UploadForm {
    pub(crate) file_name: String,
    pub(crate) media_type: String,
    pub(crate) bytes: Vec<u8>,
    pub(crate) email: String,
}

impl UploadForm {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// The response to a successful `create` call.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Created {
    pub(crate) file_url: String,
    /// The identifier of the newly created bill.
    pub(crate) key: String,
}

impl Created {
    pub fn new(file_url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            file_url: file_url.into(),
            key: key.into(),
        }
    }

    pub fn file_url(&self) -> &str {
        &self.file_url
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

/// The payload of an `update` call.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct UpdateRequest {
    pub(crate) selector: String,
    pub(crate) data: NewBill,
}

impl UpdateRequest {
    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn data(&self) -> &NewBill {
        &self.data
    }
}

/// Selects which `Store` implementation is used.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    #[default]
    Http,
    Test,
}

impl Mode {
    /// Returns `Mode::Test` when `BILLED_IN_TEST_MODE` is set and non-empty.
    pub fn from_env() -> Self {
        match std::env::var(TEST_MODE_ENV) {
            Ok(value) if !value.is_empty() => Mode::Test,
            _ => Mode::Http,
        }
    }
}

/// Creates the `Store` for `mode`. The HTTP store is authorized with the session's token, if any.
pub async fn store(config: &Config, session: &dyn Session, mode: Mode) -> Result<Arc<dyn Store>> {
    match mode {
        Mode::Http => {
            debug!("Using the bills API at {}", config.api_url());
            let store = HttpStore::new(config.api_url(), session.jwt()).pub_result(ErrorType::Config)?;
            Ok(Arc::new(store))
        }
        Mode::Test => {
            debug!("Using the in-memory bill store");
            let store = MemoryStore::seeded().pub_result(ErrorType::Config)?;
            Ok(Arc::new(store))
        }
    }
}
