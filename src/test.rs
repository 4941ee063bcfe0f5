//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::api::{Created, MemoryStore, Store, UpdateRequest, UploadForm};
use crate::model::{Bill, User, UserType};
use crate::routes::Route;
use crate::session::{MemorySession, Session, SessionFile};
use crate::view::{Modal, Page, Surface};
use crate::{Config, Res};
use anyhow::bail;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// The bills the `MemoryStore` is seeded with.
pub fn seed_bills() -> Vec<Bill> {
    MemoryStore::seeded().unwrap().bills.into_inner()
}

pub fn employee() -> User {
    User::new(UserType::Employee, "a@a")
}

/// A session in which `a@a` is logged in as an employee.
pub fn employee_session() -> Arc<dyn Session> {
    Arc::new(MemorySession::with_user(&employee()).unwrap())
}

/// Everything a `RecordingSurface` was asked to do.
#[derive(Debug, Default)]
struct Recorded {
    pages: Vec<Page>,
    routes: Vec<Route>,
    modals: Vec<Modal>,
}

/// A `Surface` that records what it is asked to do. Clones share the same record, so a test can
/// keep one clone and hand another to a controller.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    recorded: Arc<Mutex<Recorded>>,
}

impl RecordingSurface {
    pub fn pages(&self) -> Vec<Page> {
        self.recorded.lock().unwrap().pages.clone()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.recorded.lock().unwrap().routes.clone()
    }

    pub fn modals(&self) -> Vec<Modal> {
        self.recorded.lock().unwrap().modals.clone()
    }
}

impl Surface for RecordingSurface {
    fn render(&mut self, page: Page) {
        self.recorded.lock().unwrap().pages.push(page);
    }

    fn navigate(&mut self, route: Route) {
        self.recorded.lock().unwrap().routes.push(route);
    }

    fn open_modal(&mut self, modal: Modal) {
        self.recorded.lock().unwrap().modals.push(modal);
    }
}

/// A `Store` that wraps a `MemoryStore`, counts writes, remembers the last payloads and can be told
/// to fail any operation with a given message.
#[derive(Debug, Default)]
pub struct SpyStore {
    inner: MemoryStore,
    fail_list: Option<String>,
    fail_create: Option<String>,
    fail_update: Option<String>,
    create_calls: AtomicUsize,
    update_calls: AtomicUsize,
    last_upload: Mutex<Option<UploadForm>>,
    last_update: Mutex<Option<UpdateRequest>>,
}

impl SpyStore {
    pub fn new(bills: Vec<Bill>) -> Self {
        Self {
            inner: MemoryStore::new(bills),
            ..Default::default()
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_bills())
    }

    pub fn failing_list(mut self, message: &str) -> Self {
        self.fail_list = Some(message.to_string());
        self
    }

    pub fn failing_create(mut self, message: &str) -> Self {
        self.fail_create = Some(message.to_string());
        self
    }

    pub fn failing_update(mut self, message: &str) -> Self {
        self.fail_update = Some(message.to_string());
        self
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn last_upload(&self) -> Option<UploadForm> {
        self.last_upload.lock().unwrap().clone()
    }

    pub fn last_update(&self) -> Option<UpdateRequest> {
        self.last_update.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Store for SpyStore {
    async fn list(&self) -> Res<Vec<Bill>> {
        if let Some(message) = &self.fail_list {
            bail!("{message}");
        }
        self.inner.list().await
    }

    async fn select(&self, id: &str) -> Res<Bill> {
        self.inner.select(id).await
    }

    async fn create(&self, form: UploadForm) -> Res<Created> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_upload.lock().unwrap() = Some(form.clone());
        if let Some(message) = &self.fail_create {
            bail!("{message}");
        }
        self.inner.create(form).await
    }

    async fn update(&self, request: UpdateRequest) -> Res<Bill> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_update.lock().unwrap() = Some(request.clone());
        if let Some(message) = &self.fail_update {
            bail!("{message}");
        }
        self.inner.update(request).await
    }
}

/// Test environment that sets up a billed home directory with a Config and a logged-in session.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment in which `a@a` is logged in as an employee.
    pub async fn new() -> Self {
        let env = Self::logged_out().await;
        let mut session = SessionFile::load(env.config.session_path()).await.unwrap();
        session.login(&employee(), None).await.unwrap();
        env
    }

    /// Creates a test environment with an empty session.
    pub async fn logged_out() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("billed");
        let config = Config::create(&root, "http://localhost:5678")
            .await
            .unwrap();
        Self {
            temp_dir,
            config,
        }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// A directory for test files that lives as long as the environment.
    pub fn dir(&self) -> &std::path::Path {
        self.temp_dir.path()
    }
}
