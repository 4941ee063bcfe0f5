//! Configuration file handling for billed.
//!
//! The configuration file is stored at `$BILLED_HOME/config.json` and holds the address of the
//! bills API and, optionally, where the session file lives.

use crate::{utils, Res};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "billed";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const SESSION_JSON: &str = "session.json";
pub const DEFAULT_API_URL: &str = "http://localhost:5678";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$BILLED_HOME` and from there it loads `$BILLED_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    session_path: PathBuf,
}

impl Config {
    /// Creates the home directory and writes an initial `config.json` using `api_url`, along with
    /// an empty session file.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the billed home, e.g. `$HOME/billed`
    /// - `api_url` - The base URL of the bills API, e.g. `http://localhost:5678`
    ///
    /// # Errors
    /// - Returns an error if any file operations fail or if `api_url` is not a URL.
    pub async fn create(dir: impl Into<PathBuf>, api_url: &str) -> Res<Self> {
        url::Url::parse(api_url).with_context(|| format!("Invalid API URL '{api_url}'"))?;

        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the billed home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;
        let config_path = root.join(CONFIG_JSON);

        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            api_url: api_url.to_string(),
            session_path: None,
        };
        config_file.save(&config_path).await?;

        let session_path = resolve(&root, config_file.session_path());
        if !session_path.is_file() {
            utils::write(&session_path, "{}")
                .await
                .context("Unable to create the session file")?;
        }

        Ok(Self {
            root,
            config_path,
            config_file,
            session_path,
        })
    }

    /// Validates that `billed_home` and its config file exist, then loads the config file.
    pub async fn load(billed_home: impl Into<PathBuf>) -> Res<Self> {
        let maybe_relative = billed_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Billed Home is missing, run 'billed init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;
        let session_path = resolve(&root, config_file.session_path());

        Ok(Self {
            root,
            config_path,
            config_file,
            session_path,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn api_url(&self) -> &str {
        &self.config_file.api_url
    }

    /// The session file. A relative `session_path` in `config.json` is resolved against the home
    /// directory.
    pub fn session_path(&self) -> &Path {
        &self.session_path
    }
}

fn resolve(root: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() {
        return p;
    }
    root.join(p)
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "billed",
///   "config_version": 1,
///   "api_url": "http://localhost:5678",
///   "session_path": "session.json"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "billed"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Base URL of the bills API
    api_url: String,

    /// Path to the session file (optional, relative to the home directory or absolute)
    /// Defaults to $BILLED_HOME/session.json if not specified
    #[serde(skip_serializing_if = "Option::is_none")]
    session_path: Option<PathBuf>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            api_url: DEFAULT_API_URL.to_string(),
            session_path: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if it belongs to another app.
    async fn load(path: impl AsRef<Path>) -> Res<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)
            .await
            .with_context(|| format!("Failed to load config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    async fn save(&self, path: impl AsRef<Path>) -> Res<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    fn session_path(&self) -> PathBuf {
        self.session_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(SESSION_JSON))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("billed_home");

        let config = Config::create(&home_dir, "http://example.com:8080")
            .await
            .unwrap();

        assert_eq!("http://example.com:8080", config.api_url());
        assert!(config.config_path().is_file());
        assert_eq!(config.session_path(), config.root().join(SESSION_JSON));
        let session = utils::read(config.session_path()).await.unwrap();
        assert_eq!(session, "{}");
    }

    #[tokio::test]
    async fn test_config_load_after_create() {
        let dir = TempDir::new().unwrap();
        let created = Config::create(dir.path(), DEFAULT_API_URL).await.unwrap();
        let loaded = Config::load(dir.path()).await.unwrap();
        assert_eq!(created.root(), loaded.root());
        assert_eq!(DEFAULT_API_URL, loaded.api_url());
        assert_eq!(created.session_path(), loaded.session_path());
    }

    #[tokio::test]
    async fn test_config_create_rejects_bad_url() {
        let dir = TempDir::new().unwrap();
        assert!(Config::create(dir.path(), "not a url").await.is_err());
    }

    #[tokio::test]
    async fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path().join("nope")).await.unwrap_err();
        assert!(format!("{err:#}").contains("billed init"));
    }

    #[tokio::test]
    async fn test_config_load_missing_config_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("config file is missing"));
    }

    #[tokio::test]
    async fn test_config_file_session_path() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_JSON);
        let json = r#"{
            "app_name": "billed",
            "config_version": 1,
            "api_url": "http://localhost:5678",
            "session_path": "state/me.json"
        }"#;
        utils::write(&config_path, json).await.unwrap();

        let config = Config::load(dir.path()).await.unwrap();
        assert!(config.session_path().is_absolute());
        assert!(config.session_path().ends_with("state/me.json"));
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_JSON);
        let json = r#"{
            "app_name": "wrong_app",
            "config_version": 1,
            "api_url": "http://localhost:5678"
        }"#;
        utils::write(&config_path, json).await.unwrap();

        let result = ConfigFile::load(&config_path).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[tokio::test]
    async fn test_config_file_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.json");
        let original = ConfigFile {
            session_path: Some(PathBuf::from("/tmp/session.json")),
            ..Default::default()
        };
        original.save(&path).await.unwrap();
        let read = ConfigFile::load(&path).await.unwrap();
        assert_eq!(original, read);
    }

    #[test]
    fn test_config_file_serialization_omits_none_fields() {
        let json = serde_json::to_string(&ConfigFile::default()).unwrap();
        assert!(!json.contains("session_path"));
    }
}
