use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory with an initial `config.json` pointing at `api_url` and an empty
/// session.
///
/// # Arguments
/// - `billed_home` - The directory that will be the root of data directory, e.g. `$HOME/billed`
/// - `api_url` - The base URL of the bills API, e.g. `http://localhost:5678`
///
/// # Errors
/// - Returns an error if any file operations fail or if `api_url` is not a URL.
pub async fn init(billed_home: &Path, api_url: &str) -> Result<Out<()>> {
    let config = Config::create(billed_home, api_url)
        .await
        .context("Unable to create the data directory and configs")
        .pub_result(ErrorType::Config)?;
    Ok(format!(
        "Successfully created the billed directory and config at {}",
        config.root().display()
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("billed");
        let out = init(&home, "http://localhost:5678").await.unwrap();
        assert!(out.message().contains("Successfully created"));
        let config = Config::load(&home).await.unwrap();
        assert_eq!(config.api_url(), "http://localhost:5678");
    }

    #[tokio::test]
    async fn test_init_bad_url() {
        let dir = TempDir::new().unwrap();
        let err = init(dir.path(), "localhost").await.unwrap_err();
        assert_eq!(err.kind(), ErrorType::Config);
    }
}
