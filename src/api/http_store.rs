//! Implements the `Store` trait over HTTP using `reqwest`.

use crate::api::{Created, Store, UpdateRequest, UploadForm};
use crate::model::Bill;
use crate::Res;
use anyhow::{anyhow, bail, Context};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::trace;
use url::Url;

/// The collection name on the bills API.
const BILLS: &str = "bills";

/// Implements the `Store` trait against the bills API. Requests carry the session's bearer token
/// when there is one.
pub struct HttpStore {
    client: reqwest::Client,
    base: Url,
    jwt: Option<String>,
}

impl HttpStore {
    pub fn new(api_url: &str, jwt: Option<String>) -> Res<Self> {
        // Without a trailing slash, `Url::join` would replace the last path segment.
        let with_slash = if api_url.ends_with('/') {
            api_url.to_string()
        } else {
            format!("{api_url}/")
        };
        let base = Url::parse(&with_slash)
            .with_context(|| format!("Invalid bills API URL '{api_url}'"))?;
        Ok(Self {
            client: reqwest::Client::new(),
            base,
            jwt,
        })
    }

    fn url(&self, path: &str) -> Res<Url> {
        self.base
            .join(path)
            .with_context(|| format!("Unable to build a URL for '{path}'"))
    }

    /// The URL of one bill. The id is a single path segment, so `/`, `?` and `#` in it are
    /// percent-encoded.
    fn bill_url(&self, id: &str) -> Res<Url> {
        let mut url = self.url(BILLS)?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("The bills API URL '{}' cannot have a path", self.base))?
            .push(id);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.jwt {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait::async_trait]
impl Store for HttpStore {
    async fn list(&self) -> Res<Vec<Bill>> {
        let url = self.url(BILLS)?;
        trace!("GET {url}");
        let response = self
            .authorize(self.client.get(url))
            .send()
            .await
            .context("Failed to send the list request")?;
        read_json(response).await
    }

    async fn select(&self, id: &str) -> Res<Bill> {
        let url = self.bill_url(id)?;
        trace!("GET {url}");
        let response = self
            .authorize(self.client.get(url))
            .send()
            .await
            .context("Failed to send the select request")?;
        read_json(response).await
    }

    async fn create(&self, form: UploadForm) -> Res<Created> {
        let url = self.url(BILLS)?;
        trace!("POST {url} with {} ({})", form.file_name, form.media_type);
        let file = Part::bytes(form.bytes)
            .file_name(form.file_name)
            .mime_str(&form.media_type)
            .context("Invalid media type for the proof file")?;
        let multipart = Form::new().part("file", file).text("email", form.email);
        let response = self
            .authorize(self.client.post(url))
            .multipart(multipart)
            .send()
            .await
            .context("Failed to send the create request")?;
        read_json(response).await
    }

    async fn update(&self, request: UpdateRequest) -> Res<Bill> {
        let url = self.bill_url(&request.selector)?;
        trace!("PATCH {url}");
        let response = self
            .authorize(self.client.patch(url))
            .json(&request.data)
            .send()
            .await
            .context("Failed to send the update request")?;
        read_json(response).await
    }
}

/// Parses a successful response as JSON. A failed response becomes an error whose message starts
/// with `Erreur <status>` and carries the server's `message` field when it has one.
async fn read_json<T>(response: Response) -> Res<T>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        match server_message(&body) {
            Some(message) => bail!("Erreur {}: {message}", status.as_u16()),
            None => bail!("Erreur {}", status.as_u16()),
        }
    }
    response
        .json::<T>()
        .await
        .context("Failed to parse the bills API response")
}

fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(|m| m.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_keep_base_path() {
        let store = HttpStore::new("http://localhost:5678/api", None).unwrap();
        assert_eq!(
            store.url(BILLS).unwrap().as_str(),
            "http://localhost:5678/api/bills"
        );
        assert_eq!(
            store.bill_url("1234").unwrap().as_str(),
            "http://localhost:5678/api/bills/1234"
        );
    }

    #[test]
    fn test_bill_url_escapes_id() {
        let store = HttpStore::new("http://localhost:5678", None).unwrap();
        assert_eq!(
            store.bill_url("a/b?c#d").unwrap().as_str(),
            "http://localhost:5678/bills/a%2Fb%3Fc%23d"
        );
    }

    #[test]
    fn test_invalid_url() {
        assert!(HttpStore::new("not a url", None).is_err());
    }

    #[test]
    fn test_server_message() {
        assert_eq!(
            server_message(r#"{"message":"bill not found"}"#),
            Some("bill not found".to_string())
        );
        assert_eq!(server_message("<html>oops</html>"), None);
        assert_eq!(server_message(r#"{"error":1}"#), None);
    }
}
