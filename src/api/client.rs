// src/api/client.rs
//! HTTP transport for the Notion API.
//!
//! A thin wrapper around reqwest: authentication headers, URL joining and
//! body decoding. No retries and no interpretation of the payload.

use super::{ApiReply, ApiRequest, HttpMethod, NotionTransport};
use crate::constants::{NOTION_API_BASE_URL, NOTION_API_VERSION};
use crate::error::{AppError, Result};
use crate::types::ApiKey;
use reqwest::{header, Client};
use serde_json::Value;
use url::Url;

#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: Url,
}

impl NotionHttpClient {
    /// Creates a client for the public Notion API.
    pub fn new(api_key: &ApiKey) -> Result<Self> {
        Self::with_base_url(api_key, NOTION_API_BASE_URL)
    }

    /// Creates a client against another base URL, e.g. a local mock server.
    pub fn with_base_url(api_key: &ApiKey, base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        // `Url::join` replaces the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self { client, base_url })
    }

    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        let mut auth_value = header::HeaderValue::from_str(&auth_header).map_err(|e| {
            AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
        })?;
        auth_value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth_value);

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_API_VERSION),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }
}

#[async_trait::async_trait]
impl NotionTransport for NotionHttpClient {
    async fn request(&self, request: ApiRequest) -> Result<ApiReply> {
        let url = self.base_url.join(&request.endpoint.path())?;
        log::debug!("{} {}", request.method, url);

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Patch => self.client.patch(url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        log::debug!(
            "{} {} -> {} ({} bytes)",
            request.method,
            request.endpoint,
            status,
            text.len()
        );

        Ok(ApiReply::new(status, decode_body(text)))
    }
}

/// Parses a reply body as JSON, keeping non-JSON bodies as a string value
/// so error pages survive into `RequestFailed`.
fn decode_body(text: String) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(_) => Value::String(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key() -> ApiKey {
        ApiKey::new("secret_abcdefghijklmnopqrstuvwxyz0123456789").unwrap()
    }

    #[test]
    fn base_url_always_joins_below_version_prefix() {
        let client = NotionHttpClient::with_base_url(&key(), "http://localhost:9000/v1").unwrap();
        assert_eq!(
            client.base_url.join("users").unwrap().as_str(),
            "http://localhost:9000/v1/users"
        );

        let client = NotionHttpClient::new(&key()).unwrap();
        assert_eq!(
            client.base_url.join("comments").unwrap().as_str(),
            "https://api.notion.com/v1/comments"
        );
    }

    #[test]
    fn bodies_decode_as_json_or_text() {
        assert_eq!(decode_body("{\"ok\":true}".into()), json!({"ok": true}));
        assert_eq!(decode_body("   ".into()), Value::Null);
        assert_eq!(
            decode_body("Bad gateway".into()),
            Value::String("Bad gateway".into())
        );
    }
}
