// src/api/mod.rs
//! Notion API interaction.
//!
//! Everything above this module talks to a [`NotionTransport`], never to
//! HTTP directly. The production transport is [`NotionHttpClient`]; tests
//! script replies in memory.

pub mod client;
mod endpoint;
mod manager;
mod pagination;

pub use client::NotionHttpClient;
pub use endpoint::Endpoint;
pub use manager::NotionManager;
pub use pagination::{fetch_all_pages, paginate, PaginatedResponse};

use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionErrorCode, Result};
use notion_client::objects::error::Error as NotionError;
use serde_json::{json, Value};
use std::fmt;

/// The ability to exchange one request for one reply with the Notion API.
///
/// Non-2xx replies are returned, not raised; callers decide through
/// [`ensure_success`]. Only failures to get any reply at all are errors here.
#[async_trait::async_trait]
pub trait NotionTransport: Send + Sync {
    async fn request(&self, request: ApiRequest) -> Result<ApiReply>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub endpoint: Endpoint,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(endpoint: Endpoint) -> Self {
        Self {
            method: HttpMethod::Get,
            endpoint,
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(endpoint: Endpoint, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            endpoint,
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn patch(endpoint: Endpoint, body: Value) -> Self {
        Self {
            method: HttpMethod::Patch,
            endpoint,
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds paging parameters: in the JSON body for POST queries, in the
    /// query string otherwise.
    pub(crate) fn with_cursor(mut self, page_size: usize, cursor: Option<String>) -> Self {
        match self.method {
            HttpMethod::Post => {
                let mut body = match self.body.take() {
                    Some(Value::Object(map)) => map,
                    _ => serde_json::Map::new(),
                };
                body.insert("page_size".to_string(), json!(page_size));
                if let Some(cursor) = cursor {
                    body.insert("start_cursor".to_string(), json!(cursor));
                }
                self.body = Some(Value::Object(body));
            }
            HttpMethod::Get | HttpMethod::Patch => {
                self.query.push(("page_size".to_string(), page_size.to_string()));
                if let Some(cursor) = cursor {
                    self.query.push(("start_cursor".to_string(), cursor));
                }
            }
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: u16,
    pub body: Value,
}

impl ApiReply {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Unwraps a successful reply body, turning anything else into `RequestFailed`.
pub fn ensure_success(endpoint: &Endpoint, reply: ApiReply) -> Result<Value> {
    if reply.is_success() {
        return Ok(reply.body);
    }

    let code = serde_json::from_value::<NotionError>(reply.body.clone())
        .map(|e| NotionErrorCode::from_api_response(&e.code))
        .unwrap_or_else(|_| NotionErrorCode::from_http_status(reply.status));

    let body = match reply.body {
        Value::String(text) => text,
        other => other.to_string(),
    };
    log::error!(
        "Request to {} failed with status {}: {}",
        endpoint,
        reply.status,
        body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect::<String>()
    );

    Err(AppError::RequestFailed {
        endpoint: endpoint.path(),
        status: reply.status,
        code,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn post_cursor_merges_into_filter_body() {
        let request = ApiRequest::post(Endpoint::Users, json!({"filter": {"property": "x"}}))
            .with_cursor(100, Some("abc".into()));
        assert_eq!(
            request.body,
            Some(json!({"filter": {"property": "x"}, "page_size": 100, "start_cursor": "abc"}))
        );
        assert!(request.query.is_empty());
    }

    #[test]
    fn get_cursor_goes_to_query_string() {
        let request = ApiRequest::get(Endpoint::Comments)
            .with_query("block_id", "p1")
            .with_cursor(100, None);
        assert_eq!(
            request.query,
            vec![
                ("block_id".to_string(), "p1".to_string()),
                ("page_size".to_string(), "100".to_string()),
            ]
        );
        assert_eq!(request.body, None);
    }

    #[test]
    fn failures_keep_status_and_body() {
        let reply = ApiReply::new(
            404,
            json!({
                "object": "error",
                "status": 404,
                "code": "object_not_found",
                "message": "Could not find page",
                "request_id": "req_1"
            }),
        );
        let err = ensure_success(&Endpoint::Pages, reply).unwrap_err();
        match err {
            AppError::RequestFailed {
                status, code, body, ..
            } => {
                assert_eq!(status, 404);
                assert_eq!(code, NotionErrorCode::ObjectNotFound);
                assert!(body.contains("Could not find page"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unparseable_error_bodies_fall_back_to_http_status() {
        let reply = ApiReply::new(502, Value::String("<html>Bad gateway</html>".into()));
        let err = ensure_success(&Endpoint::Users, reply).unwrap_err();
        assert!(matches!(
            err,
            AppError::RequestFailed { code: NotionErrorCode::HttpStatus(502), ref body, .. }
                if body == "<html>Bad gateway</html>"
        ));
    }
}
