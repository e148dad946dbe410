// src/api/pagination.rs
//! Cursor pagination over list and query endpoints.

use super::{ensure_success, ApiRequest, NotionTransport};
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::Result;
use serde::Deserialize;
use serde_json::Value;
use std::future::Future;

/// One page of a paginated list response.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// Drives `fetch_fn` from the first page to the last, feeding each reply's
/// `next_cursor` into the next call.
///
/// Stops when `has_more` is false or the cursor is missing. Any error aborts
/// the loop and the items gathered so far are dropped.
pub async fn fetch_all_pages<T, F, Fut>(mut fetch_fn: F) -> Result<Vec<T>>
where
    F: FnMut(usize, Option<String>) -> Fut,
    Fut: Future<Output = Result<PaginatedResponse<T>>>,
{
    let mut all_items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0u32;

    loop {
        let response = fetch_fn(NOTION_API_PAGE_SIZE, cursor).await?;

        let has_more = response.has_more;
        cursor = response.next_cursor;
        all_items.extend(response.results);
        pages_fetched += 1;

        if !has_more || cursor.is_none() {
            break;
        }
    }

    log::debug!(
        "Fetched {} items over {} page(s)",
        all_items.len(),
        pages_fetched
    );
    Ok(all_items)
}

/// Collects every `results` item of a paginated endpoint, in server order.
///
/// `request` is the first-page request; its body (for POST queries) is kept
/// on every page and the cursor is merged into it.
pub async fn paginate(transport: &dyn NotionTransport, request: ApiRequest) -> Result<Vec<Value>> {
    fetch_all_pages(|page_size, cursor| {
        let request = request.clone().with_cursor(page_size, cursor);
        async move {
            let endpoint = request.endpoint.clone();
            let reply = transport.request(request).await?;
            let body = ensure_success(&endpoint, reply)?;
            Ok(serde_json::from_value::<PaginatedResponse<Value>>(body)?)
        }
    })
    .await
}
