// src/api/endpoint.rs
use crate::types::{DatabaseId, PageId};
use std::fmt;

/// Every Notion endpoint this crate talks to, rendered relative to the API base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Database(DatabaseId),
    DatabaseQuery(DatabaseId),
    Page(PageId),
    Pages,
    BlockChildren(PageId),
    User(String),
    Users,
    Comments,
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Database(id) => format!("databases/{}", id.to_dashed()),
            Endpoint::DatabaseQuery(id) => format!("databases/{}/query", id.to_dashed()),
            Endpoint::Page(id) => format!("pages/{}", id.to_dashed()),
            Endpoint::Pages => "pages".to_string(),
            Endpoint::BlockChildren(id) => format!("blocks/{}/children", id.to_dashed()),
            Endpoint::User(id) => format!("users/{}", id),
            Endpoint::Users => "users".to_string(),
            Endpoint::Comments => "comments".to_string(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
