// src/lib.rs
//! notion-kanban library: reads, interprets and updates a Notion Kanban database.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `NotionErrorCode`, `ValidationError`
//! - **Configuration**: `KanbanConfig`, `CommandLineInput`
//! - **Transport**: `NotionTransport`, `NotionHttpClient`, `paginate`
//! - **Domain model**: `PropertyEnvelope`, `PropertyValue`, `DatabaseSchema`, `OptionTable`, `Record`
//! - **Interpretation**: `extract_property`, `RecordInterpreter`
//! - **Writes**: `MutationBuilder`, `mention_segments`
//! - **Board**: `NotionManager`, `Card`, `CardFilter`

pub mod api;
pub mod config;
pub mod constants;
mod error;
pub mod formatting;
pub mod interpret;
pub mod kanban;
pub mod model;
pub mod mutation;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode, Result};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, KanbanConfig};

// --- Transport ---
pub use crate::api::{
    ensure_success, paginate, ApiReply, ApiRequest, Endpoint, HttpMethod, NotionHttpClient,
    NotionManager, NotionTransport,
};

// --- Domain Model ---
pub use crate::model::{
    DatabaseSchema, FieldOptions, ObjectKind, OptionTable, PropertyEnvelope, PropertyType,
    PropertyValue, Record, RichTextSegment, SchemaProperty, SelectOption, UserSummary,
};
pub use crate::types::{
    well_known, ApiKey, DatabaseId, FieldKey, FieldRegistry, PageId, TrackedField,
};

// --- Interpretation and writes ---
pub use crate::interpret::{extract_property, RecordInterpreter, UserDirectory};
pub use crate::kanban::{filter_cards, sort_by_due_date, Card, CardFilter};
pub use crate::mutation::{comment_payload, mention_segments, MutationBuilder};
