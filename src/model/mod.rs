// src/model/mod.rs
//! Domain model: property envelopes and values, database schema, option
//! tables, rich text segments and interpreted records.

mod property;
mod record;
pub mod rich_text;
mod schema;

pub use property::{PropertyEnvelope, PropertyType, PropertyValue};
pub use record::{ObjectKind, Record};
pub use rich_text::RichTextSegment;
pub use schema::{DatabaseSchema, FieldOptions, OptionTable, SchemaProperty, SelectOption};

use serde::{Deserialize, Serialize};

/// A workspace member as listed by the users endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl UserSummary {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(crate::constants::UNKNOWN_NAME)
    }
}
