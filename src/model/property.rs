// src/model/property.rs
//! Property envelopes as the API sends them, and the normalized values
//! they are interpreted into.

use crate::constants::NOT_AVAILABLE;
use crate::error::AppError;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// The `type` discriminator of a property envelope.
///
/// Closed over the tags the interpreter understands; anything else is kept
/// verbatim in `Unsupported` so it can still be reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Title,
    RichText,
    Select,
    Status,
    MultiSelect,
    People,
    Date,
    Checkbox,
    Number,
    Url,
    Email,
    PhoneNumber,
    Files,
    Relation,
    Formula,
    Emoji,
    Rollup,
    CreatedBy,
    LastEditedBy,
    CreatedTime,
    LastEditedTime,
    UniqueId,
    Unsupported(String),
}

impl PropertyType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "title" => Self::Title,
            "rich_text" => Self::RichText,
            "select" => Self::Select,
            "status" => Self::Status,
            "multi_select" => Self::MultiSelect,
            "people" => Self::People,
            "date" => Self::Date,
            "checkbox" => Self::Checkbox,
            "number" => Self::Number,
            "url" => Self::Url,
            "email" => Self::Email,
            "phone_number" => Self::PhoneNumber,
            "files" => Self::Files,
            "relation" => Self::Relation,
            "formula" => Self::Formula,
            "emoji" => Self::Emoji,
            "rollup" => Self::Rollup,
            "created_by" => Self::CreatedBy,
            "last_edited_by" => Self::LastEditedBy,
            "created_time" => Self::CreatedTime,
            "last_edited_time" => Self::LastEditedTime,
            "unique_id" => Self::UniqueId,
            other => Self::Unsupported(other.to_string()),
        }
    }

    /// The Notion API tag for this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Title => "title",
            Self::RichText => "rich_text",
            Self::Select => "select",
            Self::Status => "status",
            Self::MultiSelect => "multi_select",
            Self::People => "people",
            Self::Date => "date",
            Self::Checkbox => "checkbox",
            Self::Number => "number",
            Self::Url => "url",
            Self::Email => "email",
            Self::PhoneNumber => "phone_number",
            Self::Files => "files",
            Self::Relation => "relation",
            Self::Formula => "formula",
            Self::Emoji => "emoji",
            Self::Rollup => "rollup",
            Self::CreatedBy => "created_by",
            Self::LastEditedBy => "last_edited_by",
            Self::CreatedTime => "created_time",
            Self::LastEditedTime => "last_edited_time",
            Self::UniqueId => "unique_id",
            Self::Unsupported(tag) => tag,
        }
    }

    /// Whether the schema for this type carries an option list.
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Select | Self::Status | Self::MultiSelect)
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single property as it appears in a page's `properties` map:
/// `{ "id": ..., "type": T, T: <payload> }`.
///
/// A missing or `null` payload is represented as `content: None`.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEnvelope {
    pub id: String,
    pub property_type: PropertyType,
    pub content: Option<Value>,
}

impl PropertyEnvelope {
    pub fn from_json(raw: &Value) -> Result<Self, AppError> {
        let tag = raw.get("type").and_then(Value::as_str).ok_or_else(|| {
            AppError::MalformedResponse("property envelope has no 'type' tag".to_string())
        })?;
        let id = raw
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let content = raw.get(tag).filter(|v| !v.is_null()).cloned();

        Ok(Self {
            id,
            property_type: PropertyType::from_tag(tag),
            content,
        })
    }
}

/// A normalized property value, ready for filtering, display or writes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    List(Vec<PropertyValue>),
    /// Structured payload passed through untouched (parent refs, icons, ...).
    Json(Value),
    /// The envelope's type tag has no interpretation rule.
    Unsupported { unsupported: String },
}

impl PropertyValue {
    /// Passthrough conversion for scalar JSON; objects and arrays stay JSON.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::Number(n.clone()),
            Value::String(s) => Self::Text(s.clone()),
            other => Self::Json(other.clone()),
        }
    }

    /// A string value, or null when absent.
    pub fn text_or_null(value: Option<&str>) -> Self {
        value.map_or(Self::Null, |s| Self::Text(s.to_string()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[PropertyValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// All text entries of a list value (or the value itself when it is text).
    pub fn texts(&self) -> Vec<&str> {
        match self {
            Self::Text(s) => vec![s.as_str()],
            Self::List(items) => items.iter().filter_map(PropertyValue::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "{}", NOT_AVAILABLE),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
            Self::List(items) => {
                let rendered: Vec<String> = items.iter().map(|i| i.to_string()).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            Self::Json(v) => write!(f, "{}", v),
            Self::Unsupported { unsupported } => write!(f, "<unsupported: {}>", unsupported),
        }
    }
}
