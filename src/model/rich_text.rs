// src/model/rich_text.rs
//! Rich text segments composing write payloads such as comment bodies.

use serde_json::{json, Value};

/// One segment of a rich text body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RichTextSegment {
    Text { content: String },
    Mention { user_id: String },
}

impl RichTextSegment {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    pub fn mention(user_id: impl Into<String>) -> Self {
        Self::Mention {
            user_id: user_id.into(),
        }
    }

    /// Wire form expected by the create-comment and page endpoints.
    pub fn to_api_value(&self) -> Value {
        match self {
            Self::Text { content } => json!({
                "type": "text",
                "text": { "content": content }
            }),
            Self::Mention { user_id } => json!({
                "type": "mention",
                "mention": { "type": "user", "user": { "id": user_id } }
            }),
        }
    }

    /// Reads a segment back from an API rich text item.
    ///
    /// Mentions of anything other than a user are not representable and
    /// come back as their plain text.
    pub fn from_api_value(item: &Value) -> Option<Self> {
        match item.get("type").and_then(Value::as_str)? {
            "text" => item
                .pointer("/text/content")
                .and_then(Value::as_str)
                .map(Self::text),
            "mention" => match item.pointer("/mention/user/id").and_then(Value::as_str) {
                Some(user_id) => Some(Self::mention(user_id)),
                None => item.get("plain_text").and_then(Value::as_str).map(Self::text),
            },
            _ => item.get("plain_text").and_then(Value::as_str).map(Self::text),
        }
    }
}

/// Serializes a segment list into a `rich_text` array.
pub fn to_api_array(segments: &[RichTextSegment]) -> Value {
    Value::Array(segments.iter().map(RichTextSegment::to_api_value).collect())
}
