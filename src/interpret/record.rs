// src/interpret/record.rs
//! Normalization of raw page and comment objects into [`Record`]s.

use super::extract::{extract_property, plain_text};
use crate::constants::{BOT_AUTHOR_SUFFIX, UNKNOWN_NAME};
use crate::error::{AppError, Result};
use crate::model::{DatabaseSchema, ObjectKind, PropertyEnvelope, PropertyValue, Record};
use crate::types::{FieldKey, FieldRegistry, TrackedField};
use async_trait::async_trait;
use serde_json::Value;

/// Resolves user ids to display names.
///
/// Comment payloads written by integrations carry only the author id; the
/// interpreter asks a directory for the name in that case.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn user_name(&self, user_id: &str) -> Result<String>;
}

/// Interprets raw objects against a schema snapshot and a field registry.
pub struct RecordInterpreter<'a> {
    schema: &'a DatabaseSchema,
    fields: &'a FieldRegistry,
    users: &'a dyn UserDirectory,
}

impl<'a> RecordInterpreter<'a> {
    pub fn new(
        schema: &'a DatabaseSchema,
        fields: &'a FieldRegistry,
        users: &'a dyn UserDirectory,
    ) -> Self {
        Self {
            schema,
            fields,
            users,
        }
    }

    /// Dispatches on the object's own `object` tag.
    pub async fn interpret(&self, raw: &Value, for_display: bool) -> Result<Record> {
        let tag = raw.get("object").and_then(Value::as_str).unwrap_or_default();
        let kind = ObjectKind::from_tag(tag)
            .ok_or_else(|| AppError::UnsupportedObjectKind(tag.to_string()))?;

        match kind {
            ObjectKind::Page => Ok(self.interpret_page(raw, for_display)),
            ObjectKind::Comment => self.interpret_comment(raw).await,
        }
    }

    /// Element-wise interpretation, preserving input order. The first
    /// failure aborts the whole batch.
    pub async fn interpret_all(&self, raws: &[Value], for_display: bool) -> Result<Vec<Record>> {
        let mut records = Vec::with_capacity(raws.len());
        for raw in raws {
            records.push(self.interpret(raw, for_display).await?);
        }
        Ok(records)
    }

    fn interpret_page(&self, raw: &Value, for_display: bool) -> Record {
        let mut record = Record::new(ObjectKind::Page);
        copy_verbatim(&mut record, raw, &FieldKey::BASE);
        copy_verbatim(&mut record, raw, &FieldKey::PAGE_DEFAULTS);

        let properties = raw.get("properties");
        for tracked in self.fields.iter() {
            let value = match properties.and_then(|p| self.find_envelope(p, tracked)) {
                Some(envelope) => extract_property(&envelope, for_display),
                None => {
                    log::debug!(
                        "Tracked field '{}' ({}) not present on page",
                        tracked.key,
                        tracked.id
                    );
                    PropertyValue::Null
                }
            };
            record.insert(tracked.field_key(), value);
        }
        record
    }

    /// Finds the envelope of a tracked field: first under the column's
    /// current schema name, then by scanning for the stable id.
    fn find_envelope(&self, properties: &Value, tracked: &TrackedField) -> Option<PropertyEnvelope> {
        let by_name = self
            .schema
            .name_for_id(&tracked.id)
            .and_then(|name| properties.get(name))
            .filter(|raw| raw.get("id").and_then(Value::as_str) == Some(tracked.id.as_str()));

        let raw = by_name.or_else(|| {
            properties
                .as_object()?
                .values()
                .find(|raw| raw.get("id").and_then(Value::as_str) == Some(tracked.id.as_str()))
        })?;

        match PropertyEnvelope::from_json(raw) {
            Ok(envelope) => Some(envelope),
            Err(e) => {
                log::warn!("Ignoring malformed property '{}': {}", tracked.id, e);
                None
            }
        }
    }

    async fn interpret_comment(&self, raw: &Value) -> Result<Record> {
        let mut record = Record::new(ObjectKind::Comment);
        copy_verbatim(&mut record, raw, &FieldKey::BASE);

        let text = raw.get("rich_text").map(plain_text).unwrap_or_default();
        record.insert(FieldKey::CommentText, PropertyValue::Text(text));

        let author = raw.get("created_by");
        let author_id = author.and_then(|a| a.get("id")).and_then(Value::as_str);
        let author_name = author.and_then(|a| a.get("name")).and_then(Value::as_str);

        let name = match (author_name, author_id) {
            (Some(name), _) => name.to_string(),
            (None, Some(id)) => {
                let resolved = self.users.user_name(id).await?;
                format!("{}{}", resolved, BOT_AUTHOR_SUFFIX)
            }
            (None, None) => UNKNOWN_NAME.to_string(),
        };

        record.insert(FieldKey::AuthorId, PropertyValue::text_or_null(author_id));
        record.insert(FieldKey::AuthorName, PropertyValue::Text(name));
        Ok(record)
    }
}

fn copy_verbatim(record: &mut Record, raw: &Value, keys: &[FieldKey]) {
    for key in keys {
        let value = key
            .api_key()
            .and_then(|k| raw.get(k))
            .map(PropertyValue::from_json)
            .unwrap_or(PropertyValue::Null);
        record.insert(key.clone(), value);
    }
}
