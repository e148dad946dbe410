// src/mutation.rs
//! Write payloads: option updates, card creation and comments with mentions.
//!
//! Every builder validates against the cached schema and option table, so a
//! bad field or option name fails here, before anything is sent.

use crate::error::{AppError, Result};
use crate::model::rich_text::to_api_array;
use crate::model::{DatabaseSchema, OptionTable, PropertyType, RichTextSegment, SchemaProperty};
use crate::types::{well_known, DatabaseId, FieldRegistry, PageId};
use serde_json::{json, Value};

pub struct MutationBuilder<'a> {
    schema: &'a DatabaseSchema,
    options: &'a OptionTable,
    fields: &'a FieldRegistry,
}

impl<'a> MutationBuilder<'a> {
    pub fn new(
        schema: &'a DatabaseSchema,
        options: &'a OptionTable,
        fields: &'a FieldRegistry,
    ) -> Self {
        Self {
            schema,
            options,
            fields,
        }
    }

    /// Resolves a tracked field key, or failing that a column name, to the
    /// column's current schema entry.
    pub fn resolve_field(&self, field: &str) -> Result<&'a SchemaProperty> {
        let by_key = self
            .fields
            .get(field)
            .and_then(|tracked| self.schema.property_by_id(&tracked.id));
        by_key
            .or_else(|| self.schema.property(field))
            .ok_or_else(|| AppError::UnknownField(field.to_string()))
    }

    /// `{"properties": {<column>: {"status"|"select": {"id", "name"}}}}`.
    ///
    /// The column is keyed by its current name; the option goes by id, with
    /// the canonical name alongside.
    pub fn option_update(&self, field: &str, option_name: &str) -> Result<Value> {
        let property = self.resolve_field(field)?;
        let (column, value) = self.option_property(property, option_name)?;
        Ok(json!({ "properties": { column: value } }))
    }

    /// Page creation body for a new card in `database_id`.
    pub fn card_creation(
        &self,
        database_id: &DatabaseId,
        title: &str,
        status: Option<&str>,
    ) -> Result<Value> {
        let title_property = self
            .schema
            .title_property()
            .ok_or_else(|| AppError::UnknownField(well_known::NAME.to_string()))?;

        let mut properties = serde_json::Map::new();
        properties.insert(
            title_property.name.clone(),
            json!({ "title": to_api_array(&[RichTextSegment::text(title)]) }),
        );

        if let Some(status) = status {
            let property = self.resolve_field(well_known::STATUS)?;
            let (column, value) = self.option_property(property, status)?;
            properties.insert(column, value);
        }

        Ok(json!({
            "parent": { "database_id": database_id.to_dashed() },
            "properties": properties,
        }))
    }

    fn option_property(
        &self,
        property: &SchemaProperty,
        option_name: &str,
    ) -> Result<(String, Value)> {
        if !matches!(
            property.property_type,
            PropertyType::Status | PropertyType::Select
        ) {
            return Err(AppError::NotAnOptionField {
                field: property.name.clone(),
                actual: property.property_type.to_string(),
            });
        }

        let option = self.options.resolve(&property.id, option_name)?;
        let tag = property.property_type.as_str();
        Ok((
            property.name.clone(),
            json!({ tag: { "id": option.id, "name": option.name } }),
        ))
    }
}

/// Splits `template` on `@` and interleaves one user mention per marker.
///
/// Text before the first marker is leading text. Markers beyond the supplied
/// ids are dropped and the surrounding text kept; surplus ids are ignored.
pub fn mention_segments(template: &str, user_ids: &[String]) -> Vec<RichTextSegment> {
    let mut parts = template.split('@');
    let mut segments = Vec::new();

    if let Some(leading) = parts.next().filter(|s| !s.is_empty()) {
        segments.push(RichTextSegment::text(leading));
    }

    let mut ids = user_ids.iter();
    let mut unfilled = 0;
    for part in parts {
        match ids.next() {
            Some(id) => segments.push(RichTextSegment::mention(id.as_str())),
            None => unfilled += 1,
        }
        if !part.is_empty() {
            segments.push(RichTextSegment::text(part));
        }
    }

    if unfilled > 0 {
        log::warn!(
            "Comment template has {} more '@' marker(s) than user ids; those are left out",
            unfilled
        );
    }
    let unused = ids.count();
    if unused > 0 {
        log::warn!("{} user id(s) had no '@' marker and were ignored", unused);
    }

    segments
}

/// `{"parent": {"page_id"}, "rich_text": [...]}` for the create-comment endpoint.
pub fn comment_payload(page_id: &PageId, segments: &[RichTextSegment]) -> Value {
    json!({
        "parent": { "page_id": page_id.to_dashed() },
        "rich_text": to_api_array(segments),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpret::extract_property;
    use crate::model::{PropertyEnvelope, PropertyValue};
    use pretty_assertions::assert_eq;

    fn schema() -> DatabaseSchema {
        DatabaseSchema::from_json(&json!({
            "properties": {
                "Statut": {
                    "id": "k%3FMm",
                    "type": "status",
                    "status": {"options": [
                        {"id": "8e60", "name": "À faire", "color": "default"},
                        {"id": "a087", "name": "Fait", "color": "green"}
                    ]}
                },
                "Équipe": {
                    "id": "rIvf",
                    "type": "select",
                    "select": {"options": [{"id": "2da7", "name": "Design"}]}
                },
                "Date d’échéance": {"id": "C%5C%3C%3A", "type": "date", "date": {}},
                "Nom": {"id": "title", "type": "title", "title": {}}
            }
        }))
        .unwrap()
    }

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn status_update_uses_option_id_under_current_column_name() {
        let (schema, fields) = (schema(), FieldRegistry::default());
        let options = OptionTable::from_schema(&schema);
        let builder = MutationBuilder::new(&schema, &options, &fields);

        let payload = builder.option_update(well_known::STATUS, "Fait").unwrap();
        assert_eq!(
            payload,
            json!({"properties": {"Statut": {"status": {"id": "a087", "name": "Fait"}}}})
        );

        let by_column = builder.option_update("Équipe", "Design").unwrap();
        assert_eq!(
            by_column,
            json!({"properties": {"Équipe": {"select": {"id": "2da7", "name": "Design"}}}})
        );
    }

    #[test]
    fn update_payload_decodes_back_to_the_option_name() {
        let (schema, fields) = (schema(), FieldRegistry::default());
        let options = OptionTable::from_schema(&schema);
        let builder = MutationBuilder::new(&schema, &options, &fields);

        for name in ["À faire", "Fait"] {
            let payload = builder.option_update(well_known::STATUS, name).unwrap();
            let envelope = PropertyEnvelope::from_json(&json!({
                "id": "k%3FMm",
                "type": "status",
                "status": payload["properties"]["Statut"]["status"].clone()
            }))
            .unwrap();
            assert_eq!(
                extract_property(&envelope, true),
                PropertyValue::Text(name.to_string())
            );
        }
    }

    #[test]
    fn invalid_targets_fail_locally() {
        let (schema, fields) = (schema(), FieldRegistry::default());
        let options = OptionTable::from_schema(&schema);
        let builder = MutationBuilder::new(&schema, &options, &fields);

        let err = builder.option_update(well_known::STATUS, "Bloqué").unwrap_err();
        assert_eq!(err.to_string(), "Option 'Bloqué' not found for field 'Statut'");
        assert!(err.is_local_validation());

        assert!(matches!(
            builder.option_update("priority", "High"),
            Err(AppError::UnknownField(_))
        ));
        assert!(matches!(
            builder.option_update(well_known::DUE_DATE, "Fait"),
            Err(AppError::NotAnOptionField { .. })
        ));
    }

    #[test]
    fn card_creation_resolves_status_like_updates() {
        let (schema, fields) = (schema(), FieldRegistry::default());
        let options = OptionTable::from_schema(&schema);
        let builder = MutationBuilder::new(&schema, &options, &fields);
        let db = DatabaseId::parse("122acdc2cc5880fa8643c616c6778bbb").unwrap();

        let payload = builder.card_creation(&db, "Nouvelle tâche", Some("À faire")).unwrap();
        assert_eq!(
            payload,
            json!({
                "parent": {"database_id": "122acdc2-cc58-80fa-8643-c616c6778bbb"},
                "properties": {
                    "Nom": {"title": [{"type": "text", "text": {"content": "Nouvelle tâche"}}]},
                    "Statut": {"status": {"id": "8e60", "name": "À faire"}}
                }
            })
        );

        let bare = builder.card_creation(&db, "Sans statut", None).unwrap();
        assert!(bare["properties"].get("Statut").is_none());

        assert!(builder.card_creation(&db, "x", Some("Inconnu")).is_err());
    }

    #[test]
    fn mentions_interleave_with_text() {
        assert_eq!(
            mention_segments("Hello @, bye @", &ids(&["u1", "u2"])),
            vec![
                RichTextSegment::text("Hello "),
                RichTextSegment::mention("u1"),
                RichTextSegment::text(", bye "),
                RichTextSegment::mention("u2"),
            ]
        );
    }

    #[test]
    fn missing_ids_drop_markers_but_keep_text() {
        let segments = mention_segments("@a @b @c", &ids(&["u1"]));
        assert_eq!(
            segments,
            vec![
                RichTextSegment::mention("u1"),
                RichTextSegment::text("a "),
                RichTextSegment::text("b "),
                RichTextSegment::text("c"),
            ]
        );
    }

    #[test]
    fn templates_without_markers_are_plain_text() {
        assert_eq!(
            mention_segments("No mentions", &ids(&["u1"])),
            vec![RichTextSegment::text("No mentions")]
        );
        assert!(mention_segments("", &[]).is_empty());
    }

    #[test]
    fn comment_payload_targets_the_page() {
        let page = PageId::parse("59833787-2cf9-4fdf-8782-e53db20768a5").unwrap();
        let payload = comment_payload(&page, &[RichTextSegment::text("ok")]);
        assert_eq!(
            payload,
            json!({
                "parent": {"page_id": "59833787-2cf9-4fdf-8782-e53db20768a5"},
                "rich_text": [{"type": "text", "text": {"content": "ok"}}]
            })
        );
    }
}
