// src/types/fields.rs
//! Field vocabulary for interpreted records.
//!
//! A record's fields are keyed by [`FieldKey`]. The fixed keys cover what every
//! page or comment carries; custom keys name the database columns the caller
//! chose to track, each tied to its stable schema id through a [`TrackedField`].

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of a single field in an interpreted record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKey {
    // Present on every object
    Id,
    Object,
    CreatedTime,
    LastEditedTime,
    Archived,
    Parent,
    // Page defaults
    Cover,
    Icon,
    // Comment fields
    CommentText,
    AuthorId,
    AuthorName,
    /// A tracked database column, by its registry key.
    Custom(String),
}

impl FieldKey {
    /// Fields copied verbatim from every object, in record order.
    pub const BASE: [FieldKey; 6] = [
        FieldKey::Id,
        FieldKey::Object,
        FieldKey::CreatedTime,
        FieldKey::LastEditedTime,
        FieldKey::Archived,
        FieldKey::Parent,
    ];

    /// Fields copied verbatim from every page.
    pub const PAGE_DEFAULTS: [FieldKey; 2] = [FieldKey::Cover, FieldKey::Icon];

    /// Fields derived for every comment.
    pub const COMMENT: [FieldKey; 3] =
        [FieldKey::CommentText, FieldKey::AuthorId, FieldKey::AuthorName];

    /// Key of the field inside the raw API object, for fields copied verbatim.
    pub fn api_key(&self) -> Option<&'static str> {
        match self {
            FieldKey::Id => Some("id"),
            FieldKey::Object => Some("object"),
            FieldKey::CreatedTime => Some("created_time"),
            FieldKey::LastEditedTime => Some("last_edited_time"),
            FieldKey::Archived => Some("archived"),
            FieldKey::Parent => Some("parent"),
            FieldKey::Cover => Some("cover"),
            FieldKey::Icon => Some("icon"),
            _ => None,
        }
    }

    /// Human label for the fixed keys. Custom keys are labelled by the registry.
    pub fn fixed_display_name(&self) -> Option<&'static str> {
        match self {
            FieldKey::Id => Some("ID"),
            FieldKey::Object => Some("Object"),
            FieldKey::CreatedTime => Some("Created"),
            FieldKey::LastEditedTime => Some("Last edited"),
            FieldKey::Archived => Some("Archived"),
            FieldKey::Parent => Some("Parent"),
            FieldKey::Cover => Some("Cover"),
            FieldKey::Icon => Some("Icon"),
            FieldKey::CommentText => Some("Comment"),
            FieldKey::AuthorId => Some("Author ID"),
            FieldKey::AuthorName => Some("Author"),
            FieldKey::Custom(_) => None,
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKey::Custom(key) => write!(f, "{}", key),
            fixed => write!(f, "{}", fixed.fixed_display_name().unwrap_or_default()),
        }
    }
}

/// A database column the caller tracks: logical key, stable schema id, label.
///
/// The id is what the remote schema assigns (URL-encoded and opaque); column
/// names can be renamed in the workspace at any time, so lookups go through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedField {
    pub key: String,
    pub id: String,
    pub display_name: String,
}

impl TrackedField {
    pub fn new(
        key: impl Into<String>,
        id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            id: id.into(),
            display_name: display_name.into(),
        }
    }

    pub fn field_key(&self) -> FieldKey {
        FieldKey::Custom(self.key.clone())
    }
}

/// Well-known registry keys the Kanban view reads.
pub mod well_known {
    pub const NAME: &str = "name";
    pub const STATUS: &str = "status";
    pub const TEAM: &str = "team";
    pub const RESPONSIBLE: &str = "responsible";
    pub const DUE_DATE: &str = "due_date";
}

/// Ordered set of tracked database columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldRegistry {
    fields: Vec<TrackedField>,
}

impl FieldRegistry {
    pub fn new(fields: Vec<TrackedField>) -> Result<Self, ValidationError> {
        for (i, field) in fields.iter().enumerate() {
            if field.key.trim().is_empty() {
                return Err(ValidationError::EmptyField("key"));
            }
            if field.id.trim().is_empty() {
                return Err(ValidationError::EmptyField("id"));
            }
            if fields[..i].iter().any(|f| f.key == field.key) {
                return Err(ValidationError::DuplicateFieldKey(field.key.clone()));
            }
        }
        Ok(Self { fields })
    }

    pub fn get(&self, key: &str) -> Option<&TrackedField> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn by_id(&self, id: &str) -> Option<&TrackedField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackedField> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Label for any field key; custom keys fall back to the key itself.
    pub fn display_name(&self, key: &FieldKey) -> String {
        match key {
            FieldKey::Custom(custom) => self
                .get(custom)
                .map(|f| f.display_name.clone())
                .unwrap_or_else(|| custom.clone()),
            fixed => fixed.fixed_display_name().unwrap_or_default().to_string(),
        }
    }
}

impl Default for FieldRegistry {
    /// Columns of the French-language Kanban template the tool was built for.
    fn default() -> Self {
        use well_known::*;

        Self {
            fields: vec![
                TrackedField::new(DUE_DATE, "C%5C%3C%3A", "Date d’échéance"),
                TrackedField::new(STATUS, "k%3FMm", "Statut"),
                TrackedField::new(TEAM, "rIvf", "Équipe"),
                TrackedField::new(RESPONSIBLE, "xE%3EJ", "Responsable"),
                TrackedField::new(NAME, "title", "Nom"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_tracks_kanban_columns() {
        let registry = FieldRegistry::default();
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.get(well_known::STATUS).unwrap().id, "k%3FMm");
        assert_eq!(registry.by_id("title").unwrap().key, well_known::NAME);
    }

    #[test]
    fn display_names_cover_fixed_and_custom_keys() {
        let registry = FieldRegistry::default();
        assert_eq!(registry.display_name(&FieldKey::Id), "ID");
        assert_eq!(
            registry.display_name(&FieldKey::Custom("team".into())),
            "Équipe"
        );
        assert_eq!(
            registry.display_name(&FieldKey::Custom("untracked".into())),
            "untracked"
        );
    }

    #[test]
    fn rejects_duplicate_keys() {
        let err = FieldRegistry::new(vec![
            TrackedField::new("status", "a", "Status"),
            TrackedField::new("status", "b", "Other"),
        ])
        .unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateFieldKey(k) if k == "status"));
    }

    #[test]
    fn rejects_blank_ids() {
        assert!(FieldRegistry::new(vec![TrackedField::new("status", " ", "Status")]).is_err());
    }

    #[test]
    fn registry_round_trips_through_json_file_shape() {
        let json = r#"[{"key": "status", "id": "k%3FMm", "display_name": "Status"}]"#;
        let registry: FieldRegistry = serde_json::from_str(json).unwrap();
        assert_eq!(registry.get("status").unwrap().display_name, "Status");
    }
}
