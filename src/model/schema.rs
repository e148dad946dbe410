// src/model/schema.rs
//! Database schema and the option tables derived from it.

use super::PropertyType;
use crate::error::AppError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named, colored choice of a select, status or multi-select column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl SelectOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: None,
        }
    }
}

/// One column of the database schema.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaProperty {
    pub id: String,
    pub name: String,
    pub property_type: PropertyType,
    pub options: Vec<SelectOption>,
}

/// Column definitions of a database, keyed by their current name.
///
/// Names can change under us; ids are stable. Lookups from tracked fields
/// therefore go through [`DatabaseSchema::property_by_id`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatabaseSchema {
    properties: IndexMap<String, SchemaProperty>,
}

impl DatabaseSchema {
    /// Builds the schema from a database object's `properties` map.
    pub fn from_json(database: &Value) -> Result<Self, AppError> {
        let raw_properties = database
            .get("properties")
            .and_then(Value::as_object)
            .ok_or_else(|| {
                AppError::MalformedResponse("database object has no 'properties' map".to_string())
            })?;

        let mut properties = IndexMap::new();
        for (name, details) in raw_properties {
            match parse_schema_property(name, details) {
                Some(property) => {
                    properties.insert(name.clone(), property);
                }
                None => {
                    log::warn!("Skipping schema property '{}' without id or type", name);
                }
            }
        }

        Ok(Self { properties })
    }

    pub fn from_properties(properties: impl IntoIterator<Item = SchemaProperty>) -> Self {
        Self {
            properties: properties
                .into_iter()
                .map(|p| (p.name.clone(), p))
                .collect(),
        }
    }

    pub fn property(&self, name: &str) -> Option<&SchemaProperty> {
        self.properties.get(name)
    }

    pub fn property_by_id(&self, id: &str) -> Option<&SchemaProperty> {
        self.properties.values().find(|p| p.id == id)
    }

    pub fn name_for_id(&self, id: &str) -> Option<&str> {
        self.property_by_id(id).map(|p| p.name.as_str())
    }

    /// The database's title column; every database has exactly one.
    pub fn title_property(&self) -> Option<&SchemaProperty> {
        self.properties
            .values()
            .find(|p| p.property_type == PropertyType::Title)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaProperty> {
        self.properties.values()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

fn parse_schema_property(name: &str, details: &Value) -> Option<SchemaProperty> {
    let id = details.get("id")?.as_str()?.to_string();
    let tag = details.get("type")?.as_str()?;
    let property_type = PropertyType::from_tag(tag);

    let options = if property_type.has_options() {
        details
            .get(tag)
            .and_then(|payload| payload.get("options"))
            .and_then(Value::as_array)
            .map(|raw| {
                raw.iter()
                    .filter_map(|o| serde_json::from_value::<SelectOption>(o.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    } else {
        Vec::new()
    };

    Some(SchemaProperty {
        id,
        name: name.to_string(),
        property_type,
        options,
    })
}

/// Options of one option-bearing column, by option name.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldOptions {
    pub field_name: String,
    pub property_type: PropertyType,
    options: IndexMap<String, SelectOption>,
}

impl FieldOptions {
    pub fn get(&self, name: &str) -> Option<&SelectOption> {
        self.options.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectOption> {
        self.options.values()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Option lookup for every select/status/multi-select column, keyed by the
/// column's stable property id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionTable {
    fields: IndexMap<String, FieldOptions>,
}

impl OptionTable {
    pub fn from_schema(schema: &DatabaseSchema) -> Self {
        let mut table = Self::default();
        for property in schema.iter().filter(|p| p.property_type.has_options()) {
            table.ensure_field(&property.id, &property.name, property.property_type.clone());
            for option in &property.options {
                table.add_option(&property.id, option.clone());
            }
        }
        table
    }

    /// Registers a column, keeping any options it already has.
    pub fn ensure_field(&mut self, field_id: &str, field_name: &str, property_type: PropertyType) {
        self.fields
            .entry(field_id.to_string())
            .or_insert_with(|| FieldOptions {
                field_name: field_name.to_string(),
                property_type,
                options: IndexMap::new(),
            });
    }

    /// Adds or replaces an option of an already registered column.
    pub fn add_option(&mut self, field_id: &str, option: SelectOption) -> bool {
        match self.fields.get_mut(field_id) {
            Some(field) => {
                field.options.insert(option.name.clone(), option);
                true
            }
            None => false,
        }
    }

    pub fn field(&self, field_id: &str) -> Option<&FieldOptions> {
        self.fields.get(field_id)
    }

    pub fn get(&self, field_id: &str, option_name: &str) -> Option<&SelectOption> {
        self.fields.get(field_id)?.get(option_name)
    }

    /// Like [`OptionTable::get`], failing with `OptionNotFound`.
    pub fn resolve(&self, field_id: &str, option_name: &str) -> Result<&SelectOption, AppError> {
        self.get(field_id, option_name)
            .ok_or_else(|| AppError::OptionNotFound {
                field: self
                    .fields
                    .get(field_id)
                    .map(|f| f.field_name.clone())
                    .unwrap_or_else(|| field_id.to_string()),
                option: option_name.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldOptions)> {
        self.fields.iter().map(|(id, f)| (id.as_str(), f))
    }
}
