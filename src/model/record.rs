// src/model/record.rs
use super::PropertyValue;
use crate::types::FieldKey;
use indexmap::IndexMap;
use std::fmt;

/// The object kinds the interpreter knows how to normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Page,
    Comment,
}

impl ObjectKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "page" => Some(Self::Page),
            "comment" => Some(Self::Comment),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A normalized page or comment: an ordered map of field values.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    kind: ObjectKind,
    fields: IndexMap<FieldKey, PropertyValue>,
}

impl Record {
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            fields: IndexMap::new(),
        }
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn insert(&mut self, key: FieldKey, value: PropertyValue) {
        self.fields.insert(key, value);
    }

    pub fn get(&self, key: &FieldKey) -> Option<&PropertyValue> {
        self.fields.get(key)
    }

    /// Value of a tracked column by its registry key.
    pub fn custom(&self, key: &str) -> Option<&PropertyValue> {
        self.fields.get(&FieldKey::Custom(key.to_string()))
    }

    pub fn id(&self) -> Option<&str> {
        self.get(&FieldKey::Id).and_then(PropertyValue::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldKey, &PropertyValue)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
