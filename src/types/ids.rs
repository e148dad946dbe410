use super::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use url::Url;
use uuid::Uuid;

/// Strong typing for IDs with phantom types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: String,
    _phantom: PhantomData<T>,
}

/// Marker types for different ID kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatabaseMarker;

pub type PageId = Id<PageMarker>;
pub type DatabaseId = Id<DatabaseMarker>;

/// Shape of a shareable page link: `https://www.notion.so/<slug>-<32 hex>`.
static PAGE_URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://www\.notion\.so/[a-zA-Z0-9\-]+-[a-f0-9]{32}")
        .expect("page URL pattern is a valid regex")
});

impl<T> Id<T> {
    /// Parse a bare 32-hex or dashed UUID Notion ID into its normalized form.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let cleaned = input.trim();

        if let Ok(uuid) = Uuid::parse_str(cleaned) {
            return Ok(Self::from_normalized(uuid.as_simple().to_string()));
        }

        Err(ValidationError::InvalidId(format!(
            "expected 32 hex characters (optionally dashed), got '{}'",
            input
        )))
    }

    fn from_normalized(value: String) -> Self {
        Self {
            value,
            _phantom: PhantomData,
        }
    }

    /// Get the ID as a string reference
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Get the ID with dashes for API calls
    pub fn to_dashed(&self) -> String {
        if self.value.len() == 32 && !self.value.contains('-') {
            format!(
                "{}-{}-{}-{}-{}",
                &self.value[0..8],
                &self.value[8..12],
                &self.value[12..16],
                &self.value[16..20],
                &self.value[20..32]
            )
        } else {
            self.value.clone()
        }
    }
}

impl PageId {
    /// Extracts the page ID from a shareable page URL.
    ///
    /// The URL is validated before anything is extracted, so a malformed
    /// link never reaches the network.
    pub fn from_page_url(page_url: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidPageUrl {
            url: page_url.to_string(),
            reason: reason.to_string(),
        };

        if !PAGE_URL_PATTERN.is_match(page_url) {
            return Err(invalid("expected https://www.notion.so/<title>-<32 hex id>"));
        }

        let parsed = Url::parse(page_url).map_err(|e| invalid(&e.to_string()))?;
        let last_segment = parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .ok_or_else(|| invalid("URL has no path"))?;
        let id = last_segment
            .rsplit('-')
            .next()
            .ok_or_else(|| invalid("URL has no trailing id"))?;

        Self::parse(id)
    }

    /// Accepts either a page URL or a bare page ID.
    pub fn from_url_or_id(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        if input.starts_with("http://") || input.starts_with("https://") {
            Self::from_page_url(input)
        } else {
            Self::parse(input)
        }
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_dashed().serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}
