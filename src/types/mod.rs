use thiserror::Error;

mod domain_types;
mod fields;
mod ids;

pub use domain_types::*;
pub use fields::*;
pub use ids::*;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid Notion ID format: {0}")]
    InvalidId(String),

    #[error("Invalid Notion page URL: {url} - {reason}")]
    InvalidPageUrl { url: String, reason: String },

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Invalid API key format: {reason}")]
    InvalidApiKey { reason: String },

    #[error("Duplicate tracked field key: {0}")]
    DuplicateFieldKey(String),
}
