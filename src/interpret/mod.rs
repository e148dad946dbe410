// src/interpret/mod.rs
//! Turning raw API objects into normalized records.
//!
//! [`extract`] decodes single property envelopes; [`record`] assembles whole
//! pages and comments from them.

pub mod extract;
mod record;

pub use extract::{extract, extract_property, plain_text};
pub use record::{RecordInterpreter, UserDirectory};
