// src/formatting/mod.rs
//! Plain-text rendering of records, cards and schema listings for the CLI.

mod listings;
mod records;

pub use listings::{describe_field_options, render_cards, render_schema, render_users};
pub use records::{render_record, render_records};
