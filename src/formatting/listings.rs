// src/formatting/listings.rs
use crate::constants::NOT_AVAILABLE;
use crate::kanban::Card;
use crate::model::{DatabaseSchema, OptionTable, UserSummary};
use std::fmt::Write;

/// One line per card, or a notice when nothing matched.
pub fn render_cards(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "No matching cards found.\n".to_string();
    }

    let mut out = String::new();
    for card in cards {
        let responsible = if card.responsible.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            card.responsible.join(", ")
        };
        let _ = writeln!(
            out,
            "Kanban Card: {}, Responsable: {}, Status: {}, Due: {}",
            card.title,
            responsible,
            card.status.as_deref().unwrap_or(NOT_AVAILABLE),
            card.due.as_deref().unwrap_or(NOT_AVAILABLE),
        );
    }
    out
}

/// Field, type and options of every option-bearing column.
pub fn describe_field_options(options: &OptionTable) -> String {
    let mut out = String::new();
    for (_, field) in options.iter() {
        let _ = writeln!(out, "Field: {}", field.field_name);
        let _ = writeln!(out, "Type: {}", field.property_type);
        let _ = writeln!(out, "Options:");
        for option in field.iter() {
            let _ = writeln!(out, "  - {} ({})", option.name, option.id);
        }
        out.push('\n');
    }

    if out.is_empty() {
        out.push_str("No field options found.\n");
    }
    out
}

/// Column names with their type and stable id.
pub fn render_schema(schema: &DatabaseSchema) -> String {
    let width = schema.iter().map(|p| p.name.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for property in schema.iter() {
        let _ = writeln!(
            out,
            "{:<width$}  {:<16}  {}",
            property.name,
            property.property_type.as_str(),
            property.id,
            width = width
        );
    }
    out
}

pub fn render_users(users: &[UserSummary]) -> String {
    users
        .iter()
        .map(|user| format!("{}: {}\n", user.display_name(), user.id))
        .collect()
}
