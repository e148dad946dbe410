// src/formatting/records.rs
use crate::constants::{NOT_AVAILABLE, RECORD_LABEL_WIDTH, RECORD_RULE_WIDTH};
use crate::model::{ObjectKind, Record};
use crate::types::{FieldKey, FieldRegistry};
use std::fmt::Write;

const DETAIL_PREFIX: &str = "* ";

/// Renders one record as a framed block.
///
/// ```text
/// Page - ID           : 59833787...
///
/// Detailed Properties:
/// ------------------------------------------------------------
/// * Statut            : Fait
/// ============================================================
/// ```
///
/// `separator` adds a blank line and an opening rule above the block.
/// Pages list their tracked fields in detail; comments list text and author.
pub fn render_record(
    record: &Record,
    registry: &FieldRegistry,
    detailed: bool,
    separator: bool,
) -> String {
    let rule = "=".repeat(RECORD_RULE_WIDTH);
    let mut out = String::new();

    if separator {
        let _ = writeln!(out, "\n{}", rule);
    }

    let heading = match record.kind() {
        ObjectKind::Page => "Page",
        ObjectKind::Comment => "Comment",
    };
    let id_label = format!("{} - {}", heading, registry.display_name(&FieldKey::Id));
    write_line(&mut out, &id_label, record.get(&FieldKey::Id));

    if detailed {
        let _ = writeln!(out, "\nDetailed Properties:\n{}", "-".repeat(RECORD_RULE_WIDTH));
        let keys: Vec<FieldKey> = match record.kind() {
            ObjectKind::Page => registry.iter().map(|f| f.field_key()).collect(),
            ObjectKind::Comment => FieldKey::COMMENT.to_vec(),
        };
        for key in &keys {
            let label = format!("{}{}", DETAIL_PREFIX, registry.display_name(key));
            write_line(&mut out, &label, record.get(key));
        }
    }

    let _ = writeln!(out, "{}", rule);
    out
}

/// Renders records back to back, without separators.
pub fn render_records(records: &[Record], registry: &FieldRegistry, detailed: bool) -> String {
    records
        .iter()
        .map(|record| render_record(record, registry, detailed, false))
        .collect()
}

fn write_line(out: &mut String, label: &str, value: Option<&crate::model::PropertyValue>) {
    let value = value.map_or_else(|| NOT_AVAILABLE.to_string(), ToString::to_string);
    let _ = writeln!(out, "{:<width$}: {}", label, value, width = RECORD_LABEL_WIDTH);
}
