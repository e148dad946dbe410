// src/interpret/extract.rs
//! Per-type decoding of property envelopes.
//!
//! Every function here is pure: it reads a payload and never fails. Missing
//! sub-fields degrade to `Null` (or "Unknown" for people) so that a record
//! can always be displayed, even from partial data.

use crate::constants::{NOT_AVAILABLE, UNKNOWN_NAME};
use crate::model::{PropertyEnvelope, PropertyType, PropertyValue};
use serde_json::Value;

/// Interprets an envelope as either a raw value (ids, for writes and
/// filtering) or a display value (names, for humans).
pub fn extract_property(envelope: &PropertyEnvelope, for_display: bool) -> PropertyValue {
    extract(
        &envelope.property_type,
        envelope.content.as_ref(),
        for_display,
    )
}

/// Dispatches on the type tag. `content` is the payload stored under the tag.
pub fn extract(
    property_type: &PropertyType,
    content: Option<&Value>,
    for_display: bool,
) -> PropertyValue {
    use PropertyType::*;

    if let Unsupported(tag) = property_type {
        return unsupported(tag);
    }

    let Some(content) = content else {
        return PropertyValue::Null;
    };

    match property_type {
        Title | RichText => PropertyValue::Text(plain_text(content)),
        Select | Status | Emoji => option_reference(content, for_display),
        MultiSelect | Relation => list_of(content, |item| option_reference(item, for_display)),
        Files => list_of(content, |item| file_reference(item, for_display)),
        People => list_of(content, |item| person(item, for_display)),
        CreatedBy | LastEditedBy => person(content, for_display),
        Date => date_range(content),
        Formula | Rollup => typed_result(content),
        UniqueId => unique_id(content),
        Checkbox | Number | Url | Email | PhoneNumber | CreatedTime | LastEditedTime => {
            PropertyValue::from_json(content)
        }
        Unsupported(tag) => unsupported(tag),
    }
}

fn unsupported(tag: &str) -> PropertyValue {
    log::warn!("Unsupported property type '{}'", tag);
    PropertyValue::Unsupported {
        unsupported: tag.to_string(),
    }
}

/// Concatenates the `plain_text` of every rich text segment, in order.
pub fn plain_text(rich_text: &Value) -> String {
    rich_text
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("plain_text").and_then(Value::as_str))
                .collect::<String>()
        })
        .unwrap_or_default()
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

/// `{id, name, ...}` → id (raw) or name (display).
fn option_reference(value: &Value, for_display: bool) -> PropertyValue {
    let key = if for_display { "name" } else { "id" };
    PropertyValue::text_or_null(str_field(value, key))
}

/// Files carry a name but no id; raw mode falls back to the file URL.
fn file_reference(value: &Value, for_display: bool) -> PropertyValue {
    if for_display {
        return PropertyValue::text_or_null(str_field(value, "name"));
    }
    let url = str_field(value, "type")
        .and_then(|kind| value.get(kind))
        .and_then(|hosted| str_field(hosted, "url"));
    PropertyValue::text_or_null(str_field(value, "id").or(url))
}

fn person(value: &Value, for_display: bool) -> PropertyValue {
    if for_display {
        PropertyValue::Text(str_field(value, "name").unwrap_or(UNKNOWN_NAME).to_string())
    } else {
        PropertyValue::text_or_null(str_field(value, "id"))
    }
}

fn list_of(value: &Value, f: impl Fn(&Value) -> PropertyValue) -> PropertyValue {
    match value.as_array() {
        Some(items) => PropertyValue::List(items.iter().map(f).collect()),
        None => PropertyValue::Null,
    }
}

/// `start` alone when there is no end, otherwise `"start to end"`.
fn date_range(value: &Value) -> PropertyValue {
    match (str_field(value, "start"), str_field(value, "end")) {
        (Some(start), Some(end)) => PropertyValue::Text(format!("{} to {}", start, end)),
        (start, None) => PropertyValue::text_or_null(start),
        (None, Some(end)) => PropertyValue::Text(format!("{} to {}", NOT_AVAILABLE, end)),
    }
}

/// Formula and rollup results are themselves tagged: `{type: T, T: value}`.
fn typed_result(value: &Value) -> PropertyValue {
    let Some(tag) = str_field(value, "type") else {
        return PropertyValue::from_json(value);
    };
    match (tag, value.get(tag)) {
        (_, None) | (_, Some(Value::Null)) => PropertyValue::Null,
        ("date", Some(date)) => date_range(date),
        ("array", Some(Value::Array(items))) => PropertyValue::List(
            items
                .iter()
                .map(|item| match PropertyEnvelope::from_json(item) {
                    Ok(envelope) => extract_property(&envelope, true),
                    Err(_) => PropertyValue::from_json(item),
                })
                .collect(),
        ),
        (_, Some(result)) => PropertyValue::from_json(result),
    }
}

fn unique_id(value: &Value) -> PropertyValue {
    let number = value.get("number").filter(|n| !n.is_null());
    match (str_field(value, "prefix"), number) {
        (Some(prefix), Some(n)) => PropertyValue::Text(format!("{}-{}", prefix, n)),
        (None, Some(n)) => PropertyValue::from_json(n),
        (_, None) => PropertyValue::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn both_modes(tag: &str, content: Value) -> (PropertyValue, PropertyValue) {
        let t = PropertyType::from_tag(tag);
        (
            extract(&t, Some(&content), false),
            extract(&t, Some(&content), true),
        )
    }

    fn text(s: &str) -> PropertyValue {
        PropertyValue::Text(s.to_string())
    }

    #[test]
    fn title_concatenates_plain_text_in_order() {
        let (raw, display) = both_modes(
            "title",
            json!([
                {"type": "text", "plain_text": "Réfléchir à "},
                {"type": "text", "plain_text": "des idées"},
                {"type": "text"}
            ]),
        );
        assert_eq!(raw, text("Réfléchir à des idées"));
        assert_eq!(display, raw);
    }

    #[test]
    fn select_and_status_switch_between_id_and_name() {
        for tag in ["select", "status"] {
            let (raw, display) =
                both_modes(tag, json!({"id": "a087", "name": "Fait", "color": "green"}));
            assert_eq!(raw, text("a087"));
            assert_eq!(display, text("Fait"));
        }
    }

    #[test]
    fn multi_select_lists_ids_or_names() {
        let (raw, display) = both_modes(
            "multi_select",
            json!([{"id": "o1", "name": "Design"}, {"id": "o2", "name": "Ingénierie"}]),
        );
        assert_eq!(raw, PropertyValue::List(vec![text("o1"), text("o2")]));
        assert_eq!(
            display,
            PropertyValue::List(vec![text("Design"), text("Ingénierie")])
        );
    }

    #[test]
    fn people_without_names_display_unknown() {
        let (raw, display) = both_modes(
            "people",
            json!([{"object": "user", "id": "ac7a"}, {"id": "f579", "name": "Ann"}]),
        );
        assert_eq!(raw, PropertyValue::List(vec![text("ac7a"), text("f579")]));
        assert_eq!(display, PropertyValue::List(vec![text("Unknown"), text("Ann")]));
    }

    #[test]
    fn dates_render_single_day_or_range() {
        let (raw, display) =
            both_modes("date", json!({"start": "2022-12-19", "end": null, "time_zone": null}));
        assert_eq!(raw, text("2022-12-19"));
        assert_eq!(display, text("2022-12-19"));

        let (_, display) = both_modes("date", json!({"start": "2022-12-19", "end": "2022-12-24"}));
        assert_eq!(display, text("2022-12-19 to 2022-12-24"));
    }

    #[test]
    fn scalars_pass_through() {
        assert_eq!(both_modes("checkbox", json!(true)).1, PropertyValue::Bool(true));
        assert_eq!(
            both_modes("number", json!(5)).0,
            PropertyValue::Number(5.into())
        );
        for tag in ["url", "email", "phone_number", "created_time"] {
            assert_eq!(both_modes(tag, json!("v")).1, text("v"));
        }
    }

    #[test]
    fn relation_and_files_use_ids_raw_and_names_for_display() {
        let (raw, display) = both_modes("relation", json!([{"id": "p1"}]));
        assert_eq!(raw, PropertyValue::List(vec![text("p1")]));
        assert_eq!(display, PropertyValue::List(vec![PropertyValue::Null]));

        let (raw, display) = both_modes(
            "files",
            json!([{"name": "brief.pdf", "type": "external", "external": {"url": "https://x/brief.pdf"}}]),
        );
        assert_eq!(raw, PropertyValue::List(vec![text("https://x/brief.pdf")]));
        assert_eq!(display, PropertyValue::List(vec![text("brief.pdf")]));
    }

    #[test]
    fn authorship_fields_resolve_like_people() {
        let (raw, display) = both_modes("created_by", json!({"object": "user", "id": "u9"}));
        assert_eq!(raw, text("u9"));
        assert_eq!(display, text("Unknown"));
    }

    #[test]
    fn formula_and_rollup_unwrap_their_result() {
        assert_eq!(
            both_modes("formula", json!({"type": "string", "string": "late"})).1,
            text("late")
        );
        assert_eq!(
            both_modes("formula", json!({"type": "number", "number": null})).1,
            PropertyValue::Null
        );
        assert_eq!(
            both_modes("rollup", json!({"type": "date", "date": {"start": "2024-01-02"}})).1,
            text("2024-01-02")
        );
        assert_eq!(
            both_modes(
                "rollup",
                json!({"type": "array", "array": [{"type": "select", "select": {"id": "s", "name": "Design"}}]})
            )
            .1,
            PropertyValue::List(vec![text("Design")])
        );
    }

    #[test]
    fn unique_id_joins_prefix_and_number() {
        assert_eq!(
            both_modes("unique_id", json!({"prefix": "TASK", "number": 42})).1,
            text("TASK-42")
        );
        assert_eq!(
            both_modes("unique_id", json!({"prefix": null, "number": 7})).0,
            PropertyValue::Number(7.into())
        );
    }

    #[test]
    fn unknown_types_resolve_to_the_unsupported_sentinel() {
        let (raw, display) = both_modes("button", json!({}));
        let expected = PropertyValue::Unsupported {
            unsupported: "button".into(),
        };
        assert_eq!(raw, expected);
        assert_eq!(display, expected);
    }

    #[test]
    fn missing_payloads_and_sub_fields_degrade_instead_of_failing() {
        let tags = [
            "title", "rich_text", "select", "status", "multi_select", "people", "date",
            "checkbox", "number", "url", "email", "phone_number", "files", "relation",
            "formula", "emoji", "rollup", "created_by", "last_edited_by", "created_time",
            "last_edited_time", "unique_id",
        ];
        for tag in tags {
            let t = PropertyType::from_tag(tag);
            assert_eq!(extract(&t, None, false), PropertyValue::Null, "{tag}");
            assert_eq!(extract(&t, None, true), PropertyValue::Null, "{tag}");
            // Empty objects and wrong shapes must not panic either.
            let _ = extract(&t, Some(&json!({})), true);
            let _ = extract(&t, Some(&json!([{}])), false);
        }

        assert_eq!(both_modes("select", json!({})).1, PropertyValue::Null);
        assert_eq!(both_modes("date", json!({})).1, PropertyValue::Null);
    }

    #[test]
    fn envelope_is_left_untouched() {
        let envelope = PropertyEnvelope::from_json(
            &json!({"id": "k%3FMm", "type": "status", "status": {"id": "a", "name": "Fait"}}),
        )
        .unwrap();
        let before = envelope.clone();
        let _ = extract_property(&envelope, true);
        assert_eq!(envelope, before);
    }
}
