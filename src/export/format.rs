//! Cell formatting rules: value flattening, markup cleanup, CSV quoting and
//! column display names.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

/// Formats one field value into its flat cell text.
///
/// Rules, in priority order:
/// 1. null → empty string
/// 2. array → each item flattened individually, joined with `|`
/// 3. object → `displayName`, else `name`, else `value` attribute
/// 4. anything else → scalar text with markup tags stripped and HTML
///    entities decoded
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .filter_map(format_sequence_item)
            .collect::<Vec<_>>()
            .join("|"),
        Value::Object(map) => {
            for attr in ["displayName", "name", "value"] {
                if let Some(v) = map.get(attr).filter(|v| !v.is_null()) {
                    return attr_text(v);
                }
            }
            plain_text(value)
        }
        scalar => plain_text(scalar),
    }
}

/// Flattens one item of a sequence value: an object contributes its `name`
/// or `value` attribute, a bare string contributes itself, anything else is
/// skipped.
fn format_sequence_item(item: &Value) -> Option<String> {
    match item {
        Value::Object(map) => {
            for attr in ["name", "value"] {
                if let Some(v) = map.get(attr).filter(|v| !v.is_null()) {
                    return Some(attr_text(v));
                }
            }
            None
        }
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn attr_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn plain_text(value: &Value) -> String {
    let raw = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    decode_entities(&strip_markup(&raw))
}

fn strip_markup(text: &str) -> String {
    MARKUP_TAG.replace_all(text, "").into_owned()
}

/// Decodes the basic named HTML entities plus numeric `&#NN;` / `&#xHH;`
/// forms. Unrecognized entities pass through untouched.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        if let Some(end) = rest.find(';') {
            if let Some(decoded) = decode_entity(&rest[1..end]) {
                out.push(decoded);
                rest = &rest[end + 1..];
                continue;
            }
        }
        out.push('&');
        rest = &rest[1..];
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
                .map(|hex| u32::from_str_radix(hex, 16))
                .or_else(|| entity.strip_prefix('#').map(str::parse))?;
            code.ok().and_then(char::from_u32)
        }
    }
}

/// Escapes one cell RFC4180-style: wrapped in double quotes with embedded
/// quotes doubled if and only if it contains a comma, quote, CR or LF.
pub fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Resolves the header text for a field identifier.
///
/// Standard fields get their human-readable label, `customfield_` ids keep
/// their raw identifier, everything else passes through unchanged.
pub fn display_name(field: &str) -> &str {
    if field.starts_with("customfield_") {
        return field;
    }
    match field {
        "key" => "Key",
        "summary" => "Summary",
        "description" => "Description",
        "status" => "Status",
        "assignee" => "Assignee",
        "reporter" => "Reporter",
        "created" => "Created",
        "updated" => "Updated",
        "priority" => "Priority",
        "issuetype" => "Issue Type",
        "project" => "Project",
        "labels" => "Labels",
        "components" => "Components",
        "fixVersions" => "Fix Version/s",
        "versions" => "Affects Version/s",
        "resolution" => "Resolution",
        "resolutiondate" => "Resolved",
        "duedate" => "Due Date",
        "environment" => "Environment",
        "attachment" => "Attachment",
        "comment" => "Comment",
        "worklog" => "Log Work",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_formats_to_empty_string() {
        assert_eq!(format_value(&Value::Null), "");
    }

    #[test]
    fn scalars_format_to_their_text() {
        assert_eq!(format_value(&json!("plain")), "plain");
        assert_eq!(format_value(&json!(42)), "42");
        assert_eq!(format_value(&json!(true)), "true");
    }

    #[test]
    fn array_of_named_objects_joins_with_pipe() {
        let value = json!([{"name": "A"}, {"name": "B"}]);
        assert_eq!(format_value(&value), "A|B");
    }

    #[test]
    fn array_items_use_name_then_value_then_string() {
        let value = json!([{"name": "A"}, {"value": "B"}, "C", 5]);
        // The bare number has no flattening rule and is skipped.
        assert_eq!(format_value(&value), "A|B|C");
    }

    #[test]
    fn array_item_with_null_name_falls_back_to_value() {
        let value = json!([{"name": null, "value": "B"}]);
        assert_eq!(format_value(&value), "B");
    }

    #[test]
    fn object_display_name_wins_over_name() {
        let value = json!({"displayName": "X", "name": "Y"});
        assert_eq!(format_value(&value), "X");
    }

    #[test]
    fn object_falls_back_through_name_and_value() {
        assert_eq!(format_value(&json!({"name": "Y", "value": "Z"})), "Y");
        assert_eq!(format_value(&json!({"value": "Z"})), "Z");
    }

    #[test]
    fn rich_text_is_stripped_and_decoded() {
        let value = json!("<p>bold &amp; <em>bright</em></p>");
        assert_eq!(format_value(&value), "bold & bright");
    }

    #[test]
    fn numeric_entities_are_decoded() {
        let value = json!("&#65;&#x42; &quot;q&quot; &unknown;");
        assert_eq!(format_value(&value), "AB \"q\" &unknown;");
    }

    #[test]
    fn quoting_law() {
        assert_eq!(
            escape_csv("Test with \"quotes\" and, commas"),
            "\"Test with \"\"quotes\"\" and, commas\""
        );
        assert_eq!(escape_csv("line\nbreak"), "\"line\nbreak\"");
        assert_eq!(escape_csv("nothing special"), "nothing special");
    }

    #[test]
    fn plain_string_round_trips_through_escaping() {
        let original = "Round trip me";
        let formatted = escape_csv(&format_value(&json!(original)));
        // No special characters, so the cell is emitted bare and parses back
        // to itself.
        assert_eq!(formatted, original);
    }

    #[test]
    fn display_names_for_standard_fields() {
        assert_eq!(display_name("key"), "Key");
        assert_eq!(display_name("summary"), "Summary");
        assert_eq!(display_name("issuetype"), "Issue Type");
        assert_eq!(display_name("fixVersions"), "Fix Version/s");
    }

    #[test]
    fn custom_fields_keep_their_raw_identifier() {
        assert_eq!(display_name("customfield_10001"), "customfield_10001");
    }

    #[test]
    fn unknown_fields_pass_through() {
        assert_eq!(display_name("somefield"), "somefield");
    }
}
