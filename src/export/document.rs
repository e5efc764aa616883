//! Header discovery and row construction.

use crate::export::format::{display_name, escape_csv, format_value};
use crate::model::Issue;
use std::collections::HashSet;

/// Header emitted when a query matched nothing, so that every export still
/// produces a valid, openable CSV.
pub const FALLBACK_HEADER: [&str; 9] = [
    "key",
    "summary",
    "status",
    "assignee",
    "reporter",
    "created",
    "updated",
    "priority",
    "issuetype",
];

/// Flat header + rows model derived from a sequence of issues, ready for
/// CSV serialization.
///
/// The header is `key` followed by every distinct field name observed across
/// all issues, in first-seen order (issues in result-set order, each issue's
/// field mapping in its native order). Every row has exactly one cell per
/// header column; an issue lacking a field contributes an empty cell there.
#[derive(Debug, Clone)]
pub struct ExportDocument {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ExportDocument {
    /// Builds the document for `issues`. An empty input yields the fixed
    /// [`FALLBACK_HEADER`] and no rows.
    pub fn from_issues(issues: &[Issue]) -> Self {
        if issues.is_empty() {
            return Self {
                header: FALLBACK_HEADER.iter().map(ToString::to_string).collect(),
                rows: Vec::new(),
            };
        }

        let mut header = vec!["key".to_string()];
        let mut seen = HashSet::new();
        for issue in issues {
            for field in issue.fields.keys() {
                if seen.insert(field.clone()) {
                    header.push(field.clone());
                }
            }
        }

        let rows = issues
            .iter()
            .map(|issue| {
                header
                    .iter()
                    .map(|column| {
                        if column == "key" {
                            issue.key.clone()
                        } else {
                            issue.fields.get(column).map(format_value).unwrap_or_default()
                        }
                    })
                    .collect()
            })
            .collect();

        Self { header, rows }
    }

    /// Raw field identifiers, `key` first.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Formatted (unescaped) cell texts, one row per issue.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Serializes the document: display-named header line, then one line per
    /// row, cells escaped RFC4180-style and joined with `,`, lines joined
    /// with `\n` and a trailing `\n` after the last one.
    pub fn to_csv(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(
            self.header
                .iter()
                .map(|field| escape_csv(display_name(field)))
                .collect::<Vec<_>>()
                .join(","),
        );
        for row in &self.rows {
            lines.push(
                row.iter()
                    .map(|cell| escape_csv(cell))
                    .collect::<Vec<_>>()
                    .join(","),
            );
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value};

    fn issue(key: &str, fields: Value) -> Issue {
        let fields = match fields {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Issue {
            key: key.to_string(),
            fields,
        }
    }

    #[test]
    fn header_keeps_first_seen_field_order() {
        let issues = vec![
            issue("A-1", serde_json::json!({"b": 1, "a": 2})),
            issue("A-2", serde_json::json!({"c": 3, "a": 4})),
        ];

        let document = ExportDocument::from_issues(&issues);
        assert_eq!(document.header(), ["key", "b", "a", "c"]);
    }

    #[test]
    fn missing_field_yields_empty_cell_not_shifted_row() {
        let issues = vec![
            issue("A-1", serde_json::json!({"summary": "first"})),
            issue("A-2", serde_json::json!({"status": {"name": "Open"}})),
        ];

        let document = ExportDocument::from_issues(&issues);
        assert_eq!(document.header(), ["key", "summary", "status"]);
        assert_eq!(document.rows()[0], ["A-1", "first", ""]);
        assert_eq!(document.rows()[1], ["A-2", "", "Open"]);
    }

    #[test]
    fn empty_input_emits_exactly_one_fallback_header_line() {
        let document = ExportDocument::from_issues(&[]);
        let csv = document.to_csv();

        assert_eq!(
            csv,
            "Key,Summary,Status,Assignee,Reporter,Created,Updated,Priority,Issue Type\n"
        );
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn header_line_uses_display_names_and_raw_custom_ids() {
        let issues = vec![issue(
            "A-1",
            serde_json::json!({"summary": "s", "customfield_10001": "x", "oddball": "y"}),
        )];

        let csv = ExportDocument::from_issues(&issues).to_csv();
        let header_line = csv.lines().next().unwrap();
        assert_eq!(header_line, "Key,Summary,customfield_10001,oddball");
    }

    #[test]
    fn cells_are_escaped_and_file_ends_with_newline() {
        let issues = vec![issue(
            "A-1",
            serde_json::json!({"summary": "Test with \"quotes\" and, commas"}),
        )];

        let csv = ExportDocument::from_issues(&issues).to_csv();
        assert_eq!(
            csv,
            "Key,Summary\nA-1,\"Test with \"\"quotes\"\" and, commas\"\n"
        );
    }
}
