use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One schema-less result item from the search endpoint.
///
/// The `key` identifier travels outside the field mapping. The mapping itself
/// varies from issue to issue; `serde_json` is built with `preserve_order` so
/// each issue's native field order stays observable (header discovery depends
/// on it).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub key: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// One bounded batch of issues returned by a single search request, plus the
/// offset/size it was requested at and the total known at fetch time.
#[derive(Debug, Clone)]
pub struct Page {
    pub issues: Vec<Issue>,
    pub start_at: u64,
    pub max_results: u64,
    pub total: u64,
}

/// Full ordered concatenation of all pages' issues for one query.
///
/// On success `issues.len() == total`.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    pub issues: Vec<Issue>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_deserializes_with_field_order_preserved() {
        let issue: Issue =
            serde_json::from_str(r#"{"key":"TEST-1","fields":{"b":1,"a":2}}"#).unwrap();

        assert_eq!(issue.key, "TEST-1");
        let keys: Vec<&str> = issue.fields.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn issue_without_fields_defaults_to_empty_mapping() {
        let issue: Issue = serde_json::from_str(r#"{"key":"TEST-2"}"#).unwrap();
        assert!(issue.fields.is_empty());
    }
}
