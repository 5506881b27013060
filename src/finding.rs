//! Finding record handed to the reporting layer.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One detected policy issue.
///
/// Built from an issue code, free-text detail, and a caller-owned location
/// mapping; severity, title, description, and ignore locations are filled
/// in later from the auditor configuration. Every instance owns its own
/// mappings, so enriching one finding never leaks into another. Findings
/// are immutable once the caller has finished populating them and are
/// collected in order by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Machine-readable issue code, e.g. `RESOURCE_MISMATCH`.
    pub issue: String,
    /// Free-text detail about this occurrence.
    pub detail: String,
    /// Where the issue was found; keys and values belong to the caller.
    #[serde(default)]
    pub location: Map<String, Value>,
    /// Severity label from the auditor configuration.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub severity: String,
    /// Short human-readable title.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// Longer description of the issue class.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Locations at which the configuration ignores this issue.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub ignore_locations: Map<String, Value>,
}

impl Finding {
    /// Create a finding; the remaining fields start empty, one fresh set
    /// per instance.
    #[must_use]
    pub fn new(
        issue: impl Into<String>,
        detail: impl Into<String>,
        location: Map<String, Value>,
    ) -> Self {
        Self {
            issue: issue.into(),
            detail: detail.into(),
            location,
            ..Self::default()
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = Value::Object(self.location.clone());
        write!(f, "{} - {} - {}", self.issue, self.detail, location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_concatenates_issue_detail_location() {
        let mut location = Map::new();
        location.insert("filepath".to_string(), json!("policy.json"));
        let finding = Finding::new("RESOURCE_MISMATCH", "resource does not match", location);
        assert_eq!(
            finding.to_string(),
            "RESOURCE_MISMATCH - resource does not match - {\"filepath\":\"policy.json\"}"
        );
    }

    #[test]
    fn test_instances_do_not_share_mappings() {
        let mut first = Finding::new("UNKNOWN_ACTION", "first", Map::new());
        let second = Finding::new("UNKNOWN_ACTION", "second", Map::new());
        first.location.insert("line".to_string(), json!(3));
        first
            .ignore_locations
            .insert("filepath".to_string(), json!("trusted.json"));
        assert!(second.location.is_empty());
        assert!(second.ignore_locations.is_empty());
    }

    #[test]
    fn test_serialize_skips_unset_metadata() {
        let finding = Finding::new("RESOURCE_STAR", "detail", Map::new());
        let value = serde_json::to_value(&finding).expect("serializable");
        assert_eq!(
            value,
            json!({
                "issue": "RESOURCE_STAR",
                "detail": "detail",
                "location": {},
            })
        );
    }

    #[test]
    fn test_serialize_includes_populated_metadata() {
        let mut finding = Finding::new("RESOURCE_MISMATCH", "detail", Map::new());
        finding.severity = "MEDIUM".to_string();
        finding.title = "Resource mismatch".to_string();
        let value = serde_json::to_value(&finding).expect("serializable");
        assert_eq!(value["severity"], json!("MEDIUM"));
        assert_eq!(value["title"], json!("Resource mismatch"));
    }
}
