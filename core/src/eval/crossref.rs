use crate::evidence::loader::LoadedEvidence;
use crate::scan::{EvidenceCategory, EvidenceInventory};
use serde_json::Value;
use std::collections::BTreeSet;

pub const METADATA_VERSION_FIELD: &str = "version";
pub const LOG_VERSION_FIELD: &str = "model_version";

/// Renders a version value the way it is compared: strings verbatim, other
/// scalars through their JSON text. Null and compound values carry no
/// version.
pub fn version_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Model versions declared by any metadata document.
pub fn declared_versions(inventory: &EvidenceInventory) -> BTreeSet<String> {
    inventory
        .parsed(EvidenceCategory::MetadataFiles)
        .filter_map(|(_, doc)| doc.as_object())
        .filter_map(|obj| obj.get(METADATA_VERSION_FIELD))
        .filter_map(version_text)
        .collect()
}

/// Versions referenced by one log document, in first-seen order, without
/// duplicates. Accepts a single object, a list of objects, or table rows.
pub fn referenced_versions(doc: &LoadedEvidence) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    let mut push = |v: Option<String>| {
        if let Some(v) = v {
            if seen.insert(v.clone()) {
                out.push(v);
            }
        }
    };
    match doc {
        LoadedEvidence::Structured(Value::Object(obj)) => {
            push(obj.get(LOG_VERSION_FIELD).and_then(version_text));
        }
        LoadedEvidence::Structured(Value::Array(entries)) => {
            for entry in entries {
                if let Value::Object(obj) = entry {
                    push(obj.get(LOG_VERSION_FIELD).and_then(version_text));
                }
            }
        }
        LoadedEvidence::Table(rows) => {
            for row in rows {
                push(row.get(LOG_VERSION_FIELD).filter(|v| !v.is_empty()).cloned());
            }
        }
        _ => {}
    }
    out
}

/// Checks every decision log against the versions declared in metadata.
/// Each unknown version yields one issue per log file.
pub fn check_cross_references(inventory: &EvidenceInventory) -> Vec<String> {
    let known = declared_versions(inventory);
    let mut issues = Vec::new();
    for (file, doc) in inventory.parsed(EvidenceCategory::DecisionLogs) {
        for version in referenced_versions(doc) {
            if !known.contains(&version) {
                issues.push(format!(
                    "Log {} references unknown model version: {}",
                    file.rel_path, version
                ));
            }
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::{referenced_versions, version_text};
    use crate::evidence::loader::LoadedEvidence;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn numbers_and_strings_compare_by_text() {
        assert_eq!(version_text(&json!("1.0")).as_deref(), Some("1.0"));
        assert_eq!(version_text(&json!(2)).as_deref(), Some("2"));
        assert_eq!(version_text(&json!(null)), None);
    }

    #[test]
    fn list_logs_report_each_version_once() {
        let doc = LoadedEvidence::Structured(json!([
            {"model_version": "2.0", "prediction": 1},
            {"model_version": "2.0", "prediction": 0},
            {"model_version": "3.0", "prediction": 0},
            {"prediction": 1},
            "not an object"
        ]));
        assert_eq!(referenced_versions(&doc), vec!["2.0", "3.0"]);
    }

    #[test]
    fn table_rows_are_logs_too() {
        let row: BTreeMap<String, String> =
            [("model_version".to_string(), "1.1".to_string())].into_iter().collect();
        let doc = LoadedEvidence::Table(vec![row.clone(), row]);
        assert_eq!(referenced_versions(&doc), vec!["1.1"]);
    }

    #[test]
    fn text_and_failed_loads_reference_nothing() {
        assert!(referenced_versions(&LoadedEvidence::Text("model_version: 9".into())).is_empty());
        assert!(referenced_versions(&LoadedEvidence::Failed("x".into())).is_empty());
    }
}
