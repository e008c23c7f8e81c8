use crate::evidence::loader::LoadedEvidence;
use crate::scan::{EvidenceCategory, EvidenceInventory};
use serde_json::Value;

pub const METADATA_REQUIRED_FIELDS: [&str; 2] = ["version", "creation_date"];
pub const LOG_REQUIRED_FIELDS: [&str; 3] = ["timestamp", "model_version", "prediction"];

/// Advisory shape checks over metadata and decision logs. Plain-text
/// documents are not checked.
pub fn check_document_shapes(inventory: &EvidenceInventory) -> Vec<String> {
    let mut issues = Vec::new();

    for (file, doc) in inventory.parsed(EvidenceCategory::MetadataFiles) {
        match doc {
            LoadedEvidence::Structured(Value::Object(obj)) => {
                for field in METADATA_REQUIRED_FIELDS {
                    if !obj.contains_key(field) {
                        issues.push(format!(
                            "Metadata {} missing required field: {}",
                            file.rel_path, field
                        ));
                    }
                }
            }
            LoadedEvidence::Structured(_) | LoadedEvidence::Table(_) => {
                issues.push(format!("Metadata {} is not a single object", file.rel_path));
            }
            _ => {}
        }
    }

    for (file, doc) in inventory.parsed(EvidenceCategory::DecisionLogs) {
        let entries: Vec<Vec<&str>> = match doc {
            LoadedEvidence::Structured(Value::Object(obj)) => {
                vec![obj.keys().map(|k| k.as_str()).collect()]
            }
            LoadedEvidence::Structured(Value::Array(items)) => {
                let mut entries = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::Object(obj) => entries.push(obj.keys().map(|k| k.as_str()).collect()),
                        _ => {
                            issues.push(format!(
                                "Log {} contains an entry that is not an object",
                                file.rel_path
                            ));
                            break;
                        }
                    }
                }
                entries
            }
            LoadedEvidence::Structured(_) => {
                issues.push(format!("Log {} is neither an object nor a list", file.rel_path));
                continue;
            }
            LoadedEvidence::Table(rows) => rows
                .iter()
                .map(|r| {
                    r.iter()
                        .filter(|(_, v)| !v.is_empty())
                        .map(|(k, _)| k.as_str())
                        .collect()
                })
                .collect(),
            _ => continue,
        };
        for field in LOG_REQUIRED_FIELDS {
            let missing = entries.iter().filter(|keys| !keys.contains(&field)).count();
            if missing > 0 {
                issues.push(format!(
                    "Log {}: {} of {} entries missing required field: {}",
                    file.rel_path,
                    missing,
                    entries.len(),
                    field
                ));
            }
        }
    }

    issues
}
