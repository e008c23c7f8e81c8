use crate::error::CoreResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_REPORT_FILE_STEM: &str = "report";
pub const DEFAULT_INTEGRITY_FILE_STEM: &str = "audit_hash";
pub const DEFAULT_EVIDENCE_DIR_NAME: &str = "evidence";

/// Tunables for a single audit run. Every field has a default, so a config
/// file only needs to name what it overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AuditConfig {
    /// Directory names skipped at any depth during classification.
    pub ignored_dirs: Vec<String>,
    /// Bytes read from each file for keyword matching.
    pub sample_bytes: usize,
    /// Bytes kept when a file is loaded as plain text.
    pub max_text_bytes: usize,
    /// Structured documents above this size are not parsed.
    pub max_structured_bytes: u64,
    pub hash_chunk_bytes: usize,
    pub retention_days: i64,
    pub retention_terms: Vec<String>,
    pub archive_digest_prefix_len: usize,
    /// Reports are written as `<catalog>_<stem>_<audit id>.json`.
    pub report_file_stem: String,
    /// Integrity tokens are written as `<stem>_<audit id>.txt`.
    pub integrity_file_stem: String,
    pub evidence_dir_name: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            ignored_dirs: [
                ".git",
                "__pycache__",
                ".pytest_cache",
                "node_modules",
                ".mypy_cache",
                ".vscode",
                ".idea",
                "venv",
                "env",
                ".DS_Store",
                "dist",
                "build",
                ".eggs",
                "target",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            sample_bytes: 8192,
            max_text_bytes: 1024 * 1024,
            max_structured_bytes: 16 * 1024 * 1024,
            hash_chunk_bytes: 4096,
            retention_days: 365,
            retention_terms: ["log", "audit", "backup", "trace"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            archive_digest_prefix_len: 16,
            report_file_stem: DEFAULT_REPORT_FILE_STEM.to_string(),
            integrity_file_stem: DEFAULT_INTEGRITY_FILE_STEM.to_string(),
            evidence_dir_name: DEFAULT_EVIDENCE_DIR_NAME.to_string(),
        }
    }
}

impl AuditConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let bytes = fs::read(path.as_ref())?;
        let cfg: AuditConfig = serde_json::from_slice(&bytes)?;
        Ok(cfg)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let bytes = fs::read(path.as_ref())?;
        let cfg: AuditConfig = serde_yaml::from_slice(&bytes)?;
        Ok(cfg)
    }

    /// JSON or YAML, chosen by extension (`.yaml`/`.yml`, otherwise JSON).
    pub fn from_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_json_file(path),
        }
    }

    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignored_dirs.iter().any(|d| d == name)
    }
}

#[cfg(test)]
mod tests {
    use super::AuditConfig;

    #[test]
    fn partial_config_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, br#"{"retention_days": 30, "sample_bytes": 16}"#).unwrap();

        let cfg = AuditConfig::from_json_file(&path).unwrap();
        assert_eq!(cfg.retention_days, 30);
        assert_eq!(cfg.sample_bytes, 16);
        assert_eq!(cfg.hash_chunk_bytes, 4096);
        assert!(cfg.is_ignored_dir(".git"));
        assert!(!cfg.is_ignored_dir("src"));
    }

    #[test]
    fn yaml_config_is_picked_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.yml");
        std::fs::write(&path, "retention_days: 90\nretention_terms: [log]\n").unwrap();

        let cfg = AuditConfig::from_file(&path).unwrap();
        assert_eq!(cfg.retention_days, 90);
        assert_eq!(cfg.retention_terms, vec!["log".to_string()]);
        assert_eq!(cfg.sample_bytes, 8192);
    }
}
