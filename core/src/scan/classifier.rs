use crate::config::AuditConfig;
use crate::scan::category::EvidenceCategory;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFile {
    /// Forward-slash path relative to the audit root.
    pub rel_path: String,
    pub abs_path: PathBuf,
    pub category: EvidenceCategory,
}

impl ClassifiedFile {
    pub fn file_name(&self) -> &str {
        self.rel_path.rsplit('/').next().unwrap_or(&self.rel_path)
    }
}

/// Category -> files, every category present (possibly empty).
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub by_category: BTreeMap<EvidenceCategory, Vec<ClassifiedFile>>,
}

impl Classification {
    fn empty() -> Self {
        let mut by_category = BTreeMap::new();
        for c in EvidenceCategory::ALL {
            by_category.insert(c, Vec::new());
        }
        Self { by_category }
    }

    pub fn files(&self, category: EvidenceCategory) -> &[ClassifiedFile] {
        self.by_category
            .get(&category)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn total(&self) -> usize {
        self.by_category.values().map(|v| v.len()).sum()
    }

    pub fn counts(&self) -> BTreeMap<String, usize> {
        self.by_category
            .iter()
            .map(|(c, files)| (c.as_str().to_string(), files.len()))
            .collect()
    }
}

/// Walks `root` and buckets every regular file into at most one category.
///
/// Directories named in `cfg.ignored_dirs` are pruned at any depth, as is any
/// path listed in `exclude` (e.g. an output directory nested inside the root).
/// Unreadable directories are logged and skipped.
pub fn classify_tree(root: &Path, cfg: &AuditConfig, exclude: &[PathBuf]) -> Classification {
    let mut out = Classification::empty();
    if !root.is_dir() {
        warn!(root = %root.display(), "audit root does not exist or is not a directory");
        return out;
    }

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 {
                return true;
            }
            if exclude.iter().any(|x| x == e.path()) {
                return false;
            }
            !(e.file_type().is_dir() && cfg.is_ignored_dir(&e.file_name().to_string_lossy()))
        });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!(error = %err, "skipping unreadable path during classification");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        let Some(category) = EvidenceCategory::classify(rel) else {
            continue;
        };
        let rel_path = rel.to_string_lossy().replace('\\', "/");
        debug!(path = %rel_path, %category, "classified file");
        out.by_category
            .entry(category)
            .or_default()
            .push(ClassifiedFile {
                rel_path,
                abs_path: entry.path().to_path_buf(),
                category,
            });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::classify_tree;
    use crate::config::AuditConfig;
    use crate::scan::category::EvidenceCategory;
    use std::fs;

    #[test]
    fn ignored_directories_are_pruned_at_any_depth() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/node_modules")).unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join("a/node_modules/dataset.csv"), "x").unwrap();
        fs::write(dir.path().join(".git/info.json"), "{}").unwrap();
        fs::write(dir.path().join("a/dataset.csv"), "x").unwrap();

        let c = classify_tree(dir.path(), &AuditConfig::default(), &[]);
        assert_eq!(c.total(), 1);
        assert_eq!(c.files(EvidenceCategory::DatasetFiles)[0].rel_path, "a/dataset.csv");
    }

    #[test]
    fn missing_root_yields_empty_classification() {
        let dir = tempfile::tempdir().unwrap();
        let c = classify_tree(&dir.path().join("nope"), &AuditConfig::default(), &[]);
        assert_eq!(c.total(), 0);
        assert_eq!(c.counts().len(), EvidenceCategory::ALL.len());
    }

    #[test]
    fn excluded_paths_are_not_walked() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("audit_out");
        fs::create_dir_all(out.join("evidence")).unwrap();
        fs::write(out.join("evidence/1_abc__dataset.csv"), "x").unwrap();
        fs::write(dir.path().join("dataset.csv"), "x").unwrap();

        let c = classify_tree(dir.path(), &AuditConfig::default(), &[out]);
        assert_eq!(c.total(), 1);
    }
}
