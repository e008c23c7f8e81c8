use crate::config::AuditConfig;
use crate::evidence::hasher::{sha256_file, HashError};
use crate::evidence::loader::{load_evidence, read_text_sample, LoadedEvidence};
use crate::scan::category::EvidenceCategory;
use crate::scan::classifier::{ClassifiedFile, Classification};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

/// A classified file enriched with its text sample, parsed value and digest.
/// Read-only once the inventory is built.
#[derive(Debug)]
pub struct ScannedFile {
    pub rel_path: String,
    pub abs_path: PathBuf,
    pub category: EvidenceCategory,
    /// Lowercased file name, for keyword tests.
    pub name_lower: String,
    /// Bounded text sample; `None` when the file could not be read.
    pub sample: Option<String>,
    /// Present only for structured-source categories.
    pub parsed: Option<LoadedEvidence>,
    pub digest: Result<String, HashError>,
}

impl ScannedFile {
    pub fn file_name(&self) -> &str {
        self.rel_path.rsplit('/').next().unwrap_or(&self.rel_path)
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_ref().ok().map(|s| s.as_str())
    }

    fn from_classified(f: ClassifiedFile, cfg: &AuditConfig) -> Self {
        let sample = match read_text_sample(&f.abs_path, cfg.sample_bytes) {
            Ok(s) => Some(s),
            Err(e) => {
                debug!(path = %f.rel_path, error = %e, "no text sample");
                None
            }
        };
        let parsed = if f.category.is_structured_source() {
            Some(load_evidence(&f.abs_path, cfg))
        } else {
            None
        };
        let digest = sha256_file(&f.abs_path, cfg.hash_chunk_bytes);
        if let Err(e) = &digest {
            debug!(path = %f.rel_path, error = %e, "digest unavailable");
        }
        Self {
            name_lower: f.file_name().to_lowercase(),
            rel_path: f.rel_path,
            abs_path: f.abs_path,
            category: f.category,
            sample,
            parsed,
            digest,
        }
    }
}

/// Every scanned file of a run, grouped by category in classification order.
#[derive(Debug, Default)]
pub struct EvidenceInventory {
    by_category: BTreeMap<EvidenceCategory, Vec<ScannedFile>>,
}

impl EvidenceInventory {
    pub fn build(classification: Classification, cfg: &AuditConfig) -> Self {
        let by_category = classification
            .by_category
            .into_iter()
            .map(|(category, files)| {
                let scanned = files
                    .into_iter()
                    .map(|f| ScannedFile::from_classified(f, cfg))
                    .collect();
                (category, scanned)
            })
            .collect();
        Self { by_category }
    }

    #[cfg(test)]
    pub(crate) fn from_files(files: Vec<ScannedFile>) -> Self {
        let mut by_category: BTreeMap<EvidenceCategory, Vec<ScannedFile>> = BTreeMap::new();
        for f in files {
            by_category.entry(f.category).or_default().push(f);
        }
        Self { by_category }
    }

    pub fn files(&self, category: EvidenceCategory) -> &[ScannedFile] {
        self.by_category
            .get(&category)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn all(&self) -> impl Iterator<Item = &ScannedFile> {
        self.by_category.values().flatten()
    }

    pub fn has_any(&self, category: EvidenceCategory) -> bool {
        !self.files(category).is_empty()
    }

    pub fn total(&self) -> usize {
        self.by_category.values().map(|v| v.len()).sum()
    }

    pub fn counts(&self) -> BTreeMap<String, usize> {
        EvidenceCategory::ALL
            .iter()
            .map(|c| (c.as_str().to_string(), self.files(*c).len()))
            .collect()
    }

    /// Successfully parsed documents of `category`.
    pub fn parsed(
        &self,
        category: EvidenceCategory,
    ) -> impl Iterator<Item = (&ScannedFile, &LoadedEvidence)> {
        self.files(category)
            .iter()
            .filter_map(|f| match &f.parsed {
                Some(p) if !p.is_failed() => Some((f, p)),
                _ => None,
            })
    }
}
