use crate::catalog::{CompiledCatalog, CompiledRequirement, RiskTier};
use crate::eval::structural::{run_structural_check, StructuralContext};
use crate::evidence::archive::EvidenceArchive;
use crate::scan::{EvidenceInventory, ScannedFile};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Found,
    NotFound,
    Optional,
    Error,
}

/// Outcome for one requirement item. `score` is either 0 or `weight`, and a
/// non-zero score always comes with at least one evidence path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationResult {
    pub weight: u32,
    pub score: u32,
    pub checks: Vec<String>,
    pub evidence: Vec<String>,
    pub status: ItemStatus,
    pub is_required_for_risk: bool,
    pub legal_basis: BTreeMap<String, String>,
}

impl EvaluationResult {
    fn pending(req: &CompiledRequirement, required: bool) -> Self {
        Self {
            weight: req.item.weight,
            score: 0,
            checks: Vec::new(),
            evidence: Vec::new(),
            status: ItemStatus::NotFound,
            is_required_for_risk: required,
            legal_basis: req.item.legal_basis.clone(),
        }
    }
}

pub struct RequirementEvaluator<'a> {
    compiled: &'a CompiledCatalog,
    tier: RiskTier,
}

impl<'a> RequirementEvaluator<'a> {
    pub fn new(compiled: &'a CompiledCatalog, tier: RiskTier) -> Self {
        Self { compiled, tier }
    }

    /// Evaluates every catalog item. Items outside the active tier come back
    /// `optional`; nothing here aborts the pass.
    pub fn evaluate_all(
        &self,
        inventory: &EvidenceInventory,
        cross_reference_issues: &[String],
        archive: &mut EvidenceArchive,
    ) -> BTreeMap<String, EvaluationResult> {
        let ctx = StructuralContext {
            inventory,
            cross_reference_issues,
        };
        self.compiled
            .requirements
            .iter()
            .map(|req| (req.item.id.clone(), self.evaluate(req, &ctx, archive)))
            .collect()
    }

    fn evaluate(
        &self,
        req: &CompiledRequirement,
        ctx: &StructuralContext<'_>,
        archive: &mut EvidenceArchive,
    ) -> EvaluationResult {
        let item = &req.item;
        let mut result = EvaluationResult::pending(req, item.applies_to(self.tier));
        if !result.is_required_for_risk {
            result.status = ItemStatus::Optional;
            return result;
        }

        let matched = keyword_matches(req, ctx.inventory);
        for f in &matched {
            result.checks.push(format!(
                "Keyword match for '{}' in {}.",
                item.names.en,
                f.file_name()
            ));
        }

        let decisive = item.structural_check.map_or(false, |c| c.is_decisive());
        let mut contributing: Vec<&ScannedFile> = if decisive { Vec::new() } else { matched };
        let mut errored = false;

        if let Some(check) = item.structural_check {
            match run_structural_check(check, ctx) {
                Ok(outcome) => {
                    result.checks.extend(outcome.narratives);
                    if outcome.passed {
                        contributing.extend(outcome.evidence);
                    }
                }
                Err(e) => {
                    error!(item = %item.id, error = %e, "structural check failed");
                    result
                        .checks
                        .push(format!("Error during specific validation: {}", e));
                    errored = true;
                }
            }
        }

        let mut seen = BTreeSet::new();
        for f in contributing {
            if !seen.insert(f.rel_path.as_str()) {
                continue;
            }
            archive.register(&f.rel_path, &f.abs_path);
            result.evidence.push(f.rel_path.clone());
        }

        if !result.evidence.is_empty() {
            result.score = item.weight;
            result.status = ItemStatus::Found;
        } else if errored {
            result.status = ItemStatus::Error;
        } else {
            result
                .checks
                .push(format!("No clear evidence found for '{}'.", item.names.en));
            result.status = ItemStatus::NotFound;
        }
        debug!(item = %item.id, status = ?result.status, "item evaluated");
        result
    }
}

/// Files whose name or text sample contains any of the item's keywords.
/// A file with no readable sample is still tested by name.
fn keyword_matches<'a>(
    req: &CompiledRequirement,
    inventory: &'a EvidenceInventory,
) -> Vec<&'a ScannedFile> {
    inventory
        .all()
        .filter(|f| {
            req.matches(&f.name_lower) || f.sample.as_deref().map_or(false, |s| req.matches(s))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{ItemStatus, RequirementEvaluator};
    use crate::catalog::{RequirementCatalog, RiskTier};
    use crate::config::AuditConfig;
    use crate::evidence::archive::EvidenceArchive;
    use crate::evidence::hasher::HashError;
    use crate::evidence::loader::LoadedEvidence;
    use crate::scan::{classify_tree, EvidenceCategory, EvidenceInventory, ScannedFile};
    use serde_json::json;
    use std::fs;
    use std::path::{Path, PathBuf};

    fn evaluate(root: &Path, out: &Path, tier: RiskTier) -> std::collections::BTreeMap<String, super::EvaluationResult> {
        let cfg = AuditConfig::default();
        let compiled = RequirementCatalog::builtin("traceability")
            .unwrap()
            .compile()
            .unwrap();
        let inventory = EvidenceInventory::build(classify_tree(root, &cfg, &[]), &cfg);
        let issues = crate::eval::crossref::check_cross_references(&inventory);
        let mut archive = EvidenceArchive::create(out, &cfg).unwrap();
        RequirementEvaluator::new(&compiled, tier).evaluate_all(&inventory, &issues, &mut archive)
    }

    #[test]
    fn keyword_in_content_marks_item_found_with_evidence() {
        let root = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(root.path().join("README.md"), "We track fairness across groups.").unwrap();

        let results = evaluate(root.path(), out.path(), RiskTier::High);
        let bias = &results["bias_metrics"];
        assert_eq!(bias.status, ItemStatus::Found);
        assert_eq!(bias.score, bias.weight);
        assert_eq!(bias.evidence, vec!["README.md".to_string()]);
    }

    #[test]
    fn items_outside_the_tier_are_optional() {
        let root = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(root.path().join("README.md"), "incident response notes").unwrap();

        let results = evaluate(root.path(), out.path(), RiskTier::Low);
        let incident = &results["incident_documentation"];
        assert_eq!(incident.status, ItemStatus::Optional);
        assert_eq!(incident.score, 0);
        assert!(!incident.is_required_for_risk);
    }

    #[test]
    fn keywords_alone_do_not_satisfy_reproducibility() {
        let root = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(root.path().join("README.md"), "How to reproduce our results.").unwrap();

        let results = evaluate(root.path(), out.path(), RiskTier::Low);
        let r = &results["reproducibility_capability"];
        assert_eq!(r.status, ItemStatus::NotFound);
        assert!(r.evidence.is_empty());
        assert!(r.checks.iter().any(|c| c.starts_with("Keyword match")));
    }

    #[test]
    fn recorded_digest_confirms_file_integrity() {
        let root = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(root.path().join("model.pkl"), b"weights").unwrap();
        let digest = crate::evidence::hasher::sha256_hex(b"weights");
        fs::write(
            root.path().join("metadata.json"),
            format!(r#"{{"version": "1", "model_hash": "{}"}}"#, digest),
        )
        .unwrap();

        let results = evaluate(root.path(), out.path(), RiskTier::Low);
        let r = &results["file_integrity_hash"];
        assert_eq!(r.status, ItemStatus::Found);
        assert!(r.evidence.contains(&"model.pkl".to_string()));
    }

    fn unhashable(rel: &str, category: EvidenceCategory) -> ScannedFile {
        ScannedFile {
            rel_path: rel.to_string(),
            abs_path: PathBuf::from(rel),
            category,
            name_lower: rel.to_lowercase(),
            sample: None,
            parsed: None,
            digest: Err(HashError::NotAFile(PathBuf::from(rel))),
        }
    }

    #[test]
    fn unhashable_candidates_turn_file_integrity_into_an_error() {
        let out = tempfile::tempdir().unwrap();
        let cfg = AuditConfig::default();
        let compiled = RequirementCatalog::builtin("traceability")
            .unwrap()
            .compile()
            .unwrap();
        let metadata = ScannedFile {
            parsed: Some(LoadedEvidence::Structured(json!({"dataset_hash": "abc"}))),
            ..unhashable("meta.json", EvidenceCategory::MetadataFiles)
        };
        let inventory = EvidenceInventory::from_files(vec![
            metadata,
            unhashable("data.csv", EvidenceCategory::DatasetFiles),
            unhashable("model.pkl", EvidenceCategory::ModelArtifacts),
        ]);
        let mut archive = EvidenceArchive::create(out.path(), &cfg).unwrap();

        let results = RequirementEvaluator::new(&compiled, RiskTier::Low)
            .evaluate_all(&inventory, &[], &mut archive);
        let fi = &results["file_integrity_hash"];
        assert_eq!(fi.status, ItemStatus::Error);
        assert_eq!(fi.score, 0);
        assert!(fi.evidence.is_empty());
        assert!(fi
            .checks
            .iter()
            .any(|c| c.starts_with("Error during specific validation")));

        let dv = &results["dataset_versioning"];
        assert_eq!(dv.status, ItemStatus::Found);
        assert!(dv.evidence.contains(&"meta.json".to_string()));
        assert_eq!(results["model_versioning"].status, ItemStatus::Found);
    }

    #[test]
    fn found_items_are_archived_once() {
        let root = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(root.path().join("model.pkl"), b"weights").unwrap();

        let results = evaluate(root.path(), out.path(), RiskTier::Low);
        assert_eq!(results["model_versioning"].status, ItemStatus::Found);
        let copies = fs::read_dir(out.path().join("evidence")).unwrap().count();
        assert_eq!(copies, 1);
    }
}
