use crate::catalog::{CompiledCatalog, Language, RiskTier};
use crate::eval::{EvaluationResult, ScoreSummary};
use crate::report::model::{
    new_audit_id, now_rfc3339_utc, AuditReport, CatalogInfo, ItemDetail, ReportIssues,
    RunContext,
};
use std::collections::BTreeMap;

/// Everything an audit pass produces before it becomes a report.
#[derive(Debug, Clone)]
pub struct AuditResults {
    pub summary: ScoreSummary,
    pub results: BTreeMap<String, EvaluationResult>,
    pub evidence_index: BTreeMap<String, String>,
    pub issues: ReportIssues,
    pub scanned_categories: BTreeMap<String, usize>,
}

impl AuditResults {
    /// Zero-score results carrying a single critical narrative.
    pub fn failed(tier: RiskTier, reason: &str) -> Self {
        Self {
            summary: ScoreSummary::empty(tier),
            results: BTreeMap::new(),
            evidence_index: BTreeMap::new(),
            issues: ReportIssues {
                cross_reference: vec![format!("CRITICAL: audit failed: {}", reason)],
                ..ReportIssues::default()
            },
            scanned_categories: BTreeMap::new(),
        }
    }
}

pub fn assemble_report(
    results: AuditResults,
    audit_run: RunContext,
    compiled: &CompiledCatalog,
) -> AuditReport {
    let catalog = &compiled.catalog;
    let mut details = BTreeMap::new();
    for (id, result) in results.results {
        let Some(item) = catalog.item(&id) else {
            continue;
        };
        let renderings = Language::ALL
            .iter()
            .map(|lang| {
                (
                    lang.code().to_string(),
                    ItemDetail {
                        name: item.names.get(*lang).to_string(),
                        description: item.description.clone(),
                        result: result.clone(),
                        legal_basis: item.legal_basis.clone(),
                    },
                )
            })
            .collect();
        details.insert(id, renderings);
    }

    AuditReport {
        audit_id: new_audit_id(),
        audit_timestamp_utc: now_rfc3339_utc(),
        audit_run,
        catalog: CatalogInfo {
            name: catalog.name.clone(),
            version: catalog.version.clone(),
            tier_nesting_violations: compiled.tier_nesting_violations.clone(),
        },
        regulatory_references: catalog.references.clone(),
        summary: results.summary,
        details,
        evidence_index: results.evidence_index,
        issues: results.issues,
        scanned_categories: results.scanned_categories,
    }
}

/// Minimal report with the regular field names, written when assembly or
/// persistence of the real one fails.
pub fn fallback_report(audit_run: RunContext, catalog_name: &str, reason: &str) -> AuditReport {
    AuditReport {
        audit_id: new_audit_id(),
        audit_timestamp_utc: now_rfc3339_utc(),
        summary: ScoreSummary::empty(audit_run.risk_level),
        audit_run,
        catalog: CatalogInfo {
            name: catalog_name.to_string(),
            version: String::new(),
            tier_nesting_violations: Vec::new(),
        },
        regulatory_references: BTreeMap::new(),
        details: BTreeMap::new(),
        evidence_index: BTreeMap::new(),
        issues: ReportIssues {
            cross_reference: vec![format!("REPORT GENERATION FAILED: {}", reason)],
            ..ReportIssues::default()
        },
        scanned_categories: BTreeMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{assemble_report, fallback_report, AuditResults};
    use crate::catalog::{RequirementCatalog, RiskTier};
    use crate::report::model::RunContext;

    fn run_context() -> RunContext {
        RunContext {
            user: "tester".to_string(),
            environment_info: "test".to_string(),
            repository_path: "/tmp/repo".to_string(),
            risk_level: RiskTier::Low,
        }
    }

    #[test]
    fn failed_results_still_assemble_with_references() {
        let compiled = RequirementCatalog::builtin("traceability")
            .unwrap()
            .compile()
            .unwrap();
        let report = assemble_report(
            AuditResults::failed(RiskTier::Low, "boom"),
            run_context(),
            &compiled,
        );
        assert!(report.audit_id.starts_with("a_"));
        assert_eq!(report.regulatory_references.len(), 3);
        assert_eq!(report.summary.compliance_percentage, 0.0);
        assert!(report.issues.cross_reference[0].contains("boom"));
    }

    #[test]
    fn fallback_keeps_field_names_and_zero_scores() {
        let report = fallback_report(run_context(), "traceability", "disk full");
        let v = serde_json::to_value(&report).unwrap();
        for key in [
            "audit_id",
            "audit_timestamp_utc",
            "audit_run",
            "regulatory_references",
            "summary",
            "details",
            "evidence_index",
            "issues",
            "scanned_categories",
        ] {
            assert!(v.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(v["summary"]["max_score"], 0);
        assert_eq!(v["issues"]["retention"], serde_json::json!([]));
    }
}
