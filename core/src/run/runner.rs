use crate::catalog::{CompiledCatalog, RequirementCatalog, RiskTier};
use crate::config::AuditConfig;
use crate::error::{CoreError, CoreResult};
use crate::eval::crossref::check_cross_references;
use crate::eval::retention::check_retention;
use crate::eval::schema::check_document_shapes;
use crate::eval::score::aggregate;
use crate::eval::RequirementEvaluator;
use crate::evidence::archive::EvidenceArchive;
use crate::report::{
    assemble_report, fallback_report, write_report, AuditReport, AuditResults, ReportIssues,
    RunContext, WrittenReport,
};
use crate::scan::{classify_tree, EvidenceInventory};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct AuditRequest {
    pub root: PathBuf,
    pub output_dir: PathBuf,
    pub tier: RiskTier,
    pub operator: String,
}

#[derive(Debug)]
pub struct AuditOutcome {
    pub report: AuditReport,
    /// `None` only when even the fallback report could not be written.
    pub written: Option<WrittenReport>,
    /// Set when the pass or its persistence failed and fallback output was
    /// produced instead.
    pub degraded: bool,
    pub failure: Option<String>,
}

/// `$USER`, else `unknown`.
pub fn default_operator() -> String {
    std::env::var("USER")
        .ok()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn environment_info() -> String {
    format!(
        "{} {} ({}/{})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// Canonical audit root. A missing root or a non-directory is fatal and is
/// reported before any scanning starts.
pub fn resolve_root(root: &Path) -> CoreResult<PathBuf> {
    if !root.exists() {
        return Err(CoreError::RootMissing(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(CoreError::RootNotDirectory(root.to_path_buf()));
    }
    Ok(root.canonicalize()?)
}

/// Owns everything one audit needs: configuration and a compiled catalog.
/// Nothing is shared between runners.
pub struct AuditRunner {
    config: AuditConfig,
    compiled: CompiledCatalog,
}

impl AuditRunner {
    pub fn new(config: AuditConfig, catalog: RequirementCatalog) -> CoreResult<Self> {
        catalog.validate()?;
        let compiled = catalog.compile()?;
        Ok(Self { config, compiled })
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    pub fn compiled(&self) -> &CompiledCatalog {
        &self.compiled
    }

    /// Classification, loading, checks, evaluation and scoring, with evidence
    /// copied under `output_dir`. Writes nothing else.
    pub fn perform_audit(
        &self,
        root: &Path,
        output_dir: &Path,
        tier: RiskTier,
        now: SystemTime,
    ) -> CoreResult<AuditResults> {
        let cfg = &self.config;
        let root = resolve_root(root)?;
        fs::create_dir_all(output_dir)?;
        let output_dir = output_dir.canonicalize()?;
        let exclude = if output_dir == root {
            warn!(root = %root.display(), "output directory is the audit root");
            vec![output_dir.join(&cfg.evidence_dir_name)]
        } else if output_dir.starts_with(&root) {
            vec![output_dir.clone()]
        } else {
            Vec::new()
        };

        let classification = classify_tree(&root, cfg, &exclude);
        let scanned_categories = classification.counts();
        let inventory = EvidenceInventory::build(classification, cfg);
        info!(files = inventory.total(), "evidence inventory built");

        let retention = check_retention(&root, cfg, &exclude, now);
        let cross_reference = check_cross_references(&inventory);
        let schema = check_document_shapes(&inventory);

        let mut archive = EvidenceArchive::create(&output_dir, cfg)?;
        let results = RequirementEvaluator::new(&self.compiled, tier).evaluate_all(
            &inventory,
            &cross_reference,
            &mut archive,
        );
        let summary = aggregate(&self.compiled.catalog, tier, &results, inventory.total());
        info!(
            total = summary.total_score,
            max = summary.max_score,
            pct = summary.compliance_percentage,
            "audit scored"
        );

        Ok(AuditResults {
            summary,
            results,
            evidence_index: archive.into_index(),
            issues: ReportIssues {
                retention,
                cross_reference,
                schema,
            },
            scanned_categories,
        })
    }

    /// Runs the audit and writes its report. Only an unusable root is an
    /// error; later failures produce a fallback report and a degraded
    /// outcome.
    pub fn run(&self, request: &AuditRequest) -> CoreResult<AuditOutcome> {
        let root = resolve_root(&request.root)?;
        let audit_run = RunContext {
            user: request.operator.clone(),
            environment_info: environment_info(),
            repository_path: root.display().to_string(),
            risk_level: request.tier,
        };
        info!(
            root = %root.display(),
            tier = %request.tier,
            catalog = %self.compiled.catalog.name,
            "audit started"
        );

        let mut failure = None;
        let pass = self.perform_audit(&root, &request.output_dir, request.tier, SystemTime::now());
        let results = match pass {
            Ok(r) => r,
            Err(e) => {
                error!(error = %e, "audit pass failed");
                failure = Some(e.to_string());
                AuditResults::failed(request.tier, &e.to_string())
            }
        };

        let report = assemble_report(results, audit_run.clone(), &self.compiled);
        match write_report(&report, &request.output_dir, &self.config) {
            Ok(written) => Ok(AuditOutcome {
                report,
                written: Some(written),
                degraded: failure.is_some(),
                failure,
            }),
            Err(e) => {
                error!(error = %e, "report could not be written; writing fallback");
                let reason = e.to_string();
                let fallback = fallback_report(audit_run, &self.compiled.catalog.name, &reason);
                let written = match write_report(&fallback, &request.output_dir, &self.config) {
                    Ok(w) => Some(w),
                    Err(e) => {
                        error!(error = %e, "fallback report could not be written");
                        None
                    }
                };
                Ok(AuditOutcome {
                    report: fallback,
                    written,
                    degraded: true,
                    failure: Some(reason),
                })
            }
        }
    }
}
