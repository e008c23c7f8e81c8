use crate::catalog::{RegulatoryReference, RiskTier};
use crate::eval::{EvaluationResult, ScoreSummary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ulid::Ulid;

pub fn new_audit_id() -> String {
    format!("a_{}", Ulid::new())
}

pub fn now_rfc3339_utc() -> String {
    let now = time::OffsetDateTime::now_utc();
    now.format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| now.unix_timestamp().to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunContext {
    pub user: String,
    pub environment_info: String,
    pub repository_path: String,
    pub risk_level: RiskTier,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogInfo {
    pub name: String,
    pub version: String,
    pub tier_nesting_violations: Vec<String>,
}

/// One language rendering of an item. Every rendering of the same item
/// carries the same result and citations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemDetail {
    pub name: String,
    pub description: String,
    pub result: EvaluationResult,
    pub legal_basis: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReportIssues {
    pub retention: Vec<String>,
    pub cross_reference: Vec<String>,
    #[serde(default)]
    pub schema: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditReport {
    pub audit_id: String,
    pub audit_timestamp_utc: String,
    pub audit_run: RunContext,
    pub catalog: CatalogInfo,
    pub regulatory_references: BTreeMap<String, RegulatoryReference>,
    pub summary: ScoreSummary,
    /// Item id -> language code -> rendering.
    pub details: BTreeMap<String, BTreeMap<String, ItemDetail>>,
    /// Path relative to the audit root -> path relative to the report root.
    pub evidence_index: BTreeMap<String, String>,
    pub issues: ReportIssues,
    pub scanned_categories: BTreeMap<String, usize>,
}
