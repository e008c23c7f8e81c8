use crate::catalog::{RequirementCatalog, RiskTier};
use crate::eval::evaluator::{EvaluationResult, ItemStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreSummary {
    pub total_score: u32,
    pub max_score: u32,
    pub compliance_percentage: f64,
    pub scanned_files: usize,
    pub risk_level: RiskTier,
    pub required_items_count: usize,
}

impl ScoreSummary {
    /// All-zero summary used when a run cannot produce results.
    pub fn empty(tier: RiskTier) -> Self {
        Self {
            total_score: 0,
            max_score: 0,
            compliance_percentage: 0.0,
            scanned_files: 0,
            risk_level: tier,
            required_items_count: 0,
        }
    }
}

/// `total / max * 100` rounded to two decimals; `0.0` when `max` is zero.
pub fn compliance_percentage(total: u32, max: u32) -> f64 {
    if max == 0 {
        return 0.0;
    }
    (f64::from(total) / f64::from(max) * 10_000.0).round() / 100.0
}

pub fn aggregate(
    catalog: &RequirementCatalog,
    tier: RiskTier,
    results: &BTreeMap<String, EvaluationResult>,
    scanned_files: usize,
) -> ScoreSummary {
    let total_score = results
        .values()
        .filter(|r| r.status != ItemStatus::Optional)
        .map(|r| r.score)
        .sum();
    let max_score = catalog.max_score(tier);
    ScoreSummary {
        total_score,
        max_score,
        compliance_percentage: compliance_percentage(total_score, max_score),
        scanned_files,
        risk_level: tier,
        required_items_count: catalog.items_for(tier).len(),
    }
}

#[cfg(test)]
mod tests {
    use super::compliance_percentage;

    #[test]
    fn percentage_rounds_to_two_decimals() {
        assert_eq!(compliance_percentage(1, 3), 33.33);
        assert_eq!(compliance_percentage(2, 3), 66.67);
        assert_eq!(compliance_percentage(46, 46), 100.0);
    }

    #[test]
    fn zero_max_score_is_zero_percent() {
        assert_eq!(compliance_percentage(0, 0), 0.0);
    }
}
