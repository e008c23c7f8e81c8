pub mod principles;
pub mod traceability;

use crate::error::{CoreError, CoreResult};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    High,
    Limited,
    Low,
}

impl RiskTier {
    pub const ALL: [RiskTier; 3] = [RiskTier::High, RiskTier::Limited, RiskTier::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::High => "high",
            RiskTier::Limited => "limited",
            RiskTier::Low => "low",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTier {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(RiskTier::High),
            "limited" => Ok(RiskTier::Limited),
            "low" => Ok(RiskTier::Low),
            other => Err(CoreError::InvalidInput(format!(
                "invalid risk level {}; choose from high, limited, low",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Pt,
    Es,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Pt, Language::Es];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pt => "pt",
            Language::Es => "es",
        }
    }
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "pt" => Ok(Language::Pt),
            "es" => Ok(Language::Es),
            other => Err(CoreError::InvalidInput(format!("unsupported language {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalizedNames {
    pub en: String,
    pub pt: String,
    pub es: String,
}

impl LocalizedNames {
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.en,
            Language::Pt => &self.pt,
            Language::Es => &self.es,
        }
    }
}

/// Bespoke corroboration run in addition to keyword matching.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StructuralCheck {
    DatasetVersioning,
    ModelVersioning,
    Reproducibility,
    CrossReference,
    FileIntegrity,
}

impl StructuralCheck {
    /// Decisive checks alone determine the outcome: keyword matches are
    /// recorded but cannot mark the item found on their own.
    pub fn is_decisive(&self) -> bool {
        matches!(
            self,
            StructuralCheck::Reproducibility
                | StructuralCheck::CrossReference
                | StructuralCheck::FileIntegrity
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegulatoryReference {
    pub title: String,
    pub url: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequirementItem {
    pub id: String,
    pub weight: u32,
    pub names: LocalizedNames,
    pub description: String,
    pub keywords: Vec<String>,
    pub required_for: BTreeSet<RiskTier>,
    /// Framework key (see the catalog's references) -> clause text.
    pub legal_basis: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structural_check: Option<StructuralCheck>,
}

impl RequirementItem {
    pub fn applies_to(&self, tier: RiskTier) -> bool {
        self.required_for.contains(&tier)
    }
}

/// The single source of truth for what an audit run checks. Changing a
/// weight changes score comparability across runs, so catalogs carry a
/// version that is echoed into every report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequirementCatalog {
    pub name: String,
    pub version: String,
    pub references: BTreeMap<String, RegulatoryReference>,
    pub items: Vec<RequirementItem>,
}

pub const BUILTIN_CATALOGS: [&str; 4] =
    ["traceability", "accountability", "sustainability", "fairness"];

impl RequirementCatalog {
    pub fn builtin(name: &str) -> CoreResult<Self> {
        let catalog = match name {
            "traceability" => traceability::traceability_catalog(),
            "accountability" => principles::accountability_catalog(),
            "sustainability" => principles::sustainability_catalog(),
            "fairness" => principles::fairness_catalog(),
            other => {
                return Err(CoreError::Catalog(format!(
                    "unknown built-in catalog {}; choose from {}",
                    other,
                    BUILTIN_CATALOGS.join(", ")
                )))
            }
        };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let bytes = fs::read(path.as_ref())?;
        let catalog: RequirementCatalog = serde_json::from_slice(&bytes)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.items.is_empty() {
            return Err(CoreError::Catalog(format!(
                "catalog {} has no items",
                self.name
            )));
        }
        let mut seen = BTreeSet::new();
        for item in &self.items {
            if item.id.trim().is_empty() {
                return Err(CoreError::Catalog("item id cannot be empty".to_string()));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(CoreError::Catalog(format!("duplicate item id {}", item.id)));
            }
            if item.weight == 0 {
                return Err(CoreError::Catalog(format!(
                    "item {} must have a positive weight",
                    item.id
                )));
            }
            if item.keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(CoreError::Catalog(format!(
                    "item {} has no keywords",
                    item.id
                )));
            }
            for framework in item.legal_basis.keys() {
                if !self.references.contains_key(framework) {
                    return Err(CoreError::Catalog(format!(
                        "item {} cites unknown framework {}",
                        item.id, framework
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn item(&self, id: &str) -> Option<&RequirementItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Items required for `tier`, in catalog order.
    pub fn items_for(&self, tier: RiskTier) -> Vec<&RequirementItem> {
        self.items.iter().filter(|i| i.applies_to(tier)).collect()
    }

    pub fn max_score(&self, tier: RiskTier) -> u32 {
        self.items_for(tier).iter().map(|i| i.weight).sum()
    }

    /// Items required for a lower tier but not for the next higher one.
    /// Tiers are not forced to nest; this only reports where they do not.
    pub fn tier_nesting_violations(&self) -> Vec<String> {
        let pairs = [
            (RiskTier::Low, RiskTier::Limited),
            (RiskTier::Limited, RiskTier::High),
        ];
        let mut out = Vec::new();
        for item in &self.items {
            for (lower, higher) in pairs {
                if item.applies_to(lower) && !item.applies_to(higher) {
                    out.push(format!(
                        "{} is required for {} but not for {}",
                        item.id, lower, higher
                    ));
                }
            }
        }
        out
    }

    pub fn compile(&self) -> CoreResult<CompiledCatalog> {
        let violations = self.tier_nesting_violations();
        for v in &violations {
            warn!(catalog = %self.name, violation = %v, "risk tiers do not nest");
        }
        let requirements = self
            .items
            .iter()
            .map(CompiledRequirement::new)
            .collect::<CoreResult<Vec<_>>>()?;
        Ok(CompiledCatalog {
            catalog: self.clone(),
            requirements,
            tier_nesting_violations: violations,
        })
    }
}

/// A requirement item with its keyword matcher built once.
#[derive(Debug, Clone)]
pub struct CompiledRequirement {
    pub item: RequirementItem,
    matcher: Regex,
}

impl CompiledRequirement {
    pub fn new(item: &RequirementItem) -> CoreResult<Self> {
        let alternatives: Vec<String> = item
            .keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(regex::escape)
            .collect();
        let matcher = RegexBuilder::new(&format!("(?:{})", alternatives.join("|")))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            item: item.clone(),
            matcher,
        })
    }

    /// Case-insensitive substring test for any keyword.
    pub fn matches(&self, haystack: &str) -> bool {
        self.matcher.is_match(haystack)
    }
}

#[derive(Debug, Clone)]
pub struct CompiledCatalog {
    pub catalog: RequirementCatalog,
    pub requirements: Vec<CompiledRequirement>,
    pub tier_nesting_violations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_catalog_validates_and_compiles() {
        for name in BUILTIN_CATALOGS {
            let c = RequirementCatalog::builtin(name).unwrap();
            let compiled = c.compile().unwrap();
            assert_eq!(compiled.requirements.len(), c.items.len());
            assert_eq!(compiled.catalog.name, name);
        }
        assert!(RequirementCatalog::builtin("fairness").is_ok());
    }

    #[test]
    fn traceability_tiers_nest() {
        let c = RequirementCatalog::builtin("traceability").unwrap();
        assert!(c.tier_nesting_violations().is_empty());
        assert_eq!(c.items.len(), 22);
        assert_eq!(c.items_for(RiskTier::High).len(), 22);
        assert_eq!(c.items_for(RiskTier::Limited).len(), 10);
        assert_eq!(c.items_for(RiskTier::Low).len(), 5);
    }

    #[test]
    fn max_score_is_sum_of_applicable_weights() {
        let c = RequirementCatalog::builtin("traceability").unwrap();
        for tier in RiskTier::ALL {
            let expected: u32 = c
                .items
                .iter()
                .filter(|i| i.required_for.contains(&tier))
                .map(|i| i.weight)
                .sum();
            assert_eq!(c.max_score(tier), expected);
        }
        assert_eq!(c.max_score(RiskTier::Low), 46);
    }

    #[test]
    fn nesting_violations_are_reported_not_fixed() {
        let mut c = RequirementCatalog::builtin("traceability").unwrap();
        c.items[0].required_for = [RiskTier::Low].into_iter().collect();
        let v = c.tier_nesting_violations();
        assert_eq!(v.len(), 1);
        assert!(v[0].contains("not for limited"));
        assert!(c.items_for(RiskTier::Low).iter().any(|i| i.id == c.items[0].id));
    }

    #[test]
    fn validation_rejects_unknown_frameworks_and_duplicates() {
        let mut c = RequirementCatalog::builtin("traceability").unwrap();
        c.items[1].legal_basis.insert("NOPE".to_string(), "x".to_string());
        assert!(c.validate().unwrap_err().to_string().contains("unknown framework"));

        let mut c = RequirementCatalog::builtin("traceability").unwrap();
        let dup = c.items[0].clone();
        c.items.push(dup);
        assert!(c.validate().unwrap_err().to_string().contains("duplicate"));
    }

    #[test]
    fn matcher_is_case_insensitive_substring() {
        let c = RequirementCatalog::builtin("traceability").unwrap();
        let req = CompiledRequirement::new(c.item("cross_reference").unwrap()).unwrap();
        assert!(req.matches("See the CROSS-REFERENCE table"));
        assert!(req.matches("hyperlinked"));
        assert!(!req.matches("nothing relevant here"));
    }

    #[test]
    fn risk_tier_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<RiskTier>().unwrap(), RiskTier::High);
        assert!("medium".parse::<RiskTier>().is_err());
    }
}
