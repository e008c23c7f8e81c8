use govaudit_core::catalog::{RequirementCatalog, RiskTier};
use govaudit_core::config::AuditConfig;
use govaudit_core::eval::ItemStatus;
use govaudit_core::run::AuditRunner;
use serde_json::json;
use std::fs;
use std::time::SystemTime;

fn custom_catalog() -> serde_json::Value {
    json!({
        "name": "privacy",
        "version": "0.3.0",
        "references": {
            "GDPR": {
                "title": "Regulation (EU) 2016/679",
                "url": "https://eur-lex.europa.eu/eli/reg/2016/679/oj",
                "description": "General Data Protection Regulation"
            }
        },
        "items": [
            {
                "id": "dpia",
                "weight": 12,
                "names": {"en": "Impact assessment", "pt": "Avaliação de impacto", "es": "Evaluación de impacto"},
                "description": "Data protection impact assessment on file.",
                "keywords": ["dpia", "impact assessment"],
                "required_for": ["high", "limited"],
                "legal_basis": {"GDPR": "Art. 35"}
            },
            {
                "id": "model_files",
                "weight": 5,
                "names": {"en": "Model files", "pt": "Arquivos de modelo", "es": "Archivos de modelo"},
                "description": "Versioned model artifacts.",
                "keywords": ["weights"],
                "required_for": ["low"],
                "legal_basis": {},
                "structural_check": "model_versioning"
            }
        ]
    })
}

#[test]
fn catalog_loaded_from_json_drives_the_audit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("privacy.json");
    fs::write(&path, serde_json::to_vec_pretty(&custom_catalog()).unwrap()).unwrap();
    let catalog = RequirementCatalog::from_json_file(&path).unwrap();
    assert_eq!(catalog.max_score(RiskTier::High), 12);
    assert_eq!(catalog.max_score(RiskTier::Low), 5);

    let runner = AuditRunner::new(AuditConfig::default(), catalog).unwrap();
    assert_eq!(runner.compiled().tier_nesting_violations.len(), 1);

    let root = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    fs::write(root.path().join("notes.md"), "Our DPIA was signed in March.").unwrap();
    fs::write(root.path().join("net.safetensors"), b"t").unwrap();

    let high = runner
        .perform_audit(root.path(), out.path(), RiskTier::High, SystemTime::now())
        .unwrap();
    assert_eq!(high.results["dpia"].status, ItemStatus::Found);
    assert_eq!(high.results["model_files"].status, ItemStatus::Optional);
    assert_eq!(high.summary.compliance_percentage, 100.0);

    let low = runner
        .perform_audit(root.path(), out.path(), RiskTier::Low, SystemTime::now())
        .unwrap();
    assert_eq!(low.results["model_files"].status, ItemStatus::Found);
    assert_eq!(low.results["model_files"].evidence, vec!["net.safetensors".to_string()]);
}

#[test]
fn catalog_citing_an_undeclared_framework_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    let mut doc = custom_catalog();
    doc["items"][0]["legal_basis"] = json!({"HIPAA": "164.312"});
    fs::write(&path, serde_json::to_vec(&doc).unwrap()).unwrap();

    let err = RequirementCatalog::from_json_file(&path).unwrap_err();
    assert!(err.to_string().contains("HIPAA"));
}

#[test]
fn builtin_catalog_survives_a_json_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("traceability.json");
    let builtin = RequirementCatalog::builtin("traceability").unwrap();
    fs::write(&path, serde_json::to_vec(&builtin).unwrap()).unwrap();

    let loaded = RequirementCatalog::from_json_file(&path).unwrap();
    assert_eq!(loaded, builtin);
    for tier in RiskTier::ALL {
        assert_eq!(loaded.max_score(tier), builtin.max_score(tier));
    }
}

#[test]
fn config_file_overrides_ignored_directories() {
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("cfg.json");
    fs::write(&cfg_path, br#"{"ignored_dirs": ["vendor"]}"#).unwrap();
    let cfg = AuditConfig::from_json_file(&cfg_path).unwrap();

    let root = tempfile::tempdir().unwrap();
    fs::create_dir_all(root.path().join("vendor")).unwrap();
    fs::create_dir_all(root.path().join(".git")).unwrap();
    fs::write(root.path().join("vendor/model.pt"), b"w").unwrap();
    fs::write(root.path().join(".git/model.pt"), b"w").unwrap();

    let runner = AuditRunner::new(cfg, RequirementCatalog::builtin("traceability").unwrap()).unwrap();
    let out = tempfile::tempdir().unwrap();
    let r = runner
        .perform_audit(root.path(), out.path(), RiskTier::Low, SystemTime::now())
        .unwrap();
    assert_eq!(r.summary.scanned_files, 1);
    assert_eq!(r.results["model_versioning"].evidence, vec![".git/model.pt".to_string()]);
}
