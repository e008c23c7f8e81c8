use super::{
    LocalizedNames, RegulatoryReference, RequirementCatalog, RequirementItem, RiskTier,
    StructuralCheck,
};
use std::collections::BTreeMap;

pub const EU_AI_ACT: &str = "EU_AI_ACT";
pub const NIST_AI_RMF: &str = "NIST_AI_RMF";
pub const ISO_42001: &str = "ISO_42001";

const HIGH: &[RiskTier] = &[RiskTier::High];
const HIGH_LIMITED: &[RiskTier] = &[RiskTier::High, RiskTier::Limited];
const ALL_TIERS: &[RiskTier] = &[RiskTier::High, RiskTier::Limited, RiskTier::Low];

struct Row {
    id: &'static str,
    weight: u32,
    names: [&'static str; 3],
    description: &'static str,
    keywords: &'static [&'static str],
    required_for: &'static [RiskTier],
    /// EU AI Act, NIST AI RMF, ISO/IEC 42001.
    legal_basis: [&'static str; 3],
    structural_check: Option<StructuralCheck>,
}

const ROWS: &[Row] = &[
    Row {
        id: "dataset_versioning",
        weight: 10,
        names: [
            "Dataset Versioning & Provenance",
            "Versionamento de Datasets e Procedência",
            "Versionado de Datasets y Procedencia",
        ],
        description: "Evidence of dataset versioning and provenance, linking models to their data.",
        keywords: &["dataset", "version", "hash", "provenance", "data lineage"],
        required_for: ALL_TIERS,
        legal_basis: [
            "Art. 10(2), 13(2)(a) - Data governance and technical documentation",
            "MAP 02-01, GOVERN 03-01 - Data provenance and documentation",
            "Annex A.8.2 - Data and input management",
        ],
        structural_check: Some(StructuralCheck::DatasetVersioning),
    },
    Row {
        id: "model_versioning",
        weight: 10,
        names: [
            "Model Versioning & Artifacts",
            "Versionamento de Modelos e Artefatos",
            "Versionado de Modelos y Artefactos",
        ],
        description: "Documentation and storage of model artifacts and versions.",
        keywords: &["model", "version", "checkpoint", "artifact", "serialization"],
        required_for: ALL_TIERS,
        legal_basis: [
            "Art. 11, 13(3)(b) - Model management and technical documentation",
            "MAP 03-01 - Model versioning and artifact management",
            "Annex A.8.3 - Model management",
        ],
        structural_check: Some(StructuralCheck::ModelVersioning),
    },
    Row {
        id: "decision_logs",
        weight: 9,
        names: [
            "Decision / Inference Logs",
            "Logs de Decisões / Inferência",
            "Logs de Decisiones / Inferencia",
        ],
        description: "Logs that record model inputs, outputs, and versions for auditing.",
        keywords: &["decision", "prediction", "log", "timestamp", "inference"],
        required_for: HIGH_LIMITED,
        legal_basis: [
            "Art. 13(3)(e), 50 - Logging of changes and decisions",
            "MEASURE 02-01 - Logging and monitoring",
            "Annex A.10.1 - Monitoring and logging",
        ],
        structural_check: None,
    },
    Row {
        id: "model_change_documentation",
        weight: 8,
        names: [
            "Model Change History",
            "Documentação de Histórico de Mudanças",
            "Documentación de Historial de Cambios",
        ],
        description: "Changelogs or documentation detailing model changes and their rationale.",
        keywords: &["change", "modification", "update", "migration", "changelog"],
        required_for: HIGH,
        legal_basis: [
            "Art. 13(3)(c), 16(2) - Record of changes and updates",
            "GOVERN 02-01 - Change management",
            "Clause 8.4 - Change control",
        ],
        structural_check: None,
    },
    Row {
        id: "hyperparameters_config",
        weight: 8,
        names: [
            "Hyperparameters & Training Config",
            "Configuração de Hiperparâmetros e Treinamento",
            "Configuración de Hiperparámetros y Entrenamiento",
        ],
        description: "Documentation of hyperparameters and training configuration for reproducibility.",
        keywords: &["hyperparameter", "config", "parameter", "setting", "training"],
        required_for: ALL_TIERS,
        legal_basis: [
            "Art. 13(3)(d) - Description of training parameters",
            "MAP 03-02 - Training configuration documentation",
            "Annex A.8.4 - Training process documentation",
        ],
        structural_check: None,
    },
    Row {
        id: "audit_evidence",
        weight: 9,
        names: [
            "Audit Approvals & Evidence",
            "Aprovações e Evidências de Auditoria",
            "Aprobaciones y Evidencias de Auditoría",
        ],
        description: "Formal approvals, sign-offs, and committee meeting minutes.",
        keywords: &["audit", "evidence", "approval", "review", "committee"],
        required_for: HIGH,
        legal_basis: [
            "Art. 17, 19 - Human oversight and conformity assessments",
            "GOVERN 04-01 - Audit trails and approvals",
            "Clause 9.2 - Internal audit",
        ],
        structural_check: None,
    },
    Row {
        id: "performance_monitoring",
        weight: 7,
        names: [
            "Performance Monitoring",
            "Monitoramento de Performance",
            "Monitoreo de Rendimiento",
        ],
        description: "Reports on model performance metrics (e.g., accuracy, precision) over time.",
        keywords: &["performance", "metric", "monitor", "dashboard", "accuracy"],
        required_for: HIGH,
        legal_basis: [
            "Art. 13(3)(f), 49 - Monitoring of performance and accuracy",
            "MEASURE 01-01 - Performance monitoring",
            "Annex A.10.2 - Performance evaluation",
        ],
        structural_check: None,
    },
    Row {
        id: "file_integrity_hash",
        weight: 8,
        names: [
            "File Integrity Hashes",
            "Hashes de Integridade de Arquivos",
            "Hashes de Integridad de Archivos",
        ],
        description: "Hashes (e.g., SHA-256) for datasets and models to ensure integrity.",
        keywords: &["hash", "checksum", "integrity", "sha256", "md5"],
        required_for: ALL_TIERS,
        legal_basis: [
            "Art. 10(5), 13(2)(c) - Data and system integrity",
            "MAP 01-02 - Data integrity verification",
            "Annex A.8.1 - Data integrity controls",
        ],
        structural_check: Some(StructuralCheck::FileIntegrity),
    },
    Row {
        id: "cross_reference",
        weight: 9,
        names: [
            "Cross-Reference Validation",
            "Validação de Referências Cruzadas",
            "Validación de Referencias Cruzadas",
        ],
        description: "Verification that logs, models, and datasets are correctly cross-referenced.",
        keywords: &["reference", "link", "correlate", "associate", "cross-reference"],
        required_for: HIGH_LIMITED,
        legal_basis: [
            "Art. 13(3)(g) - Traceability of outputs to inputs and models",
            "MAP 04-01 - Traceability and lineage",
            "Annex A.8.5 - Traceability of AI system outputs",
        ],
        structural_check: Some(StructuralCheck::CrossReference),
    },
    Row {
        id: "dependency_documentation",
        weight: 7,
        names: [
            "Dependency Documentation",
            "Documentação de Dependências",
            "Documentación de Dependencias",
        ],
        description: "List of dependencies (e.g., requirements.txt, pyproject.toml).",
        keywords: &["dependency", "requirement", "environment", "library", "package"],
        required_for: HIGH,
        legal_basis: [
            "Art. 13(3)(h) - System and software dependencies",
            "MAP 03-03 - Dependency documentation",
            "Annex A.8.6 - System dependencies",
        ],
        structural_check: None,
    },
    Row {
        id: "monitoring_events",
        weight: 7,
        names: [
            "Monitoring Events & Alerts",
            "Eventos de Monitoramento e Alertas",
            "Eventos de Monitoreo y Alertas",
        ],
        description: "Records of system alerts or monitoring events.",
        keywords: &["event", "alert", "notification", "incident", "monitoring"],
        required_for: HIGH,
        legal_basis: [
            "Art. 49, 50 - Monitoring and alerting for high-risk systems",
            "MEASURE 03-01 - Alerting and incident detection",
            "Annex A.10.3 - Alert and incident management",
        ],
        structural_check: None,
    },
    Row {
        id: "reproducibility_capability",
        weight: 10,
        names: [
            "Reproducibility Capability",
            "Capacidade de Reprodução",
            "Capacidad de Reproducción",
        ],
        description: "Presence of all necessary components (code, config, data) to reproduce a result.",
        keywords: &["reproduce", "replicate", "recreate", "repeatable", "reproducibility"],
        required_for: ALL_TIERS,
        legal_basis: [
            "Art. 13(3)(i) - Reproducibility of results",
            "MAP 05-01 - Reproducibility and repeatability",
            "Annex A.8.7 - Reproducibility of AI results",
        ],
        structural_check: Some(StructuralCheck::Reproducibility),
    },
    Row {
        id: "approvals_reviews",
        weight: 8,
        names: [
            "Approvals & Reviews",
            "Aprovações e Revisões",
            "Aprobaciones y Revisiones",
        ],
        description: "Formal records of model sign-offs and peer reviews.",
        keywords: &["approval", "review", "signoff", "authorization", "peer review"],
        required_for: HIGH,
        legal_basis: [
            "Art. 17, 19 - Human oversight and review mechanisms",
            "GOVERN 04-02 - Review and approval workflows",
            "Clause 8.5 - Review of AI system decisions",
        ],
        structural_check: None,
    },
    Row {
        id: "regulatory_compliance",
        weight: 9,
        names: [
            "Regulatory Compliance",
            "Conformidade Regulatória",
            "Conformidad Regulatoria",
        ],
        description: "Explicit mention or evidence of compliance with regulations (GDPR, EU AI Act).",
        keywords: &["compliance", "regulation", "standard", "requirement", "gdpr"],
        required_for: HIGH_LIMITED,
        legal_basis: [
            "Art. 5-9, 16 - Compliance with prohibited and high-risk requirements",
            "GOVERN 01-01 - Regulatory alignment",
            "Clause 4.2 - Understanding regulatory requirements",
        ],
        structural_check: None,
    },
    Row {
        id: "design_decisions",
        weight: 7,
        names: [
            "Design Decisions Documentation",
            "Documentação de Decisões de Design",
            "Documentación de Decisiones de Diseño",
        ],
        description: "Documentation explaining key architectural and design choices.",
        keywords: &["design", "decision", "architecture", "choice", "rationale"],
        required_for: HIGH,
        legal_basis: [
            "Art. 13(3)(j) - Rationale for design choices",
            "MAP 01-01 - Design rationale documentation",
            "Annex A.7.1 - Design decision records",
        ],
        structural_check: None,
    },
    Row {
        id: "pipeline_auditability",
        weight: 8,
        names: [
            "Pipeline Auditability",
            "Auditabilidade do Pipeline",
            "Auditabilidad del Pipeline",
        ],
        description: "Presence of auditable MLOps pipelines or workflows.",
        keywords: &["pipeline", "workflow", "process", "orchestration", "mlops"],
        required_for: HIGH,
        legal_basis: [
            "Art. 13(3)(k) - Automated processing documentation",
            "GOVERN 03-02 - Pipeline audit trails",
            "Annex A.9.1 - Process automation controls",
        ],
        structural_check: None,
    },
    Row {
        id: "bias_metrics",
        weight: 8,
        names: [
            "Bias/Fairness Metrics",
            "Métricas de Viés/Equidade",
            "Métricas de Sesgo/Equidad",
        ],
        description: "Documentation of bias or fairness evaluations.",
        keywords: &["bias", "fairness", "equity", "discrimination", "fair"],
        required_for: HIGH_LIMITED,
        legal_basis: [
            "Art. 10(3), 13(2)(b) - Bias mitigation and fairness",
            "MAP 02-02 - Bias and fairness assessment",
            "Annex A.6.2 - Bias and fairness controls",
        ],
        structural_check: None,
    },
    Row {
        id: "risk_mitigation",
        weight: 8,
        names: [
            "Risk Mitigation Evidence",
            "Evidências de Mitigação de Riscos",
            "Evidencias de Mitigación de Riesgos",
        ],
        description: "Documentation of risk assessments and mitigation strategies.",
        keywords: &["risk", "mitigation", "control", "safeguard", "assessment"],
        required_for: HIGH,
        legal_basis: [
            "Art. 9, 16(3) - Risk management and mitigation",
            "GOVERN 02-02 - Risk mitigation strategies",
            "Clause 8.2 - Risk assessment and treatment",
        ],
        structural_check: None,
    },
    Row {
        id: "inference_logs",
        weight: 9,
        names: [
            "Production Inference Logs",
            "Logs de Inferência em Produção",
            "Logs de Inferencia en Producción",
        ],
        description: "Detailed logs of model inferences in a production environment.",
        keywords: &["inference", "prediction", "output", "result", "production"],
        required_for: HIGH_LIMITED,
        legal_basis: [
            "Art. 13(3)(e), 50 - Production logging and traceability",
            "MEASURE 02-02 - Production inference logging",
            "Annex A.10.4 - Production monitoring logs",
        ],
        structural_check: None,
    },
    Row {
        id: "continuous_monitoring",
        weight: 7,
        names: [
            "Continuous Monitoring Reports",
            "Relatórios de Monitoramento Contínuo",
            "Informes de Monitoreo Continuo",
        ],
        description: "Reports from continuous monitoring systems over time.",
        keywords: &["continuous", "monitoring", "ongoing", "real-time", "report"],
        required_for: HIGH,
        legal_basis: [
            "Art. 49, 50 - Continuous monitoring obligations",
            "MEASURE 04-01 - Continuous monitoring",
            "Annex A.10.5 - Continuous improvement monitoring",
        ],
        structural_check: None,
    },
    Row {
        id: "historical_reconstruction",
        weight: 9,
        names: [
            "Historical Reconstruction Capability",
            "Capacidade de Reconstrução Histórica",
            "Capacidad de Reconstrucción Histórica",
        ],
        description: "Ability to restore a historical state of the model and its data.",
        keywords: &["historical", "reconstruct", "restore", "timeline", "backup"],
        required_for: HIGH,
        legal_basis: [
            "Art. 13(3)(l) - Historical state reconstruction",
            "MAP 04-02 - Historical snapshot capability",
            "Annex A.8.8 - Historical reconstruction",
        ],
        structural_check: None,
    },
    Row {
        id: "incident_documentation",
        weight: 8,
        names: [
            "Incident Documentation",
            "Documentação de Incidentes",
            "Documentación de Incidentes",
        ],
        description: "Documentation of incidents and corrective actions related to the model.",
        keywords: &["incident", "issue", "problem", "corrective", "action"],
        required_for: HIGH,
        legal_basis: [
            "Art. 61, 62 - Incident reporting and remediation",
            "RESPOND 01-01 - Incident documentation",
            "Clause 10.2 - Corrective action for incidents",
        ],
        structural_check: None,
    },
];

pub fn traceability_references() -> BTreeMap<String, RegulatoryReference> {
    let mut refs = BTreeMap::new();
    refs.insert(
        EU_AI_ACT.to_string(),
        RegulatoryReference {
            title: "Regulation (EU) 2024/1689 on Artificial Intelligence".to_string(),
            url: "https://eur-lex.europa.eu/eli/reg/2024/1689".to_string(),
            description: "Establishes harmonised rules on AI, including technical documentation, data governance, and human oversight for high-risk systems.".to_string(),
        },
    );
    refs.insert(
        NIST_AI_RMF.to_string(),
        RegulatoryReference {
            title: "NIST AI Risk Management Framework (AI RMF 1.0)".to_string(),
            url: "https://www.nist.gov/itl/ai-risk-management-framework".to_string(),
            description: "Provides guidance for managing risks in the design, development, and deployment of AI systems.".to_string(),
        },
    );
    refs.insert(
        ISO_42001.to_string(),
        RegulatoryReference {
            title: "ISO/IEC 42001:2023 Information technology - AI Management System".to_string(),
            url: "https://www.iso.org/standard/81230.html".to_string(),
            description: "Specifies requirements for establishing, implementing, maintaining and improving an AI management system.".to_string(),
        },
    );
    refs
}

fn to_item(row: &Row) -> RequirementItem {
    let [en, pt, es] = row.names;
    let legal_basis = [EU_AI_ACT, NIST_AI_RMF, ISO_42001]
        .iter()
        .zip(row.legal_basis.iter())
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    RequirementItem {
        id: row.id.to_string(),
        weight: row.weight,
        names: LocalizedNames {
            en: en.to_string(),
            pt: pt.to_string(),
            es: es.to_string(),
        },
        description: row.description.to_string(),
        keywords: row.keywords.iter().map(|k| k.to_string()).collect(),
        required_for: row.required_for.iter().copied().collect(),
        legal_basis,
        structural_check: row.structural_check,
    }
}

/// The 22-item AI/ML traceability catalog.
pub fn traceability_catalog() -> RequirementCatalog {
    RequirementCatalog {
        name: "traceability".to_string(),
        version: "1.0.0".to_string(),
        references: traceability_references(),
        items: ROWS.iter().map(to_item).collect(),
    }
}
