//! Accountability, sustainability and fairness catalogs. These principles
//! only check for the presence of evidence, so every item carries the same
//! weight. Accountability and sustainability items apply to every tier;
//! fairness items apply only to the tier that lists them.

use super::{
    LocalizedNames, RegulatoryReference, RequirementCatalog, RequirementItem, RiskTier,
};
use std::collections::BTreeMap;

const PRESENCE_WEIGHT: u32 = 10;

fn reference(title: &str, url: &str, description: &str) -> RegulatoryReference {
    RegulatoryReference {
        title: title.to_string(),
        url: url.to_string(),
        description: description.to_string(),
    }
}

fn presence_item(
    id: &str,
    names: [&str; 3],
    description: &str,
    keywords: &[&str],
    legal_basis: &[(&str, &str)],
) -> RequirementItem {
    tiered_item(id, names, description, keywords, &RiskTier::ALL, legal_basis)
}

fn tiered_item(
    id: &str,
    names: [&str; 3],
    description: &str,
    keywords: &[&str],
    tiers: &[RiskTier],
    legal_basis: &[(&str, &str)],
) -> RequirementItem {
    let [en, pt, es] = names;
    RequirementItem {
        id: id.to_string(),
        weight: PRESENCE_WEIGHT,
        names: LocalizedNames {
            en: en.to_string(),
            pt: pt.to_string(),
            es: es.to_string(),
        },
        description: description.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        required_for: tiers.iter().copied().collect(),
        legal_basis: legal_basis
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        structural_check: None,
    }
}

pub fn accountability_catalog() -> RequirementCatalog {
    let mut references = BTreeMap::new();
    references.insert(
        "LGPD".to_string(),
        reference(
            "Lei Geral de Proteção de Dados (Lei nº 13.709/2018)",
            "https://www.planalto.gov.br/ccivil_03/_ato2015-2018/2018/lei/l13709.htm",
            "Brazilian general data protection law, including transparency of automated decisions.",
        ),
    );
    references.insert(
        "GDPR".to_string(),
        reference(
            "Regulation (EU) 2016/679 (General Data Protection Regulation)",
            "https://eur-lex.europa.eu/eli/reg/2016/679/oj",
            "Accountability principle and rights related to automated decision-making.",
        ),
    );
    references.insert(
        "EU_AI_ACT".to_string(),
        reference(
            "Regulation (EU) 2024/1689 on Artificial Intelligence",
            "https://eur-lex.europa.eu/eli/reg/2024/1689",
            "Human oversight and decision tracing for high-risk AI systems.",
        ),
    );
    references.insert(
        "MARCO_CIVIL".to_string(),
        reference(
            "Marco Civil da Internet (Lei nº 12.965/2014)",
            "https://www.planalto.gov.br/ccivil_03/_ato2011-2014/2014/lei/l12965.htm",
            "Brazilian internet civil framework, including liability and assigned responsibilities.",
        ),
    );
    references.insert(
        "OECD_AI".to_string(),
        reference(
            "OECD Recommendation of the Council on Artificial Intelligence",
            "https://oecd.ai/en/ai-principles",
            "Robustness, security, safety and accountability of AI systems.",
        ),
    );

    let items = vec![
        presence_item(
            "decision_logs",
            [
                "Automated Decision Logs",
                "Logs de Decisões Automatizadas",
                "Logs de Decisiones Automatizadas",
            ],
            "Timestamped records of automated decisions.",
            &["decision", "prediction", "timestamp", "decision_log"],
            &[
                ("LGPD", "Art. 9 - Record of automated decisions"),
                ("EU_AI_ACT", "Art. 13 - Human oversight and decision tracing"),
            ],
        ),
        presence_item(
            "audit_evidence",
            [
                "Audit Evidence",
                "Evidências de Auditoria",
                "Evidencias de Auditoría",
            ],
            "Audit and approval evidence and compliance documentation.",
            &["audit", "approval", "evidence", "compliance"],
            &[
                ("LGPD", "Art. 46 - Audit and approval evidence"),
                ("GDPR", "Art. 5 - Accountability principle"),
            ],
        ),
        presence_item(
            "model_metadata",
            [
                "Model Metadata",
                "Metadados do Modelo",
                "Metadatos del Modelo",
            ],
            "Model documentation supporting explanation of automated decisions.",
            &["model_card", "metadata", "version", "explanation"],
            &[
                ("LGPD", "Art. 6, 17 - Transparency and governance measures"),
                ("GDPR", "Art. 5, 22 - Right to explanation and model documentation"),
            ],
        ),
        presence_item(
            "responsible_persons",
            [
                "Responsible Persons Registry",
                "Registro de Pessoas Responsáveis",
                "Registro de Personas Responsables",
            ],
            "Named owners of automated decisions with contact information.",
            &["responsible", "owner", "accountable", "contact", "raci"],
            &[
                ("LGPD", "Art. 6 - Responsibility for automated decisions"),
                ("MARCO_CIVIL", "Art. 7 - Liability and assigned responsibilities"),
            ],
        ),
        presence_item(
            "monitoring_dashboards",
            [
                "Monitoring Dashboards",
                "Painéis de Monitoramento",
                "Paneles de Monitoreo",
            ],
            "Dashboards giving humans real-time oversight of the system.",
            &["dashboard", "monitor", "alert", "real-time"],
            &[
                ("OECD_AI", "Robustness, security and safety - Monitoring systems"),
                ("EU_AI_ACT", "Art. 13 - Human oversight and real-time monitoring"),
            ],
        ),
    ];

    RequirementCatalog {
        name: "accountability".to_string(),
        version: "1.0.0".to_string(),
        references,
        items,
    }
}

pub fn sustainability_catalog() -> RequirementCatalog {
    let mut references = BTreeMap::new();
    references.insert(
        "EU_AI_ACT".to_string(),
        reference(
            "Regulation (EU) 2024/1689 on Artificial Intelligence",
            "https://eur-lex.europa.eu/eli/reg/2024/1689",
            "Documentation of energy efficiency and resource use for AI systems.",
        ),
    );
    references.insert(
        "GSF".to_string(),
        reference(
            "Green Software Foundation Principles",
            "https://learn.greensoftware.foundation/",
            "Carbon efficiency, energy efficiency and carbon awareness in software.",
        ),
    );
    references.insert(
        "MLCO2".to_string(),
        reference(
            "Machine Learning CO2 Impact Calculator",
            "https://mlco2.github.io/impact/",
            "Estimation of training and inference emissions from accelerator hours.",
        ),
    );
    references.insert(
        "IPCC".to_string(),
        reference(
            "IPCC Guidelines for National Greenhouse Gas Inventories",
            "https://www.ipcc-nggip.iges.or.jp/public/2006gl/",
            "Standardised methodology for greenhouse gas emission inventories.",
        ),
    );

    let items = vec![
        presence_item(
            "model_efficiency",
            [
                "Model Efficiency Metadata",
                "Metadados de Eficiência do Modelo",
                "Metadatos de Eficiencia del Modelo",
            ],
            "Compute and efficiency characteristics recorded for the model.",
            &["flops", "consumo_gpu", "eficiencia_energetica", "gpu_hours", "efficiency", "otimizacao"],
            &[
                ("EU_AI_ACT", "Art. 17 - Sustainability and energy efficiency requirements"),
                ("GSF", "Principle 2 - Energy efficiency"),
            ],
        ),
        presence_item(
            "energy_usage_logs",
            [
                "Energy Usage Logs",
                "Logs de Consumo Energético",
                "Logs de Consumo Energético",
            ],
            "Logged energy consumption of training and inference.",
            &["energy", "kwh", "consumo_energetico", "tempo_execucao", "power"],
            &[
                ("EU_AI_ACT", "Art. 17 - Continuous monitoring of energy consumption"),
                ("MLCO2", "GPU/TPU hours and energy source records"),
            ],
        ),
        presence_item(
            "environmental_audit",
            [
                "Environmental Audit Evidence",
                "Evidências de Auditoria Ambiental",
                "Evidencias de Auditoría Ambiental",
            ],
            "Environmental impact assessments and sustainability reports.",
            &["impacto_ambiental", "pegada_carbono", "sustainability", "environmental", "carbon footprint"],
            &[
                ("EU_AI_ACT", "Art. 17 - Environmental impact reporting"),
                ("IPCC", "Standardised calculation methodology and annual reports"),
            ],
        ),
        presence_item(
            "emission_dashboards",
            [
                "Emission Dashboards",
                "Painéis de Emissões",
                "Paneles de Emisiones",
            ],
            "Dashboards tracking CO2 emissions and efficiency over time.",
            &["co2", "emission", "dashboard_energia", "metricas_eficiencia", "carbon"],
            &[
                ("GSF", "Principle 1 - Carbon efficiency"),
                ("MLCO2", "CO2 equivalence of training and inference"),
            ],
        ),
    ];

    RequirementCatalog {
        name: "sustainability".to_string(),
        version: "1.0.0".to_string(),
        references,
        items,
    }
}

/// Fairness requirements follow the EU AI Act risk levels. Each tier lists its
/// own obligations, so the tiers deliberately do not nest.
pub fn fairness_catalog() -> RequirementCatalog {
    let mut references = BTreeMap::new();
    references.insert(
        "EU_AI_ACT".to_string(),
        reference(
            "Regulation (EU) 2024/1689 on Artificial Intelligence",
            "https://eur-lex.europa.eu/eli/reg/2024/1689",
            "Risk-based obligations on fundamental rights, transparency and non-discrimination.",
        ),
    );

    const HIGH: &[RiskTier] = &[RiskTier::High];
    const LIMITED: &[RiskTier] = &[RiskTier::Limited];
    const LOW: &[RiskTier] = &[RiskTier::Low];

    let items = vec![
        tiered_item(
            "conformity_metadata",
            [
                "Conformity and Risk Management Metadata",
                "Metadados de Conformidade e Gestão de Risco",
                "Metadatos de Conformidad y Gestión de Riesgos",
            ],
            "Conformity assessment, risk management, data governance and quality management records.",
            &["conformity_assessment", "risk_management", "data_governance", "quality_management"],
            HIGH,
            &[("EU_AI_ACT", "Articles 6-51 - Quality management system and data governance")],
        ),
        tiered_item(
            "human_oversight_logs",
            [
                "Human Oversight Logs",
                "Logs de Supervisão Humana",
                "Registros de Supervisión Humana",
            ],
            "Human oversight, incident and accuracy records for automated decisions.",
            &["human_oversight", "incident_reporting", "accuracy_metrics", "performance_monitoring"],
            HIGH,
            &[("EU_AI_ACT", "Articles 6-51 - Human oversight, accuracy and cybersecurity")],
        ),
        tiered_item(
            "fundamental_rights_evidence",
            [
                "Fundamental Rights Impact Evidence",
                "Evidências de Impacto em Direitos Fundamentais",
                "Evidencias de Impacto en Derechos Fundamentales",
            ],
            "Fundamental rights impact assessment, technical documentation and compliance certificates.",
            &["fundamental_rights", "technical_documentation", "quality_management", "compliance_certificate"],
            HIGH,
            &[("EU_AI_ACT", "Articles 6-51 - Fundamental rights impact assessment and technical documentation")],
        ),
        tiered_item(
            "risk_monitoring_dashboards",
            [
                "Risk Monitoring Dashboards",
                "Painéis de Monitoramento de Risco",
                "Paneles de Monitoreo de Riesgos",
            ],
            "Dashboards tracking risk, performance and compliance status.",
            &["risk_monitoring", "performance_tracking", "compliance_status", "real_time_alerts"],
            HIGH,
            &[("EU_AI_ACT", "Articles 6-51 - Post-market monitoring")],
        ),
        tiered_item(
            "transparency_disclosure",
            [
                "Transparency Disclosure",
                "Divulgação de Transparência",
                "Divulgación de Transparencia",
            ],
            "Disclosure to users that they interact with AI or AI-generated content.",
            &["transparency_disclosure", "ai_generated", "user_notification", "communication_protocol"],
            LIMITED,
            &[("EU_AI_ACT", "Article 52 - Transparency obligations and user notification")],
        ),
        tiered_item(
            "user_consent_records",
            [
                "User Consent Records",
                "Registros de Consentimento do Usuário",
                "Registros de Consentimiento del Usuario",
            ],
            "User consent and disclosure compliance evidence.",
            &["user_consent", "disclosure_compliance", "transparency_verification"],
            LIMITED,
            &[("EU_AI_ACT", "Article 52 - Disclosure of AI-generated content")],
        ),
        tiered_item(
            "voluntary_code_compliance",
            [
                "Voluntary Code Compliance",
                "Conformidade com Códigos Voluntários",
                "Cumplimiento de Códigos Voluntarios",
            ],
            "Adherence to voluntary codes of conduct and ethical guidelines.",
            &["voluntary_compliance", "ethical_guidelines", "best_practices"],
            LOW,
            &[("EU_AI_ACT", "No specific obligations - Voluntary codes of conduct")],
        ),
    ];

    RequirementCatalog {
        name: "fairness".to_string(),
        version: "1.0.0".to_string(),
        references,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::{accountability_catalog, fairness_catalog, sustainability_catalog};
    use crate::catalog::RiskTier;

    #[test]
    fn presence_catalogs_score_every_item_equally_on_every_tier() {
        for c in [accountability_catalog(), sustainability_catalog()] {
            c.validate().unwrap();
            assert!(c.tier_nesting_violations().is_empty());
            for tier in RiskTier::ALL {
                assert_eq!(c.max_score(tier), 10 * c.items.len() as u32);
            }
            assert!(c.items.iter().all(|i| i.structural_check.is_none()));
        }
    }

    #[test]
    fn fairness_items_apply_only_to_their_own_tier() {
        let c = fairness_catalog();
        c.validate().unwrap();
        assert_eq!(c.items_for(RiskTier::High).len(), 4);
        assert_eq!(c.items_for(RiskTier::Limited).len(), 2);
        assert_eq!(c.items_for(RiskTier::Low).len(), 1);
        assert_eq!(c.max_score(RiskTier::Low), 10);
        assert!(c.items.iter().all(|i| i.required_for.len() == 1));

        let violations = c.tier_nesting_violations();
        assert_eq!(violations.len(), 3);
        assert!(violations
            .iter()
            .any(|v| v.starts_with("voluntary_code_compliance is required for low")));
    }
}
