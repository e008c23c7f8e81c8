use govaudit_core::catalog::Language;

pub struct Messages {
    pub start: &'static str,
    pub repo: &'static str,
    pub summary_title: &'static str,
    pub compliance: &'static str,
    pub score: &'static str,
    pub files: &'static str,
    pub retention: &'static str,
    pub cross_ref: &'static str,
    pub schema: &'static str,
    pub save: &'static str,
    pub not_saved: &'static str,
    pub hash: &'static str,
    pub legal_basis: &'static str,
    pub categories: &'static str,
    pub files_unit: &'static str,
    pub done: &'static str,
    pub degraded: &'static str,
    pub error_repo: &'static str,
    pub error_setup: &'static str,
}

pub fn messages(lang: Language) -> Messages {
    match lang {
        Language::En => Messages {
            start: "Starting AI governance audit",
            repo: "Auditing repository:",
            summary_title: "AUDIT SUMMARY",
            compliance: "Compliance for risk level",
            score: "Score",
            files: "Scanned files",
            retention: "Retention issues",
            cross_ref: "Cross-reference issues",
            schema: "Document shape issues",
            save: "Report saved at:",
            not_saved: "NOT SAVED DUE TO ERROR",
            hash: "Integrity hash:",
            legal_basis: "Legal basis:",
            categories: "SCANNED CATEGORIES",
            files_unit: "files",
            done: "Audit completed.",
            degraded: "Audit completed with errors; see the report issues.",
            error_repo: "Error: repository path is not usable:",
            error_setup: "Error: audit could not be configured:",
        },
        Language::Pt => Messages {
            start: "Iniciando auditoria de governança de IA",
            repo: "Auditando repositório:",
            summary_title: "RESUMO DA AUDITORIA",
            compliance: "Conformidade com nível de risco",
            score: "Pontuação",
            files: "Arquivos escaneados",
            retention: "Problemas de retenção",
            cross_ref: "Problemas de referência cruzada",
            schema: "Problemas de estrutura de documentos",
            save: "Relatório salvo em:",
            not_saved: "NÃO SALVO DEVIDO A ERRO",
            hash: "Hash de integridade:",
            legal_basis: "Base legal:",
            categories: "CATEGORIAS ESCANEADAS",
            files_unit: "arquivos",
            done: "Auditoria concluída.",
            degraded: "Auditoria concluída com erros; veja as pendências do relatório.",
            error_repo: "Erro: caminho do repositório inválido:",
            error_setup: "Erro: não foi possível configurar a auditoria:",
        },
        Language::Es => Messages {
            start: "Iniciando auditoría de gobernanza de IA",
            repo: "Auditando repositorio:",
            summary_title: "RESUMEN DE AUDITORÍA",
            compliance: "Conformidad para nivel de riesgo",
            score: "Puntuación",
            files: "Archivos escaneados",
            retention: "Problemas de retención",
            cross_ref: "Problemas de referencias cruzadas",
            schema: "Problemas de estructura de documentos",
            save: "Informe guardado en:",
            not_saved: "NO GUARDADO DEBIDO A UN ERROR",
            hash: "Hash de integridad:",
            legal_basis: "Base legal:",
            categories: "CATEGORÍAS ESCANEADAS",
            files_unit: "archivos",
            done: "Auditoría completada.",
            degraded: "Auditoría completada con errores; consulte las incidencias del informe.",
            error_repo: "Error: la ruta del repositorio no es utilizable:",
            error_setup: "Error: no se pudo configurar la auditoría:",
        },
    }
}
