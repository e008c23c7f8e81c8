use clap::{Parser, ValueEnum};
use govaudit_core::catalog::{Language, RiskTier};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "audit_runner",
    version,
    about = "Risk-aware, regulation-citable AI/ML governance evidence audit"
)]
pub struct Cli {
    #[arg(long, help = "Directory to audit")]
    pub repo: PathBuf,
    #[arg(long, help = "Directory receiving the report, integrity token and evidence copies")]
    pub output: PathBuf,
    #[arg(long, value_enum, default_value_t = TierArg::High)]
    pub risk_level: TierArg,
    #[arg(long, value_enum, default_value_t = LangArg::En, help = "Console language")]
    pub lang: LangArg,
    #[arg(
        long,
        default_value = "traceability",
        help = "Built-in catalog: traceability, accountability, sustainability or fairness"
    )]
    pub catalog: String,
    #[arg(long, help = "Load the requirement catalog from a JSON file instead")]
    pub catalog_file: Option<PathBuf>,
    #[arg(long, help = "JSON or YAML file overriding audit configuration defaults")]
    pub config: Option<PathBuf>,
    #[arg(long, help = "Operator identity recorded in the report (default: $USER)")]
    pub operator: Option<String>,
    #[arg(long, default_value_t = false, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TierArg {
    High,
    Limited,
    Low,
}

impl From<TierArg> for RiskTier {
    fn from(t: TierArg) -> Self {
        match t {
            TierArg::High => RiskTier::High,
            TierArg::Limited => RiskTier::Limited,
            TierArg::Low => RiskTier::Low,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LangArg {
    En,
    Pt,
    Es,
}

impl From<LangArg> for Language {
    fn from(l: LangArg) -> Self {
        match l {
            LangArg::En => Language::En,
            LangArg::Pt => Language::Pt,
            LangArg::Es => Language::Es,
        }
    }
}
