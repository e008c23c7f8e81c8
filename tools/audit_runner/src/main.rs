mod cli;
mod logging;
mod messages;

use clap::Parser;
use cli::Cli;
use govaudit_core::catalog::{Language, RequirementCatalog, RiskTier};
use govaudit_core::config::AuditConfig;
use govaudit_core::error::CoreResult;
use govaudit_core::run::{default_operator, AuditOutcome, AuditRequest, AuditRunner};
use messages::{messages, Messages};
use tracing::{error, info};

fn build_runner(cli: &Cli) -> CoreResult<AuditRunner> {
    let config = match &cli.config {
        Some(path) => AuditConfig::from_file(path)?,
        None => AuditConfig::default(),
    };
    let catalog = match &cli.catalog_file {
        Some(path) => RequirementCatalog::from_json_file(path)?,
        None => RequirementCatalog::builtin(&cli.catalog)?,
    };
    AuditRunner::new(config, catalog)
}

fn print_summary(outcome: &AuditOutcome, msgs: &Messages) {
    let report = &outcome.report;
    let s = &report.summary;
    let rule = "=".repeat(70);
    println!("\n{}", rule);
    println!("{} ({})", msgs.summary_title, report.catalog.name);
    println!("{}", rule);
    println!(
        "{} {}",
        msgs.compliance,
        s.risk_level.as_str().to_uppercase()
    );
    println!(
        "{}: {}/{} -> {}%",
        msgs.score, s.total_score, s.max_score, s.compliance_percentage
    );
    println!("{}: {}", msgs.files, s.scanned_files);
    println!("{}: {}", msgs.retention, report.issues.retention.len());
    println!("{}: {}", msgs.cross_ref, report.issues.cross_reference.len());
    println!("{}: {}", msgs.schema, report.issues.schema.len());
    match &outcome.written {
        Some(w) => {
            println!("{} {}", msgs.save, w.report_path.display());
            println!("{} {}", msgs.hash, w.digest);
        }
        None => println!("{} {}", msgs.save, msgs.not_saved),
    }
    let frameworks: Vec<&str> = report
        .regulatory_references
        .values()
        .map(|r| r.title.as_str())
        .collect();
    if !frameworks.is_empty() {
        println!("{} {}", msgs.legal_basis, frameworks.join(" | "));
    }
    println!("{}", rule);
    println!("\n{}:", msgs.categories);
    for (category, count) in &report.scanned_categories {
        if *count > 0 {
            println!("  - {}: {} {}", category, count, msgs.files_unit);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.log_json);
    let lang: Language = cli.lang.into();
    let tier: RiskTier = cli.risk_level.into();
    let msgs = messages(lang);

    let runner = match build_runner(&cli) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{} {}", msgs.error_setup, e);
            std::process::exit(1);
        }
    };

    info!(tier = %tier, "{}", msgs.start);
    info!("{} {}", msgs.repo, cli.repo.display());
    let request = AuditRequest {
        root: cli.repo.clone(),
        output_dir: cli.output.clone(),
        tier,
        operator: cli.operator.clone().unwrap_or_else(default_operator),
    };

    match runner.run(&request) {
        Ok(outcome) => {
            print_summary(&outcome, &msgs);
            if outcome.degraded || outcome.written.is_none() {
                error!(failure = ?outcome.failure, "{}", msgs.degraded);
                std::process::exit(1);
            }
            info!("{}", msgs.done);
        }
        Err(e) => {
            eprintln!("{} {}", msgs.error_repo, e);
            std::process::exit(1);
        }
    }
}
