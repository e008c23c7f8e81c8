use govaudit_core::config::AuditConfig;
use govaudit_core::report::verify_report;
use std::path::{Path, PathBuf};

/// The integrity file written next to `report` for the same audit id.
fn sibling_integrity_file(report: &Path) -> Result<PathBuf, String> {
    let bytes = std::fs::read(report).map_err(|e| format!("cannot read report: {}", e))?;
    let v: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|e| format!("report is not JSON: {}", e))?;
    let audit_id = v
        .get("audit_id")
        .and_then(|id| id.as_str())
        .ok_or_else(|| "report has no audit_id".to_string())?;
    let dir = report.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(format!(
        "{}_{}.txt",
        AuditConfig::default().integrity_file_stem,
        audit_id
    )))
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("usage: report_verifier <path/to/report.json> [path/to/audit_hash.txt]");
        std::process::exit(2);
    }
    let report = PathBuf::from(&args[1]);
    let integrity = match args.get(2) {
        Some(p) => PathBuf::from(p),
        None => match sibling_integrity_file(&report) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("verifier error: {}", e);
                std::process::exit(2);
            }
        },
    };

    match verify_report(&report, &integrity) {
        Ok(v) => {
            let summary = serde_json::json!({
                "report": report.display().to_string(),
                "integrity_file": integrity.display().to_string(),
                "expected_sha256": v.expected,
                "actual_sha256": v.actual,
                "source": v.source,
                "result": if v.matches() { "PASS" } else { "FAIL" },
            });
            match serde_json::to_string_pretty(&summary) {
                Ok(s) => println!("{}", s),
                Err(e) => eprintln!("verifier error: {}", e),
            }
            std::process::exit(if v.matches() { 0 } else { 1 });
        }
        Err(e) => {
            eprintln!("verifier error: {}", e);
            std::process::exit(1);
        }
    }
}
