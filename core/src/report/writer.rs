use crate::config::AuditConfig;
use crate::error::{CoreError, CoreResult};
use crate::evidence::hasher::sha256_hex;
use crate::report::canonical::to_canonical_bytes;
use crate::report::model::AuditReport;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub const INTEGRITY_SOURCE_PREFIX: &str = "Source: ";

#[derive(Debug, Clone)]
pub struct WrittenReport {
    pub report_path: PathBuf,
    pub integrity_path: PathBuf,
    /// SHA-256 of the exact bytes written to `report_path`.
    pub digest: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub expected: String,
    pub actual: String,
    pub source: Option<String>,
}

impl Verification {
    pub fn matches(&self) -> bool {
        self.expected == self.actual
    }
}

pub fn report_file_name(report: &AuditReport, cfg: &AuditConfig) -> String {
    format!(
        "{}_{}_{}.json",
        report.catalog.name, cfg.report_file_stem, report.audit_id
    )
}

pub fn integrity_file_name(report: &AuditReport, cfg: &AuditConfig) -> String {
    format!("{}_{}.txt", cfg.integrity_file_stem, report.audit_id)
}

fn write_new(path: &Path, bytes: &[u8]) -> CoreResult<()> {
    let mut f = OpenOptions::new().write(true).create_new(true).open(path)?;
    f.write_all(bytes)?;
    f.sync_all()?;
    Ok(())
}

/// Writes the report and its integrity token into `output_dir`. Neither file
/// may already exist.
pub fn write_report(
    report: &AuditReport,
    output_dir: &Path,
    cfg: &AuditConfig,
) -> CoreResult<WrittenReport> {
    fs::create_dir_all(output_dir)?;
    let bytes = to_canonical_bytes(report)?;
    let digest = sha256_hex(&bytes);

    let report_name = report_file_name(report, cfg);
    let report_path = output_dir.join(&report_name);
    write_new(&report_path, &bytes)?;

    let integrity_path = output_dir.join(integrity_file_name(report, cfg));
    let token = format!("{}\n{}{}\n", digest, INTEGRITY_SOURCE_PREFIX, report_name);
    write_new(&integrity_path, token.as_bytes())?;

    info!(report = %report_path.display(), %digest, "report written");
    Ok(WrittenReport {
        report_path,
        integrity_path,
        digest,
    })
}

/// Recomputes the report digest and reads the recorded one from the
/// integrity file (first line, then an optional `Source:` line).
pub fn verify_report(report_path: &Path, integrity_path: &Path) -> CoreResult<Verification> {
    let bytes = fs::read(report_path)?;
    let token = fs::read_to_string(integrity_path)?;
    let mut lines = token.lines();
    let expected = lines
        .next()
        .map(|l| l.trim().to_ascii_lowercase())
        .filter(|l| !l.is_empty())
        .ok_or_else(|| {
            CoreError::InvalidInput(format!(
                "integrity file {} is empty",
                integrity_path.display()
            ))
        })?;
    let source = lines
        .find_map(|l| l.strip_prefix(INTEGRITY_SOURCE_PREFIX))
        .map(|s| s.trim().to_string());
    Ok(Verification {
        expected,
        actual: sha256_hex(&bytes),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::{verify_report, write_report};
    use crate::catalog::RiskTier;
    use crate::config::AuditConfig;
    use crate::report::assembler::fallback_report;
    use crate::report::model::RunContext;
    use std::fs;

    fn report() -> crate::report::model::AuditReport {
        fallback_report(
            RunContext {
                user: "tester".to_string(),
                environment_info: "test".to_string(),
                repository_path: "/tmp/repo".to_string(),
                risk_level: RiskTier::High,
            },
            "traceability",
            "synthetic",
        )
    }

    #[test]
    fn written_report_verifies_and_tampering_is_detected() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_report(&report(), dir.path(), &AuditConfig::default()).unwrap();

        let v = verify_report(&written.report_path, &written.integrity_path).unwrap();
        assert!(v.matches());
        assert_eq!(v.expected, written.digest);
        let name = written.report_path.file_name().unwrap().to_string_lossy().to_string();
        assert_eq!(v.source.as_deref(), Some(name.as_str()));

        let mut body = fs::read(&written.report_path).unwrap();
        body.extend_from_slice(b" ");
        fs::write(&written.report_path, body).unwrap();
        assert!(!verify_report(&written.report_path, &written.integrity_path)
            .unwrap()
            .matches());
    }

    #[test]
    fn an_existing_report_is_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let r = report();
        write_report(&r, dir.path(), &AuditConfig::default()).unwrap();
        assert!(write_report(&r, dir.path(), &AuditConfig::default()).is_err());
    }
}
