use crate::config::AuditConfig;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};
use walkdir::WalkDir;

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Birth time where the platform records it, otherwise last modification.
fn creation_time(meta: &Metadata) -> Option<SystemTime> {
    meta.created().or_else(|_| meta.modified()).ok()
}

fn is_retention_sensitive(name_lower: &str, terms: &[String]) -> bool {
    terms.iter().any(|t| name_lower.contains(&t.to_lowercase()))
}

/// Flags retention-sensitive files (by name) created before `now` minus the
/// retention period. Every file under `root` is considered, ignored
/// directories included; only `exclude` subtrees are skipped. Advisory only.
pub fn check_retention(
    root: &Path,
    cfg: &AuditConfig,
    exclude: &[PathBuf],
    now: SystemTime,
) -> Vec<String> {
    // Periods past the representable range saturate; nothing is then old enough.
    let secs = u64::try_from(cfg.retention_days)
        .unwrap_or(0)
        .checked_mul(SECS_PER_DAY)
        .unwrap_or(u64::MAX);
    let threshold = now
        .checked_sub(Duration::from_secs(secs))
        .unwrap_or(SystemTime::UNIX_EPOCH);
    let mut issues = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !exclude.iter().any(|x| e.path() == x.as_path()));
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "retention walk skipped an entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let name_lower = entry.file_name().to_string_lossy().to_lowercase();
        if !is_retention_sensitive(&name_lower, &cfg.retention_terms) {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .replace('\\', "/");
        match entry.metadata().ok().as_ref().and_then(creation_time) {
            Some(created) if created < threshold => {
                issues.push(format!(
                    "File older than the {}-day retention period: {}",
                    cfg.retention_days, rel
                ));
            }
            Some(_) => {}
            None => {
                debug!(path = %rel, "no creation or modification time");
                issues.push(format!("Could not determine the age of file: {}", rel));
            }
        }
    }
    issues
}
