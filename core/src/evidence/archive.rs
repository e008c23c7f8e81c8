use crate::config::AuditConfig;
use crate::evidence::hasher::{sha256_file, HashError};
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("source {0} is not a regular file")]
    NotAFile(PathBuf),

    #[error("could not hash source: {0}")]
    Hash(#[from] HashError),

    #[error("could not copy {src} into the evidence directory: {source}")]
    Copy {
        src: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Copies `src` into `evidence_dir` under a content-addressed name and
/// returns the copy's path relative to `evidence_dir`'s parent (the report
/// root).
///
/// Names follow `<mtime>_<digest-prefix>__<name>`; an existing entry is never
/// overwritten, the next free `<mtime>_<digest-prefix>__<n>__<name>` is used
/// instead. Destination selection relies on `create_new`, so two writers
/// cannot claim the same name.
pub fn archive_file(
    src: &Path,
    evidence_dir: &Path,
    digest_prefix_len: usize,
    chunk_bytes: usize,
) -> Result<String, ArchiveError> {
    if !src.is_file() {
        return Err(ArchiveError::NotAFile(src.to_path_buf()));
    }
    let copy_err = |source| ArchiveError::Copy {
        src: src.to_path_buf(),
        source,
    };

    let meta = fs::metadata(src).map_err(copy_err)?;
    let mtime = meta.modified().ok();
    let mtime_secs = mtime
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let digest = sha256_file(src, chunk_bytes)?;
    let prefix = &digest[..digest_prefix_len.min(digest.len())];
    let name = src
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unnamed".to_string());

    let (dest_path, mut dest) = claim_destination(evidence_dir, mtime_secs, prefix, &name)
        .map_err(copy_err)?;

    let copied = File::open(src).and_then(|mut from| io::copy(&mut from, &mut dest));
    if let Err(e) = copied {
        let _ = fs::remove_file(&dest_path);
        return Err(copy_err(e));
    }
    if let Err(e) = dest.set_permissions(meta.permissions()) {
        debug!(path = %dest_path.display(), error = %e, "permissions not preserved");
    }
    if let Some(t) = mtime {
        if let Err(e) = dest.set_modified(t) {
            debug!(path = %dest_path.display(), error = %e, "modification time not preserved");
        }
    }

    let report_root = evidence_dir.parent().unwrap_or(evidence_dir);
    let rel = dest_path
        .strip_prefix(report_root)
        .unwrap_or(&dest_path)
        .to_string_lossy()
        .replace('\\', "/");
    Ok(rel)
}

fn claim_destination(
    evidence_dir: &Path,
    mtime_secs: u64,
    prefix: &str,
    name: &str,
) -> io::Result<(PathBuf, File)> {
    let mut counter: u32 = 0;
    loop {
        let dest_name = if counter == 0 {
            format!("{}_{}__{}", mtime_secs, prefix, name)
        } else {
            format!("{}_{}__{}__{}", mtime_secs, prefix, counter, name)
        };
        let dest_path = evidence_dir.join(dest_name);
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&dest_path)
        {
            Ok(f) => return Ok((dest_path, f)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => counter += 1,
            Err(e) => return Err(e),
        }
    }
}

/// The run's evidence directory plus the index of what has been copied into
/// it, keyed by path relative to the audit root.
pub struct EvidenceArchive {
    dir: PathBuf,
    digest_prefix_len: usize,
    chunk_bytes: usize,
    index: BTreeMap<String, String>,
}

impl EvidenceArchive {
    pub fn create(report_root: &Path, cfg: &AuditConfig) -> io::Result<Self> {
        let dir = report_root.join(&cfg.evidence_dir_name);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            digest_prefix_len: cfg.archive_digest_prefix_len,
            chunk_bytes: cfg.hash_chunk_bytes,
            index: BTreeMap::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Archives `src` once per relative path. Failures are logged and leave
    /// the index untouched.
    pub fn register(&mut self, rel_path: &str, src: &Path) -> Option<&str> {
        if !self.index.contains_key(rel_path) {
            match archive_file(src, &self.dir, self.digest_prefix_len, self.chunk_bytes) {
                Ok(archived) => {
                    self.index.insert(rel_path.to_string(), archived);
                }
                Err(e) => {
                    warn!(path = %rel_path, error = %e, "evidence copy failed");
                    return None;
                }
            }
        }
        self.index.get(rel_path).map(|s| s.as_str())
    }

    pub fn index(&self) -> &BTreeMap<String, String> {
        &self.index
    }

    pub fn into_index(self) -> BTreeMap<String, String> {
        self.index
    }
}
