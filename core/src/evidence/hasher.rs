use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("{0} is not a regular file")]
    NotAFile(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    hex::encode(h.finalize())
}

/// Streams `path` through SHA-256 in `chunk_bytes` reads.
pub fn sha256_file(path: &Path, chunk_bytes: usize) -> Result<String, HashError> {
    if !path.is_file() {
        return Err(HashError::NotAFile(path.to_path_buf()));
    }
    let io_err = |source| HashError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut f = File::open(path).map_err(io_err)?;
    let mut h = Sha256::new();
    let mut buf = vec![0u8; chunk_bytes.max(1)];
    loop {
        let n = f.read(&mut buf).map_err(io_err)?;
        if n == 0 {
            break;
        }
        h.update(&buf[..n]);
    }
    Ok(hex::encode(h.finalize()))
}

#[cfg(test)]
mod tests {
    use super::{sha256_file, sha256_hex, HashError};

    #[test]
    fn streaming_digest_matches_in_memory_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        let body: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        std::fs::write(&path, &body).unwrap();

        assert_eq!(sha256_file(&path, 7).unwrap(), sha256_hex(&body));
        assert_eq!(sha256_file(&path, 4096).unwrap(), sha256_hex(&body));
    }

    #[test]
    fn directories_are_rejected_with_an_error_value() {
        let dir = tempfile::tempdir().unwrap();
        let err = sha256_file(dir.path(), 4096).unwrap_err();
        assert!(matches!(err, HashError::NotAFile(_)));
    }

    #[test]
    fn empty_input_has_the_well_known_digest() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
