use crate::config::AuditConfig;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{0} is not a regular file")]
    NotAFile(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} could not be decoded as text")]
    Undecodable(PathBuf),
}

/// In-memory form of an evidence file.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedEvidence {
    /// JSON, YAML and JSON Lines documents.
    Structured(Value),
    /// Delimited tables, one header-keyed map per row.
    Table(Vec<BTreeMap<String, String>>),
    /// Anything else readable, truncated to the text budget.
    Text(String),
    /// Load or parse failure; treated as "no structured evidence".
    Failed(String),
}

impl LoadedEvidence {
    pub fn as_object(&self) -> Option<&serde_json::Map<String, Value>> {
        match self {
            LoadedEvidence::Structured(Value::Object(m)) => Some(m),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadedEvidence::Failed(_))
    }
}

/// Decodes bytes with UTF-16 (BOM), UTF-8, then ISO-8859-1, in that order.
///
/// A UTF-8 sequence cut off at the end of the buffer is dropped rather than
/// forcing the Latin-1 fallback, since samples are truncated at arbitrary
/// byte offsets.
pub fn decode_text(bytes: &[u8]) -> Option<String> {
    if let Some(s) = decode_utf16_with_bom(bytes) {
        return Some(s);
    }
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => Some(s.to_string()),
        Err(e) if e.error_len().is_none() => {
            Some(String::from_utf8_lossy(&bytes[..e.valid_up_to()]).into_owned())
        }
        Err(_) => Some(bytes.iter().map(|&b| b as char).collect()),
    }
}

fn decode_utf16_with_bom(bytes: &[u8]) -> Option<String> {
    let little_endian = match bytes {
        [0xFF, 0xFE, ..] => true,
        [0xFE, 0xFF, ..] => false,
        _ => return None,
    };
    let units: Vec<u16> = bytes[2..]
        .chunks_exact(2)
        .map(|c| {
            if little_endian {
                u16::from_le_bytes([c[0], c[1]])
            } else {
                u16::from_be_bytes([c[0], c[1]])
            }
        })
        .collect();
    String::from_utf16(&units).ok()
}

fn read_prefix(path: &Path, max_bytes: u64) -> Result<Vec<u8>, LoadError> {
    if !path.is_file() {
        return Err(LoadError::NotAFile(path.to_path_buf()));
    }
    let io_err = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    let f = File::open(path).map_err(io_err)?;
    let mut buf = Vec::new();
    f.take(max_bytes).read_to_end(&mut buf).map_err(io_err)?;
    Ok(buf)
}

/// Reads at most `max_bytes` of `path` as text.
pub fn read_text_sample(path: &Path, max_bytes: usize) -> Result<String, LoadError> {
    let bytes = read_prefix(path, max_bytes as u64)?;
    decode_text(&bytes).ok_or_else(|| LoadError::Undecodable(path.to_path_buf()))
}

/// Loads `path` according to its extension. Never fails: problems come back
/// as [`LoadedEvidence::Failed`].
pub fn load_evidence(path: &Path, cfg: &AuditConfig) -> LoadedEvidence {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let loaded = match ext.as_str() {
        "json" => read_structured(path, cfg).and_then(|s| {
            serde_json::from_str::<Value>(&s)
                .map(LoadedEvidence::Structured)
                .map_err(|e| e.to_string())
        }),
        "yaml" | "yml" => read_structured(path, cfg).and_then(|s| {
            serde_yaml::from_str::<Value>(&s)
                .map(LoadedEvidence::Structured)
                .map_err(|e| e.to_string())
        }),
        "jsonl" | "ndjson" => read_structured(path, cfg).map(|s| parse_json_lines(path, &s)),
        "csv" => read_structured(path, cfg).and_then(|s| parse_table(&s, b',')),
        "tsv" => read_structured(path, cfg).and_then(|s| parse_table(&s, b'\t')),
        _ => read_text_sample(path, cfg.max_text_bytes)
            .map(LoadedEvidence::Text)
            .map_err(|e| e.to_string()),
    };

    match loaded {
        Ok(v) => v,
        Err(reason) => {
            debug!(path = %path.display(), %reason, "evidence file could not be loaded");
            LoadedEvidence::Failed(reason)
        }
    }
}

fn read_structured(path: &Path, cfg: &AuditConfig) -> Result<String, String> {
    let size = std::fs::metadata(path).map_err(|e| e.to_string())?.len();
    if size > cfg.max_structured_bytes {
        return Err(format!(
            "document is {} bytes, above the {} byte parsing limit",
            size, cfg.max_structured_bytes
        ));
    }
    let bytes = read_prefix(path, size).map_err(|e| e.to_string())?;
    decode_text(&bytes).ok_or_else(|| "undecodable document".to_string())
}

fn parse_json_lines(path: &Path, body: &str) -> LoadedEvidence {
    let mut entries = Vec::new();
    for (line_no, line) in body.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(v) => entries.push(v),
            Err(e) => debug!(
                path = %path.display(),
                line = line_no + 1,
                error = %e,
                "skipping malformed JSON line"
            ),
        }
    }
    LoadedEvidence::Structured(Value::Array(entries))
}

fn parse_table(body: &str, delimiter: u8) -> Result<LoadedEvidence, String> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(body.as_bytes());
    let headers = rdr.headers().map_err(|e| e.to_string())?.clone();
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| e.to_string())?;
        let row: BTreeMap<String, String> = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();
        rows.push(row);
    }
    Ok(LoadedEvidence::Table(rows))
}

#[cfg(test)]
mod tests {
    use super::{decode_text, load_evidence, read_text_sample, LoadedEvidence};
    use crate::config::AuditConfig;
    use serde_json::json;
    use std::fs;

    #[test]
    fn dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AuditConfig::default();

        let j = dir.path().join("meta.json");
        fs::write(&j, r#"{"version": "1.0"}"#).unwrap();
        assert_eq!(
            load_evidence(&j, &cfg),
            LoadedEvidence::Structured(json!({"version": "1.0"}))
        );

        let y = dir.path().join("cfg.yaml");
        fs::write(&y, "lr: 0.1\nlayers:\n  - 3\n  - 4\n").unwrap();
        assert_eq!(
            load_evidence(&y, &cfg),
            LoadedEvidence::Structured(json!({"lr": 0.1, "layers": [3, 4]}))
        );

        let c = dir.path().join("rows.csv");
        fs::write(&c, "model_version,prediction\n1.0,1\n2.0,0\n").unwrap();
        match load_evidence(&c, &cfg) {
            LoadedEvidence::Table(rows) => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[1]["model_version"], "2.0");
            }
            other => panic!("expected table, got {:?}", other),
        }

        let t = dir.path().join("notes.txt");
        fs::write(&t, "plain notes").unwrap();
        assert_eq!(
            load_evidence(&t, &cfg),
            LoadedEvidence::Text("plain notes".to_string())
        );
    }

    #[test]
    fn malformed_json_is_a_sentinel_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let j = dir.path().join("broken.json");
        fs::write(&j, "{ not json").unwrap();
        assert!(load_evidence(&j, &AuditConfig::default()).is_failed());
    }

    #[test]
    fn json_lines_skip_bad_lines() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("preds.jsonl");
        fs::write(&p, "{\"model_version\": \"1\"}\n\ngarbage\n{\"model_version\": \"2\"}\n").unwrap();
        assert_eq!(
            load_evidence(&p, &AuditConfig::default()),
            LoadedEvidence::Structured(json!([{"model_version": "1"}, {"model_version": "2"}]))
        );
    }

    #[test]
    fn oversized_structured_documents_are_not_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("big.json");
        fs::write(&p, "[1,2,3,4,5,6,7,8,9]").unwrap();
        let cfg = AuditConfig {
            max_structured_bytes: 4,
            ..AuditConfig::default()
        };
        assert!(load_evidence(&p, &cfg).is_failed());
    }

    #[test]
    fn text_sample_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("long.txt");
        fs::write(&p, "a".repeat(10_000)).unwrap();
        assert_eq!(read_text_sample(&p, 8192).unwrap().len(), 8192);
    }

    #[test]
    fn decoding_falls_back_across_encodings() {
        assert_eq!(decode_text("héllo".as_bytes()).unwrap(), "héllo");
        // Latin-1 "é" alone is invalid UTF-8.
        assert_eq!(decode_text(b"caf\xe9 ok").unwrap(), "café ok");
        // Truncated multi-byte tail is dropped.
        assert_eq!(decode_text(b"ab\xc3").unwrap(), "ab");
        // UTF-16LE with BOM.
        assert_eq!(decode_text(b"\xff\xfeh\x00i\x00").unwrap(), "hi");
    }
}
