use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("audit root {0} does not exist")]
    RootMissing(PathBuf),

    #[error("audit root {0} is not a directory")]
    RootNotDirectory(PathBuf),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("keyword matcher error: {0}")]
    Regex(#[from] regex::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
