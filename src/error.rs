use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParafileError {
    #[error("No parameter file '{name}' found in the search paths")]
    FileNotFound { name: String },

    #[error("Failed to parse parameter file {path}: {source}")]
    FileParse {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid value for '{key}': '{raw}' is not a valid {expected}")]
    Parse {
        key: String,
        raw: String,
        expected: &'static str,
    },

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("A key is required to look up a parameter")]
    KeyRequired,

    #[error("Unexpected argument '{0}', values must follow a -key")]
    UnexpectedArgument(String),

    #[error("Parameter file {path} already exists")]
    AlreadyExists { path: PathBuf },

    #[error("Failed to read interactive input: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("Failed to serialize parameters: {0}")]
    Serialize(#[from] serde_json::Error),
}
