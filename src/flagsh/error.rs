use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlagshError {
    #[error("Editor '{0}' not found on PATH. Set $EDITOR or run `flagsh config editor <name>`.")]
    EditorNotFound(String),

    #[error("Failed to launch editor '{path}': {source}", path = .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed waiting for editor '{path}': {source}", path = .program.display())]
    Wait {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to read file: {0}")]
    Read(#[source] std::io::Error),

    #[error("Invalid JSON document: {0}")]
    InvalidDocument(String),

    #[error("Edit aborted")]
    Aborted,

    #[error("Unable to delete temporary file {shown}: {source}", shown = .path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to apply patch: {0}")]
    Patch(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FlagshError>;
