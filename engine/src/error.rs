use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}, column {column}: {msg}")]
    Parse {
        msg:    String,
        line:   usize,
        column: usize,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("No translator registered for file {0}")]
    UnknownTranslator(PathBuf),
}
