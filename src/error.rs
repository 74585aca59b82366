use crate::construct::ConstructId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GgwError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("recognition motif '{motif}' of {enzyme} not found in sequence")]
    MotifNotFound { enzyme: String, motif: String },

    #[error("{operation} is not defined for vector level {level}")]
    InvalidLevel {
        operation: &'static str,
        level: String,
    },

    #[error("construct {0} not found")]
    NotFound(ConstructId),

    #[error("GenBank error: {0}")]
    GenBank(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GgwError>;
