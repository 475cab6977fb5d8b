use crate::grammar::GrammarError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GpError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Illegal state: {0}")]
    IllegalState(String),

    #[error("Grammar error: {0}")]
    Grammar(#[from] GrammarError),

    #[error("Index {index} out of bounds for length {length}")]
    Index { index: usize, length: usize },

    #[error("{stage} reverted more than {limit} times")]
    ExcessiveReversion { stage: &'static str, limit: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GpError>;
