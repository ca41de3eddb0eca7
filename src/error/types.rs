// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The backing file exists but cannot be turned back into a collection.
    /// Never treated as "no data yet".
    #[error("Corrupt collection file {path:?}: {reason}")]
    CorruptCollection { path: PathBuf, reason: String },

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("External source error: {0}")]
    External(String),

    #[error("Resource not found")]
    NotFound,

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    /// Whether startup must stop instead of continuing with empty state.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::CorruptCollection { .. })
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
