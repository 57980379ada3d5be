use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Unexpected status {status} for {url}")]
    UnexpectedStatus { url: String, status: reqwest::StatusCode },

    #[error("File already exists: {0}")]
    AlreadyExists(PathBuf),
}

impl SyncError {
    pub fn unexpected_status(url: impl Into<String>, status: reqwest::StatusCode) -> Self {
        Self::UnexpectedStatus { url: url.into(), status }
    }

    /// Whether this error is the benign "asset already on disk" skip.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists(_))
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
