//! Error types for Kisanflow.
//!
//! The taxonomy is flat: every failure is one variant of `KisanflowError`.
//! Callers at the portal edge turn these into user-visible notifications
//! (see [`crate::notify`]) instead of propagating them further.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all Kisanflow operations.
#[derive(Deserialize, Serialize, Error, Debug, Clone, PartialEq)]
pub enum KisanflowError {
    /// An HTTP call was rejected or returned a non-2xx status.
    #[error("{0}")]
    NetworkFailure(String),

    /// A remote service has no API key configured.
    ///
    /// Expected rather than exceptional: most services fall back to mock
    /// or passthrough data instead of returning this.
    #[error("{0}")]
    ConfigurationMissing(String),

    /// A required field is missing or a graph edit breaks the linear chain.
    #[error("{0}")]
    Validation(String),

    /// Missing start node, stored workflow, or editor node.
    #[error("{0}")]
    NotFound(String),

    /// Configuration parsing errors.
    #[error("{0}")]
    Config(String),

    /// Data conversion errors (JSON, TOML).
    #[error("{0}")]
    Convert(String),

    /// Key-value medium errors.
    #[error("{0}")]
    Store(String),

    /// I/O operation errors.
    #[error("{0}")]
    IoError(String),
}

impl From<std::io::Error> for KisanflowError {
    fn from(error: std::io::Error) -> Self {
        KisanflowError::IoError(error.to_string())
    }
}

impl From<serde_json::Error> for KisanflowError {
    fn from(error: serde_json::Error) -> Self {
        KisanflowError::Convert(error.to_string())
    }
}

impl From<toml::de::Error> for KisanflowError {
    fn from(error: toml::de::Error) -> Self {
        KisanflowError::Config(error.to_string())
    }
}

impl From<reqwest::Error> for KisanflowError {
    fn from(error: reqwest::Error) -> Self {
        KisanflowError::NetworkFailure(error.to_string())
    }
}

impl From<globset::Error> for KisanflowError {
    fn from(error: globset::Error) -> Self {
        KisanflowError::Config(error.to_string())
    }
}
