//! Error types for pagewiki
//!
//! Provides a unified error type for all operations.

use crate::protocol::Status;
use thiserror::Error;

/// Result type alias using WikiError
pub type Result<T> = std::result::Result<T, WikiError>;

/// Unified error type for pagewiki operations
#[derive(Debug, Error)]
pub enum WikiError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Routing Errors
    // -------------------------------------------------------------------------
    #[error("no route for path {0}")]
    RouteNotMatched(String),

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    #[error("page not found: {0}")]
    PageNotFound(String),

    #[error("failed to save page {title}: {source}")]
    StorageWrite {
        title: String,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Rendering Errors
    // -------------------------------------------------------------------------
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Network error: {0}")]
    Network(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl WikiError {
    /// HTTP status a client sees when this error ends a request
    pub fn status(&self) -> Status {
        match self {
            WikiError::RouteNotMatched(_) | WikiError::PageNotFound(_) => Status::NotFound,
            WikiError::PayloadTooLarge { .. } => Status::PayloadTooLarge,
            _ => Status::InternalServerError,
        }
    }
}
