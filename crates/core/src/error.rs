//! Error types for the exoquery domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant. Reconciliation itself has
//! no error path — missing data degrades to explicit "no data" output.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all exoquery operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Archive errors ---
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    // --- Target list errors ---
    #[error("Target list error: {0}")]
    Target(#[from] TargetError),

    // --- Report errors ---
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ArchiveError {
    #[error("Archive request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by archive, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed archive response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("Failed to read target list at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse target list at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Cannot determine cycle number from file name: {path}")]
    UnknownCycle { path: PathBuf },

    #[error("No target list files found in {path}")]
    NoInputFiles { path: PathBuf },
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report at {path}: {reason}")]
    WriteError { path: PathBuf, reason: String },

    #[error("Failed to create report directory {path}: {reason}")]
    CreateDirError { path: PathBuf, reason: String },
}
