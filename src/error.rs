//! Error types for Cairn operations.
//!
//! This module defines [`CairnError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `CairnError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `CairnError::Other`) for unexpected errors
//! - Fatal load failures (corrupt or unsupported archives, missing metadata)
//!   are errors; validation findings are collected into the check report
//!   instead of being raised

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Cairn operations.
#[derive(Debug, Error)]
pub enum CairnError {
    /// Profile path does not exist.
    #[error("Profile not found: {path}")]
    ProfileNotFound { path: PathBuf },

    /// The path is neither a directory, a zip, nor a tar+gzip archive.
    #[error("Unsupported profile container: {path}")]
    UnsupportedArchive { path: PathBuf },

    /// Archive exists but could not be read back as its detected format.
    #[error("Failed to read archive {path}: {message}")]
    ArchiveReadError { path: PathBuf, message: String },

    /// No metadata document (`cairn.yml` or `metadata.script`) in the profile.
    #[error("Missing metadata document in {path}")]
    MetadataNotFound { path: PathBuf },

    /// Metadata document exists but could not be parsed.
    #[error("Failed to parse {source_name}: {message}")]
    MetadataParseError {
        source_name: String,
        message: String,
    },

    /// Archive materialization was cancelled by the caller.
    #[error("Profile load cancelled")]
    Cancelled,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Cairn operations.
pub type Result<T> = std::result::Result<T, CairnError>;
