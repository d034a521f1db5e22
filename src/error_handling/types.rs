//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Per-target failures.
///
/// Every variant is local to one target: it is reported and counted, and the
/// remaining targets keep going.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The target is not a URL, with or without the fallback scheme.
    #[error("{raw} is not a valid URL, and could not be expanded into one. Please check and try again.")]
    InvalidTarget {
        /// The string exactly as the caller supplied it
        raw: String,
    },

    /// Network or transport failure while retrieving the page or its body.
    #[error("Failed to fetch {url}: {message}")]
    Retrieval {
        /// URL the request was issued for
        url: String,
        /// Transport failure reason
        message: String,
    },

    /// The archive file could not be written.
    #[error("Failed to write archive {filename}: {source}")]
    StorageWrite {
        /// Archive filename (flat, relative to the archive directory)
        filename: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// Category used by [`ProcessingStats`](super::ProcessingStats).
    pub fn error_type(&self) -> ErrorType {
        match self {
            FetchError::InvalidTarget { .. } => ErrorType::InvalidTarget,
            FetchError::Retrieval { .. } => ErrorType::Retrieval,
            FetchError::StorageWrite { .. } => ErrorType::StorageWrite,
        }
    }
}

/// Failure while streaming a body into an archive file.
///
/// Kept separate from [`FetchError`] because the store does not know which
/// URL the body came from; the orchestrator maps it.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The response body stream failed part-way.
    #[error("response body failed after {written} bytes: {source}")]
    Body {
        /// Bytes already written before the failure
        written: u64,
        /// Error reported by the body stream
        #[source]
        source: std::io::Error,
    },

    /// Creating or writing the archive file failed.
    #[error("Failed to write archive {filename}: {source}")]
    Io {
        /// Archive filename
        filename: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Error types for the archive file server.
#[derive(Error, Debug)]
pub enum ServerError {
    /// The listening socket could not be bound. Fatal: the server has no fallback port.
    #[error("Failed to bind file server to port {port}: {source}")]
    Bind {
        /// Port that was requested
        port: u16,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error after binding.
    #[error("File server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Categories of per-target failures, for end-of-run statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// Target could not be turned into a URL
    InvalidTarget,
    /// Request or body transfer failed
    Retrieval,
    /// Archive file could not be written
    StorageWrite,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Human-readable label used in the statistics block.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::InvalidTarget => "Invalid target",
            ErrorType::Retrieval => "Retrieval error",
            ErrorType::StorageWrite => "Storage write error",
        }
    }
}
