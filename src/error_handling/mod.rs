//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (per-target, server, initialization)
//! - Processing statistics tracking by error category

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{ArchiveError, ErrorType, FetchError, InitializationError, ServerError};
