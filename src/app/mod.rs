//! Main application modules.
//!
//! This module provides target resolution and end-of-run statistics printing
//! used by the fetch run.

pub mod statistics;
pub mod url;

// Re-export public API
pub use statistics::{print_error_statistics, print_run_summary};
pub use url::{resolve_target, ResolvedUrl};
