//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (default port, archive naming, report formats)
//! - The library `Config` struct and logging option enums

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
