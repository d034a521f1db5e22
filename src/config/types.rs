//! Configuration types.
//!
//! This module defines the enums and the library configuration struct that the
//! CLI layer fills in once and hands to the core by value.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::config::constants::DEFAULT_USER_AGENT;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// Built once at the process boundary and passed by value into
/// [`run_fetch`](crate::run_fetch). The core never reads arguments or
/// environment variables on its own.
///
/// # Examples
///
/// ```no_run
/// use site_archiver::Config;
///
/// let config = Config {
///     targets: vec!["example.com".to_string()],
///     show_metadata: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Raw site references, in the order the user supplied them
    pub targets: Vec<String>,

    /// Count links/images while archiving and print a summary per page
    pub show_metadata: bool,

    /// Serve the archive directory over HTTP after the fetch run
    pub start_server: bool,

    /// Explicit server port; falls back to the environment chain, then 3000
    pub port: Option<u16>,

    /// Directory archived pages are written to and served from
    pub archive_dir: PathBuf,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            show_metadata: false,
            start_server: false,
            port: None,
            archive_dir: PathBuf::from("."),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
