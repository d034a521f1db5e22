//! site_archiver library: fetch, archive, and serve web pages
//!
//! This library resolves user-supplied site references into URLs, retrieves
//! them concurrently, streams each body into `<hostname>.html`, optionally
//! counting links and images on the way, and can serve the archive over HTTP.
//!
//! # Example
//!
//! ```no_run
//! use site_archiver::{run_fetch, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     targets: vec!["example.com".to_string(), "https://www.rust-lang.org".to_string()],
//!     show_metadata: true,
//!     ..Default::default()
//! };
//!
//! let report = run_fetch(config).await?;
//! println!("Archived {} sites, {} failed", report.archived(), report.failed());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. The fetch run polls all targets on
//! the calling task; its future is not `Send`, so await it directly (for
//! example from `#[tokio::main]`) instead of passing it to `tokio::spawn`.

#![warn(missing_docs)]

mod app;
pub mod config;
mod error_handling;
mod fetch;
mod file_server;
pub mod initialization;
mod parse;
mod run;
mod storage;

// Re-export public API
pub use app::{resolve_target, ResolvedUrl};
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{ArchiveError, ErrorType, FetchError, InitializationError, ServerError};
pub use fetch::{BodyStream, FetchedPage, HttpRetriever, Retriever};
pub use file_server::{bind_file_server, resolve_port, FileServer};
pub use parse::{collect, CollectingStream, MetadataCollector, PageMetrics};
pub use run::{fetch_all, run_fetch, FetchReport, ItemOutcome, MetadataSummary};
pub use storage::ArchiveStore;
