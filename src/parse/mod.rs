//! HTML parsing.
//!
//! Streaming structural metadata (link and image counts) collected while a
//! page body is written to the archive. Parsing uses lol_html's incremental
//! tokenizer, so no document tree is ever built.

mod metadata;

// Re-export public API
pub use metadata::{collect, CollectingStream, MetadataCollector, PageMetrics};
