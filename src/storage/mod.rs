//! Archive storage.
//!
//! Pages are persisted as raw bytes under hostname-derived filenames in a
//! single flat directory.

mod archive;

// Re-export public API
pub use archive::ArchiveStore;
