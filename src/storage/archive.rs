//! Hostname-keyed archive of fetched pages.
//!
//! Every page is stored as raw bytes in `<hostname>.html` inside a flat
//! archive directory. A later fetch of the same host overwrites the file.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::{DateTime, Local};
use futures::{Stream, StreamExt};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::app::ResolvedUrl;
use crate::config::ARCHIVE_EXTENSION;
use crate::error_handling::ArchiveError;

/// Flat directory of archived pages.
#[derive(Debug, Clone)]
pub struct ArchiveStore {
    root: PathBuf,
}

impl ArchiveStore {
    /// Store rooted at `root`. The directory is not created.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Archive directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Archive filename for a URL: its host plus `.html`.
    ///
    /// Paths are ignored, so two pages on one host share a file.
    pub fn filename_for(url: &ResolvedUrl) -> String {
        format!("{}{}", url.host(), ARCHIVE_EXTENSION)
    }

    /// Whether `name` follows the archive naming convention.
    ///
    /// Only flat `<stem>.html` names qualify; anything with a path separator
    /// or a `..` component is rejected.
    pub fn is_archive_name(name: &str) -> bool {
        match name.strip_suffix(ARCHIVE_EXTENSION) {
            Some(stem) => {
                !stem.is_empty()
                    && !name.contains(['/', '\\'])
                    && !name.contains("..")
                    && !name.starts_with('.')
            }
            None => false,
        }
    }

    fn path_for(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    /// Modification time of an existing archive file.
    ///
    /// Returns `None` when the file does not exist. Read this before writing
    /// a new body for the same file, otherwise the previous fetch time is lost.
    pub async fn last_modified(&self, filename: &str) -> Option<DateTime<Local>> {
        let metadata = tokio::fs::metadata(self.path_for(filename)).await.ok()?;
        if !metadata.is_file() {
            return None;
        }
        metadata.modified().ok().map(DateTime::<Local>::from)
    }

    /// Streams `body` into `filename`, replacing any previous archive.
    ///
    /// Returns the number of bytes written. The file is written in place, so a
    /// concurrent reader may observe a partial body.
    ///
    /// # Errors
    ///
    /// - `ArchiveError::Io` if the file cannot be created or written
    /// - `ArchiveError::Body` if the body stream yields an error
    pub async fn write<S>(&self, filename: &str, body: &mut S) -> Result<u64, ArchiveError>
    where
        S: Stream<Item = Result<Bytes, std::io::Error>> + Unpin,
    {
        let io_error = |source| ArchiveError::Io {
            filename: filename.to_string(),
            source,
        };

        let mut file = File::create(self.path_for(filename))
            .await
            .map_err(io_error)?;

        let mut written: u64 = 0;
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|source| ArchiveError::Body { written, source })?;
            file.write_all(&chunk).await.map_err(io_error)?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(io_error)?;

        log::debug!("Wrote {written} bytes to {}", self.path_for(filename).display());
        Ok(written)
    }

    /// Opens an archived page for reading, `None` if it is not present.
    ///
    /// # Errors
    ///
    /// Returns I/O errors other than "not found".
    pub async fn open(&self, filename: &str) -> std::io::Result<Option<File>> {
        match File::open(self.path_for(filename)).await {
            Ok(file) => {
                if file.metadata().await?.is_file() {
                    Ok(Some(file))
                } else {
                    Ok(None)
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}
