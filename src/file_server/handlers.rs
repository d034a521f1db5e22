//! Archive request handler.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

use crate::config::NOT_FOUND_BODY;
use crate::storage::ArchiveStore;

/// Serves `/<name>.html` straight from the archive directory.
///
/// Anything that is not a flat archive name, or is not on disk right now,
/// gets 404 with a fixed body.
pub async fn archived_page_handler(State(store): State<Arc<ArchiveStore>>, uri: Uri) -> Response {
    let path = uri.path();
    let filename = path.strip_prefix('/').unwrap_or(path);

    if !ArchiveStore::is_archive_name(filename) {
        log::debug!("Rejected request for {path}");
        return not_found();
    }

    match store.open(filename).await {
        Ok(Some(file)) => {
            log::debug!("Serving {filename}");
            (StatusCode::OK, Body::from_stream(ReaderStream::new(file))).into_response()
        }
        Ok(None) => not_found(),
        Err(e) => {
            log::warn!("Failed to open archived page {filename}: {e}");
            not_found()
        }
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
}
