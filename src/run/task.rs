//! Per-target processing.
//!
//! A target first settles (resolve, then retrieve the response head) and is
//! then archived, optionally through the metadata collector. Every failure
//! ends here as an [`ItemOutcome`].

use log::{error, info, warn};

use super::report::{ItemOutcome, MetadataSummary};
use crate::app::resolve_target;
use crate::error_handling::{ArchiveError, FetchError, ProcessingStats};
use crate::fetch::{error_chain_message, FetchedPage, Retriever};
use crate::parse;
use crate::storage::ArchiveStore;

/// A target whose retrieval has finished, successfully or not.
pub struct SettledTarget {
    /// Target as supplied
    pub target: String,
    /// Response head and unread body, or the reason there is none
    pub result: Result<FetchedPage, FetchError>,
}

/// Resolves and retrieves one target. The body is left unread.
pub async fn settle_target<R: Retriever>(target: &str, retriever: &R) -> SettledTarget {
    let result = match resolve_target(target) {
        Ok(url) => retriever.retrieve(&url).await,
        Err(e) => Err(e),
    };
    SettledTarget {
        target: target.to_string(),
        result,
    }
}

/// Archives a settled target to completion.
///
/// Never returns an error: failures are logged, counted in `stats`, and
/// returned as `ItemOutcome::Failed`.
pub async fn process_settled(
    settled: SettledTarget,
    show_metadata: bool,
    store: &ArchiveStore,
    stats: &ProcessingStats,
) -> ItemOutcome {
    let SettledTarget { target, result } = settled;
    let archived = match result {
        Ok(page) => archive_page(&target, page, show_metadata, store).await,
        Err(e) => Err(e),
    };

    match archived {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("{e}");
            stats.increment_error(e.error_type());
            ItemOutcome::Failed { target, error: e }
        }
    }
}

async fn archive_page(
    target: &str,
    page: FetchedPage,
    show_metadata: bool,
    store: &ArchiveStore,
) -> Result<ItemOutcome, FetchError> {
    let FetchedPage {
        url,
        status,
        mut body,
        ..
    } = page;

    info!("Successfully fetched {url}");
    if !status.is_success() {
        warn!("{url} responded with status {status}, archiving the response anyway");
    }

    let filename = ArchiveStore::filename_for(&url);
    let to_fetch_error = |e: ArchiveError| match e {
        ArchiveError::Body { .. } => FetchError::Retrieval {
            url: url.to_string(),
            message: error_chain_message(&e),
        },
        ArchiveError::Io { filename, source } => FetchError::StorageWrite { filename, source },
    };

    let (bytes_written, metadata) = if show_metadata {
        // Must be read before the write below replaces the file
        let last_fetch = store.last_modified(&filename).await;
        let mut tee = parse::collect(body);
        let bytes_written = store
            .write(&filename, &mut tee)
            .await
            .map_err(to_fetch_error)?;
        let summary = MetadataSummary {
            site: url.to_string(),
            metrics: tee.finish(last_fetch),
        };
        println!("{summary}");
        (bytes_written, Some(summary))
    } else {
        let bytes_written = store
            .write(&filename, &mut body)
            .await
            .map_err(to_fetch_error)?;
        (bytes_written, None)
    };

    info!("Saved {url} to {filename}");

    Ok(ItemOutcome::Archived {
        target: target.to_string(),
        url,
        status,
        filename,
        bytes_written,
        metadata,
    })
}
