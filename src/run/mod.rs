//! Fetch orchestration.
//!
//! Resolves every target and retrieves them all concurrently. Once every
//! retrieval has settled, the results are archived one at a time in input
//! order. One target's failure never stops the others.

mod report;
mod task;

use std::time::Instant;

use anyhow::{Context, Result};
use futures::future::join_all;
use log::info;

use crate::app::{print_error_statistics, print_run_summary};
use crate::config::Config;
use crate::error_handling::ProcessingStats;
use crate::fetch::{HttpRetriever, Retriever};
use crate::initialization::init_client;
use crate::storage::ArchiveStore;

pub use report::{FetchReport, ItemOutcome, MetadataSummary};
pub use task::{process_settled, settle_target, SettledTarget};

/// Runs a fetch with the provided configuration.
///
/// Builds the HTTP client and archive store from `config`, then delegates to
/// [`fetch_all`].
///
/// # Errors
///
/// Only setup failures (HTTP client construction) are returned. Per-target
/// failures are part of the returned [`FetchReport`].
///
/// # Example
///
/// ```no_run
/// use site_archiver::{run_fetch, Config};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config {
///     targets: vec!["example.com".to_string()],
///     show_metadata: true,
///     ..Default::default()
/// };
/// let report = run_fetch(config).await?;
/// println!("Archived {} of {} sites", report.archived(), report.total());
/// # Ok(())
/// # }
/// ```
pub async fn run_fetch(config: Config) -> Result<FetchReport> {
    let client = init_client(&config)
        .await
        .context("Failed to initialize HTTP client")?;
    let retriever = HttpRetriever::new(client);
    let store = ArchiveStore::new(config.archive_dir.clone());

    Ok(fetch_all(&config.targets, config.show_metadata, &retriever, &store).await)
}

/// Fetches and archives `targets` with the given retriever and store.
///
/// Retrievals are polled together from this task; nothing is spawned and
/// there is no concurrency limit or timeout. No page is archived until every
/// retrieval has settled. Archiving then runs sequentially, so two targets on
/// the same host overwrite each other whole, the later one winning.
pub async fn fetch_all<R: Retriever>(
    targets: &[String],
    show_metadata: bool,
    retriever: &R,
    store: &ArchiveStore,
) -> FetchReport {
    let start_time = Instant::now();
    let stats = ProcessingStats::new();

    info!("Fetching the following websites: {}", targets.join(", "));

    let settled = join_all(targets.iter().map(|target| settle_target(target, retriever))).await;

    let mut outcomes = Vec::with_capacity(settled.len());
    for item in settled {
        outcomes.push(process_settled(item, show_metadata, store, &stats).await);
    }

    let report = FetchReport {
        outcomes,
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    };

    print_error_statistics(&stats);
    print_run_summary(
        report.total(),
        report.archived(),
        report.failed(),
        report.elapsed_seconds,
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    use bytes::Bytes;
    use chrono::{DateTime, Local};
    use futures::stream;
    use reqwest::header::HeaderMap;
    use reqwest::StatusCode;
    use tempfile::TempDir;

    use crate::app::ResolvedUrl;
    use crate::error_handling::FetchError;
    use crate::fetch::FetchedPage;

    /// Serves canned bodies keyed by full URL or by host; anything else fails
    /// like a refused connection. Records how many files the watched archive
    /// directory held at each retrieval.
    struct StubRetriever {
        pages: HashMap<String, Vec<Bytes>>,
        watched_dir: Option<PathBuf>,
        files_seen: RefCell<Vec<usize>>,
    }

    impl StubRetriever {
        fn new(pages: &[(&str, &'static str)]) -> Self {
            let mut stub = Self {
                pages: HashMap::new(),
                watched_dir: None,
                files_seen: RefCell::new(Vec::new()),
            };
            for &(key, body) in pages {
                stub = stub.with_chunks(key, vec![Bytes::from_static(body.as_bytes())]);
            }
            stub
        }

        fn with_chunks(mut self, key: &str, chunks: Vec<Bytes>) -> Self {
            self.pages.insert(key.to_string(), chunks);
            self
        }

        fn watching(mut self, dir: &Path) -> Self {
            self.watched_dir = Some(dir.to_path_buf());
            self
        }
    }

    impl Retriever for StubRetriever {
        async fn retrieve(&self, url: &ResolvedUrl) -> Result<FetchedPage, FetchError> {
            if let Some(dir) = &self.watched_dir {
                let count = std::fs::read_dir(dir).unwrap().count();
                self.files_seen.borrow_mut().push(count);
            }
            let chunks = self
                .pages
                .get(url.as_str())
                .or_else(|| self.pages.get(url.host()));
            match chunks {
                Some(chunks) => {
                    let body: Vec<Result<Bytes, std::io::Error>> =
                        chunks.iter().cloned().map(Ok).collect();
                    Ok(FetchedPage {
                        url: url.clone(),
                        status: StatusCode::OK,
                        headers: HeaderMap::new(),
                        body: Box::pin(stream::iter(body)),
                    })
                }
                None => Err(FetchError::Retrieval {
                    url: url.to_string(),
                    message: "connection refused".to_string(),
                }),
            }
        }
    }

    const PAGE: &str = "<html><a href=\"/a\">a</a><a href=\"/b\"><img src=\"x.png\"></a></html>";

    fn targets(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[tokio::test]
    async fn test_invalid_target_does_not_stop_others() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let store = ArchiveStore::new(dir.path());
        let retriever = StubRetriever::new(&[("example.com", PAGE)]);

        let report = fetch_all(
            &targets(&["not a url", "example.com"]),
            false,
            &retriever,
            &store,
        )
        .await;

        assert_eq!(report.total(), 2);
        assert_eq!(report.archived(), 1);
        match report.outcome_for("not a url") {
            Some(ItemOutcome::Failed {
                error: FetchError::InvalidTarget { raw },
                ..
            }) => assert_eq!(raw, "not a url"),
            other => panic!("expected InvalidTarget, got {:?}", other),
        }
        let saved = std::fs::read(dir.path().join("example.com.html")).unwrap();
        assert_eq!(saved, PAGE.as_bytes());
    }

    #[tokio::test]
    async fn test_retrieval_failure_is_isolated() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let store = ArchiveStore::new(dir.path());
        let retriever = StubRetriever::new(&[("good.example", PAGE)]);

        let report = fetch_all(
            &targets(&["bad.example", "good.example"]),
            true,
            &retriever,
            &store,
        )
        .await;

        assert_eq!(report.total(), 2);
        assert!(matches!(
            report.outcome_for("bad.example"),
            Some(ItemOutcome::Failed {
                error: FetchError::Retrieval { .. },
                ..
            })
        ));
        match report.outcome_for("good.example") {
            Some(ItemOutcome::Archived {
                filename,
                bytes_written,
                metadata: Some(summary),
                ..
            }) => {
                assert_eq!(filename, "good.example.html");
                assert_eq!(*bytes_written, PAGE.len() as u64);
                assert_eq!(summary.site, "https://good.example/");
                assert_eq!(summary.metrics.num_links, 2);
                assert_eq!(summary.metrics.num_images, 1);
                assert_eq!(summary.metrics.last_fetch, None);
            }
            other => panic!("expected archived page with metadata, got {:?}", other),
        }
        assert!(!dir.path().join("bad.example.html").exists());
        assert!(dir.path().join("good.example.html").exists());
    }

    #[tokio::test]
    async fn test_second_fetch_reports_previous_write_time() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let store = ArchiveStore::new(dir.path());
        let retriever = StubRetriever::new(&[("example.com", PAGE)]);
        let list = targets(&["example.com"]);

        fetch_all(&list, true, &retriever, &store).await;
        let first_write: DateTime<Local> = std::fs::metadata(dir.path().join("example.com.html"))
            .unwrap()
            .modified()
            .unwrap()
            .into();

        let report = fetch_all(&list, true, &retriever, &store).await;
        match report.outcome_for("example.com") {
            Some(ItemOutcome::Archived {
                metadata: Some(summary),
                ..
            }) => assert_eq!(summary.metrics.last_fetch, Some(first_write)),
            other => panic!("expected archived page with metadata, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_without_metadata_no_summary() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let store = ArchiveStore::new(dir.path());
        let retriever = StubRetriever::new(&[("example.com", PAGE)]);

        let report = fetch_all(&targets(&["example.com"]), false, &retriever, &store).await;
        assert!(matches!(
            report.outcome_for("example.com"),
            Some(ItemOutcome::Archived { metadata: None, .. })
        ));
    }

    #[tokio::test]
    async fn test_storage_failure_is_reported() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let store = ArchiveStore::new(dir.path().join("does-not-exist"));
        let retriever = StubRetriever::new(&[("example.com", PAGE)]);

        let report = fetch_all(&targets(&["example.com"]), true, &retriever, &store).await;
        assert!(matches!(
            report.outcome_for("example.com"),
            Some(ItemOutcome::Failed {
                error: FetchError::StorageWrite { .. },
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_empty_target_list() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let store = ArchiveStore::new(dir.path());
        let retriever = StubRetriever::new(&[]);

        let report = fetch_all(&[], false, &retriever, &store).await;
        assert_eq!(report.total(), 0);
        assert_eq!(report.failed(), 0);
    }

    fn repeated(byte: u8, total: usize, chunk: usize) -> Vec<Bytes> {
        (0..total / chunk).map(|_| Bytes::from(vec![byte; chunk])).collect()
    }

    #[tokio::test]
    async fn test_same_host_targets_overwrite_whole() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let store = ArchiveStore::new(dir.path());
        let retriever = StubRetriever::new(&[])
            .with_chunks("http://same.example/a", repeated(b'A', 64 * 1024, 1024))
            .with_chunks("http://same.example/b", repeated(b'B', 16 * 1024, 1024));
        let list = targets(&["http://same.example/a", "http://same.example/b"]);

        let report = fetch_all(&list, true, &retriever, &store).await;

        assert_eq!(report.archived(), 2);
        let saved = std::fs::read(dir.path().join("same.example.html")).unwrap();
        assert_eq!(saved, vec![b'B'; 16 * 1024]);

        // The second target is archived after the first, so it sees that write
        match report.outcome_for("http://same.example/b") {
            Some(ItemOutcome::Archived {
                metadata: Some(summary),
                ..
            }) => assert!(summary.metrics.last_fetch.is_some()),
            other => panic!("expected archived page with metadata, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_all_retrievals_settle_before_archiving() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let store = ArchiveStore::new(dir.path());
        let retriever = StubRetriever::new(&[("one.example", PAGE), ("two.example", PAGE)])
            .watching(dir.path());
        let list = targets(&["one.example", "two.example", "three.example"]);

        let report = fetch_all(&list, false, &retriever, &store).await;

        assert_eq!(*retriever.files_seen.borrow(), vec![0, 0, 0]);
        assert_eq!(report.archived(), 2);
        assert!(dir.path().join("one.example.html").exists());
        assert!(dir.path().join("two.example.html").exists());
    }

    #[tokio::test]
    async fn test_outcomes_follow_input_order() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let store = ArchiveStore::new(dir.path());
        let retriever = StubRetriever::new(&[("b.example", PAGE), ("a.example", PAGE)]);
        let list = targets(&["b.example", "not a url", "a.example"]);

        let report = fetch_all(&list, false, &retriever, &store).await;

        let order: Vec<&str> = report.outcomes.iter().map(|o| o.target()).collect();
        assert_eq!(order, vec!["b.example", "not a url", "a.example"]);
    }
}
