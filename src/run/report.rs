//! Run results and the metadata summary block.

use std::fmt;

use reqwest::StatusCode;

use crate::app::ResolvedUrl;
use crate::config::LAST_FETCH_FORMAT;
use crate::error_handling::FetchError;
use crate::parse::PageMetrics;

/// Metadata printed for one archived page.
///
/// `Display` renders the fixed four-line block:
///
/// ```text
/// site: https://example.com/
/// num_links: 1
/// images: 0
/// last_fetch: never
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataSummary {
    /// Final URL of the page
    pub site: String,
    /// Counts and previous fetch time
    pub metrics: PageMetrics,
}

impl fmt::Display for MetadataSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "site: {}", self.site)?;
        writeln!(f, "num_links: {}", self.metrics.num_links)?;
        writeln!(f, "images: {}", self.metrics.num_images)?;
        match self.metrics.last_fetch {
            Some(when) => write!(f, "last_fetch: {}", when.format(LAST_FETCH_FORMAT)),
            None => write!(f, "last_fetch: never"),
        }
    }
}

/// Final state of one target.
#[derive(Debug)]
pub enum ItemOutcome {
    /// The page was retrieved and written to the archive.
    Archived {
        /// Target as supplied
        target: String,
        /// Final URL after redirects
        url: ResolvedUrl,
        /// Response status
        status: StatusCode,
        /// Archive filename
        filename: String,
        /// Body size on disk
        bytes_written: u64,
        /// Present when the run collected metadata
        metadata: Option<MetadataSummary>,
    },
    /// The target failed at resolution, retrieval, or storage.
    Failed {
        /// Target as supplied
        target: String,
        /// Why the target failed
        error: FetchError,
    },
}

impl ItemOutcome {
    /// Raw target this outcome belongs to.
    pub fn target(&self) -> &str {
        match self {
            ItemOutcome::Archived { target, .. } | ItemOutcome::Failed { target, .. } => target,
        }
    }

    /// Whether the page reached the archive.
    pub fn is_archived(&self) -> bool {
        matches!(self, ItemOutcome::Archived { .. })
    }
}

/// Results of a fetch run.
///
/// Outcomes are in input order.
#[derive(Debug)]
pub struct FetchReport {
    /// One outcome per target
    pub outcomes: Vec<ItemOutcome>,
    /// Wall-clock duration of the run
    pub elapsed_seconds: f64,
}

impl FetchReport {
    /// Number of targets in the run.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of pages written to the archive.
    pub fn archived(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_archived()).count()
    }

    /// Number of targets that failed.
    pub fn failed(&self) -> usize {
        self.total() - self.archived()
    }

    /// Outcome recorded for `target`, if it was part of the run.
    pub fn outcome_for(&self, target: &str) -> Option<&ItemOutcome> {
        self.outcomes.iter().find(|o| o.target() == target)
    }
}
