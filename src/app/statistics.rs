//! End-of-run statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, ProcessingStats};

/// Prints a one-line summary of the run.
pub fn print_run_summary(total: usize, archived: usize, failed: usize, elapsed_seconds: f64) {
    info!(
        "✅ Processed {} site{} ({} archived, {} failed) in {:.1}s",
        total,
        if total == 1 { "" } else { "s" },
        archived,
        failed,
        elapsed_seconds
    );
}

/// Prints per-category failure counts to the log.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    let total_errors = error_stats.total_errors();

    if total_errors > 0 {
        info!("Error Counts ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = error_stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }
}
