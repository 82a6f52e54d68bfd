//! End-of-run statistics.

use log::info;
use strum::IntoEnumIterator;

use crate::engine::BatchEntry;
use crate::error_handling::{ErrorType, InfoType, ProcessingStats};

/// Logs a one-line summary of a batch.
pub fn print_batch_summary(entries: &[BatchEntry], elapsed_seconds: f64) {
    let failed = entries.iter().filter(|e| e.resolved().is_none()).count();
    let direct = entries.iter().filter(|e| e.is_direct()).count();
    let resolved = entries.len() - failed - direct;
    info!(
        "✅ Processed {} URL{} ({} resolved, {} already direct, {} failed) in {:.1}s",
        entries.len(),
        if entries.len() == 1 { "" } else { "s" },
        resolved,
        direct,
        failed,
        elapsed_seconds
    );
}

/// Prints error and info statistics to the log.
///
/// Hop-level fetch failures never reach the batch results, so this is where
/// they become visible.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    let total_errors = error_stats.total_errors();
    let total_info = error_stats.total_info();

    if total_errors > 0 {
        info!("Error Counts ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = error_stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }

    if total_info > 0 {
        info!("Info Counts ({} total):", total_info);
        for info_type in InfoType::iter() {
            let count = error_stats.get_info_count(info_type);
            if count > 0 {
                info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Outcome;

    #[test]
    fn test_print_error_statistics_empty() {
        let stats = ProcessingStats::new();
        // Should not panic when there is nothing to report
        print_error_statistics(&stats);
    }

    #[test]
    fn test_print_error_statistics_all_types() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::HttpRequestTimeoutError);
        stats.increment_error(ErrorType::ChallengeUnsolved);
        stats.increment_info(InfoType::CacheHit);
        print_error_statistics(&stats);
        assert_eq!(stats.total_errors(), 2);
    }

    #[test]
    fn test_print_batch_summary() {
        let entries = vec![
            BatchEntry {
                original: "https://bit.ly/a".into(),
                outcome: Outcome::Resolved("https://a.test/".into()),
            },
            BatchEntry {
                original: "nope".into(),
                outcome: Outcome::Failed("invalid".into()),
            },
        ];
        print_batch_summary(&entries, 1.5);
        print_batch_summary(&[], 0.0);
    }
}
