//! End-of-run statistics.

use std::time::Duration;

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, InfoType, ProcessingStats};
use crate::run::PoolReport;

/// Logs the pool summary followed by the per-category counters.
pub fn log_statistics(report: &PoolReport, stats: &ProcessingStats, elapsed: Duration) {
    info!(
        "Processed {} hostname{} from {} label{} in {:.1}s: {} accepted, {} filtered, {} skipped{}",
        report.hostnames,
        if report.hostnames == 1 { "" } else { "s" },
        report.labels,
        if report.labels == 1 { "" } else { "s" },
        elapsed.as_secs_f64(),
        report.accepted.len(),
        report.filtered,
        report.skipped,
        if report.canceled { " (interrupted)" } else { "" }
    );
    print_error_statistics(stats);
}

/// Prints error and info counters to the log, non-zero categories only.
///
/// Fatal categories are marked: those hostnames were skipped, not recorded.
fn print_error_statistics(stats: &ProcessingStats) {
    let total_errors = stats.total_errors();
    let total_info = stats.total_info();

    if total_errors > 0 {
        info!(
            "Error Counts ({} total, {} hostnames skipped):",
            total_errors,
            stats.total_skipped()
        );
        for error_type in ErrorType::iter() {
            let count = stats.get_error_count(error_type);
            if count > 0 {
                let marker = if error_type.is_fatal() { " (skipped)" } else { "" };
                info!("   {}: {}{}", error_type.as_str(), count, marker);
            }
        }
    }

    if total_info > 0 {
        info!("Info Counts ({} total):", total_info);
        for info_type in InfoType::iter() {
            let count = stats.get_info_count(info_type);
            if count > 0 {
                info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_error_statistics_no_errors() {
        let stats = ProcessingStats::new();
        // Should not panic when there are no errors
        print_error_statistics(&stats);
    }

    #[test]
    fn test_log_statistics_all_types() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::DnsContextTimeout);
        stats.increment_error(ErrorType::TlsHandshakeFailure);
        stats.increment_info(InfoType::HttpFallback);
        let report = PoolReport {
            labels: 1,
            hostnames: 2,
            skipped: 1,
            canceled: true,
            ..PoolReport::default()
        };
        log_statistics(&report, &stats, Duration::from_millis(1500));
        assert_eq!(stats.total_info(), 1);
    }
}
