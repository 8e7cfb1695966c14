//! Progress logging utilities.

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::info;
use tokio_util::sync::CancellationToken;

use crate::error_handling::{InfoType, ProcessingStats};

/// Logs how many hostnames have been verified so far and the current rate.
pub fn log_progress(start_time: Instant, stats: &ProcessingStats) {
    let completed = stats.get_info_count(InfoType::Verified) + stats.total_skipped();
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Processed {} hostnames in {:.2} seconds (~{:.2} hostnames/sec)",
        completed, elapsed_secs, rate
    );
}

/// Spawns a task that calls [`log_progress`] every `interval` until `cancel`
/// fires.
pub fn spawn_progress_logger(
    start_time: Instant,
    stats: Arc<ProcessingStats>,
    interval: Duration,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => log_progress(start_time, &stats),
            }
        }
    })
}
