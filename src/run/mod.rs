//! Worker pool: fans candidate labels out to verifiers and collects results.
//!
//! The pipeline is explicit:
//! - one producer task feeds labels into a bounded submission queue
//! - `workers` tasks share that queue, verify `<label>.<tld>` for every TLD
//!   and send accepted records to a bounded result queue
//! - the caller drains the result queue until every worker has exited,
//!   then joins them
//!
//! The submission queue closes when the producer is done (or canceled); the
//! result queue closes when the last worker drops its sender.

mod resources;
mod scan;
mod worker;

use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::config::{VerifyConfig, QUEUE_CAPACITY};
use crate::verify::Verifier;

pub use resources::PoolReport;
pub use scan::{run_scan, run_scan_with_verifier, ScanReport};

use resources::{PoolCounters, WorkerParams};

/// Verifies every `<label>.<tld>` combination with `workers` concurrent
/// workers and returns the records that passed the triage filter.
///
/// A worker count of zero is treated as one. Errors for individual
/// hostnames are counted and never stop the pool. Canceling `cancel` stops
/// the producer, the workers between hostnames and every in-flight stage;
/// records completed so far are still returned.
pub async fn run_pool(
    verifier: Arc<Verifier>,
    cfg: &VerifyConfig,
    candidates: Vec<String>,
    tlds: Vec<String>,
    workers: usize,
    cancel: CancellationToken,
) -> PoolReport {
    let workers = workers.max(1);
    let cfg = Arc::new(cfg.normalized());
    let tlds: Arc<[String]> = tlds.into();
    let counters = Arc::new(PoolCounters::default());

    let (job_tx, job_rx) = mpsc::channel::<String>(QUEUE_CAPACITY);
    let (result_tx, mut result_rx) = mpsc::channel(QUEUE_CAPACITY);
    let jobs = Arc::new(Mutex::new(job_rx));

    let mut set = JoinSet::new();
    for id in 0..workers {
        set.spawn(worker::run_worker(WorkerParams {
            id,
            verifier: Arc::clone(&verifier),
            cfg: Arc::clone(&cfg),
            tlds: Arc::clone(&tlds),
            jobs: Arc::clone(&jobs),
            results: result_tx.clone(),
            counters: Arc::clone(&counters),
            cancel: cancel.clone(),
        }));
    }
    // Only the workers' senders may keep the result queue open
    drop(result_tx);

    let producer = tokio::spawn(produce(candidates, job_tx, cancel.clone()));

    let mut accepted = Vec::new();
    while let Some(verification) = result_rx.recv().await {
        accepted.push(verification);
    }

    while let Some(joined) = set.join_next().await {
        if let Err(e) = joined {
            warn!("Worker task failed: {e}");
        }
    }
    let labels = match producer.await {
        Ok(sent) => sent,
        Err(e) => {
            warn!("Producer task failed: {e}");
            0
        }
    };

    let report = PoolReport {
        accepted,
        labels,
        hostnames: PoolCounters::get(&counters.hostnames),
        filtered: PoolCounters::get(&counters.filtered),
        skipped: PoolCounters::get(&counters.skipped),
        canceled: cancel.is_cancelled(),
    };
    debug!(
        "Pool drained: {} hostnames from {} labels, {} accepted, {} filtered, {} skipped",
        report.hostnames,
        report.labels,
        report.accepted.len(),
        report.filtered,
        report.skipped
    );
    report
}

/// Feeds `candidates` into the submission queue; returns how many were sent.
///
/// Dropping `jobs` on return closes the queue.
async fn produce(
    candidates: Vec<String>,
    jobs: mpsc::Sender<String>,
    cancel: CancellationToken,
) -> usize {
    let mut sent = 0;
    for label in candidates {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            res = jobs.send(label) => {
                if res.is_err() {
                    break;
                }
                sent += 1;
            }
        }
    }
    sent
}
