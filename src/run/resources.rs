//! Pool state shared between the producer, the workers and the consumer.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;

use crate::config::VerifyConfig;
use crate::verify::{Verification, Verifier};

/// Outcome of a pool run.
#[derive(Debug, Clone, Default)]
pub struct PoolReport {
    /// Records that passed the triage filter, in completion order
    pub accepted: Vec<Verification>,
    /// Candidate labels taken from the input
    pub labels: usize,
    /// Hostnames handed to the verifier (labels × TLDs, fewer if canceled)
    pub hostnames: usize,
    /// Verified but dropped: no address, CNAME or MX record
    pub filtered: usize,
    /// Verification errors (invalid hostname, interrupted DNS stage)
    pub skipped: usize,
    /// The umbrella token was canceled before the pool drained
    pub canceled: bool,
}

/// Per-run counters updated by every worker.
#[derive(Debug, Default)]
pub(crate) struct PoolCounters {
    pub hostnames: AtomicUsize,
    pub filtered: AtomicUsize,
    pub skipped: AtomicUsize,
}

impl PoolCounters {
    pub fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::Relaxed)
    }
}

/// Everything one worker task owns or shares.
pub(crate) struct WorkerParams {
    pub id: usize,
    pub verifier: Arc<Verifier>,
    pub cfg: Arc<VerifyConfig>,
    pub tlds: Arc<[String]>,
    /// Submission queue, shared by all workers
    pub jobs: Arc<Mutex<mpsc::Receiver<String>>>,
    /// This worker's own sender; the result queue closes once all are dropped
    pub results: mpsc::Sender<Verification>,
    pub counters: Arc<PoolCounters>,
    pub cancel: CancellationToken,
}
