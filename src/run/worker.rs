//! Worker task: expand labels, verify, triage.

use log::debug;

use crate::domain::expand;
use crate::error_handling::InfoType;
use crate::verify::ProbeContext;

use super::resources::{PoolCounters, WorkerParams};

/// Runs one worker until the submission queue closes or the run is canceled.
///
/// Every label taken from the queue is expanded against each TLD and
/// verified in turn. Records with neither an address/CNAME nor an MX record
/// are dropped; verification errors skip that hostname only.
pub(crate) async fn run_worker(params: WorkerParams) {
    let WorkerParams {
        id,
        verifier,
        cfg,
        tlds,
        jobs,
        results,
        counters,
        cancel,
    } = params;
    let ctx = ProbeContext::new(cancel.clone());
    let stats = verifier.stats();

    loop {
        let label = {
            let mut jobs = jobs.lock().await;
            tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                label = jobs.recv() => label,
            }
        };
        let Some(label) = label else {
            break;
        };

        for tld in tlds.iter() {
            if cancel.is_cancelled() {
                debug!("Worker {id}: canceled before {label}.{tld}");
                return;
            }
            let host = expand(&label, tld);
            PoolCounters::bump(&counters.hostnames);

            match verifier.verify_domain(&host, &cfg, &ctx).await {
                Ok(verification) if verification.has_signal() => {
                    stats.increment_info(InfoType::Accepted);
                    if results.send(verification).await.is_err() {
                        debug!("Worker {id}: result queue closed");
                        return;
                    }
                }
                Ok(verification) => {
                    debug!("Dropping {}: no address or mail records", verification.ascii);
                    stats.increment_info(InfoType::Filtered);
                    PoolCounters::bump(&counters.filtered);
                }
                Err(e) => {
                    debug!("Skipping {host}: {e}");
                    stats.increment_error(e.error_type());
                    PoolCounters::bump(&counters.skipped);
                }
            }
        }
    }
    debug!("Worker {id}: submission queue drained");
}
