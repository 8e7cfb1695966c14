//! End-to-end run: candidates in, results file out.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use log::info;
use tokio_util::sync::CancellationToken;

use crate::app::{log_statistics, shutdown_gracefully, spawn_progress_logger};
use crate::config::{Opt, LOGGING_INTERVAL};
use crate::domain::candidates::read_candidates;
use crate::domain::{base_label, normalize_hostname, parse_tlds};
use crate::error_handling::{ProcessingStats, ScanError};
use crate::export::{write_results, OutputRecord};
use crate::initialization::{init_probe_client, init_resolver, init_tls_connector};
use crate::verify::Verifier;

use super::run_pool;

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Records written to the results file
    pub found: usize,
    /// Hostnames handed to the verifier
    pub hostnames: usize,
    /// Hostnames skipped because their verification failed
    pub skipped: usize,
    /// Path of the results file
    pub outfile: PathBuf,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
    /// The run was interrupted; the results file holds what finished
    pub canceled: bool,
}

/// Runs a verification scan with the options given on the command line.
///
/// Builds the resolver, TLS connector and HTTP client, then delegates to
/// [`run_scan_with_verifier`].
///
/// # Errors
///
/// See [`run_scan_with_verifier`]; additionally
/// `ScanError::Initialization` if a shared resource cannot be built.
pub async fn run_scan(opt: &Opt, cancel: CancellationToken) -> Result<ScanReport, ScanError> {
    let cfg = opt.verify_config();
    let verifier = Verifier::new(
        Arc::new(init_resolver(&cfg)),
        init_tls_connector()?,
        init_probe_client()?,
        Arc::new(ProcessingStats::new()),
    );
    run_scan_with_verifier(opt, Arc::new(verifier), cancel).await
}

/// Runs a verification scan with a caller-provided verifier.
///
/// Candidate labels come from `--input` (or the base label of `--domain`),
/// capped at `--max`, and are expanded against the TLD list. Accepted records
/// are written to `--outfile` even when the run was canceled.
///
/// # Errors
///
/// - `ScanError::InvalidDomain` if `--domain` cannot be normalized
/// - `ScanError::Candidates` if the candidate input cannot be read
/// - `ScanError::Output` if the results file cannot be written
pub async fn run_scan_with_verifier(
    opt: &Opt,
    verifier: Arc<Verifier>,
    cancel: CancellationToken,
) -> Result<ScanReport, ScanError> {
    let start_time = Instant::now();
    let base = normalize_hostname(&opt.domain).map_err(ScanError::InvalidDomain)?;

    let tlds = parse_tlds(&base, &opt.tlds);
    for tld in &tlds {
        info!("Queued TLD variant: {tld}");
    }

    let mut candidates = match &opt.input {
        Some(path) => read_candidates(path).await.map_err(ScanError::Candidates)?,
        None => vec![base_label(&base).to_string()],
    };
    if opt.max > 0 && opt.max < candidates.len() {
        candidates.truncate(opt.max);
    }
    info!(
        "Verifying {} candidate{} across {} TLD{} with {} workers",
        candidates.len(),
        if candidates.len() == 1 { "" } else { "s" },
        tlds.len(),
        if tlds.len() == 1 { "" } else { "s" },
        opt.worker_count()
    );

    let stats = Arc::clone(verifier.stats());
    let background = CancellationToken::new();
    let progress = spawn_progress_logger(
        start_time,
        Arc::clone(&stats),
        LOGGING_INTERVAL,
        background.clone(),
    );

    let report = run_pool(
        verifier,
        &opt.verify_config(),
        candidates,
        tlds,
        opt.worker_count(),
        cancel,
    )
    .await;

    shutdown_gracefully(background, [progress]).await;

    let records: Vec<OutputRecord> = report
        .accepted
        .iter()
        .cloned()
        .map(OutputRecord::from)
        .collect();
    let found = write_results(&opt.outfile, &records)
        .await
        .map_err(ScanError::Output)?;

    let elapsed = start_time.elapsed();
    log_statistics(&report, &stats, elapsed);
    info!("Wrote {} records to {}", found, opt.outfile.display());

    Ok(ScanReport {
        found,
        hostnames: report.hostnames,
        skipped: report.skipped,
        outfile: opt.outfile.clone(),
        elapsed_seconds: elapsed.as_secs_f64(),
        canceled: report.canceled,
    })
}
