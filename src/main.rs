//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `squat_verify` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Ctrl-C handling
//! - Exit codes and user-facing output
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;
use tokio_util::sync::CancellationToken;

use squat_verify::app::{shutdown_gracefully, spawn_interrupt_handler};
use squat_verify::initialization::{init_crypto_provider, init_logger_with};
use squat_verify::{run_scan, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    // Initialize crypto provider for TLS operations
    init_crypto_provider();

    let cancel = CancellationToken::new();
    let shutdown = CancellationToken::new();
    let interrupt = spawn_interrupt_handler(cancel.clone(), shutdown.clone());

    let result = run_scan(&opt, cancel).await;
    shutdown_gracefully(shutdown, [interrupt]).await;

    match result {
        Ok(report) => {
            println!(
                "Found {} live candidate{} out of {} hostname{} ({} skipped) in {:.1}s{}",
                report.found,
                if report.found == 1 { "" } else { "s" },
                report.hostnames,
                if report.hostnames == 1 { "" } else { "s" },
                report.skipped,
                report.elapsed_seconds,
                if report.canceled { ", interrupted" } else { "" }
            );
            println!("Results saved in {}", report.outfile.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("squat_verify error: {e}");
            process::exit(e.exit_code());
        }
    }
}
