//! squat_verify library: liveness verification for typosquat candidates
//!
//! This library probes candidate hostnames (e.g. the output of a typosquat
//! permutation generator) and collects evidence that they are in use: DNS
//! records, TLS certificate metadata and HTTP HEAD responses with their
//! redirect chains.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use squat_verify::dns::StaticLookup;
//! use squat_verify::initialization::{init_probe_client, init_tls_connector};
//! use squat_verify::{run_pool, ProcessingStats, Verifier, VerifyConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = StaticLookup::new().with_ip("exampel.com", "192.0.2.1".parse()?);
//! let verifier = Arc::new(Verifier::new(
//!     Arc::new(resolver),
//!     init_tls_connector()?,
//!     init_probe_client()?,
//!     Arc::new(ProcessingStats::new()),
//! ));
//!
//! let report = run_pool(
//!     verifier,
//!     &VerifyConfig::default(),
//!     vec!["exampel".to_string()],
//!     vec!["com".to_string(), "net".to_string()],
//!     8,
//!     CancellationToken::new(),
//! )
//! .await;
//! println!("{} live candidates", report.accepted.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod app;
pub mod config;
pub mod dns;
pub mod domain;
pub mod error_handling;
pub mod export;
pub mod fetch;
pub mod initialization;
pub mod run;
pub mod tls;
pub mod verify;

// Re-export public API
pub use config::{LogFormat, LogLevel, Opt, VerifyConfig};
pub use error_handling::{ErrorType, InfoType, ProcessingStats, ScanError, VerifyError};
pub use run::{run_pool, run_scan, run_scan_with_verifier, PoolReport, ScanReport};
pub use verify::{Probe, ProbeContext, Verification, Verifier};
