//! JSON array export.
//!
//! Key names follow the established results format consumed by the static
//! site: lower-case top-level keys, capitalized keys inside the DNS, TLS and
//! HTTP objects. `tls` and `http` are absent when the probe did not run.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::dns::DnsResult;
use crate::fetch::HttpResult;
use crate::tls::TlsResult;
use crate::verify::{Probe, Verification};

/// One accepted hostname as written to the results file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// ASCII form of the hostname
    pub domain: String,
    pub resolvable: bool,
    pub has_mail: bool,
    pub dns: DnsResult,
    #[serde(default, skip_serializing_if = "Probe::is_not_attempted")]
    pub tls: Probe<TlsResult>,
    #[serde(default, skip_serializing_if = "Probe::is_not_attempted")]
    pub http: Probe<HttpResult>,
}

impl From<Verification> for OutputRecord {
    fn from(v: Verification) -> Self {
        Self {
            domain: v.ascii,
            resolvable: v.resolvable,
            has_mail: v.has_mail,
            dns: v.dns,
            tls: v.tls,
            http: v.http,
        }
    }
}

/// Writes `records` to `path` as one JSON array, creating parent directories.
///
/// An empty slice produces `[]`. Returns the number of records written.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or written.
pub async fn write_results(path: &Path, records: &[OutputRecord]) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    let mut encoded =
        serde_json::to_vec(records).context("Failed to serialize verification results")?;
    encoded.push(b'\n');

    tokio::fs::write(path, encoded)
        .await
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;

    Ok(records.len())
}

/// Reads a results file written by [`write_results`].
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a results array.
pub async fn read_results(path: &Path) -> Result<Vec<OutputRecord>> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read results file: {}", path.display()))?;
    serde_json::from_slice(&data)
        .with_context(|| format!("Failed to parse results file: {}", path.display()))
}
