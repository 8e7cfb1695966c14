//! DNS result and error types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::verify::Interrupted;

/// Records found for one hostname.
///
/// Presence flags are derived from the values in [`DnsResult::new`], so a
/// flag is true exactly when its value is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsResult {
    #[serde(rename = "HasA", default)]
    has_a: bool,
    #[serde(rename = "HasAAAA", default)]
    has_aaaa: bool,
    #[serde(rename = "HasCNAME", default)]
    has_cname: bool,
    #[serde(rename = "HasMX", default)]
    has_mx: bool,
    #[serde(rename = "HasNS", default)]
    has_ns: bool,

    #[serde(rename = "A", default)]
    a: Vec<String>,
    #[serde(rename = "AAAA", default)]
    aaaa: Vec<String>,
    #[serde(rename = "CNAME", default)]
    cname: String,
    #[serde(rename = "MX", default)]
    mx: Vec<String>,
    #[serde(rename = "NS", default)]
    ns: Vec<String>,
}

impl DnsResult {
    /// Builds a result, setting every presence flag from its value.
    pub fn new(
        a: Vec<String>,
        aaaa: Vec<String>,
        cname: Option<String>,
        mx: Vec<String>,
        ns: Vec<String>,
    ) -> Self {
        let cname = cname.unwrap_or_default();
        Self {
            has_a: !a.is_empty(),
            has_aaaa: !aaaa.is_empty(),
            has_cname: !cname.is_empty(),
            has_mx: !mx.is_empty(),
            has_ns: !ns.is_empty(),
            a,
            aaaa,
            cname,
            mx,
            ns,
        }
    }

    pub fn has_a(&self) -> bool {
        self.has_a
    }

    pub fn has_aaaa(&self) -> bool {
        self.has_aaaa
    }

    pub fn has_cname(&self) -> bool {
        self.has_cname
    }

    pub fn has_mx(&self) -> bool {
        self.has_mx
    }

    pub fn has_ns(&self) -> bool {
        self.has_ns
    }

    /// IPv4 addresses (including IPv4-mapped IPv6 answers)
    pub fn a(&self) -> &[String] {
        &self.a
    }

    pub fn aaaa(&self) -> &[String] {
        &self.aaaa
    }

    /// Canonical name, empty when absent or equal to the queried name
    pub fn cname(&self) -> &str {
        &self.cname
    }

    /// Mail exchangers, lowest preference first
    pub fn mx(&self) -> &[String] {
        &self.mx
    }

    pub fn ns(&self) -> &[String] {
        &self.ns
    }

    /// Has at least one A, AAAA or CNAME record.
    pub fn is_resolvable(&self) -> bool {
        self.has_a || self.has_aaaa || self.has_cname
    }

    /// No record type returned data.
    pub fn is_empty(&self) -> bool {
        !self.is_resolvable() && !self.has_mx && !self.has_ns
    }
}

/// Kind of lookup, in error-priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Combined A/AAAA lookup
    Address,
    Cname,
    Mx,
    Ns,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Address => "A/AAAA",
            RecordKind::Cname => "CNAME",
            RecordKind::Mx => "MX",
            RecordKind::Ns => "NS",
        };
        f.write_str(name)
    }
}

/// Failure of one DNS lookup, or of the whole DNS stage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnsLookupError {
    /// NXDOMAIN or no records of this type.
    #[error("no {record} records found for {host}")]
    NotFound { record: RecordKind, host: String },

    /// The resolver gave up waiting for an answer.
    #[error("{record} lookup for {host} timed out")]
    Timeout { record: RecordKind, host: String },

    /// Any other resolver failure.
    #[error("{record} lookup for {host} failed: {message}")]
    Resolver {
        record: RecordKind,
        host: String,
        message: String,
    },

    /// The stage context expired or was canceled mid-lookup.
    #[error("{record} lookup for {host} interrupted: {cause}")]
    Interrupted {
        record: RecordKind,
        host: String,
        cause: Interrupted,
    },

    /// Every lookup succeeded but none returned data.
    #[error("no DNS records found for {host}")]
    NoRecords { host: String },
}

impl DnsLookupError {
    /// The context interruption behind this error, if any.
    pub fn interrupted(&self) -> Option<Interrupted> {
        match self {
            DnsLookupError::Interrupted { cause, .. } => Some(*cause),
            _ => None,
        }
    }
}
