//! Error type definitions.
//!
//! This module defines the error enums returned by the library and the
//! counter categories tracked while verifying candidates.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::verify::Interrupted;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error building the TLS client configuration.
    #[error("TLS configuration error: {0}")]
    TlsConfigError(#[from] rustls::Error),
}

/// Errors that abort a whole run.
#[derive(Error, Debug)]
pub enum ScanError {
    /// `--domain` is empty or cannot be encoded.
    #[error("invalid base domain: {0}")]
    InvalidDomain(#[source] VerifyError),

    /// The candidate input could not be read.
    #[error("failed to read candidates: {0:#}")]
    Candidates(anyhow::Error),

    /// A shared resource could not be set up.
    #[error(transparent)]
    Initialization(#[from] InitializationError),

    /// The results file could not be written.
    #[error("failed to write results: {0:#}")]
    Output(anyhow::Error),
}

impl ScanError {
    /// Process exit code for this failure: 2 for bad input, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            ScanError::InvalidDomain(_) | ScanError::Candidates(_) => 2,
            ScanError::Initialization(_) | ScanError::Output(_) => 1,
        }
    }
}

/// Errors that abort the verification of a single hostname.
///
/// None of these stop the worker pool; the hostname is skipped and counted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// Input was empty after trimming whitespace and a trailing dot.
    #[error("invalid domain: empty hostname")]
    InvalidDomain,

    /// IDNA conversion rejected the input.
    #[error("failed to encode {domain:?} as ASCII: {reason}")]
    EncodingError {
        /// The trimmed input
        domain: String,
        /// Reason reported by the IDNA converter
        reason: String,
    },

    /// The DNS stage ran out of time or the umbrella context was canceled.
    #[error("DNS stage for {domain} interrupted: {cause}")]
    DnsInterrupted {
        /// ASCII hostname being resolved
        domain: String,
        /// Whether the deadline passed or the run was canceled
        cause: Interrupted,
    },

    /// The umbrella context was canceled while the TLS or HTTP stage ran.
    #[error("{stage} stage for {domain} canceled")]
    StageCanceled {
        /// ASCII hostname being probed
        domain: String,
        /// Stage that was running
        stage: NetworkStage,
    },
}

/// Network probe stage following DNS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStage {
    Tls,
    Http,
}

impl std::fmt::Display for NetworkStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkStage::Tls => f.write_str("TLS"),
            NetworkStage::Http => f.write_str("HTTP"),
        }
    }
}

impl VerifyError {
    /// Counter category for this error.
    pub fn error_type(&self) -> ErrorType {
        match self {
            VerifyError::InvalidDomain => ErrorType::InvalidDomain,
            VerifyError::EncodingError { .. } => ErrorType::EncodingError,
            VerifyError::DnsInterrupted {
                cause: Interrupted::DeadlineExceeded,
                ..
            } => ErrorType::DnsContextTimeout,
            VerifyError::DnsInterrupted {
                cause: Interrupted::Canceled,
                ..
            } => ErrorType::DnsContextCanceled,
            VerifyError::StageCanceled { .. } => ErrorType::StageCanceled,
        }
    }
}

/// Failure categories observed while verifying candidates.
///
/// Fatal categories (normalization, DNS context, canceled probes) cause the hostname to be
/// skipped; the others are recorded in the result and verification continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Normalization errors
    InvalidDomain,
    EncodingError,
    // DNS errors
    DnsLookupFailure,
    DnsContextTimeout,
    DnsContextCanceled,
    // TLS or HTTP stage interrupted by cancellation
    StageCanceled,
    // TLS errors
    TlsUnreachable,
    TlsHandshakeFailure,
    // HTTP errors
    HttpTransportFailure,
    RedirectLimitExceeded,
}

/// Informational metrics tracked during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// HTTPS attempt failed and the plain HTTP attempt was made
    HttpFallback,
    /// One redirect hop followed
    HttpRedirect,
    /// Verification completed (accepted or not)
    Verified,
    /// Record passed the triage filter
    Accepted,
    /// Record dropped by the triage filter (no address, CNAME or MX)
    Filtered,
}

impl ErrorType {
    /// Returns a human-readable label for the error type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::InvalidDomain => "Invalid domain",
            ErrorType::EncodingError => "IDNA encoding error",
            ErrorType::DnsLookupFailure => "DNS lookup failure",
            ErrorType::DnsContextTimeout => "DNS stage timeout",
            ErrorType::DnsContextCanceled => "DNS stage canceled",
            ErrorType::StageCanceled => "TLS/HTTP stage canceled",
            ErrorType::TlsUnreachable => "TLS unreachable",
            ErrorType::TlsHandshakeFailure => "TLS handshake failure",
            ErrorType::HttpTransportFailure => "HTTP transport failure",
            ErrorType::RedirectLimitExceeded => "Redirect limit exceeded",
        }
    }

    /// True when the error makes the pool skip the hostname.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ErrorType::InvalidDomain
                | ErrorType::EncodingError
                | ErrorType::DnsContextTimeout
                | ErrorType::DnsContextCanceled
                | ErrorType::StageCanceled
        )
    }
}

impl InfoType {
    /// Returns a human-readable label for the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::HttpFallback => "HTTPS to HTTP fallback",
            InfoType::HttpRedirect => "HTTP redirect",
            InfoType::Verified => "Verified",
            InfoType::Accepted => "Accepted",
            InfoType::Filtered => "Filtered (no signal)",
        }
    }
}
