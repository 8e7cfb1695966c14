//! TLS certificate metadata probe.
//!
//! This module connects to port 443 of a hostname and records details of the
//! leaf certificate it presents:
//! - Certificate subject, issuer and common name
//! - Validity period (not before/after dates)
//! - Subject Alternative Names (DNS names only)
//! - Serial number
//!
//! Certificates are never validated (see [`AcceptAnyCertificate`]): a
//! typosquat serving an expired self-signed certificate is still reported as
//! connected. Uses `tokio-rustls` for async TLS connections and `x509-parser`
//! for certificate parsing.

mod extract;
mod verifier;

use chrono::{DateTime, Utc};
use log::debug;
use rustls::pki_types::ServerName;
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;

use crate::config::{TLS_HANDSHAKE_TIMEOUT, TLS_PORT};
use crate::error_handling::{ErrorType, ProcessingStats};
use crate::verify::{Interrupted, ProbeContext};

pub use verifier::{build_connector, AcceptAnyCertificate};

use extract::{parse_leaf, LeafCertificate};

/// Outcome of a TLS probe.
///
/// When `connected` is false every certificate field is empty; `server_name`
/// always carries the dialed hostname.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsResult {
    #[serde(rename = "Connected", default)]
    pub connected: bool,
    #[serde(rename = "ServerName", default)]
    pub server_name: String,
    #[serde(rename = "Issuer", default)]
    pub issuer: String,
    #[serde(rename = "Subject", default)]
    pub subject: String,
    #[serde(rename = "NotBefore", default)]
    pub not_before: Option<DateTime<Utc>>,
    #[serde(rename = "NotAfter", default)]
    pub not_after: Option<DateTime<Utc>>,
    #[serde(rename = "DNSNames", default)]
    pub dns_names: Vec<String>,
    #[serde(rename = "CommonName", default)]
    pub common_name: String,
    /// Decimal serial number
    #[serde(rename = "SerialNumber", default)]
    pub serial_number: String,
}

impl TlsResult {
    fn unconnected(host: &str) -> Self {
        Self {
            server_name: host.to_string(),
            ..Self::default()
        }
    }

    fn with_leaf(self, leaf: LeafCertificate) -> Self {
        Self {
            issuer: leaf.issuer,
            subject: leaf.subject,
            not_before: leaf.not_before,
            not_after: leaf.not_after,
            dns_names: leaf.dns_names,
            common_name: leaf.common_name,
            serial_number: leaf.serial_number,
            ..self
        }
    }
}

/// Probes `host:443` and records the leaf certificate.
///
/// See [`probe_tls_on_port`].
pub async fn probe_tls(
    connector: &TlsConnector,
    host: &str,
    ctx: &ProbeContext,
    stats: &ProcessingStats,
) -> TlsResult {
    probe_tls_on_port(connector, host, TLS_PORT, ctx, stats).await
}

/// Probes `host:port` and records the leaf certificate.
///
/// The TCP dial runs under `ctx`. The handshake gets its own fixed deadline
/// ([`TLS_HANDSHAKE_TIMEOUT`]) and only shares cancellation with `ctx`.
/// Failures never surface as errors: an unreachable host or a failed
/// handshake yields `connected == false` and is counted in `stats`. A probe
/// cut short by canceling `ctx` is not counted; callers check the context.
/// The connection is dropped before returning.
///
/// `host` is resolved by the system resolver when dialing, independently of
/// the `RecordLookup` used for the DNS stage.
pub async fn probe_tls_on_port(
    connector: &TlsConnector,
    host: &str,
    port: u16,
    ctx: &ProbeContext,
    stats: &ProcessingStats,
) -> TlsResult {
    let result = TlsResult::unconnected(host);

    let sock = match ctx.run(TcpStream::connect((host, port))).await {
        Ok(Ok(sock)) => sock,
        Ok(Err(e)) => {
            debug!("Failed to connect to {host}:{port} - {e}");
            stats.increment_error(ErrorType::TlsUnreachable);
            return result;
        }
        Err(cause) => {
            debug!("TCP connect to {host}:{port} interrupted: {cause}");
            if cause == Interrupted::DeadlineExceeded {
                stats.increment_error(ErrorType::TlsUnreachable);
            }
            return result;
        }
    };

    let server_name = match ServerName::try_from(host.to_string()) {
        Ok(name) => name,
        Err(e) => {
            debug!("Invalid TLS server name {host}: {e}");
            stats.increment_error(ErrorType::TlsHandshakeFailure);
            return result;
        }
    };

    let handshake_ctx = ctx.with_own_timeout(TLS_HANDSHAKE_TIMEOUT);
    let tls_stream = match handshake_ctx.run(connector.connect(server_name, sock)).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => {
            debug!("TLS handshake failed for {host}:{port} - {e}");
            stats.increment_error(ErrorType::TlsHandshakeFailure);
            return result;
        }
        Err(cause) => {
            debug!("TLS handshake for {host}:{port} interrupted: {cause}");
            if cause == Interrupted::DeadlineExceeded {
                stats.increment_error(ErrorType::TlsHandshakeFailure);
            }
            return result;
        }
    };

    let result = TlsResult {
        connected: true,
        ..result
    };
    let leaf = tls_stream
        .get_ref()
        .1
        .peer_certificates()
        .and_then(|certs| certs.first())
        .map(|cert| parse_leaf(cert.as_ref()));
    drop(tls_stream);

    match leaf {
        Some(Ok(leaf)) => result.with_leaf(leaf),
        Some(Err(e)) => {
            debug!("Failed to parse certificate of {host}: {e}");
            result
        }
        None => result,
    }
}

#[cfg(test)]
mod tests;
