//! Per-hostname verification pipeline.

use std::sync::Arc;

use log::debug;
use tokio_rustls::TlsConnector;

use super::context::ProbeContext;
use super::types::{Probe, Verification};
use crate::config::VerifyConfig;
use crate::dns::{lookup_dns, DnsResult, RecordLookup};
use crate::domain::normalize_hostname;
use crate::error_handling::{ErrorType, InfoType, NetworkStage, ProcessingStats, VerifyError};
use crate::fetch::probe_http;
use crate::tls::probe_tls;

/// Shared handles needed to verify hostnames.
///
/// Cheap to share behind an `Arc`: every field is immutable after
/// construction and internally synchronized.
pub struct Verifier {
    resolver: Arc<dyn RecordLookup>,
    connector: TlsConnector,
    client: reqwest::Client,
    stats: Arc<ProcessingStats>,
}

impl Verifier {
    pub fn new(
        resolver: Arc<dyn RecordLookup>,
        connector: TlsConnector,
        client: reqwest::Client,
        stats: Arc<ProcessingStats>,
    ) -> Self {
        Self {
            resolver,
            connector,
            client,
            stats,
        }
    }

    /// Counters updated by every verification.
    pub fn stats(&self) -> &Arc<ProcessingStats> {
        &self.stats
    }

    /// Verifies one hostname: normalize, DNS, then TLS and HTTP for
    /// resolvable hosts.
    ///
    /// Each stage runs under its own deadline derived from `ctx`, so a slow
    /// stage never eats into the next one while canceling `ctx` stops all of
    /// them. `cfg` is normalized into a local copy first.
    ///
    /// DNS failures other than an interrupted stage are not errors: they are
    /// counted as `DnsLookupFailure` and leave the DNS result empty. TLS and
    /// HTTP problems are reported inside their results.
    ///
    /// # Errors
    ///
    /// - `VerifyError::InvalidDomain` / `VerifyError::EncodingError` when the
    ///   hostname cannot be normalized
    /// - `VerifyError::DnsInterrupted` when the DNS stage deadline passed or
    ///   `ctx` was canceled before any record was found
    /// - `VerifyError::StageCanceled` when `ctx` was canceled during the TLS
    ///   or HTTP stage; no partial record is returned
    pub async fn verify_domain(
        &self,
        domain: &str,
        cfg: &VerifyConfig,
        ctx: &ProbeContext,
    ) -> Result<Verification, VerifyError> {
        let cfg = cfg.normalized();
        let ascii = normalize_hostname(domain)?;

        let dns_ctx = ctx.with_timeout(cfg.dns_timeout);
        let dns = match lookup_dns(self.resolver.as_ref(), &ascii, &dns_ctx).await {
            Ok(dns) => dns,
            Err(e) => {
                if let Some(cause) = e.interrupted() {
                    return Err(VerifyError::DnsInterrupted {
                        domain: ascii,
                        cause,
                    });
                }
                debug!("DNS lookup failed for {ascii}: {e}");
                self.stats.increment_error(ErrorType::DnsLookupFailure);
                DnsResult::default()
            }
        };

        let resolvable = dns.is_resolvable();
        let has_mail = dns.has_mx();

        let tls = if cfg.do_tls && resolvable {
            let tls_ctx = ctx.with_timeout(cfg.tls_timeout);
            let tls = probe_tls(&self.connector, &ascii, &tls_ctx, &self.stats).await;
            if ctx.is_canceled() {
                return Err(VerifyError::StageCanceled {
                    domain: ascii,
                    stage: NetworkStage::Tls,
                });
            }
            Probe::Attempted(tls)
        } else {
            Probe::NotAttempted
        };

        let http = if cfg.do_http && resolvable {
            let http_ctx = ctx.with_timeout(cfg.http_timeout);
            let http = probe_http(&self.client, &ascii, true, &http_ctx, &cfg, &self.stats).await;
            if ctx.is_canceled() {
                return Err(VerifyError::StageCanceled {
                    domain: ascii,
                    stage: NetworkStage::Http,
                });
            }
            Probe::Attempted(http)
        } else {
            Probe::NotAttempted
        };

        self.stats.increment_info(InfoType::Verified);

        Ok(Verification {
            domain: domain.to_string(),
            ascii,
            dns,
            tls,
            http,
            resolvable,
            has_mail,
        })
    }
}
