//! Resolver capability and its hickory-backed implementation.
//!
//! The verifier never touches a global resolver: it receives something that
//! implements [`RecordLookup`], which makes the DNS stage substitutable in tests.

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;

use super::types::{DnsLookupError, RecordKind};

/// Per-record-type DNS queries for one hostname.
///
/// Implementations return raw answers; trailing-dot stripping, CNAME
/// self-reference suppression and MX ordering happen in `lookup_dns`.
#[async_trait]
pub trait RecordLookup: Send + Sync {
    /// A and AAAA answers combined.
    async fn lookup_ips(&self, host: &str) -> Result<Vec<IpAddr>, DnsLookupError>;

    /// Canonical name, `None` when the host is not an alias.
    async fn lookup_cname(&self, host: &str) -> Result<Option<String>, DnsLookupError>;

    /// (preference, exchange) pairs.
    async fn lookup_mx(&self, host: &str) -> Result<Vec<(u16, String)>, DnsLookupError>;

    /// Nameserver hostnames.
    async fn lookup_ns(&self, host: &str) -> Result<Vec<String>, DnsLookupError>;
}

/// [`RecordLookup`] backed by a shared `hickory-resolver` instance.
#[derive(Clone)]
pub struct HickoryLookup {
    resolver: Arc<TokioAsyncResolver>,
}

impl HickoryLookup {
    pub fn new(resolver: Arc<TokioAsyncResolver>) -> Self {
        Self { resolver }
    }

    async fn lookup_rdata(
        &self,
        host: &str,
        record_type: RecordType,
        kind: RecordKind,
    ) -> Result<Vec<RData>, DnsLookupError> {
        match self.resolver.lookup(host, record_type).await {
            Ok(lookup) => Ok(lookup.iter().cloned().collect()),
            Err(e) => Err(classify(kind, host, &e)),
        }
    }
}

#[async_trait]
impl RecordLookup for HickoryLookup {
    async fn lookup_ips(&self, host: &str) -> Result<Vec<IpAddr>, DnsLookupError> {
        match self.resolver.lookup_ip(host).await {
            Ok(response) => Ok(response.iter().collect()),
            Err(e) => Err(classify(RecordKind::Address, host, &e)),
        }
    }

    async fn lookup_cname(&self, host: &str) -> Result<Option<String>, DnsLookupError> {
        let records = self
            .lookup_rdata(host, RecordType::CNAME, RecordKind::Cname)
            .await?;
        Ok(records.into_iter().find_map(|rdata| match rdata {
            RData::CNAME(cname) => Some(cname.0.to_utf8()),
            _ => None,
        }))
    }

    async fn lookup_mx(&self, host: &str) -> Result<Vec<(u16, String)>, DnsLookupError> {
        let records = self
            .lookup_rdata(host, RecordType::MX, RecordKind::Mx)
            .await?;
        Ok(records
            .into_iter()
            .filter_map(|rdata| match rdata {
                RData::MX(mx) => Some((mx.preference(), mx.exchange().to_utf8())),
                _ => None,
            })
            .collect())
    }

    async fn lookup_ns(&self, host: &str) -> Result<Vec<String>, DnsLookupError> {
        let records = self
            .lookup_rdata(host, RecordType::NS, RecordKind::Ns)
            .await?;
        Ok(records
            .into_iter()
            .filter_map(|rdata| match rdata {
                RData::NS(ns) => Some(ns.0.to_utf8()),
                _ => None,
            })
            .collect())
    }
}

/// Maps a hickory error onto the lookup error taxonomy.
fn classify(record: RecordKind, host: &str, error: &ResolveError) -> DnsLookupError {
    let host = host.to_string();
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { .. } => DnsLookupError::NotFound { record, host },
        ResolveErrorKind::Timeout => DnsLookupError::Timeout { record, host },
        _ => DnsLookupError::Resolver {
            record,
            host,
            message: error.to_string(),
        },
    }
}
