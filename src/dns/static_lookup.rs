//! In-memory [`RecordLookup`] for offline runs and tests.

use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;

use super::records::RecordLookup;
use super::types::{DnsLookupError, RecordKind};

/// Simulated failure for one record type of one host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaticFailure {
    Timeout,
    Resolver(String),
}

#[derive(Debug, Clone, Default)]
struct StaticZone {
    ips: Vec<IpAddr>,
    cname: Option<String>,
    mx: Vec<(u16, String)>,
    ns: Vec<String>,
    failures: HashMap<RecordKind, StaticFailure>,
}

/// Fixed answers keyed by hostname (case-insensitive).
///
/// Unknown hosts and empty record sets answer `NotFound`, mirroring a real
/// resolver's NXDOMAIN / NODATA behaviour.
///
/// ```
/// use squat_verify::dns::StaticLookup;
///
/// let resolver = StaticLookup::new()
///     .with_ip("example.test", "192.0.2.10".parse().unwrap())
///     .with_mx("example.test", 10, "mx1.example.test.");
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticLookup {
    zones: HashMap<String, StaticZone>,
    delay: Option<Duration>,
}

impl StaticLookup {
    pub fn new() -> Self {
        Self::default()
    }

    fn zone(&mut self, host: &str) -> &mut StaticZone {
        self.zones.entry(host.to_ascii_lowercase()).or_default()
    }

    pub fn with_ip(mut self, host: &str, ip: IpAddr) -> Self {
        self.zone(host).ips.push(ip);
        self
    }

    pub fn with_cname(mut self, host: &str, target: &str) -> Self {
        self.zone(host).cname = Some(target.to_string());
        self
    }

    pub fn with_mx(mut self, host: &str, preference: u16, exchange: &str) -> Self {
        self.zone(host).mx.push((preference, exchange.to_string()));
        self
    }

    pub fn with_ns(mut self, host: &str, nameserver: &str) -> Self {
        self.zone(host).ns.push(nameserver.to_string());
        self
    }

    /// Makes every `kind` lookup for `host` fail with `failure`.
    pub fn with_failure(mut self, host: &str, kind: RecordKind, failure: StaticFailure) -> Self {
        self.zone(host).failures.insert(kind, failure);
        self
    }

    /// Delays every answer, to exercise stage deadlines.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn answer<T, F>(&self, host: &str, kind: RecordKind, pick: F) -> Result<T, DnsLookupError>
    where
        F: FnOnce(&StaticZone) -> Option<T>,
    {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let not_found = || DnsLookupError::NotFound {
            record: kind,
            host: host.to_string(),
        };
        let zone = self
            .zones
            .get(&host.to_ascii_lowercase())
            .ok_or_else(not_found)?;
        match zone.failures.get(&kind) {
            Some(StaticFailure::Timeout) => Err(DnsLookupError::Timeout {
                record: kind,
                host: host.to_string(),
            }),
            Some(StaticFailure::Resolver(message)) => Err(DnsLookupError::Resolver {
                record: kind,
                host: host.to_string(),
                message: message.clone(),
            }),
            None => pick(zone).ok_or_else(not_found),
        }
    }
}

fn non_empty<T: Clone>(values: &[T]) -> Option<Vec<T>> {
    (!values.is_empty()).then(|| values.to_vec())
}

#[async_trait]
impl RecordLookup for StaticLookup {
    async fn lookup_ips(&self, host: &str) -> Result<Vec<IpAddr>, DnsLookupError> {
        self.answer(host, RecordKind::Address, |zone| non_empty(&zone.ips))
            .await
    }

    async fn lookup_cname(&self, host: &str) -> Result<Option<String>, DnsLookupError> {
        self.answer(host, RecordKind::Cname, |zone| {
            zone.cname.clone().map(Some)
        })
        .await
    }

    async fn lookup_mx(&self, host: &str) -> Result<Vec<(u16, String)>, DnsLookupError> {
        self.answer(host, RecordKind::Mx, |zone| non_empty(&zone.mx))
            .await
    }

    async fn lookup_ns(&self, host: &str) -> Result<Vec<String>, DnsLookupError> {
        self.answer(host, RecordKind::Ns, |zone| non_empty(&zone.ns))
            .await
    }
}
