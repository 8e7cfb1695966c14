//! DNS stage: all record types for one hostname.

use std::future::Future;
use std::net::IpAddr;

use log::debug;

use super::records::RecordLookup;
use super::types::{DnsLookupError, DnsResult, RecordKind};
use crate::verify::ProbeContext;

/// Looks up address, CNAME, MX and NS records for `host` under `ctx`.
///
/// The four lookups run concurrently and fail independently. If any of them
/// returned data the call succeeds, even when others failed. If none did, the
/// error of the highest-priority failed lookup is returned (address, CNAME,
/// MX, NS), or `DnsLookupError::NoRecords` when every lookup came back empty.
///
/// Stored values are normalized: trailing dots stripped, IPv4-mapped IPv6
/// answers reported as IPv4, MX hosts ordered by preference, and a CNAME equal
/// to `host` (ignoring case) dropped.
///
/// # Errors
///
/// See above. A `DnsLookupError::Interrupted` here means the stage context
/// ran out or was canceled before any lookup produced data.
pub async fn lookup_dns(
    resolver: &dyn RecordLookup,
    host: &str,
    ctx: &ProbeContext,
) -> Result<DnsResult, DnsLookupError> {
    let (ips, cname, mx, ns) = tokio::join!(
        bounded(ctx, RecordKind::Address, host, resolver.lookup_ips(host)),
        bounded(ctx, RecordKind::Cname, host, resolver.lookup_cname(host)),
        bounded(ctx, RecordKind::Mx, host, resolver.lookup_mx(host)),
        bounded(ctx, RecordKind::Ns, host, resolver.lookup_ns(host)),
    );

    let (a, aaaa) = match &ips {
        Ok(ips) => split_addresses(ips),
        Err(_) => (Vec::new(), Vec::new()),
    };
    let canonical = match &cname {
        Ok(Some(target)) => non_trivial_cname(host, target),
        _ => None,
    };
    let exchanges = match &mx {
        Ok(records) => sorted_exchanges(records),
        Err(_) => Vec::new(),
    };
    let nameservers = match &ns {
        Ok(records) => records.iter().map(|n| strip_root(n).to_string()).collect(),
        Err(_) => Vec::new(),
    };

    for error in [ips.as_ref().err(), cname.as_ref().err(), mx.as_ref().err(), ns.as_ref().err()]
        .into_iter()
        .flatten()
    {
        debug!("{error}");
    }

    let result = DnsResult::new(a, aaaa, canonical, exchanges, nameservers);
    if !result.is_empty() {
        return Ok(result);
    }

    let first_error = ips
        .err()
        .or_else(|| cname.err())
        .or_else(|| mx.err())
        .or_else(|| ns.err());
    Err(first_error.unwrap_or_else(|| DnsLookupError::NoRecords {
        host: host.to_string(),
    }))
}

/// Runs one lookup under the stage context, folding interruption into the
/// lookup's own error type.
async fn bounded<T, F>(
    ctx: &ProbeContext,
    record: RecordKind,
    host: &str,
    lookup: F,
) -> Result<T, DnsLookupError>
where
    F: Future<Output = Result<T, DnsLookupError>>,
{
    ctx.run(lookup)
        .await
        .map_err(|cause| DnsLookupError::Interrupted {
            record,
            host: host.to_string(),
            cause,
        })?
}

/// Splits answers into (IPv4, IPv6) string lists.
///
/// An IPv6 answer that embeds an IPv4 address (`::ffff:a.b.c.d`) counts as IPv4.
fn split_addresses(ips: &[IpAddr]) -> (Vec<String>, Vec<String>) {
    let mut v4 = Vec::new();
    let mut v6 = Vec::new();
    for ip in ips {
        match ip {
            IpAddr::V4(addr) => v4.push(addr.to_string()),
            IpAddr::V6(addr) => match addr.to_ipv4_mapped() {
                Some(mapped) => v4.push(mapped.to_string()),
                None => v6.push(addr.to_string()),
            },
        }
    }
    (v4, v6)
}

fn non_trivial_cname(host: &str, target: &str) -> Option<String> {
    let target = strip_root(target);
    if target.is_empty() || target.eq_ignore_ascii_case(strip_root(host)) {
        None
    } else {
        Some(target.to_string())
    }
}

fn sorted_exchanges(records: &[(u16, String)]) -> Vec<String> {
    let mut records = records.to_vec();
    // Stable: equal preferences keep resolver order
    records.sort_by_key(|(preference, _)| *preference);
    records
        .into_iter()
        .map(|(_, exchange)| strip_root(&exchange).to_string())
        .collect()
}

fn strip_root(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}
