//! DNS module tests.

use super::*;
use crate::verify::{Interrupted, ProbeContext};
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn ctx() -> ProbeContext {
    ProbeContext::background().with_timeout(Duration::from_secs(2))
}

/// Creates a test DNS resolver with short timeouts for faster test execution.
fn create_test_resolver() -> HickoryLookup {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(5);
    opts.attempts = 1;
    opts.ndots = 0;

    HickoryLookup::new(Arc::new(hickory_resolver::TokioAsyncResolver::tokio(
        ResolverConfig::default(),
        opts,
    )))
}

#[tokio::test]
async fn test_full_record_set() {
    let resolver = StaticLookup::new()
        .with_ip("shop.test", "192.0.2.1".parse().unwrap())
        .with_ip("shop.test", "2001:db8::1".parse().unwrap())
        .with_cname("shop.test", "edge.cdn.test.")
        .with_mx("shop.test", 20, "mx2.shop.test.")
        .with_mx("shop.test", 10, "mx1.shop.test.")
        .with_ns("shop.test", "ns1.dns.test.");

    let result = lookup_dns(&resolver, "shop.test", &ctx()).await.unwrap();

    assert!(result.has_a() && result.has_aaaa() && result.has_cname());
    assert!(result.has_mx() && result.has_ns());
    assert_eq!(result.a(), ["192.0.2.1"]);
    assert_eq!(result.aaaa(), ["2001:db8::1"]);
    assert_eq!(result.cname(), "edge.cdn.test");
    assert_eq!(result.mx(), ["mx1.shop.test", "mx2.shop.test"]);
    assert_eq!(result.ns(), ["ns1.dns.test"]);
    assert!(result.is_resolvable());
}

#[tokio::test]
async fn test_unknown_host_reports_address_not_found() {
    let resolver = StaticLookup::new();
    let err = lookup_dns(&resolver, "nothing.test", &ctx())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DnsLookupError::NotFound {
            record: RecordKind::Address,
            host: "nothing.test".to_string(),
        }
    );
}

#[tokio::test]
async fn test_mail_only_domain_is_not_resolvable() {
    let resolver = StaticLookup::new().with_mx("mail.test", 5, "inbound.mail.test.");
    let result = lookup_dns(&resolver, "mail.test", &ctx()).await.unwrap();
    assert!(result.has_mx());
    assert!(!result.is_resolvable());
    assert!(result.a().is_empty());
    assert!(!result.has_a());
}

#[tokio::test]
async fn test_self_referencing_cname_is_dropped() {
    let resolver = StaticLookup::new()
        .with_ip("Alias.test", "192.0.2.7".parse().unwrap())
        .with_cname("alias.test", "ALIAS.test.");
    let result = lookup_dns(&resolver, "alias.test", &ctx()).await.unwrap();
    assert!(!result.has_cname());
    assert_eq!(result.cname(), "");
}

#[tokio::test]
async fn test_ipv4_mapped_answers_count_as_ipv4() {
    let resolver = StaticLookup::new().with_ip("mapped.test", "::ffff:198.51.100.4".parse().unwrap());
    let result = lookup_dns(&resolver, "mapped.test", &ctx()).await.unwrap();
    assert_eq!(result.a(), ["198.51.100.4"]);
    assert!(!result.has_aaaa());
}

#[tokio::test]
async fn test_mx_equal_preference_keeps_resolver_order() {
    let resolver = StaticLookup::new()
        .with_mx("ties.test", 10, "b.ties.test")
        .with_mx("ties.test", 10, "a.ties.test")
        .with_mx("ties.test", 0, "z.ties.test");
    let result = lookup_dns(&resolver, "ties.test", &ctx()).await.unwrap();
    assert_eq!(result.mx(), ["z.ties.test", "b.ties.test", "a.ties.test"]);
}

#[tokio::test]
async fn test_partial_failure_still_succeeds() {
    let resolver = StaticLookup::new()
        .with_ns("flaky.test", "ns.flaky.test.")
        .with_failure("flaky.test", RecordKind::Address, StaticFailure::Timeout)
        .with_failure(
            "flaky.test",
            RecordKind::Mx,
            StaticFailure::Resolver("SERVFAIL".to_string()),
        );
    let result = lookup_dns(&resolver, "flaky.test", &ctx()).await.unwrap();
    assert!(result.has_ns());
    assert!(!result.is_resolvable());
}

#[tokio::test]
async fn test_error_priority_when_everything_fails() {
    let resolver = StaticLookup::new()
        .with_failure(
            "broken.test",
            RecordKind::Mx,
            StaticFailure::Resolver("refused".to_string()),
        )
        .with_failure("broken.test", RecordKind::Cname, StaticFailure::Timeout);

    // Address lookup answers NotFound and outranks the others.
    let err = lookup_dns(&resolver, "broken.test", &ctx())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DnsLookupError::NotFound {
            record: RecordKind::Address,
            ..
        }
    ));

    let resolver = resolver.with_failure(
        "broken.test",
        RecordKind::Address,
        StaticFailure::Resolver("network unreachable".to_string()),
    );
    let err = lookup_dns(&resolver, "broken.test", &ctx())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("network unreachable"));
}

#[tokio::test]
async fn test_deadline_interrupts_lookups() {
    let resolver = StaticLookup::new()
        .with_ip("slow.test", "192.0.2.9".parse().unwrap())
        .with_delay(Duration::from_secs(5));
    let ctx = ProbeContext::background().with_timeout(Duration::from_millis(20));

    let err = lookup_dns(&resolver, "slow.test", &ctx).await.unwrap_err();
    assert_eq!(err.interrupted(), Some(Interrupted::DeadlineExceeded));
}

#[tokio::test]
async fn test_cancellation_interrupts_lookups() {
    let token = CancellationToken::new();
    token.cancel();
    let resolver = StaticLookup::new().with_ip("gone.test", "192.0.2.9".parse().unwrap());
    let ctx = ProbeContext::new(token).with_timeout(Duration::from_secs(5));

    let err = lookup_dns(&resolver, "gone.test", &ctx).await.unwrap_err();
    assert_eq!(err.interrupted(), Some(Interrupted::Canceled));
}

#[test]
fn test_non_interrupt_errors_have_no_cause() {
    let err = DnsLookupError::NoRecords {
        host: "x.test".to_string(),
    };
    assert_eq!(err.interrupted(), None);
    assert_eq!(err.to_string(), "no DNS records found for x.test");
}

#[test]
fn test_result_serializes_with_record_keys() {
    let result = DnsResult::new(
        vec!["192.0.2.1".to_string()],
        vec![],
        None,
        vec!["mx.test".to_string()],
        vec![],
    );
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["HasA"], true);
    assert_eq!(json["HasAAAA"], false);
    assert_eq!(json["CNAME"], "");
    assert_eq!(json["MX"][0], "mx.test");
    assert!(json["NS"].as_array().unwrap().is_empty());
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_hickory_lookup_live_domain() {
    let resolver = create_test_resolver();
    let result = lookup_dns(&resolver, "google.com", &ctx()).await.unwrap();
    assert!(result.is_resolvable());
    assert!(result.has_mx());
    assert!(result.has_ns());
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_hickory_lookup_nonexistent_domain() {
    let resolver = create_test_resolver();
    let err = lookup_dns(&resolver, "definitely-does-not-exist-12345.invalid", &ctx())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DnsLookupError::NotFound { .. } | DnsLookupError::Resolver { .. }
    ));
}

/// Answers every query with an empty record set and no error.
struct EmptyLookup {
    cname: Option<String>,
}

#[async_trait::async_trait]
impl RecordLookup for EmptyLookup {
    async fn lookup_ips(&self, _host: &str) -> Result<Vec<std::net::IpAddr>, DnsLookupError> {
        Ok(Vec::new())
    }

    async fn lookup_cname(&self, _host: &str) -> Result<Option<String>, DnsLookupError> {
        Ok(self.cname.clone())
    }

    async fn lookup_mx(&self, _host: &str) -> Result<Vec<(u16, String)>, DnsLookupError> {
        Ok(Vec::new())
    }

    async fn lookup_ns(&self, _host: &str) -> Result<Vec<String>, DnsLookupError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_all_empty_answers_are_no_records() {
    let resolver = EmptyLookup { cname: None };

    let err = lookup_dns(&resolver, "quiet.test", &ctx()).await.unwrap_err();

    assert_eq!(
        err,
        DnsLookupError::NoRecords {
            host: "quiet.test".to_string()
        }
    );
    assert_eq!(err.interrupted(), None);

    let empty = DnsResult::new(Vec::new(), Vec::new(), None, Vec::new(), Vec::new());
    assert_eq!(empty, DnsResult::default());
    assert!(empty.is_empty());
    assert!(!empty.is_resolvable());
}

#[tokio::test]
async fn test_self_cname_alone_is_no_records() {
    let resolver = EmptyLookup {
        cname: Some("Quiet.Test.".to_string()),
    };

    let err = lookup_dns(&resolver, "quiet.test", &ctx()).await.unwrap_err();

    assert!(matches!(err, DnsLookupError::NoRecords { .. }));
}
