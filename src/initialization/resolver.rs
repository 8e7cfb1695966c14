//! DNS resolver initialization.

use std::sync::Arc;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::config::{VerifyConfig, DNS_RESOLVER_ATTEMPTS};
use crate::dns::HickoryLookup;

/// Initializes the DNS resolver for candidate lookups.
///
/// Uses the default upstream configuration with the per-query timeout taken
/// from `cfg.dns_timeout`, a single attempt, and `ndots = 0` so that no search
/// domain is ever appended to a candidate.
///
/// The DNS stage deadline is enforced separately by the verifier; these
/// options only keep the resolver from retrying past it.
pub fn init_resolver(cfg: &VerifyConfig) -> HickoryLookup {
    let cfg = cfg.normalized();

    let mut opts = ResolverOpts::default();
    opts.timeout = cfg.dns_timeout;
    opts.attempts = DNS_RESOLVER_ATTEMPTS;
    opts.ndots = 0;

    // hickory-resolver 0.24: construction is infallible
    HickoryLookup::new(Arc::new(TokioAsyncResolver::tokio(
        ResolverConfig::default(),
        opts,
    )))
}
