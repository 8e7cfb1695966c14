//! Configuration constants.
//!
//! Defaults for the probe stages and the worker pool.

use std::time::Duration;

// Stage timeouts (used when the configured value is zero)
/// DNS stage timeout.
pub const DEFAULT_DNS_TIMEOUT: Duration = Duration::from_secs(2);
/// TLS stage timeout (covers the TCP dial).
pub const DEFAULT_TLS_TIMEOUT: Duration = Duration::from_secs(3);
/// HTTP stage timeout, also used as the per-request timeout.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(4);

/// Ceiling for the TLS handshake itself, independent of the stage timeout.
pub const TLS_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(3);

/// Port dialed by the TLS probe.
pub const TLS_PORT: u16 = 443;

/// Number of resolver-level attempts per query.
pub const DNS_RESOLVER_ATTEMPTS: usize = 1;

// Redirect handling
/// Maximum number of redirect hops to follow.
/// A response that would require one more hop ends the probe.
pub const MAX_REDIRECT_HOPS: usize = 10;

/// Default User-Agent for HEAD probes.
pub const DEFAULT_USER_AGENT: &str = "typosquat-verifier/1.0";

// Worker pool
/// Capacity of the submission and result queues.
pub const QUEUE_CAPACITY: usize = 1;
/// Workers spawned per available CPU when `--workers` is not given.
pub const WORKERS_PER_CPU: usize = 4;

/// Default output path for the JSON results array.
pub const DEFAULT_OUTFILE: &str = "site/data/results.json";
/// TLD used when neither an override nor the base domain provides one.
pub const FALLBACK_TLD: &str = "com";

/// Interval between progress log lines during a run.
pub const LOGGING_INTERVAL: Duration = Duration::from_secs(5);
