//! HTTP HEAD probing.
//!
//! A probe walks an ordered strategy table of schemes (HTTPS first, then
//! plain HTTP). Each attempt is independent and owns its redirect chain; a
//! transport failure either moves on to the next scheme or ends the probe.
//! Response bodies are never requested.

mod redirects;
mod types;

use log::debug;

use crate::config::VerifyConfig;
use crate::error_handling::{ErrorType, InfoType, ProcessingStats};
use crate::verify::{Interrupted, ProbeContext};

pub use types::{strategy, HttpResult, OnTransportFailure, Scheme, TransportError};

/// Probes `host` with HEAD requests.
///
/// `host` may carry a port (`127.0.0.1:8080`). With `https` set the probe
/// starts at `https://<host>/` and falls back to `http://<host>/` only when
/// the HTTPS attempt fails at the transport level; an HTTP error status is a
/// successful attempt. The returned result is always `attempted`; if every
/// attempt failed its status fields are empty and `url` names the last
/// target tried. Canceling `ctx` stops at once without counting a
/// transport failure or a fallback.
///
/// Hostnames are resolved by the client's own resolver, not by the
/// `RecordLookup` used for the DNS stage.
pub async fn probe_http(
    client: &reqwest::Client,
    host: &str,
    https: bool,
    ctx: &ProbeContext,
    cfg: &VerifyConfig,
    stats: &ProcessingStats,
) -> HttpResult {
    let mut last_target = String::new();

    for &(scheme, on_failure) in strategy(https) {
        let mut attempt = HttpResult::attempted(scheme.target(host));
        match redirects::run_attempt(client, &mut attempt, ctx, cfg, stats).await {
            Ok(()) => return attempt,
            Err(TransportError::Interrupted(Interrupted::Canceled)) => {
                debug!("HEAD {} canceled", attempt.url);
                return HttpResult::attempted(attempt.url);
            }
            Err(e) => {
                debug!("HEAD {} failed: {e}", attempt.url);
                stats.increment_error(ErrorType::HttpTransportFailure);
                last_target = attempt.url;
                if on_failure == OnTransportFailure::GiveUp {
                    break;
                }
                stats.increment_info(InfoType::HttpFallback);
            }
        }
    }

    HttpResult::attempted(last_target)
}
