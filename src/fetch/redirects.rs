//! HTTP redirect chain tracking.
//!
//! The probe client never follows redirects on its own; this module follows
//! them hop by hop so that every intermediate URL is recorded.

use log::debug;
use reqwest::header::{LOCATION, SERVER, USER_AGENT};
use reqwest::{Response, StatusCode, Url};

use super::types::{HttpResult, TransportError};
use crate::config::{VerifyConfig, MAX_REDIRECT_HOPS};
use crate::error_handling::{ErrorType, InfoType, ProcessingStats};
use crate::verify::ProbeContext;

/// Runs one attempt starting at `result.url`, filling in `result`.
///
/// With `cfg.follow_redirects` unset only the first response is observed.
/// Otherwise redirects are followed until a non-redirect response, a redirect
/// without a Location header, or a response that would need hop
/// `MAX_REDIRECT_HOPS + 1`. In the last case the probe stops there and the
/// status of that response is kept.
///
/// # Errors
///
/// Returns an error if any request of the attempt fails, a Location header
/// cannot be resolved against the current URL, or `ctx` runs out. The
/// redirect chain collected so far stays in `result`.
pub(crate) async fn run_attempt(
    client: &reqwest::Client,
    result: &mut HttpResult,
    ctx: &ProbeContext,
    cfg: &VerifyConfig,
    stats: &ProcessingStats,
) -> Result<(), TransportError> {
    let mut current = result.url.clone();
    let mut resp = send_head(client, &current, ctx, cfg).await?;

    while cfg.follow_redirects && is_redirect(resp.status()) {
        let Some(location) = header_value(&resp, LOCATION) else {
            debug!(
                "Redirect status {} for {} but no Location header",
                resp.status(),
                current
            );
            break;
        };
        if result.redirect_chain.len() >= MAX_REDIRECT_HOPS {
            debug!("Stopped after {MAX_REDIRECT_HOPS} redirects starting at {}", result.url);
            stats.increment_error(ErrorType::RedirectLimitExceeded);
            break;
        }

        let next = resolve_location(&current, &location)?;
        result.redirect_chain.push(next.clone());
        stats.increment_info(InfoType::HttpRedirect);
        current = next;
        resp = send_head(client, &current, ctx, cfg).await?;
    }

    record_response(result, &resp);
    Ok(())
}

async fn send_head(
    client: &reqwest::Client,
    url: &str,
    ctx: &ProbeContext,
    cfg: &VerifyConfig,
) -> Result<Response, TransportError> {
    let request = client
        .head(url)
        .header(USER_AGENT, cfg.user_agent.as_str())
        .timeout(cfg.http_timeout)
        .send();
    Ok(ctx.run(request).await??)
}

/// Redirect codes a browser follows.
fn is_redirect(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}

/// Absolute URL of a Location header, relative values joined onto `current`.
fn resolve_location(current: &str, location: &str) -> Result<String, TransportError> {
    Url::parse(location)
        .or_else(|_| Url::parse(current).and_then(|base| base.join(location)))
        .map(String::from)
        .map_err(|_| TransportError::InvalidLocation {
            from: current.to_string(),
            location: location.to_string(),
        })
}

fn header_value(resp: &Response, name: reqwest::header::HeaderName) -> Option<String> {
    resp.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn record_response(result: &mut HttpResult, resp: &Response) {
    let status = resp.status();
    result.status = status_line(status);
    result.status_code = status.as_u16();
    result.location = header_value(resp, LOCATION).unwrap_or_default();
    result.server = header_value(resp, SERVER).unwrap_or_default();
}

/// `"<code> <reason>"`, or just the code when the reason is unknown.
pub(crate) fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}
