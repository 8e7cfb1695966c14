//! HTTP client initialization.

use reqwest::ClientBuilder;

use crate::error_handling::InitializationError;

/// Initializes the shared client for HEAD probes.
///
/// Creates a `reqwest::Client` with redirects disabled so that the probe can
/// follow them itself and record every hop. Idle connections are not pooled:
/// candidates are distinct hosts, so a kept-alive socket is never reused.
/// Timeouts and the User-Agent are set per request from the run's
/// `VerifyConfig`.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_probe_client() -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .build()?;
    Ok(client)
}
