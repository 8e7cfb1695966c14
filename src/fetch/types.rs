//! HTTP probe result and strategy types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::verify::Interrupted;

/// Outcome of an HTTP probe.
///
/// `url` is the target of the last attempt (the first request of that
/// attempt, not the end of its redirect chain). The status fields describe
/// the last response observed and are empty when every attempt failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResult {
    #[serde(rename = "Attempted", default)]
    pub attempted: bool,
    #[serde(rename = "URL", default)]
    pub url: String,
    /// Code and reason phrase, e.g. `301 Moved Permanently`
    #[serde(rename = "Status", default)]
    pub status: String,
    #[serde(rename = "StatusCode", default)]
    pub status_code: u16,
    #[serde(rename = "Location", default)]
    pub location: String,
    #[serde(rename = "Server", default)]
    pub server: String,
    /// URLs requested after each followed redirect, in order
    #[serde(rename = "RedirectChain", default)]
    pub redirect_chain: Vec<String>,
}

impl HttpResult {
    pub(crate) fn attempted(url: String) -> Self {
        Self {
            attempted: true,
            url,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Https,
    Http,
}

impl Scheme {
    /// Root URL of `host` under this scheme.
    pub fn target(self, host: &str) -> String {
        format!("{self}://{host}/")
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Https => f.write_str("https"),
            Scheme::Http => f.write_str("http"),
        }
    }
}

/// What to do when an attempt fails at the transport level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnTransportFailure {
    TryNext,
    GiveUp,
}

const HTTPS_FIRST: &[(Scheme, OnTransportFailure)] = &[
    (Scheme::Https, OnTransportFailure::TryNext),
    (Scheme::Http, OnTransportFailure::GiveUp),
];

const HTTP_ONLY: &[(Scheme, OnTransportFailure)] = &[(Scheme::Http, OnTransportFailure::GiveUp)];

/// Ordered attempts for a probe.
pub fn strategy(https: bool) -> &'static [(Scheme, OnTransportFailure)] {
    if https {
        HTTPS_FIRST
    } else {
        HTTP_ONLY
    }
}

/// Why an attempt produced no response.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("request interrupted: {0}")]
    Interrupted(#[from] Interrupted),

    #[error("invalid redirect location {location:?} from {from}")]
    InvalidLocation { from: String, location: String },
}
