//! Verification record types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::dns::DnsResult;
use crate::fetch::HttpResult;
use crate::tls::TlsResult;

/// Outcome slot for an optional probe.
///
/// `NotAttempted` means the probe was disabled or gated off (host not
/// resolvable); it serializes as an absent key when used with
/// `skip_serializing_if = "Probe::is_not_attempted"`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Probe<T> {
    /// The probe did not run.
    #[default]
    NotAttempted,
    /// The probe ran and produced this payload.
    Attempted(T),
}

impl<T> Probe<T> {
    /// True when the probe ran.
    pub fn is_attempted(&self) -> bool {
        matches!(self, Probe::Attempted(_))
    }

    /// True when the probe did not run.
    pub fn is_not_attempted(&self) -> bool {
        !self.is_attempted()
    }

    /// Borrow the payload, if the probe ran.
    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Probe::Attempted(value) => Some(value),
            Probe::NotAttempted => None,
        }
    }
}

impl<T> From<Option<T>> for Probe<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Probe::NotAttempted, Probe::Attempted)
    }
}

impl<T: Serialize> Serialize for Probe<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Probe::Attempted(value) => value.serialize(serializer),
            Probe::NotAttempted => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Probe<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Probe::from)
    }
}

/// Aggregate result for one hostname.
///
/// Built once by the verifier; never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    /// Hostname as given by the caller
    pub domain: String,
    /// IDNA ASCII form used for every lookup
    pub ascii: String,
    /// DNS records found
    pub dns: DnsResult,
    /// TLS metadata, attempted only for resolvable hosts with TLS enabled
    pub tls: Probe<TlsResult>,
    /// HEAD probe result, attempted only for resolvable hosts with HTTP enabled
    pub http: Probe<HttpResult>,
    /// Has at least one A, AAAA or CNAME record
    pub resolvable: bool,
    /// Has at least one MX record
    pub has_mail: bool,
}

impl Verification {
    /// Triage filter: keep hosts that resolve or accept mail.
    pub fn has_signal(&self) -> bool {
        self.resolvable || self.has_mail
    }
}
