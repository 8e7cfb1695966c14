//! DNS resolution and record querying.
//!
//! This module provides the DNS stage of a verification:
//! - Address resolution (A/AAAA combined)
//! - Alias queries (CNAME)
//! - Mail exchanger queries (MX)
//! - Nameserver queries (NS)
//!
//! Lookups go through the [`RecordLookup`] trait; [`HickoryLookup`] is the
//! production implementation on top of `hickory-resolver`, [`StaticLookup`]
//! answers from memory.

mod records;
mod resolution;
mod static_lookup;
mod types;

// Re-export public API
pub use records::{HickoryLookup, RecordLookup};
pub use resolution::lookup_dns;
pub use static_lookup::{StaticFailure, StaticLookup};
pub use types::{DnsLookupError, DnsResult, RecordKind};

#[cfg(test)]
mod tests;
