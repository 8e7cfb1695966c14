//! Verification of a single candidate hostname.
//!
//! This module provides:
//! - The [`Verifier`] that runs normalize → DNS → TLS → HTTP for one hostname
//! - [`ProbeContext`], the cancellation and deadline carrier for every stage
//! - The [`Verification`] record and its optional [`Probe`] slots

mod context;
mod types;
mod verifier;

// Re-export public API
pub use context::{Interrupted, ProbeContext};
pub use types::{Probe, Verification};
pub use verifier::Verifier;
