//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (`VerifyError`, `InitializationError`, `ScanError`)
//! - Failure and info categories used for counting
//! - Processing statistics tracking
//!
//! Failure categories split into:
//! - **Fatal**: the hostname is skipped (normalization, interrupted DNS stage,
//!   cancellation during TLS or HTTP)
//! - **Recorded**: the failure is visible in the result and verification continues

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{ErrorType, InfoType, InitializationError, NetworkStage, ScanError, VerifyError};
