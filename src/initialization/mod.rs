//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - Logger
//! - DNS resolver
//! - HTTP probe client (redirects disabled)
//! - TLS connector (certificate verification disabled)
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;
mod resolver;

use rustls::crypto::{ring::default_provider, CryptoProvider};
use tokio_rustls::TlsConnector;

use crate::error_handling::InitializationError;

// Re-export public API
pub use client::init_probe_client;
pub use logger::init_logger_with;
pub use resolver::init_resolver;

/// Initializes the crypto provider for TLS operations.
///
/// Configures the global crypto provider for `rustls`. reqwest's rustls
/// backend relies on it; the TLS probe passes its provider explicitly.
pub fn init_crypto_provider() {
    // The return value is ignored because reinstalling the provider is harmless
    let _ = CryptoProvider::install_default(default_provider());
}

/// Initializes the connector used by the TLS probe.
///
/// # Errors
///
/// Returns `InitializationError::TlsConfigError` if the client configuration
/// cannot be built.
pub fn init_tls_connector() -> Result<TlsConnector, InitializationError> {
    Ok(crate::tls::build_connector()?)
}
