//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - HTTP clients for the legacy portals
//! - Logger
//! - TLS crypto provider
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;

use rustls::crypto::CryptoProvider;

// Re-export public API
pub use client::build_client;
pub use logger::init_logger_with;

/// Initializes the process-wide crypto provider for TLS operations.
///
/// Installs the ring provider as the process default, so `rustls`
/// configurations built without an explicit provider agree with the fallback
/// client.
pub fn init_crypto_provider() {
    // Already installed on repeat calls
    let _ = CryptoProvider::install_default(rustls::crypto::ring::default_provider());
}
