//! HTTP client initialization.
//!
//! Builds the single kind of client the crate uses: one that can talk to the
//! legacy portals. The primary client goes through the platform TLS library
//! with the protocol floor lowered to TLS 1.0; the fallback uses the relaxed
//! `rustls` configuration from [`crate::tls`].

use std::time::Duration;

use log::{debug, warn};
use reqwest::tls::Version;
use reqwest::{Client, ClientBuilder};

use crate::config::{browser_headers, Config, TCP_CONNECT_TIMEOUT_SECS};
use crate::error_handling::InitializationError;
use crate::tls::relaxed_client_config;

/// Oldest protocol the primary client negotiates.
const LEGACY_MIN_TLS_VERSION: Version = Version::TLS_1_0;

/// TLS stack a client ended up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TlsBackend {
    /// Platform TLS, TLS 1.0 and up, no certificate or hostname checks
    NativeLegacy,
    /// `rustls`, TLS 1.2 and up, no certificate or hostname checks
    Rustls,
}

/// Builds an HTTP client compatible with legacy portals.
///
/// Creates a `reqwest::Client` configured with:
/// - platform TLS accepting TLS 1.0 and later, with hostname verification
///   relaxed before certificate verification
/// - its own cookie store, so every client is an isolated cookie jar
/// - browser-like User-Agent and default headers
/// - a TCP connect timeout; request timeouts are set per call
///
/// If the platform TLS library refuses that configuration, a warning is
/// logged and a client on the relaxed `rustls` configuration is built
/// instead.
///
/// # Errors
///
/// Returns an `InitializationError` only if the fallback client cannot be
/// built either.
pub fn build_client(config: &Config) -> Result<Client, InitializationError> {
    let (client, backend) = build_client_with_backend(config)?;
    debug!("Built HTTP client on {:?} TLS", backend);
    Ok(client)
}

fn build_client_with_backend(
    config: &Config,
) -> Result<(Client, TlsBackend), InitializationError> {
    match native_legacy_client(config) {
        Ok(client) => Ok((client, TlsBackend::NativeLegacy)),
        Err(e) => {
            warn!("Legacy TLS configuration rejected: {e}. Falling back to rustls.");
            Ok((rustls_client(config)?, TlsBackend::Rustls))
        }
    }
}

fn native_legacy_client(config: &Config) -> Result<Client, reqwest::Error> {
    base_builder(config)
        .use_native_tls()
        .min_tls_version(LEGACY_MIN_TLS_VERSION)
        .danger_accept_invalid_hostnames(true)
        .danger_accept_invalid_certs(true)
        .build()
}

fn rustls_client(config: &Config) -> Result<Client, InitializationError> {
    let tls = relaxed_client_config()?;
    Ok(base_builder(config).use_preconfigured_tls(tls).build()?)
}

fn base_builder(config: &Config) -> ClientBuilder {
    ClientBuilder::new()
        .user_agent(config.user_agent.clone())
        .default_headers(browser_headers())
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS))
        .redirect(reqwest::redirect::Policy::limited(10))
        .cookie_store(true)
}
