//! `rustls` configuration for portals with broken certificate chains.
//!
//! This is the fallback transport; the primary client negotiates through the
//! platform TLS library, which still speaks TLS 1.0 and 1.1 (see
//! [`crate::initialization::build_client`]). `rustls` only implements TLS 1.2
//! and 1.3, so here the relaxation is limited to certificates: chain and
//! hostname verification are skipped together in one verifier.

mod verifier;

use std::sync::Arc;

use rustls::crypto::ring;
use rustls::ClientConfig;

pub use verifier::AcceptAnyServerCert;

/// Builds the relaxed client configuration on the ring provider.
///
/// # Errors
///
/// Returns a `rustls::Error` if the provider rejects the requested protocol
/// versions.
pub fn relaxed_client_config() -> Result<ClientConfig, rustls::Error> {
    let provider = Arc::new(ring::default_provider());
    let algorithms = provider.signature_verification_algorithms;

    let config = ClientConfig::builder_with_provider(provider)
        .with_protocol_versions(rustls::ALL_VERSIONS)?
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(AcceptAnyServerCert::new(algorithms)))
        .with_no_client_auth();

    Ok(config)
}
