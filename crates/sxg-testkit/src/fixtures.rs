//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: a self-signed P-256 certificate
//! with its key, wrapped in a ready-to-use configuration and signer.

use std::time::Duration;

use sxg::{Exchange, InnerResponse, Result, Signer, SxgConfig};

/// A fixed signing timestamp used by [`TestFixture::new`], so containers
/// built from the same fixture are byte-identical.
pub const FIXED_SIGNED_AT: u64 = 1_555_925_114;

/// A test fixture holding key material, configuration, and a signer.
pub struct TestFixture {
    pub config: SxgConfig,
    pub signer: Signer,
}

impl TestFixture {
    /// Create a fixture with a fresh self-signed certificate and a fixed
    /// signing timestamp.
    pub fn new() -> Self {
        Self::with_signed_at(FIXED_SIGNED_AT)
    }

    /// Create a fixture signing at the given unix timestamp.
    pub fn with_signed_at(signed_at: u64) -> Self {
        let certified = rcgen::generate_simple_self_signed(vec!["signed.example".to_string()])
            .expect("self-signed certificate generation");
        let cert_der = certified.cert.der().to_vec();
        let key_der = certified.key_pair.serialize_der();

        let config = SxgConfig::new("https://cdn.example/cert.cbor", cert_der, key_der);
        let signer = Signer::with_signed_at(
            &config.certificate,
            &config.private_key,
            signed_at,
            Duration::from_secs(3600),
        )
        .expect("signer from generated material");

        Self { config, signer }
    }

    /// A minimal HTML response with the given body.
    pub fn html_response(&self, body: &str) -> InnerResponse {
        InnerResponse::new(
            200,
            vec![(
                "Content-Type".to_string(),
                "text/html; charset=utf-8".to_string(),
            )],
            [body.as_bytes()],
        )
    }

    /// Build an exchange against this fixture's signer and config.
    pub fn exchange(&self, url: &str, inner: &InnerResponse) -> Result<Exchange<'_>> {
        Exchange::new(url, inner, &self.signer, &self.config)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
