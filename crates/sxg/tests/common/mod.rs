//! Shared setup for integration tests.

use std::time::Duration;

use sxg::{Signer, SxgConfig};

/// Fixed signing timestamp so assertions can name exact values.
pub const SIGNED_AT: u64 = 1_555_925_114;

/// Exchange lifetime used by the shared fixture.
pub const EXPIRES_IN: Duration = Duration::from_secs(3600);

/// A self-signed P-256 certificate, its key, and a signer fixed at
/// [`SIGNED_AT`].
pub fn config_and_signer() -> (SxgConfig, Signer) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let certified = rcgen::generate_simple_self_signed(vec!["signed.example".to_string()])
        .expect("self-signed certificate");
    let cert_der = certified.cert.der().to_vec();
    let key_der = certified.key_pair.serialize_der();

    let mut config = SxgConfig::new("https://cdn.example/cert.cbor", cert_der, key_der);
    config.expires_in = EXPIRES_IN;

    let signer = Signer::with_signed_at(
        &config.certificate,
        &config.private_key,
        SIGNED_AT,
        EXPIRES_IN,
    )
    .expect("signer");

    (config, signer)
}
