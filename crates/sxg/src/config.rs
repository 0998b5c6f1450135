//! Exchange configuration.
//!
//! One immutable struct, constructed at process start and passed by reference
//! into the [`Signer`](crate::Signer) and each [`Exchange`](crate::Exchange).
//! Where the values come from (environment, files, flags) is the caller's
//! concern; nothing in this crate reads the environment.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default exchange lifetime: 7 days.
pub const DEFAULT_EXPIRES_IN: Duration = Duration::from_secs(604_800);

/// Which revision of the signed-exchange format to emit.
///
/// The draft and the final RFC disagree on the file magic and the context
/// string of the message to sign. Browsers shipping `application/
/// signed-exchange;v=b3` expect the draft marker, so it is the default; the
/// final-RFC marker stays selectable for verifiers that want it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SxgVersion {
    /// Draft b3 (`sxg1-b3\0` magic, `HTTP Exchange 1 b3` context).
    #[default]
    DraftB3,
    /// Final RFC (`sxg1\0\0\0\0` magic, `HTTP Exchange 1` context).
    Final,
}

impl SxgVersion {
    /// The 8-byte file signature that opens the container.
    pub const fn magic(self) -> &'static [u8; 8] {
        match self {
            Self::DraftB3 => b"sxg1-b3\x00",
            Self::Final => b"sxg1\x00\x00\x00\x00",
        }
    }

    /// The ASCII context string of the message to sign.
    pub const fn context_string(self) -> &'static [u8] {
        match self {
            Self::DraftB3 => b"HTTP Exchange 1 b3",
            Self::Final => b"HTTP Exchange 1",
        }
    }
}

/// Configuration for producing signed exchanges.
#[derive(Debug, Clone)]
pub struct SxgConfig {
    /// Where verifiers fetch the certificate chain
    /// (`application/cert-chain+cbor`). Must be non-empty by signing time.
    pub cert_url: String,
    /// Certificate material, PEM or DER.
    pub certificate: Vec<u8>,
    /// Private key material, PKCS#8 or SEC1, PEM or DER.
    pub private_key: Vec<u8>,
    /// How long an exchange stays valid after signing.
    pub expires_in: Duration,
    /// Format revision to emit.
    pub version: SxgVersion,
    /// Headers of the outer response that carries the container.
    pub response_headers: Vec<(String, String)>,
}

impl SxgConfig {
    /// Build a configuration from in-memory key material, with defaults for
    /// everything else.
    pub fn new(cert_url: impl Into<String>, certificate: Vec<u8>, private_key: Vec<u8>) -> Self {
        Self {
            cert_url: cert_url.into(),
            certificate,
            private_key,
            expires_in: DEFAULT_EXPIRES_IN,
            version: SxgVersion::default(),
            response_headers: Self::default_response_headers(),
        }
    }

    /// Build a configuration reading certificate and key from files.
    pub fn from_paths(
        cert_url: impl Into<String>,
        cert_path: impl AsRef<Path>,
        key_path: impl AsRef<Path>,
    ) -> std::io::Result<Self> {
        let certificate = std::fs::read(cert_path)?;
        let private_key = std::fs::read(key_path)?;
        Ok(Self::new(cert_url, certificate, private_key))
    }

    /// The default outer response headers.
    pub fn default_response_headers() -> Vec<(String, String)> {
        vec![
            (
                "Content-Type".to_string(),
                "application/signed-exchange;v=b3".to_string(),
            ),
            ("Cache-Control".to_string(), "no-transform".to_string()),
            ("X-Content-Type-Options".to_string(), "nosniff".to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_markers() {
        assert_eq!(SxgVersion::DraftB3.magic(), b"sxg1-b3\x00");
        assert_eq!(SxgVersion::Final.magic(), b"sxg1\x00\x00\x00\x00");
        assert_eq!(SxgVersion::DraftB3.context_string(), b"HTTP Exchange 1 b3");
        assert_eq!(SxgVersion::Final.context_string(), b"HTTP Exchange 1");
        assert_eq!(SxgVersion::default(), SxgVersion::DraftB3);
    }

    #[test]
    fn test_defaults() {
        let config = SxgConfig::new("https://cdn.example/cert.cbor", vec![], vec![]);
        assert_eq!(config.expires_in, Duration::from_secs(7 * 24 * 60 * 60));
        assert_eq!(config.response_headers.len(), 3);
    }

    #[test]
    fn test_from_paths() {
        let dir = tempfile::tempdir().unwrap();
        let cert = dir.path().join("cert.pem");
        let key = dir.path().join("key.pem");
        std::fs::write(&cert, b"cert bytes").unwrap();
        std::fs::write(&key, b"key bytes").unwrap();

        let config = SxgConfig::from_paths("https://cdn.example/cert.cbor", &cert, &key).unwrap();
        assert_eq!(config.certificate, b"cert bytes");
        assert_eq!(config.private_key, b"key bytes");
    }
}
