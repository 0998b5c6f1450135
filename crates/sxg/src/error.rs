//! Error types for exchange assembly and signing.

use sxg_core::EncodeError;
use thiserror::Error;

/// Errors from certificate and private-key material.
///
/// These surface at [`Signer`](crate::Signer) construction, before any
/// request is served; a process that cannot build its signer should refuse
/// to start rather than fail per-request.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid certificate: {0}")]
    InvalidCertificate(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
}

/// Errors that can occur while assembling a signed exchange.
///
/// None of these are recovered internally; the serving layer is expected to
/// fall back to the original, unsigned response or surface a 5xx.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// CBOR encoding of the response headers failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Key or certificate material is unusable.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// The request URL does not parse as an absolute URL.
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request URL has no host.
    #[error("request url has no host: {0}")]
    MissingHost(String),

    /// No certificate URL configured. Verifiers fetch the certificate chain
    /// from this URL, which must serve `application/cert-chain+cbor`.
    #[error("no certificate url configured")]
    MissingCertUrl,

    /// The structured `Signature` header exceeds the protocol maximum.
    #[error("signature is too large: {actual} bytes, max {max} bytes")]
    SignatureTooLarge { actual: usize, max: usize },

    /// The CBOR response headers exceed the protocol maximum.
    #[error("response headers are too large: {actual} bytes, max {max} bytes")]
    HeadersTooLarge { actual: usize, max: usize },

    /// The fallback URL does not fit its 2-byte length prefix.
    #[error("fallback url is too long: {actual} bytes, max 65535 bytes")]
    FallbackUrlTooLong { actual: usize },
}

/// Result type for exchange operations.
pub type Result<T> = std::result::Result<T, ExchangeError>;
