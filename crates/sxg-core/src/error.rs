//! Error types for the core encoders.

use thiserror::Error;

/// Errors raised by the canonical CBOR encoder.
///
/// All of these are fatal to the single encode call and are never retried.
/// MICE and header preparation are total and have no error cases.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("cbor encoding is not implemented for {0} values")]
    UnsupportedKind(&'static str),

    #[error("cbor encoding is not implemented for negative integers: {0}")]
    NegativeInteger(i128),

    #[error("cbor integer exceeds the unsigned 64-bit range: {0}")]
    IntegerOverflow(i128),

    #[error("cbor map has {0} entries, only maps of up to 23 pairs are implemented")]
    MapTooLarge(usize),

    #[error("cbor map keys must be byte or text strings, got a {0}")]
    UnsupportedKey(&'static str),
}
