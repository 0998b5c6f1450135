//! # SXG Core
//!
//! Pure encoders for Signed HTTP Exchanges: canonical CBOR, Merkle Integrity
//! Content Encoding, and response header preparation.
//!
//! This crate contains no I/O, no networking, and no key material. It is pure
//! computation from input bytes to output bytes, and every output is specified
//! byte-exactly by an external verifier (a browser), so there is no tolerance
//! for near-misses in length prefixes, sort orders, or digest chaining.
//!
//! ## Key Pieces
//!
//! - [`cbor`] - Restricted canonical CBOR encoding (integers, byte strings,
//!   small maps)
//! - [`mice`] - Merkle Integrity Content Encoding of a response body
//! - [`headers`] - Normalization of response headers into the signed map
//! - [`Sha256Digest`] - 32-byte SHA-256 newtype used throughout

pub mod cbor;
pub mod digest;
pub mod error;
pub mod headers;
pub mod mice;

pub use digest::Sha256Digest;
pub use error::EncodeError;
pub use headers::{signed_header_map, InnerResponse, CONTENT_ENCODING_MI};
pub use mice::CHUNK_SIZE;
