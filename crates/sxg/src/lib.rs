//! # SXG
//!
//! Produces Signed HTTP Exchanges: a single binary artifact that lets a
//! browser trust that an HTTP request/response pair was generated by the
//! origin it claims, independent of how the bytes were delivered.
//!
//! ## Overview
//!
//! - [`Signer`] - certificate + ECDSA P-256 key, constructed once and shared
//!   read-only across requests
//! - [`SxgConfig`] - immutable configuration (cert URL, key material, expiry,
//!   format revision, outer headers)
//! - [`Exchange`] - one request/response pair; lazily signed and assembled
//!   into the container on first use of its body
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sxg::{Exchange, InnerResponse, Signer, SxgConfig};
//!
//! fn example() -> sxg::Result<()> {
//!     let config = SxgConfig::from_paths(
//!         "https://cdn.example/cert.cbor",
//!         "cert.pem",
//!         "priv.pem",
//!     ).expect("key material");
//!     let signer = Signer::from_config(&config)?;
//!
//!     let inner = InnerResponse::new(
//!         200,
//!         vec![("Content-Type".into(), "text/html; charset=utf-8".into())],
//!         [&b"<h1>Hello!</h1>"[..]],
//!     );
//!     let mut exchange = Exchange::new(
//!         "https://example.com/hello.html",
//!         &inner,
//!         &signer,
//!         &config,
//!     )?;
//!     let response = exchange.to_response()?;
//!     assert_eq!(response.status, 200);
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! The pure encoders live in [`sxg_core`], re-exported here as [`core`].

pub mod config;
pub mod error;
pub mod exchange;
pub mod signer;

// Re-export the encoder crate
pub use sxg_core as core;

// Re-export main types for convenience
pub use config::{SxgConfig, SxgVersion, DEFAULT_EXPIRES_IN};
pub use error::{CryptoError, ExchangeError, Result};
pub use exchange::{Exchange, SxgResponse, HEADERS_MAX_SIZE, SIGNATURE_MAX_SIZE};
pub use signer::Signer;

// Re-export commonly used core types
pub use sxg_core::{InnerResponse, Sha256Digest};
