//! # SXG Testkit
//!
//! Testing utilities for the sxg crates.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a self-signed P-256 certificate plus matching key and a
//!   ready-made configuration for exercising the full encoding pipeline
//! - **Generators**: proptest strategies over the restricted CBOR value
//!   model, header lists, and payloads
//! - **Golden vectors**: known input/output byte sequences for the CBOR and
//!   MICE encoders, for cross-implementation verification
//!
//! ## Fixtures
//!
//! ```rust
//! use sxg_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let response = fixture.html_response("<h1>Hello!</h1>");
//! let mut exchange = fixture.exchange("https://example.com/hello.html", &response).unwrap();
//! assert!(exchange.body().is_ok());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::TestFixture;
pub use generators::{cbor_value, header_pairs, payload};
pub use vectors::{all_vectors, run_vector, verify_all_vectors, GoldenVector};
