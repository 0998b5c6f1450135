//! Response header preparation for the signed header map.
//!
//! The inner response's headers must be normalized before they are encoded:
//! names lower-cased, the pseudo-header `:status` injected, the MICE
//! content-encoding and digest recorded, and `cache-control` dropped (a
//! signed exchange must not carry headers that forbid shared caching).

use bytes::Bytes;
use ciborium::value::Value;

use crate::digest::Sha256Digest;

/// The content-encoding label of the MICE draft this crate implements.
pub const CONTENT_ENCODING_MI: &str = "mi-sha256-03";

/// An original HTTP response, captured once and held immutable.
///
/// The body is supplied as a sequence of byte chunks (the shape HTTP server
/// frameworks hand out) and concatenated exactly once at construction.
#[derive(Debug, Clone)]
pub struct InnerResponse {
    /// HTTP status code of the original response.
    pub status: u16,
    /// Original header pairs, order preserved.
    pub headers: Vec<(String, String)>,
    /// The concatenated body.
    pub payload: Bytes,
}

impl InnerResponse {
    /// Capture a response from its status, headers, and body chunks.
    pub fn new<I, B>(status: u16, headers: Vec<(String, String)>, body: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let mut payload = Vec::new();
        for chunk in body {
            payload.extend_from_slice(chunk.as_ref());
        }
        Self {
            status,
            headers,
            payload: Bytes::from(payload),
        }
    }
}

/// Build the CBOR map of signed response headers.
///
/// The relative order of the original headers is preserved: the canonical
/// encoder breaks key-length ties by insertion order, so the order here is
/// part of the byte-exact output.
pub fn signed_header_map(inner: &InnerResponse, root_digest: &Sha256Digest) -> Value {
    let mut entries: Vec<(Value, Value)> = Vec::with_capacity(inner.headers.len() + 4);

    let mut push = |name: &str, value: String| {
        entries.push((Value::Bytes(name.into()), Value::Bytes(value.into_bytes())));
    };

    push(":status", inner.status.to_string());

    for (name, value) in &inner.headers {
        let name = name.to_ascii_lowercase();
        if name == "cache-control" {
            continue;
        }
        push(&name, value.clone());
    }

    push("content-encoding", CONTENT_ENCODING_MI.to_string());
    push("digest", digest_header_value(root_digest));
    push("x-content-type-options", "nosniff".to_string());

    Value::Map(entries)
}

/// The `digest` header value announcing the MICE root digest.
pub fn digest_header_value(root_digest: &Sha256Digest) -> String {
    format!("{CONTENT_ENCODING_MI}={}", root_digest.to_base64())
}
