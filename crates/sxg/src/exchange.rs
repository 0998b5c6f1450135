//! Signed exchange assembly: message to sign, `Signature` header, container.
//!
//! Builds the headers and body of the `application/signed-exchange` format
//! for one HTTP request/response pair, per
//! draft-yasskin-http-origin-signed-responses-05. Every length prefix and
//! byte position below is checked by the verifier; when Chrome reports
//! "VerifyFinal failed" the certificate is usually fine and the message to
//! sign is what's actually wrong.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use url::Url;

use sxg_core::{cbor, mice, signed_header_map, InnerResponse, CONTENT_ENCODING_MI};

use crate::config::SxgConfig;
use crate::error::{ExchangeError, Result};
use crate::signer::Signer;

/// Largest allowed `Signature` header value, per the container format.
pub const SIGNATURE_MAX_SIZE: usize = 1 << 14;

/// Largest allowed CBOR header block, per the container format.
pub const HEADERS_MAX_SIZE: usize = 1 << 19;

/// A single request/response pair on its way to becoming a signed exchange.
///
/// Construction does all the non-cryptographic work (MICE encoding, header
/// preparation, CBOR serialization). Signing and container assembly happen
/// on the first call to [`Exchange::body`] and are cached; repeated calls
/// return identical bytes without re-signing.
pub struct Exchange<'a> {
    signer: &'a Signer,
    config: &'a SxgConfig,
    fallback_url: String,
    validity_url: String,
    cbor_headers: Vec<u8>,
    payload_body: Vec<u8>,
    body: Option<Vec<u8>>,
}

/// The outer response that carries a finished container.
#[derive(Debug, Clone)]
pub struct SxgResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl<'a> Exchange<'a> {
    /// Prepare an exchange for the given request URL and inner response.
    ///
    /// Fails if the URL is not absolute or has no host; nothing is signed yet.
    pub fn new(
        url: &str,
        inner: &InnerResponse,
        signer: &'a Signer,
        config: &'a SxgConfig,
    ) -> Result<Self> {
        let url = Url::parse(url)?;
        if url.host_str().is_none() {
            return Err(ExchangeError::MissingHost(url.to_string()));
        }

        let (root_digest, payload_body) = mice::encode(&inner.payload);
        let header_map = signed_header_map(inner, &root_digest);
        let cbor_headers = cbor::encode(&header_map)?;

        let validity_url = derive_validity_url(&url)?;

        Ok(Self {
            signer,
            config,
            fallback_url: url.to_string(),
            validity_url,
            cbor_headers,
            payload_body,
            body: None,
        })
    }

    /// The fallback URL embedded in the container (the request URL).
    pub fn fallback_url(&self) -> &str {
        &self.fallback_url
    }

    /// The derived validity URL.
    pub fn validity_url(&self) -> &str {
        &self.validity_url
    }

    /// The container bytes, built and signed on first call, cached after.
    pub fn body(&mut self) -> Result<&[u8]> {
        if self.body.is_none() {
            let message = self.message_to_sign();
            let signature = self.signature_header(&message)?;
            let container = build_container(
                self.config.version.magic(),
                &self.fallback_url,
                signature.as_bytes(),
                &self.cbor_headers,
                &self.payload_body,
            )?;
            tracing::debug!(
                url = %self.fallback_url,
                container_len = container.len(),
                "signed exchange finalized"
            );
            self.body = Some(container);
        }

        // Just written above if it was absent.
        Ok(self.body.as_deref().unwrap_or_default())
    }

    /// Produce the complete outer response: status 200, the configured
    /// transport headers, and the container as the body.
    pub fn to_response(&mut self) -> Result<SxgResponse> {
        let body = self.body()?.to_vec();
        Ok(SxgResponse {
            status: 200,
            headers: self.config.response_headers.clone(),
            body,
        })
    }

    /// The byte string the signature covers, per section 3.5 of the draft.
    ///
    /// The layout matches the RFC 8446 signing format to avoid cross-protocol
    /// attacks when a key is shared between TLS and exchange signing.
    fn message_to_sign(&self) -> Vec<u8> {
        let cert_digest = self.signer.cert_digest();

        let mut buf = Vec::with_capacity(
            64 + 32 + 64 + self.validity_url.len()
                + self.fallback_url.len()
                + self.cbor_headers.len(),
        );

        // 64 bytes of 0x20, then the draft-specific context string and a
        // zero separator.
        buf.extend_from_slice(&[0x20; 64]);
        buf.extend_from_slice(self.config.version.context_string());
        buf.push(0x00);

        // cert-sha256 is always set here, so a 0x20 length byte precedes the
        // 32 digest bytes (a lone 0x00 would mean "no certificate digest").
        buf.push(0x20);
        buf.extend_from_slice(cert_digest.as_bytes());

        length_prefixed(&mut buf, self.validity_url.as_bytes());
        buf.extend_from_slice(&self.signer.signed_at().to_be_bytes());
        buf.extend_from_slice(&self.signer.expires_at().to_be_bytes());
        length_prefixed(&mut buf, self.fallback_url.as_bytes());
        length_prefixed(&mut buf, &self.cbor_headers);

        buf
    }

    /// Serialize the structured `Signature` header value: a `label` token
    /// followed by `;`-joined `key=value` params in ascending key order.
    fn signature_header(&self, message: &[u8]) -> Result<String> {
        if self.config.cert_url.is_empty() {
            return Err(ExchangeError::MissingCertUrl);
        }

        let integrity = format!("digest/{CONTENT_ENCODING_MI}");
        let mut params = [
            ("cert-sha256", Param::Bytes(self.signer.cert_digest().to_base64())),
            ("cert-url", Param::Text(&self.config.cert_url)),
            ("date", Param::Integer(self.signer.signed_at())),
            ("expires", Param::Integer(self.signer.expires_at())),
            ("integrity", Param::Text(&integrity)),
            ("sig", Param::Bytes(BASE64.encode(self.signer.sign(message)))),
            ("validity-url", Param::Text(&self.validity_url)),
        ];
        params.sort_by_key(|(key, _)| *key);

        let mut out = String::from("label");
        for (key, value) in &params {
            out.push(';');
            out.push_str(key);
            out.push('=');
            match value {
                Param::Integer(n) => out.push_str(&n.to_string()),
                Param::Text(s) => {
                    out.push('"');
                    out.push_str(s);
                    out.push('"');
                }
                Param::Bytes(b64) => {
                    out.push('*');
                    out.push_str(b64);
                    out.push('*');
                }
            }
        }
        Ok(out)
    }
}

impl std::fmt::Debug for Exchange<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exchange")
            .field("fallback_url", &self.fallback_url)
            .field("validity_url", &self.validity_url)
            .field("finalized", &self.body.is_some())
            .finish_non_exhaustive()
    }
}

/// A typed `Signature` header parameter value.
enum Param<'a> {
    Integer(u64),
    Text(&'a str),
    /// Base64 payload, serialized between `*` delimiters.
    Bytes(String),
}

/// Assemble the container: magic, fallback URL, then length-prefixed
/// signature and header blocks, then the MICE-encoded payload.
pub fn build_container(
    magic: &[u8; 8],
    fallback_url: &str,
    signature: &[u8],
    cbor_headers: &[u8],
    payload_body: &[u8],
) -> Result<Vec<u8>> {
    let url_len = u16::try_from(fallback_url.len())
        .map_err(|_| ExchangeError::FallbackUrlTooLong { actual: fallback_url.len() })?;
    if signature.len() > SIGNATURE_MAX_SIZE {
        return Err(ExchangeError::SignatureTooLarge {
            actual: signature.len(),
            max: SIGNATURE_MAX_SIZE,
        });
    }
    if cbor_headers.len() > HEADERS_MAX_SIZE {
        return Err(ExchangeError::HeadersTooLarge {
            actual: cbor_headers.len(),
            max: HEADERS_MAX_SIZE,
        });
    }

    let mut buf = Vec::with_capacity(
        16 + fallback_url.len() + signature.len() + cbor_headers.len() + payload_body.len(),
    );
    buf.extend_from_slice(magic);
    buf.extend_from_slice(&url_len.to_be_bytes());
    buf.extend_from_slice(fallback_url.as_bytes());
    buf.extend_from_slice(&u24_be(signature.len()));
    buf.extend_from_slice(&u24_be(cbor_headers.len()));
    buf.extend_from_slice(signature);
    buf.extend_from_slice(cbor_headers);
    buf.extend_from_slice(payload_body);
    Ok(buf)
}

/// Derive the validity URL: same host, path with the format suffix of the
/// final segment stripped, original query, always https.
fn derive_validity_url(url: &Url) -> Result<String> {
    let host = url
        .host_str()
        .ok_or_else(|| ExchangeError::MissingHost(url.to_string()))?;

    let path = url.path();
    let segment_start = path.rfind('/').map_or(0, |i| i + 1);
    let truncated = match path[segment_start..].find('.') {
        Some(dot) => &path[..segment_start + dot],
        None => path,
    };

    let mut validity = format!("https://{host}{truncated}");
    if let Some(query) = url.query() {
        validity.push('?');
        validity.push_str(query);
    }
    Ok(validity)
}

/// 8-byte big-endian length prefix followed by the bytes themselves.
fn length_prefixed(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(&(bytes.len() as u64).to_be_bytes());
    buf.extend_from_slice(bytes);
}

/// The low three bytes of a big-endian length.
fn u24_be(n: usize) -> [u8; 3] {
    let bytes = (n as u32).to_be_bytes();
    [bytes[1], bytes[2], bytes[3]]
}
