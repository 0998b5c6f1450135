//! Restricted canonical CBOR encoding (RFC 7049 subset).
//!
//! Signed exchanges only ever serialize three shapes: non-negative integers,
//! byte strings, and small maps of byte-string keys. Everything else is
//! rejected rather than encoded, because the verifier's parser is the final
//! authority on what it will accept.
//!
//! Two deliberate departures from RFC 8949 canonical encoding:
//!
//! - Text strings are coerced to byte strings (major type 2). Chrome's
//!   signed-exchange parser only accepts byte strings for header names and
//!   values, so major type 3 is never emitted.
//! - Map keys are ordered by ascending byte length with insertion order
//!   preserved on ties, not by lexicographic comparison. Verifiers depend on
//!   the resulting header bytes, so this ordering must not be "fixed".

use ciborium::value::Value;

use crate::error::EncodeError;

/// Largest entry count a map header can carry in its single size byte.
pub const MAX_MAP_ENTRIES: usize = 23;

const MAJOR_UNSIGNED: u8 = 0;
const MAJOR_BYTES: u8 = 2;
const MAJOR_MAP: u8 = 5;

/// Encode a CBOR value to canonical bytes.
///
/// Deterministic and non-suspending. Fails only on values outside the
/// restricted model (negative integers, floats, arrays, tags, oversized maps).
pub fn encode(value: &Value) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();
    encode_value(&mut buf, value)?;
    Ok(buf)
}

/// Recursively encode a CBOR value.
fn encode_value(buf: &mut Vec<u8>, value: &Value) -> Result<(), EncodeError> {
    match value {
        Value::Integer(i) => {
            let n = i128::from(*i);
            if n < 0 {
                return Err(EncodeError::NegativeInteger(n));
            }
            let n = u64::try_from(n).map_err(|_| EncodeError::IntegerOverflow(n))?;
            encode_uint(buf, MAJOR_UNSIGNED, n);
            Ok(())
        }
        Value::Bytes(b) => {
            encode_byte_string(buf, b);
            Ok(())
        }
        // Coerced to a byte string, see the module docs.
        Value::Text(s) => {
            encode_byte_string(buf, s.as_bytes());
            Ok(())
        }
        Value::Map(entries) => encode_map(buf, entries),
        other => Err(EncodeError::UnsupportedKind(kind_name(other))),
    }
}

/// Encode an unsigned integer with the given major type.
///
/// The value (or length) occupies the five low bits of the first byte when it
/// fits in 0..=23; otherwise a marker (24..=27) selects a 1/2/4/8 byte
/// big-endian payload.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a byte string (major type 2).
fn encode_byte_string(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, MAJOR_BYTES, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Encode a map (major type 5) of at most [`MAX_MAP_ENTRIES`] pairs.
///
/// Keys are coerced to byte strings and sorted by ascending byte length.
/// The sort is stable: keys of equal length keep their insertion order.
fn encode_map(buf: &mut Vec<u8>, entries: &[(Value, Value)]) -> Result<(), EncodeError> {
    if entries.len() > MAX_MAP_ENTRIES {
        return Err(EncodeError::MapTooLarge(entries.len()));
    }

    let mut pairs: Vec<(&[u8], &Value)> = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let key_bytes: &[u8] = match key {
            Value::Bytes(b) => b,
            Value::Text(s) => s.as_bytes(),
            other => return Err(EncodeError::UnsupportedKey(kind_name(other))),
        };
        pairs.push((key_bytes, value));
    }
    pairs.sort_by_key(|(key, _)| key.len());

    // Entry count fits in the low bits, so the header is a single byte.
    buf.push((MAJOR_MAP << 5) | (entries.len() as u8));

    for (key, value) in pairs {
        encode_byte_string(buf, key);
        encode_value(buf, value)?;
    }
    Ok(())
}

/// Human-readable name of a value's kind, for error reporting.
fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Integer(_) => "integer",
        Value::Bytes(_) => "byte string",
        Value::Text(_) => "text string",
        Value::Float(_) => "float",
        Value::Array(_) => "array",
        Value::Map(_) => "map",
        Value::Bool(_) => "bool",
        Value::Null => "null",
        Value::Tag(..) => "tagged value",
        _ => "unknown",
    }
}
