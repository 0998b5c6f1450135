//! Proptest generators for property-based testing.

use ciborium::value::Value;
use proptest::prelude::*;

use sxg_core::cbor::MAX_MAP_ENTRIES;

/// Generate payload bytes of at most `max_len`.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a lowercase header name.
pub fn header_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,30}"
}

/// Generate a printable header value.
pub fn header_value() -> impl Strategy<Value = String> {
    "[ -~]{0,60}"
}

/// Generate a list of header pairs small enough for the signed map
/// (the encoder adds four entries of its own).
pub fn header_pairs() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((header_name(), header_value()), 0..(MAX_MAP_ENTRIES - 4))
}

/// Generate a value inside the restricted CBOR model: a non-negative
/// integer, a byte string, or a flat map of string keys.
pub fn cbor_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<u64>().prop_map(|n| Value::Integer(n.into())),
        payload(64).prop_map(Value::Bytes),
        header_value().prop_map(Value::Text),
    ];
    prop_oneof![
        leaf.clone(),
        prop::collection::vec((header_name().prop_map(Value::Text), leaf), 0..=MAX_MAP_ENTRIES)
            .prop_map(Value::Map),
    ]
}
