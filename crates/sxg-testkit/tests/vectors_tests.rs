//! Golden-vector and property tests driven by the testkit itself.

use proptest::prelude::*;

use sxg::core::cbor;
use sxg_testkit::{cbor_value, verify_all_vectors, TestFixture};

#[test]
fn test_all_golden_vectors() {
    verify_all_vectors();
}

#[test]
fn test_fixture_produces_a_verifying_pipeline() {
    let fixture = TestFixture::new();
    let response = fixture.html_response("<h1>Hello!</h1>");
    let mut exchange = fixture
        .exchange("https://example.com/hello.html", &response)
        .unwrap();

    let body = exchange.body().unwrap();
    assert_eq!(&body[..8], fixture.config.version.magic());
}

proptest! {
    #[test]
    fn prop_cbor_encoding_deterministic(value in cbor_value()) {
        // Encoding either fails consistently or yields identical bytes.
        let first = cbor::encode(&value);
        let second = cbor::encode(&value);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_cbor_map_header_counts_entries(
        value in cbor_value().prop_filter("maps only", |v| matches!(v, ciborium::value::Value::Map(_)))
    ) {
        let entries = match &value {
            ciborium::value::Value::Map(entries) => entries.len(),
            _ => unreachable!(),
        };
        if let Ok(encoded) = cbor::encode(&value) {
            prop_assert_eq!(encoded[0], 0xa0 | (entries as u8));
        }
    }
}
