//! Golden vectors for cross-implementation verification.
//!
//! Every implementation of these encoders must reproduce the exact bytes
//! below: browsers verify them bit-for-bit, so the vectors double as a
//! regression fence around the canonical CBOR rules and the MICE chain.

use ciborium::value::Value;

use sxg_core::{cbor, mice};

/// A single golden test case: an encoder input and its expected output.
pub struct GoldenVector {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: VectorKind,
    /// Expected encoder output, hex.
    pub expected: &'static str,
}

/// Which encoder a vector exercises, with its input.
pub enum VectorKind {
    /// Canonical CBOR encoding of the value.
    Cbor(Value),
    /// MICE root digest for the payload.
    MiceRoot(Vec<u8>),
    /// Full MICE encoded body for the payload.
    MiceBody(Vec<u8>),
}

/// All golden vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    let int = |n: u64| Value::Integer(n.into());

    vec![
        GoldenVector {
            name: "cbor_int_zero",
            description: "Smallest integer, inline in the type byte",
            kind: VectorKind::Cbor(int(0)),
            expected: "00",
        },
        GoldenVector {
            name: "cbor_int_24",
            description: "First integer needing the one-byte marker",
            kind: VectorKind::Cbor(int(24)),
            expected: "1818",
        },
        GoldenVector {
            name: "cbor_int_256",
            description: "First integer needing the two-byte marker",
            kind: VectorKind::Cbor(int(256)),
            expected: "190100",
        },
        GoldenVector {
            name: "cbor_map_length_ordered",
            description: "Map keys ordered by byte length, not lexicographically",
            kind: VectorKind::Cbor(Value::Map(vec![
                (Value::Text("id".into()), int(5)),
                (Value::Text("a".into()), int(1)),
            ])),
            expected: "a241610142696405",
        },
        GoldenVector {
            name: "mice_hello_root",
            description: "Single short chunk: root = SHA256(payload || 0x00)",
            kind: VectorKind::MiceRoot(b"hello".to_vec()),
            expected: "f3aefe62965a91903610f0e23cc8a69d5b87cea6d28e75489b0d2ca02ed7993c",
        },
        GoldenVector {
            name: "mice_hello_body",
            description: "Single short chunk: record size prefix then payload",
            kind: VectorKind::MiceBody(b"hello".to_vec()),
            expected: "000000000000400068656c6c6f",
        },
        GoldenVector {
            name: "mice_empty_root",
            description: "Empty payload is one empty chunk: root = SHA256(0x00)",
            kind: VectorKind::MiceRoot(Vec::new()),
            expected: "6e340b9cffb37a989ca544e6bb780a2c78901d3fb33738768511a30617afa01d",
        },
    ]
}

/// Run a vector's encoder and return the actual output as hex.
pub fn run_vector(vector: &GoldenVector) -> String {
    match &vector.kind {
        VectorKind::Cbor(value) => hex::encode(cbor::encode(value).expect("vector encodes")),
        VectorKind::MiceRoot(payload) => mice::encode(payload).0.to_hex(),
        VectorKind::MiceBody(payload) => hex::encode(mice::encode(payload).1),
    }
}

/// Verify every vector, panicking with the first mismatch.
pub fn verify_all_vectors() {
    for vector in all_vectors() {
        let actual = run_vector(&vector);
        assert_eq!(
            actual, vector.expected,
            "golden vector {} diverged",
            vector.name
        );
    }
}
