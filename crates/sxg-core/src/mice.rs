//! Merkle Integrity Content Encoding (draft-thomson-http-mice-03).
//!
//! The response body is split into fixed-size chunks and re-emitted with a
//! SHA-256 proof interlaced before every chunk but the first. Proofs chain
//! backwards: the proof of the physically-last chunk hashes the chunk alone,
//! and each earlier proof hashes its chunk plus the proof that follows it.
//! The proof of the physically-first chunk is never embedded in the body; it
//! is the root digest a verifier receives out of band via the `digest` header.
//!
//! A verifier can therefore check each chunk as it streams in, because every
//! chunk arrives together with the proof that commits to the entire rest of
//! the body.

use sha2::{Digest as _, Sha256};

use crate::digest::Sha256Digest;

/// Fixed record size of the encoding. The protocol supports other sizes, this
/// implementation does not.
pub const CHUNK_SIZE: usize = 16384;

/// Encode a payload, returning the root digest and the interlaced body.
///
/// Total over every input length. The empty payload is treated as a single
/// empty chunk, so the root digest is `SHA256(0x00)` and the body is just the
/// 8-byte record-size prefix.
pub fn encode(payload: &[u8]) -> (Sha256Digest, Vec<u8>) {
    let chunks: Vec<&[u8]> = if payload.is_empty() {
        vec![payload]
    } else {
        payload.chunks(CHUNK_SIZE).collect()
    };

    // Walk the chunks backwards so each proof can fold in its successor's.
    let mut proofs = vec![Sha256Digest::ZERO; chunks.len()];
    for i in (0..chunks.len()).rev() {
        let mut hasher = Sha256::new();
        hasher.update(chunks[i]);
        if i + 1 == chunks.len() {
            hasher.update([0x00]);
        } else {
            hasher.update(proofs[i + 1].as_bytes());
            hasher.update([0x01]);
        }
        proofs[i] = Sha256Digest(hasher.finalize().into());
    }

    let mut body = Vec::with_capacity(8 + payload.len() + 32 * (chunks.len() - 1));
    body.extend_from_slice(&(CHUNK_SIZE as u64).to_be_bytes());
    body.extend_from_slice(chunks[0]);
    for i in 1..chunks.len() {
        body.extend_from_slice(proofs[i].as_bytes());
        body.extend_from_slice(chunks[i]);
    }

    (proofs[0], body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Re-derive the root digest from an encoded body, walking its interlaced
    /// chunks and proofs the way a verifier would (in reverse).
    fn rederive_root(encoded: &[u8]) -> Sha256Digest {
        assert_eq!(&encoded[..8], &(CHUNK_SIZE as u64).to_be_bytes());
        let mut rest = &encoded[8..];

        // Split into (chunk, embedded proof) pairs; the last chunk has none.
        let mut chunks: Vec<&[u8]> = Vec::new();
        let mut embedded: Vec<&[u8]> = Vec::new();
        loop {
            if rest.len() <= CHUNK_SIZE {
                chunks.push(rest);
                break;
            }
            let (chunk, tail) = rest.split_at(CHUNK_SIZE);
            chunks.push(chunk);
            let (proof, tail) = tail.split_at(32);
            embedded.push(proof);
            rest = tail;
        }

        let mut proof = Sha256Digest::hash(&[chunks[chunks.len() - 1], &[0x00][..]].concat());
        for i in (0..chunks.len() - 1).rev() {
            // Each embedded proof must match the one we recompute.
            assert_eq!(embedded[i], proof.as_bytes());
            proof = Sha256Digest::hash(&[chunks[i], &proof.as_bytes()[..], &[0x01][..]].concat());
        }
        proof
    }

    #[test]
    fn test_single_short_chunk() {
        let (root, body) = encode(b"hello");
        assert_eq!(
            body,
            [&[0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, 0x00][..], &b"hello"[..]].concat()
        );
        // SHA256("hello" || 0x00)
        assert_eq!(
            root.to_hex(),
            "f3aefe62965a91903610f0e23cc8a69d5b87cea6d28e75489b0d2ca02ed7993c"
        );
    }

    #[test]
    fn test_empty_payload_is_one_empty_chunk() {
        let (root, body) = encode(b"");
        assert_eq!(body, (CHUNK_SIZE as u64).to_be_bytes());
        // SHA256(0x00)
        assert_eq!(
            root.to_hex(),
            "6e340b9cffb37a989ca544e6bb780a2c78901d3fb33738768511a30617afa01d"
        );
    }

    #[test]
    fn test_exactly_one_full_chunk_has_no_proofs() {
        let payload = vec![b'a'; CHUNK_SIZE];
        let (root, body) = encode(&payload);
        assert_eq!(body.len(), 8 + CHUNK_SIZE);
        assert_eq!(
            root.to_hex(),
            "5a84faa4bb045024b610d5c553e9eaacb755c3ed76e90836c75785f3fccdbe36"
        );
    }

    #[test]
    fn test_two_chunks_interlace_one_proof() {
        let mut payload = vec![b'a'; CHUNK_SIZE];
        payload.push(b'b');

        let (root, body) = encode(&payload);
        assert_eq!(body.len(), 8 + CHUNK_SIZE + 32 + 1);

        // record || chunk1 || proof(chunk2) || chunk2
        let proof2 = &body[8 + CHUNK_SIZE..8 + CHUNK_SIZE + 32];
        assert_eq!(
            hex::encode(proof2),
            "1e57b933b0a78203e21d41cc4b16d731b255b04058d48a4ac2731f0089312129"
        );
        assert_eq!(*body.last().unwrap(), b'b');

        // root = SHA256(chunk1 || proof2 || 0x01)
        assert_eq!(
            root.to_hex(),
            "bc92b3800c2a428177d0dd2abd00f2c17fcbfb151555327681e5f1c793aaf8b6"
        );
    }

    #[test]
    fn test_rederived_root_matches_three_chunks() {
        let payload = vec![0x5a; CHUNK_SIZE * 2 + 777];
        let (root, body) = encode(&payload);
        assert_eq!(rederive_root(&body), root);
    }

    proptest! {
        #[test]
        fn prop_chain_consistency(payload in proptest::collection::vec(any::<u8>(), 0..(3 * CHUNK_SIZE))) {
            let (root, body) = encode(&payload);
            prop_assert_eq!(rederive_root(&body), root);
        }

        #[test]
        fn prop_body_length(payload in proptest::collection::vec(any::<u8>(), 0..(3 * CHUNK_SIZE))) {
            let (_, body) = encode(&payload);
            let chunks = payload.len().div_ceil(CHUNK_SIZE).max(1);
            prop_assert_eq!(body.len(), 8 + payload.len() + 32 * (chunks - 1));
        }
    }
}
