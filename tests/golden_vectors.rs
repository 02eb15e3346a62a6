//! Golden test vector validation
//!
//! Each vector carries base64-encoded plaintext, key, IV, and the exact blob
//! the codec must produce for them. Vectors pin the wire format; a mismatch
//! means the format changed, not that a test needs updating.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use serde::Deserialize;

use shieldbox::cryptbox;
use shieldbox::key::Key;

#[derive(Debug, Deserialize)]
struct GoldenVector {
    plaintext: String,
    key: String,
    iv: String,
    blob: String,
    comment: String,
}

struct DecodedVector {
    plaintext: Vec<u8>,
    key: Key,
    iv: [u8; cryptbox::IV_LEN],
    blob: Vec<u8>,
    comment: String,
}

fn load_golden_vectors() -> Vec<DecodedVector> {
    let json_data = include_str!("../testdata/golden-vectors.json");
    let vectors: Vec<GoldenVector> =
        serde_json::from_str(json_data).expect("failed to parse golden vectors");

    vectors
        .into_iter()
        .map(|v| {
            let decode = |field: &str, what: &str| {
                BASE64_STANDARD
                    .decode(field)
                    .unwrap_or_else(|e| panic!("bad {} in vector '{}': {}", what, v.comment, e))
            };
            let key_bytes = decode(&v.key, "key");
            let key = String::from_utf8(key_bytes)
                .expect("vector key must be ASCII")
                .parse::<Key>()
                .expect("vector key must be valid");
            let iv: [u8; cryptbox::IV_LEN] = decode(&v.iv, "iv")
                .try_into()
                .expect("vector iv must be 16 bytes");
            DecodedVector {
                plaintext: decode(&v.plaintext, "plaintext"),
                key,
                iv,
                blob: decode(&v.blob, "blob"),
                comment: v.comment,
            }
        })
        .collect()
}

#[test]
fn test_vectors_encrypt_to_exact_blobs() {
    for v in load_golden_vectors() {
        let blob = cryptbox::encrypt_with_iv(&v.plaintext, &v.key, &v.iv);
        assert_eq!(blob, v.blob, "encrypt mismatch: {}", v.comment);
    }
}

#[test]
fn test_vectors_decrypt_to_exact_plaintexts() {
    for v in load_golden_vectors() {
        let plaintext = cryptbox::decrypt(&v.blob, &v.key)
            .unwrap_or_else(|e| panic!("decrypt failed for '{}': {}", v.comment, e));
        assert_eq!(plaintext, v.plaintext, "decrypt mismatch: {}", v.comment);
    }
}

#[test]
fn test_vectors_reject_a_wrong_key() {
    let wrong: Key = "WrongKeyWrongKey".parse().unwrap();
    for v in load_golden_vectors() {
        assert!(
            cryptbox::decrypt(&v.blob, &wrong).is_err(),
            "wrong key accepted for: {}",
            v.comment
        );
    }
}

#[test]
fn test_vector_blob_lengths_follow_the_frame_invariant() {
    for v in load_golden_vectors() {
        let padded = cryptbox::BLOCK_LEN * (v.plaintext.len() / cryptbox::BLOCK_LEN + 1);
        assert_eq!(
            v.blob.len(),
            cryptbox::IV_LEN + padded + cryptbox::DIGEST_HEX_LEN,
            "length mismatch: {}",
            v.comment
        );
    }
}
