//! Key fingerprints derived from a public key's DER encoding.
//!
//! `key_id = group4(base32(sha256(spki_der)[..30]))`: the first 30 digest
//! bytes encode to exactly 48 base32 characters, shown as twelve
//! `:`-separated blocks (`UEV2:PPF2:...:XFKZ`).

use sha2::{Digest, Sha256};

use crate::identifiers::KeyId;

/// Number of digest bytes kept in a key ID.
pub const KEY_ID_HASH_LEN: usize = 30;

const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
const GROUP_LEN: usize = 4;

/// Computes the key ID of a public key from its SubjectPublicKeyInfo DER bytes.
pub fn key_id_from_der(spki_der: &[u8]) -> KeyId {
    let digest = Sha256::digest(spki_der);
    KeyId::from_encoded(key_id_encode(&digest[..KEY_ID_HASH_LEN]))
}

/// Base32-encodes `bytes` and groups the characters into `:`-separated blocks of four.
///
/// When the length is not a multiple of four the remainder stays attached to
/// the last full block without a separator.
pub fn key_id_encode(bytes: &[u8]) -> String {
    let encoded = base32_encode(bytes);
    let full_groups = encoded.len() / GROUP_LEN;
    let mut out = String::with_capacity(encoded.len() + full_groups);
    let mut start = 0;
    for _ in 1..full_groups {
        out.push_str(&encoded[start..start + GROUP_LEN]);
        out.push(':');
        start += GROUP_LEN;
    }
    out.push_str(&encoded[start..]);
    out
}

/// RFC 4648 base32 (upper-case alphabet) without padding.
fn base32_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity((bytes.len() * 8 + 4) / 5);
    let mut buffer: u16 = 0;
    let mut bits = 0u32;
    for byte in bytes {
        buffer = (buffer << 8) | u16::from(*byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(BASE32_ALPHABET[usize::from((buffer >> bits) & 0x1f)] as char);
        }
        buffer &= (1 << bits) - 1;
    }
    if bits > 0 {
        out.push(BASE32_ALPHABET[usize::from((buffer << (5 - bits)) & 0x1f)] as char);
    }
    out
}
