//! Encoding primitives shared by trust keys and detached JSON signatures.
//!
//! Everything that ends up as signed or hashed bytes is produced here:
//! unpadded base64url, fixed-width big-endian integers, canonical JSON
//! (sorted keys, compact separators) and the base32 key-ID fingerprint.
//!
#![deny(missing_docs)]

/// Canonical and indented JSON serialization.
pub mod canonicalizer;
/// Base64url and fixed-width integer codecs.
pub mod codec;
/// Validated identifier newtypes.
pub mod identifiers;
/// Key-ID fingerprint derivation.
pub mod key_id;
/// Validation errors used by identifiers and codecs.
pub mod validation;

pub use canonicalizer::{
    detect_indent, to_canonical_string, to_indented_string, to_object, CanonicalizationError,
    DEFAULT_INDENT,
};
pub use codec::{
    base64url_decode, base64url_encode, curve_byte_len, fixed_width_decode, fixed_width_encode,
    trim_leading_zeros, DecodeError,
};
pub use identifiers::{KeyId, Timestamp};
pub use key_id::{key_id_encode, key_id_from_der};
pub use validation::ValidationError;
