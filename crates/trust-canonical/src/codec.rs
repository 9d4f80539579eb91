//! JOSE byte encodings: unpadded base64url and fixed-width big-endian integers.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use thiserror::Error;

use crate::validation::ValidationError;

/// URL-safe engine that never emits padding and accepts input with or without it.
const JOSE_BASE64URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Error returned when base64url input cannot be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Unpadded length is `1 (mod 4)`, which no byte string encodes to.
    #[error("invalid base64url length: {0} characters")]
    InvalidLength(usize),
    /// Input contains characters outside the URL-safe alphabet.
    #[error("invalid base64url input: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Encodes bytes as base64url with all trailing `=` padding stripped.
pub fn base64url_encode(data: impl AsRef<[u8]>) -> String {
    JOSE_BASE64URL.encode(data)
}

/// Decodes base64url text, ignoring whitespace and missing padding.
pub fn base64url_decode(data: &str) -> Result<Vec<u8>, DecodeError> {
    let compact: String = data.chars().filter(|c| !c.is_whitespace()).collect();
    let unpadded = compact.trim_end_matches('=');
    if unpadded.len() % 4 == 1 {
        return Err(DecodeError::InvalidLength(unpadded.len()));
    }
    Ok(JOSE_BASE64URL.decode(unpadded)?)
}

/// Strips leading zero bytes, yielding the minimal big-endian form.
///
/// Zero itself is represented by an empty slice.
pub fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

/// Left-pads a big-endian integer with zero bytes to exactly `width` bytes.
///
/// The input may itself carry leading zeros; only its significant bytes must fit.
pub fn fixed_width_encode(integer: &[u8], width: usize) -> Result<Vec<u8>, ValidationError> {
    let significant = trim_leading_zeros(integer);
    if significant.len() > width {
        return Err(ValidationError::OutOfBounds {
            field: "fixed-width integer",
            value: format!("{} bytes > {} bytes", significant.len(), width),
        });
    }
    let mut out = vec![0u8; width - significant.len()];
    out.extend_from_slice(significant);
    Ok(out)
}

/// Checks that an encoded integer is exactly `width` bytes long and returns it.
pub fn fixed_width_decode(bytes: &[u8], width: usize) -> Result<&[u8], ValidationError> {
    if bytes.len() != width {
        return Err(ValidationError::OutOfBounds {
            field: "fixed-width integer",
            value: format!("invalid number of octets: got {}, should be {}", bytes.len(), width),
        });
    }
    Ok(bytes)
}

/// Byte width of a field element for a curve of `bit_size` bits.
pub const fn curve_byte_len(bit_size: usize) -> usize {
    (bit_size + 7) / 8
}
