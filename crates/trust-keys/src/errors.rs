use thiserror::Error;
use trust_canonical::{CanonicalizationError, DecodeError, ValidationError};

/// Key handling errors.
#[derive(Error, Debug)]
pub enum KeyError {
    /// JWK map is missing a field, carries a malformed value or a mismatched `kid`.
    #[error("invalid JWK: {0}")]
    InvalidJwk(String),
    /// `kty` names a key type other than `EC` or `RSA`.
    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(String),
    /// `crv` names a curve other than P-256, P-384 or P-521.
    #[error("unsupported curve: {0}")]
    UnsupportedCurve(String),
    /// Unknown algorithm token, or a token the key cannot verify with.
    #[error("unsupported signature algorithm: {0}")]
    UnsupportedAlgorithm(String),
    /// Signature does not match the message or is malformed.
    #[error("signature verification failed: {0}")]
    Verification(String),
    /// The crypto provider refused to sign.
    #[error("signing failed: {0}")]
    Signing(String),
    /// PEM/DER material could not be read or written.
    #[error("PEM error: {0}")]
    Pem(String),
    /// Base64url field could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    /// Field failed width or pattern validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    /// Canonical JSON serialization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),
    /// Reading the message stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
