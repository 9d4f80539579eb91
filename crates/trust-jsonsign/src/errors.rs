use thiserror::Error;
use trust_canonical::{CanonicalizationError, DecodeError, ValidationError};
use trust_keys::KeyError;

/// Errors that can occur while building, signing, parsing or verifying a JSON signature.
#[derive(Error, Debug)]
pub enum JsonSignError {
    /// The document cannot be split: no closing brace, or a comma right before it.
    #[error("invalid json content: {0}")]
    InvalidDocument(String),
    /// A required envelope member is absent.
    #[error("missing field: {0}")]
    MissingField(String),
    /// The envelope or document carries no signatures.
    #[error("missing signature")]
    MissingSignature,
    /// A signature header carries no inline public key.
    #[error("missing public key")]
    MissingSigner,
    /// The signature relies on a feature this library refuses to verify.
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(String),
    /// A `protected` member does not decode to a valid protected header.
    #[error("invalid protected header: {0}")]
    InvalidProtectedHeader(String),
    /// Key operation failed, including signature mismatches.
    #[error(transparent)]
    Key(#[from] KeyError),
    /// Base64url member could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    /// JSON could not be parsed or produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Canonical or indented serialization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),
    /// Timestamp or identifier validation failed.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}
