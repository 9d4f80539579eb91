//! Signing keys for detached JSON signatures.
//!
//! This crate provides:
//! - EC keys on P-256/P-384/P-521 and RSA keys, as public and private halves
//! - JWK import/export with fixed-width coordinates and canonical marshaling
//! - PEM import (PKCS#8, SEC1, PKCS#1, SubjectPublicKeyInfo) and export
//! - The signature-algorithm registry (`ES256`..`ES512`, `RS256`..`RS512`)
//! - Chunked message input so arbitrarily large messages hash in bounded memory
//!
//! Core invariants:
//! - A key ID depends only on the public half: `kid(private) == kid(private.public_key())`
//! - Key equality compares public numbers only
//! - Verification failures are errors, never a `false` that can be ignored
//!
#![deny(missing_docs)]

/// Signature algorithm and hash registry.
pub mod algorithm;
/// EC keys and per-curve provider calls.
pub mod ec_key;
/// Error types for key operations.
pub mod errors;
/// JWK map helpers.
pub mod jwk;
/// Key traits and the family-dispatching key enums.
pub mod key;
/// Chunked message reader.
pub mod reader;
/// RSA keys.
pub mod rsa_key;

pub use algorithm::{HashId, KeyFamily, SignatureAlgorithm};
pub use ec_key::{Curve, EcPrivateKey, EcPublicKey};
pub use errors::KeyError;
pub use jwk::JwkMap;
pub use key::{JsonWebKey, KeyType, PrivateKey, PublicKey, SignatureSigner, SignatureVerifier};
pub use reader::{hash_reader, ChunkReader, CHUNK_SIZE};
pub use rsa_key::{RsaPrivateKey, RsaPublicKey};
