//! Detached, multi-signer signatures over JSON documents.
//!
//! This crate provides:
//! - Signing a JSON object document with any number of EC or RSA keys
//! - A `{"payload", "signatures"}` envelope for transport ([`JsonSignature::serialize`])
//! - A pretty form that splices the signatures into the document itself
//!   ([`JsonSignature::pretty_signature`])
//! - Verification that returns the signers' public keys
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use trust_jsonsign::JsonSignature;
//! use trust_keys::{Curve, PrivateKey, SignatureSigner};
//!
//! let key = PrivateKey::generate_ec(Curve::P256)?;
//!
//! let mut js = JsonSignature::from_document(&json!({"hello": "123"}))?;
//! js.sign(&key, None)?;
//!
//! let envelope = js.serialize()?;
//! let parsed = JsonSignature::parse_jws(envelope.as_bytes())?;
//! assert_eq!(parsed.verify()?, vec![key.public_key()]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Document split
//!
//! Each signature's protected header records `formatLength` and `formatTail`:
//! the offset just past the document's last member and the bytes after it.
//! Both forms rebuild the exact original bytes from these, so a document
//! keeps its formatting through signing.

#![deny(missing_docs)]

/// Error types for signing and verification.
pub mod errors;
/// Wire types: signature entries and protected headers.
pub mod header;
/// Signatures spliced into the document.
pub mod pretty;
/// The signed document.
pub mod signature;
/// Split point of an object document.
pub mod split;

pub use errors::JsonSignError;
pub use header::{ProtectedHeader, SignatureEntry, SignatureHeader};
pub use signature::{JsonSignature, SignOptions};
pub use split::format_length;
