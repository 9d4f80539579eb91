//! The signed document and its sign/verify/serialize operations.

use std::io::Read;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use trust_canonical::{
    base64url_decode, base64url_encode, detect_indent, to_canonical_string, to_indented_string,
    to_object, Timestamp, DEFAULT_INDENT,
};
use trust_keys::{HashId, JsonWebKey, PublicKey, SignatureAlgorithm, SignatureSigner, SignatureVerifier};

use crate::errors::JsonSignError;
use crate::header::{ProtectedHeader, SignatureEntry, SignatureHeader};
use crate::split::format_length;

/// Options for appending a signature.
#[derive(Debug, Clone, Default)]
pub struct SignOptions {
    /// Unix time (seconds) recorded in the protected header (default: now).
    pub timestamp: Option<i64>,
    /// Hash requested from the key (default: SHA-256). EC keys use their curve's hash.
    pub hash: HashId,
    /// Certificate chain placed in the header (default: none).
    pub chain: Vec<String>,
}

/// A JSON document with zero or more detached signatures.
///
/// The payload is the document's exact bytes; every signature covers
/// `"<protected>.<payload>"` where `protected` records the split point, so the
/// document can travel either as a compact envelope ([`serialize`](Self::serialize))
/// or with the signatures spliced into the document itself
/// ([`pretty_signature`](Self::pretty_signature)).
#[derive(Debug, Clone)]
pub struct JsonSignature {
    pub(crate) payload: String,
    pub(crate) signatures: Vec<SignatureEntry>,
    pub(crate) indent: String,
    pub(crate) format_length: usize,
    pub(crate) format_tail: Vec<u8>,
}

/// `protected || "." || payload`, streamed without concatenating.
fn signing_input<'a>(protected: &'a str, payload: &'a str) -> impl Read + 'a {
    protected
        .as_bytes()
        .chain(&b"."[..])
        .chain(payload.as_bytes())
}

impl JsonSignature {
    pub(crate) fn from_content(
        content: &[u8],
        indent: String,
        signatures: Vec<SignatureEntry>,
    ) -> Result<Self, JsonSignError> {
        let format_length = format_length(content)?;
        Ok(Self {
            payload: base64url_encode(content),
            signatures,
            indent,
            format_length,
            format_tail: content[format_length..].to_vec(),
        })
    }

    /// Starts an unsigned document from a JSON object, serialized with sorted keys and a 3-space indent.
    pub fn from_document<T: Serialize + ?Sized>(content: &T) -> Result<Self, JsonSignError> {
        let object = to_object(content)?;
        let text = to_indented_string(&object, DEFAULT_INDENT)?;
        Self::from_content(text.as_bytes(), DEFAULT_INDENT.to_string(), Vec::new())
    }

    /// Rebuilds a document from its serialized bytes and already-made signature entries.
    ///
    /// The split point is recomputed from `content`; the indent is the one `content` uses.
    pub fn new_json_signature(content: &[u8], signatures: &[Value]) -> Result<Self, JsonSignError> {
        let entries = signatures
            .iter()
            .cloned()
            .map(serde_json::from_value)
            .collect::<Result<Vec<SignatureEntry>, _>>()?;
        Self::from_content(content, detect_indent(content), entries)
    }

    /// Parses a `{"payload": .., "signatures": [..]}` envelope.
    pub fn parse_jws(content: &[u8]) -> Result<Self, JsonSignError> {
        let envelope: Value = serde_json::from_slice(content)?;
        let payload = envelope
            .get("payload")
            .ok_or_else(|| JsonSignError::MissingField("payload".to_string()))?
            .as_str()
            .ok_or_else(|| JsonSignError::InvalidDocument("payload is not a string".to_string()))?;
        let signatures = envelope
            .get("signatures")
            .ok_or_else(|| JsonSignError::MissingField("signatures".to_string()))?
            .as_array()
            .ok_or_else(|| {
                JsonSignError::InvalidDocument("signatures is not an array".to_string())
            })?;
        if signatures.is_empty() {
            return Err(JsonSignError::MissingSignature);
        }
        let raw = base64url_decode(payload)?;
        Self::new_json_signature(&raw, signatures)
    }

    /// Canonical protected header for this document's split, base64url-encoded.
    pub fn protected_header(&self, timestamp: Option<i64>) -> Result<String, JsonSignError> {
        let time = match timestamp {
            Some(seconds) => Timestamp::from_unix_seconds(seconds)?,
            None => Timestamp::now(),
        };
        ProtectedHeader::new(self.format_length, &self.format_tail, time).encode()
    }

    /// The exact bytes a signature with this protected header covers.
    pub fn sign_bytes(&self, protected: &str) -> Vec<u8> {
        format!("{protected}.{}", self.payload).into_bytes()
    }

    /// Appends a SHA-256 signature made with `key` at `timestamp` (default: now).
    pub fn sign<K>(
        &mut self,
        key: &K,
        timestamp: Option<i64>,
    ) -> Result<(Vec<u8>, SignatureAlgorithm), JsonSignError>
    where
        K: SignatureSigner,
        K::Public: Into<PublicKey>,
    {
        let options = SignOptions {
            timestamp,
            ..SignOptions::default()
        };
        self.sign_with_options(key, &options)
    }

    /// Appends a signature made with `key`; earlier signatures are kept.
    pub fn sign_with_options<K>(
        &mut self,
        key: &K,
        options: &SignOptions,
    ) -> Result<(Vec<u8>, SignatureAlgorithm), JsonSignError>
    where
        K: SignatureSigner,
        K::Public: Into<PublicKey>,
    {
        let protected = self.protected_header(options.timestamp)?;
        let (signature, alg) = {
            let mut input = signing_input(&protected, &self.payload);
            key.sign(&mut input, options.hash)?
        };
        let public: PublicKey = key.public_key().into();
        debug!(
            kid = %public.key_id(),
            alg = %alg,
            index = self.signatures.len(),
            "appending signature"
        );
        self.signatures.push(SignatureEntry {
            header: SignatureHeader {
                jwk: Some(public),
                alg: alg.token().to_string(),
                chain: options.chain.clone(),
            },
            signature: base64url_encode(&signature),
            protected,
        });
        Ok((signature, alg))
    }

    /// Verifies every signature and returns the signers' public keys in entry order.
    ///
    /// Fails on the first entry that does not verify; entries carrying a
    /// certificate chain are rejected. A document with no entries fails with
    /// [`JsonSignError::MissingSignature`] rather than returning an empty list.
    pub fn verify(&self) -> Result<Vec<PublicKey>, JsonSignError> {
        if self.signatures.is_empty() {
            return Err(JsonSignError::MissingSignature);
        }
        let mut keys = Vec::with_capacity(self.signatures.len());
        for (index, entry) in self.signatures.iter().enumerate() {
            ProtectedHeader::decode(&entry.protected)?;
            if !entry.header.chain.is_empty() {
                warn!(index, "rejecting signature with certificate chain");
                return Err(JsonSignError::UnsupportedFeature(
                    "certificate chain verification".to_string(),
                ));
            }
            let key = entry.header.jwk.as_ref().ok_or(JsonSignError::MissingSigner)?;
            let signature = base64url_decode(&entry.signature)?;
            let mut input = signing_input(&entry.protected, &self.payload);
            key.verify(&mut input, &entry.header.alg, &signature)?;
            debug!(kid = %key.key_id(), alg = %entry.header.alg, index, "signature verified");
            keys.push(key.clone());
        }
        Ok(keys)
    }

    /// Signature entries ordered by their canonical JSON, the order used on the wire.
    pub(crate) fn sorted_signatures(&self) -> Result<Vec<&SignatureEntry>, JsonSignError> {
        let mut keyed = self
            .signatures
            .iter()
            .map(|entry| Ok((to_canonical_string(entry)?, entry)))
            .collect::<Result<Vec<_>, JsonSignError>>()?;
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(keyed.into_iter().map(|(_, entry)| entry).collect())
    }

    /// Emits the `{"payload": .., "signatures": [..]}` envelope using the document's indent.
    pub fn serialize(&self) -> Result<String, JsonSignError> {
        if self.signatures.is_empty() {
            return Err(JsonSignError::MissingSignature);
        }
        let mut envelope = Map::new();
        envelope.insert("payload".to_string(), Value::String(self.payload.clone()));
        envelope.insert(
            "signatures".to_string(),
            serde_json::to_value(self.sorted_signatures()?)?,
        );
        Ok(to_indented_string(&envelope, &self.indent)?)
    }

    /// Base64url payload as it appears in the envelope.
    pub fn encoded_payload(&self) -> &str {
        &self.payload
    }

    /// The original document bytes.
    pub fn payload(&self) -> Result<Vec<u8>, JsonSignError> {
        Ok(base64url_decode(&self.payload)?)
    }

    /// Signature entries in append order.
    pub fn signatures(&self) -> &[SignatureEntry] {
        &self.signatures
    }

    /// Offset of the split point in the original document.
    pub fn format_length(&self) -> usize {
        self.format_length
    }

    /// Original bytes after the split point.
    pub fn format_tail(&self) -> &[u8] {
        &self.format_tail
    }

    /// Indent detected in (or used for) the document; empty for compact documents.
    pub fn indent(&self) -> &str {
        &self.indent
    }
}
