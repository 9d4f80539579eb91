use serde::{Deserialize, Serialize};
use trust_canonical::{base64url_decode, base64url_encode, to_canonical_string, Timestamp};
use trust_keys::PublicKey;

use crate::errors::JsonSignError;

/// Per-signature header naming the signer and algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureHeader {
    /// Inline public key of the signer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jwk: Option<PublicKey>,
    /// Algorithm token, e.g. `ES256`.
    pub alg: String,
    /// Certificate chain; never verified, its presence fails verification.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chain: Vec<String>,
}

/// One detached signature over the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureEntry {
    /// Unprotected header.
    pub header: SignatureHeader,
    /// Base64url signature value.
    pub signature: String,
    /// Base64url canonical [`ProtectedHeader`].
    pub protected: String,
}

/// Signed metadata recording how to rebuild the original document bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectedHeader {
    /// Byte offset of the split point in the original document.
    pub format_length: usize,
    /// Base64url of the original bytes from `format_length` to the end.
    pub format_tail: String,
    /// Signing time, UTC with second precision.
    pub time: Timestamp,
}

impl ProtectedHeader {
    /// Header for a split at `format_length` with raw trailing bytes `tail`.
    pub fn new(format_length: usize, tail: &[u8], time: Timestamp) -> Self {
        Self {
            format_length,
            format_tail: base64url_encode(tail),
            time,
        }
    }

    /// Canonical JSON, base64url-encoded: the `protected` member of an entry.
    pub fn encode(&self) -> Result<String, JsonSignError> {
        Ok(base64url_encode(to_canonical_string(self)?))
    }

    /// Decodes a `protected` member.
    pub fn decode(protected: &str) -> Result<Self, JsonSignError> {
        let invalid = |reason: String| JsonSignError::InvalidProtectedHeader(reason);
        let bytes = base64url_decode(protected).map_err(|err| invalid(err.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|err| invalid(err.to_string()))
    }

    /// Raw trailing bytes.
    pub fn tail(&self) -> Result<Vec<u8>, JsonSignError> {
        base64url_decode(&self.format_tail)
            .map_err(|err| JsonSignError::InvalidProtectedHeader(format!("formatTail: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROTECTED: &str =
        "eyJmb3JtYXRMZW5ndGgiOjE5LCJmb3JtYXRUYWlsIjoiQ24wIiwidGltZSI6IjIwMTYtMTEtMDZUMDk6MDQ6MzJaIn0";

    #[test]
    fn encodes_golden_protected_header() {
        let time = Timestamp::from_unix_seconds(1478423072).unwrap();
        let header = ProtectedHeader::new(19, b"\n}", time);
        assert_eq!(header.encode().unwrap(), PROTECTED);
    }

    #[test]
    fn decodes_golden_protected_header() {
        let header = ProtectedHeader::decode(PROTECTED).unwrap();
        assert_eq!(header.format_length, 19);
        assert_eq!(header.tail().unwrap(), b"\n}");
        assert_eq!(header.time.as_str(), "2016-11-06T09:04:32Z");
    }

    #[test]
    fn rejects_malformed_protected_header() {
        for protected in ["e", "bm90IGpzb24", "eyJmb3JtYXRMZW5ndGgiOjE5fQ"] {
            assert!(matches!(
                ProtectedHeader::decode(protected),
                Err(JsonSignError::InvalidProtectedHeader(_))
            ));
        }
    }

    #[test]
    fn empty_chain_is_omitted() {
        let header = SignatureHeader {
            jwk: None,
            alg: "ES256".into(),
            chain: Vec::new(),
        };
        assert_eq!(to_canonical_string(&header).unwrap(), r#"{"alg":"ES256"}"#);
        let parsed: SignatureHeader = serde_json::from_str(r#"{"alg":"RS256"}"#).unwrap();
        assert!(parsed.jwk.is_none());
        assert!(parsed.chain.is_empty());
    }
}
