//! Signatures embedded in the signed document itself.
//!
//! `pretty_signature` splices a `"<key>": [..signatures..]` member in at the
//! split point, so the rest of the document keeps its exact formatting.
//! `parse_pretty_signature` cuts that member back out using the split
//! recorded in the protected headers.

use serde_json::Value;
use trust_canonical::{base64url_encode, detect_indent, to_indented_string};

use crate::errors::JsonSignError;
use crate::header::{ProtectedHeader, SignatureEntry};
use crate::signature::JsonSignature;

impl JsonSignature {
    /// The original document with the signatures added as member `signature_key`.
    pub fn pretty_signature(&self, signature_key: &str) -> Result<Vec<u8>, JsonSignError> {
        if self.signatures.is_empty() {
            return Err(JsonSignError::MissingSignature);
        }
        let payload = self.payload()?;
        let head = payload.get(..self.format_length).ok_or_else(|| {
            JsonSignError::InvalidDocument("format length exceeds payload".to_string())
        })?;
        let signatures = serde_json::to_value(self.sorted_signatures()?)?;
        let key = serde_json::to_string(signature_key)?;

        let mut out = Vec::with_capacity(payload.len() + 1024);
        out.extend_from_slice(head);
        // An empty object has no member to follow.
        if head.last() != Some(&b'{') {
            out.push(b',');
        }
        if self.indent.is_empty() {
            out.extend_from_slice(key.as_bytes());
            out.push(b':');
            out.extend_from_slice(to_indented_string(&signatures, "")?.as_bytes());
        } else {
            // Nested lines sit one level below the member itself.
            let block = to_indented_string(&signatures, &self.indent)?
                .replace('\n', &format!("\n{}", self.indent));
            out.push(b'\n');
            out.extend_from_slice(self.indent.as_bytes());
            out.extend_from_slice(key.as_bytes());
            out.extend_from_slice(b": ");
            out.extend_from_slice(block.as_bytes());
        }
        out.extend_from_slice(&self.format_tail);
        Ok(out)
    }

    /// Recovers a signed document from the output of [`pretty_signature`](Self::pretty_signature).
    pub fn parse_pretty_signature(
        content: &[u8],
        signature_key: &str,
    ) -> Result<Self, JsonSignError> {
        let document: Value = serde_json::from_slice(content)?;
        let blocks = document
            .get(signature_key)
            .ok_or_else(|| JsonSignError::MissingField(signature_key.to_string()))?;
        let entries: Vec<SignatureEntry> = serde_json::from_value(blocks.clone())?;

        let mut split: Option<(usize, Vec<u8>)> = None;
        for entry in &entries {
            let header = ProtectedHeader::decode(&entry.protected)?;
            let current = (header.format_length, header.tail()?);
            match &split {
                Some(first) if *first != current => {
                    return Err(JsonSignError::InvalidProtectedHeader(
                        "signatures disagree on the document split".to_string(),
                    ));
                }
                Some(_) => {}
                None => split = Some(current),
            }
        }
        let (format_length, format_tail) = split.ok_or(JsonSignError::MissingSignature)?;

        let head = content.get(..format_length).ok_or_else(|| {
            JsonSignError::InvalidDocument(format!(
                "format length {format_length} exceeds content length {}",
                content.len()
            ))
        })?;
        let mut original = head.to_vec();
        original.extend_from_slice(&format_tail);

        Ok(Self {
            payload: base64url_encode(&original),
            signatures: entries,
            indent: detect_indent(content),
            format_length,
            format_tail,
        })
    }
}
