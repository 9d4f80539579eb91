//! Split point of a serialized JSON object.
//!
//! A document `{ ...members... \n}` is cut right after its last member:
//! `content[..format_length]` is everything up to and including that member,
//! `content[format_length..]` (the format tail) is the whitespace and closing
//! brace after it. New members can then be spliced in at the split point
//! without touching the bytes on either side.

use crate::errors::JsonSignError;

fn is_json_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

fn last_significant(content: &[u8]) -> Option<usize> {
    content.iter().rposition(|b| !is_json_whitespace(*b))
}

/// Locates the split point of an object document.
///
/// The last non-whitespace byte must be `}`; the last non-whitespace byte before
/// it must not be `,`. Returns the offset one past that byte.
pub fn format_length(content: &[u8]) -> Result<usize, JsonSignError> {
    let close = last_significant(content)
        .filter(|idx| content[*idx] == b'}')
        .ok_or_else(|| JsonSignError::InvalidDocument("missing closing brace".to_string()))?;
    let before = last_significant(&content[..close])
        .ok_or_else(|| JsonSignError::InvalidDocument("missing opening brace".to_string()))?;
    if content[before] == b',' {
        return Err(JsonSignError::InvalidDocument(
            "comma before closing brace".to_string(),
        ));
    }
    Ok(before + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_indented_document_before_newline() {
        let content = b"{\n   \"hello\": \"123\"\n}";
        assert_eq!(format_length(content).unwrap(), 19);
        assert_eq!(&content[19..], b"\n}");
    }

    #[test]
    fn keeps_trailing_whitespace_in_tail() {
        let content = b"{\"a\":1}  \n";
        let length = format_length(content).unwrap();
        assert_eq!(&content[length..], b"}  \n");
    }

    #[test]
    fn empty_object_splits_after_open_brace() {
        assert_eq!(format_length(b"{}").unwrap(), 1);
        assert_eq!(format_length(b"{ \n }").unwrap(), 1);
    }

    #[test]
    fn rejects_missing_brace() {
        let cases: [&[u8]; 5] = [b"", b"   ", b"[1, 2]", b"{\"a\": 1} x", b"}"];
        for content in cases {
            assert!(
                matches!(format_length(content), Err(JsonSignError::InvalidDocument(_))),
                "{:?}",
                String::from_utf8_lossy(content)
            );
        }
    }

    #[test]
    fn rejects_trailing_comma() {
        assert!(matches!(
            format_length(b"{\n   \"a\": 1,\n}"),
            Err(JsonSignError::InvalidDocument(reason)) if reason.contains("comma")
        ));
    }
}
