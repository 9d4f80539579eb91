use canonical_json::to_string;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

/// Indentation used for documents produced by this library: three spaces.
pub const DEFAULT_INDENT: &str = "   ";

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug)]
pub enum CanonicalizationError {
    /// The value could not be converted to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The value was expected to be a JSON object.
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
    /// Generic failure.
    #[error("other error: {0}")]
    Other(String),
}

/// Serializes a value as canonical JSON: keys sorted, `,`/`:` separators, no whitespace.
///
/// This is the byte form that is hashed or signed wherever a JWK or protected
/// header is embedded textually.
pub fn to_canonical_string<T: Serialize + ?Sized>(
    value: &T,
) -> Result<String, CanonicalizationError> {
    let value = serde_json::to_value(value)?;
    to_string(&value).map_err(|err| CanonicalizationError::Other(err.to_string()))
}

/// Serializes a value with sorted keys, one member per line and the given indent.
///
/// An empty indent yields the canonical compact form instead.
pub fn to_indented_string<T: Serialize + ?Sized>(
    value: &T,
    indent: &str,
) -> Result<String, CanonicalizationError> {
    if indent.is_empty() {
        return to_canonical_string(value);
    }
    // serde_json::Map is ordered by key, so the round trip through Value sorts members.
    let value = serde_json::to_value(value)?;
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|err| CanonicalizationError::Other(err.to_string()))
}

/// Converts a serializable value into a JSON object map.
pub fn to_object<T: Serialize + ?Sized>(
    value: &T,
) -> Result<Map<String, Value>, CanonicalizationError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(CanonicalizationError::NotAnObject(kind_of(&other))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Detects the indent of a document produced by an indenting serializer.
///
/// A document starting with `{\n` is indented by everything between that
/// newline and the first `"`; any other layout has no detectable indent.
pub fn detect_indent(content: &[u8]) -> String {
    if content.len() > 2 && content[0] == b'{' && content[1] == b'\n' {
        if let Some(quote) = content[2..].iter().position(|b| *b == b'"') {
            return String::from_utf8_lossy(&content[2..2 + quote]).into_owned();
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_form_sorts_and_compacts() {
        let value = json!({"b": 1, "a": {"nested": 2}, "c": [1, "x"]});
        assert_eq!(
            to_canonical_string(&value).unwrap(),
            r#"{"a":{"nested":2},"b":1,"c":[1,"x"]}"#
        );
    }

    #[test]
    fn indented_form_matches_three_space_layout() {
        let value = json!({"hello": "123"});
        assert_eq!(
            to_indented_string(&value, DEFAULT_INDENT).unwrap(),
            "{\n   \"hello\": \"123\"\n}"
        );
    }

    #[test]
    fn indented_form_sorts_nested_members() {
        let value = json!({"z": {"b": true, "a": null}, "y": []});
        assert_eq!(
            to_indented_string(&value, "  ").unwrap(),
            "{\n  \"y\": [],\n  \"z\": {\n    \"a\": null,\n    \"b\": true\n  }\n}"
        );
    }

    #[test]
    fn empty_indent_is_compact() {
        let value = json!({"b": 1, "a": 2});
        assert_eq!(to_indented_string(&value, "").unwrap(), r#"{"a":2,"b":1}"#);
    }

    #[test]
    fn to_object_rejects_non_objects() {
        assert!(to_object(&json!({"a": 1})).is_ok());
        assert!(matches!(
            to_object(&json!([1, 2])),
            Err(CanonicalizationError::NotAnObject("array"))
        ));
    }

    #[test]
    fn detects_indent() {
        assert_eq!(detect_indent(b"{\n   \"hello\": \"123\"\n}"), "   ");
        assert_eq!(detect_indent(b"{\n\t\"a\": 1\n}"), "\t");
        assert_eq!(detect_indent(br#"{"a":1}"#), "");
        assert_eq!(detect_indent(b"{\n}"), "");
    }
}
