use serde_json::{Map, Value};
use trust_canonical::{base64url_decode, base64url_encode, KeyId};

use crate::errors::KeyError;

/// JSON Web Key as a JSON object.
pub type JwkMap = Map<String, Value>;

pub(crate) fn required_str<'a>(jwk: &'a JwkMap, field: &str) -> Result<&'a str, KeyError> {
    match jwk.get(field) {
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(KeyError::InvalidJwk(format!("\"{field}\" member is not a string"))),
        None => Err(KeyError::InvalidJwk(format!("missing \"{field}\" member"))),
    }
}

pub(crate) fn required_bytes(jwk: &JwkMap, field: &str) -> Result<Vec<u8>, KeyError> {
    let encoded = required_str(jwk, field)?;
    base64url_decode(encoded)
        .map_err(|err| KeyError::InvalidJwk(format!("\"{field}\" member: {err}")))
}

pub(crate) fn insert_str(jwk: &mut JwkMap, field: &str, value: impl Into<String>) {
    jwk.insert(field.to_string(), Value::String(value.into()));
}

pub(crate) fn insert_bytes(jwk: &mut JwkMap, field: &str, value: &[u8]) {
    insert_str(jwk, field, base64url_encode(value));
}

/// A `kid` member is optional, but when present it must name the key it sits in.
pub(crate) fn check_kid(jwk: &JwkMap, computed: &KeyId) -> Result<(), KeyError> {
    if jwk.contains_key("kid") {
        let declared = required_str(jwk, "kid")?;
        if declared != computed.as_str() {
            return Err(KeyError::InvalidJwk(format!(
                "kid {declared} does not match key material ({computed})"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> JwkMap {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn required_fields_report_their_name() {
        let jwk = map(json!({"x": 3, "y": "AQAB"}));
        let err = required_str(&jwk, "crv").unwrap_err().to_string();
        assert!(err.contains("\"crv\""));
        assert!(required_str(&jwk, "x").is_err());
        assert_eq!(required_bytes(&jwk, "y").unwrap(), vec![1, 0, 1]);
    }

    #[test]
    fn kid_is_checked_only_when_present() {
        let kid = KeyId::parse("ABCD:EFGH").unwrap();
        assert!(check_kid(&map(json!({})), &kid).is_ok());
        assert!(check_kid(&map(json!({"kid": "ABCD:EFGH"})), &kid).is_ok());
        assert!(matches!(
            check_kid(&map(json!({"kid": "ABCD:EFGG"})), &kid),
            Err(KeyError::InvalidJwk(_))
        ));
    }
}
