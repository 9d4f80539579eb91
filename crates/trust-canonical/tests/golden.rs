use proptest::prelude::*;
use serde_json::json;
use trust_canonical::{
    base64url_decode, base64url_encode, detect_indent, fixed_width_decode, fixed_width_encode,
    key_id_encode, key_id_from_der, to_canonical_string, to_indented_string, KeyId, Timestamp,
    DEFAULT_INDENT,
};

#[test]
fn protected_header_serializes_to_golden_base64() {
    let header = json!({
        "formatLength": 19,
        "formatTail": base64url_encode(b"\n}"),
        "time": Timestamp::from_unix_seconds(1478423072).unwrap(),
    });

    let canonical = to_canonical_string(&header).unwrap();
    assert_eq!(
        canonical,
        r#"{"formatLength":19,"formatTail":"Cn0","time":"2016-11-06T09:04:32Z"}"#
    );
    assert_eq!(
        base64url_encode(canonical),
        "eyJmb3JtYXRMZW5ndGgiOjE5LCJmb3JtYXRUYWlsIjoiQ24wIiwidGltZSI6IjIwMTYtMTEtMDZUMDk6MDQ6MzJaIn0"
    );
}

#[test]
fn indented_document_matches_golden_payload() {
    let document = json!({"hello": "123"});
    let indented = to_indented_string(&document, DEFAULT_INDENT).unwrap();

    assert_eq!(base64url_encode(&indented), "ewogICAiaGVsbG8iOiAiMTIzIgp9");
    assert_eq!(detect_indent(indented.as_bytes()), DEFAULT_INDENT);
}

#[test]
fn jwk_coordinate_decodes_to_curve_width() {
    let x = base64url_decode("4pBqYlc5IU5pJh5AOvijtEccStyJu0dSAiz4OlDGGFk").unwrap();
    assert_eq!(fixed_width_decode(&x, 32).unwrap().len(), 32);
    assert!(fixed_width_decode(&x, 48).is_err());
}

#[test]
fn rsa_exponent_round_trips_through_minimal_form() {
    let e = fixed_width_encode(&[0, 0, 1, 0, 1], 3).unwrap();
    assert_eq!(base64url_encode(&e), "AQAB");
}

const EC_PUBLIC_SPKI_HEX: &str = "3059301306072a8648ce3d020106082a8648ce3d03010703420004e2906a625739214e69261e403af8a3b4471c4adc89bb4752022cf83a50c61859393ef4a54a1fb0a94712ca9d594523f9917ecf96ea1fef683932789aa05acb2a";
const EC_PUBLIC_SPKI_SHA256_HEX: &str =
    "a12ba7bcbae0d94b6705b3ad4f7fef0fef4918a00b28668a628fc4bb95597d58";
const EC_KID: &str = "UEV2:PPF2:4DMU:WZYF:WOWU:677P:B7XU:SGFA:BMUG:NCTC:R7CL:XFKZ";

#[test]
fn key_id_matches_fixture_key() {
    let der = hex::decode(EC_PUBLIC_SPKI_HEX).unwrap();
    assert_eq!(key_id_from_der(&der).as_str(), EC_KID);

    let digest = hex::decode(EC_PUBLIC_SPKI_SHA256_HEX).unwrap();
    assert_eq!(key_id_encode(&digest[..30]), EC_KID);
}

proptest! {
    #[test]
    fn base64url_round_trips(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        let encoded = base64url_encode(&data);
        prop_assert!(!encoded.contains('='));
        prop_assert_eq!(base64url_decode(&encoded).unwrap(), data);
    }

    #[test]
    fn key_id_encoding_always_parses(data in proptest::collection::vec(any::<u8>(), 1..64)) {
        let encoded = key_id_encode(&data);
        prop_assert!(KeyId::parse(encoded).is_ok());
    }

    #[test]
    fn canonical_output_is_stable_under_reparse(a in any::<i64>(), b in "[a-z]{0,12}") {
        let value = json!({"z": a, "a": b, "m": [a, {"y": 1, "x": 2}]});
        let first = to_canonical_string(&value).unwrap();
        let reparsed: serde_json::Value = serde_json::from_str(&first).unwrap();
        prop_assert_eq!(to_canonical_string(&reparsed).unwrap(), first);
    }
}
