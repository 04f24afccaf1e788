//! The outbound/inbound pipeline: model → reflector → codec bytes and back.

use wiremap::{
    prelude::*,
    reflect_model,
    serialize::{SerializeErrorKind, from_bytes_bounded},
};

reflect_model! {
    path = "codec::Car",
    pub struct Car {
        make: String => FieldKind::Text,
        model: String => FieldKind::Text,
        year: i64 => FieldKind::Int64,
        dealership: bool => FieldKind::Bool,
    }
}

#[test]
fn outbound_body_is_json_in_declaration_order() {
    let reflector = Reflector::new();
    let codec = JsonCodec::new();

    let car = Car {
        make: "Honda".to_string(),
        model: "Civic".to_string(),
        year: 1988,
        dealership: true,
    };

    let body = reflector.to_generic(&car).unwrap();
    let bytes = codec.encode_body(&body).unwrap();

    assert_eq!(codec.content_type(), "application/json");
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        r#"{"make":"Honda","model":"Civic","year":1988,"dealership":true}"#
    );
}

#[test]
fn inbound_bytes_decode_into_a_model() {
    let reflector = Reflector::new();
    let codec = JsonCodec::new();

    let bytes = br#"{"make":"Honda","model":"Civic","year":1988,"dealership":true}"#;
    let body = codec.decode_body(bytes).unwrap();
    let car: Car = reflector.from_generic(&body).unwrap();

    assert_eq!(car.year, 1988);
    assert!(car.dealership);
}

#[test]
fn decode_size_limit_is_enforced() {
    let bytes = br#"{"make":"Honda"}"#;

    let err = from_bytes_bounded(bytes, 4).unwrap_err();
    assert_eq!(err.kind(), SerializeErrorKind::DeserializeSizeLimitExceeded);

    let codec = JsonCodec::with_max_body_bytes(4);
    assert!(codec.decode_body(bytes).is_err());

    let roomy = JsonCodec::with_max_body_bytes(1024);
    assert!(roomy.decode_body(bytes).is_ok());
}

#[test]
fn malformed_json_reports_a_deserialize_kind() {
    let codec = JsonCodec::new();

    let err = codec.decode_body(b"{not json").unwrap_err();
    assert_eq!(err.kind(), SerializeErrorKind::Deserialize);
}
