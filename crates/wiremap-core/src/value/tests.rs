use crate::value::{MapValueError, Number, Value, ValueShape};

// ---- helpers -----------------------------------------------------------

fn v_txt(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn entry(key: &str, value: Value) -> (String, Value) {
    (key.to_string(), value)
}

// ---- map invariants ----------------------------------------------------

#[test]
fn from_map_preserves_insertion_order() {
    let map = Value::from_map(vec![
        entry("zulu", v_txt("z")),
        entry("alpha", v_txt("a")),
        entry("mike", v_txt("m")),
    ])
    .unwrap();

    let keys: Vec<&str> = map
        .as_map()
        .unwrap()
        .iter()
        .map(|(k, _)| k.as_str())
        .collect();

    assert_eq!(keys, vec!["zulu", "alpha", "mike"]);
}

#[test]
fn from_map_rejects_duplicate_keys() {
    let err = Value::from_map(vec![
        entry("a", v_txt("one")),
        entry("b", v_txt("two")),
        entry("a", v_txt("three")),
    ])
    .unwrap_err();

    assert_eq!(
        err,
        MapValueError::DuplicateKey {
            key: "a".to_string(),
            left_index: 0,
            right_index: 2,
        }
    );
}

#[test]
fn get_looks_up_map_entries_only() {
    let map = Value::from_map(vec![entry("name", v_txt("X"))]).unwrap();

    assert_eq!(map.get("name"), Some(&v_txt("X")));
    assert_eq!(map.get("missing"), None);
    assert_eq!(v_txt("scalar").get("name"), None);
}

// ---- numbers -----------------------------------------------------------

#[test]
fn number_equality_crosses_signedness() {
    assert_eq!(Number::Int(1988), Number::Uint(1988));
    assert_eq!(Number::Uint(1988), Number::Int(1988));
    assert_ne!(Number::Int(-1), Number::Uint(1));
    assert_ne!(Number::Int(2), Number::Float(2.0));
}

#[test]
fn number_views() {
    assert_eq!(Number::Uint(7).as_i64(), Some(7));
    assert_eq!(Number::Uint(u64::MAX).as_i64(), None);
    assert_eq!(Number::Int(-7).as_u64(), None);
    assert!(Number::Float(3.0).is_integral_float());
    assert!(!Number::Float(3.5).is_integral_float());
    assert!(!Number::Float(f64::NAN).is_integral_float());
}

#[test]
fn shapes_are_stable() {
    assert_eq!(Value::Null.shape(), ValueShape::Null);
    assert_eq!(Value::Bool(true).shape(), ValueShape::Bool);
    assert_eq!(v_txt("x").shape(), ValueShape::Text);
    assert_eq!(Value::List(vec![]).shape(), ValueShape::List);
    assert_eq!(Value::Map(vec![]).shape(), ValueShape::Map);
    assert_eq!(ValueShape::Map.as_str(), "object");
}

// ---- serde wire --------------------------------------------------------

#[test]
fn json_round_trip_preserves_key_order() {
    let value = Value::from_map(vec![
        entry("make", v_txt("Honda")),
        entry("model", v_txt("Civic")),
        entry("year", Value::from(1988_i64)),
        entry("dealership", Value::Bool(true)),
    ])
    .unwrap();

    let bytes = serde_json::to_vec(&value).unwrap();
    assert_eq!(
        String::from_utf8(bytes.clone()).unwrap(),
        r#"{"make":"Honda","model":"Civic","year":1988,"dealership":true}"#
    );

    let back: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(back.get("make"), Some(&v_txt("Honda")));
    assert_eq!(back.get("year"), Some(&Value::Number(Number::Uint(1988))));
}

#[test]
fn json_decode_rejects_duplicate_keys() {
    let result: Result<Value, _> = serde_json::from_str(r#"{"a":1,"a":2}"#);
    assert!(result.is_err());
}

#[test]
fn json_null_and_nested_shapes() {
    let back: Value = serde_json::from_str(r#"{"a":null,"b":[1,-2,2.5],"c":{"d":"x"}}"#).unwrap();

    assert_eq!(back.get("a"), Some(&Value::Null));
    assert_eq!(
        back.get("b"),
        Some(&Value::List(vec![
            Value::Number(Number::Uint(1)),
            Value::Number(Number::Int(-2)),
            Value::Number(Number::Float(2.5)),
        ]))
    );
    assert_eq!(back.get("c").unwrap().get("d"), Some(&v_txt("x")));
}
