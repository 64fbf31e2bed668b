//! Property tests for the DynamoDB attribute-value codec.

use hdxutils_core::dynamodb::{decode, decode_json, decode_many, encode, DecodeError, Record};
use proptest::prelude::*;
use serde_json::{json, Value};

fn single(key: &str, value: Value) -> Record {
    let mut record = Record::new();
    record.insert(key.to_string(), value);
    record
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        (-1e300f64..1e300f64).prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::from),
    ]
}

fn any_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        scalar(),
        prop::collection::vec(any::<i32>().prop_map(Value::from), 0..4).prop_map(Value::Array),
        prop::collection::vec("[a-z]{1,4}".prop_map(Value::from), 0..4).prop_map(Value::Array),
        prop::collection::btree_map("[a-z]{1,4}", scalar(), 0..3)
            .prop_map(|map| Value::Object(map.into_iter().collect())),
    ]
}

proptest! {
    #[test]
    fn integers_come_back_as_floats(n in any::<i64>()) {
        let decoded = decode(&encode(&single("x", json!(n)))).unwrap();
        prop_assert_eq!(&decoded["x"], &json!(n as f64));
    }

    #[test]
    fn floats_round_trip(f in -1e300f64..1e300f64) {
        let decoded = decode(&encode(&single("x", json!(f)))).unwrap();
        prop_assert_eq!(&decoded["x"], &json!(f));
    }

    #[test]
    fn booleans_round_trip(b in any::<bool>()) {
        let decoded = decode(&encode(&single("x", json!(b)))).unwrap();
        prop_assert_eq!(&decoded["x"], &json!(b));
    }

    #[test]
    fn field_names_are_preserved(
        fields in prop::collection::btree_map("[a-zA-Z_][a-zA-Z0-9_]{0,10}", any_value(), 0..8)
    ) {
        let record: Record = fields.into_iter().collect();

        let encoded = encode(&record);
        let mut encoded_keys: Vec<&String> = encoded.keys().collect();
        encoded_keys.sort();
        let record_keys: Vec<&String> = record.keys().collect();
        prop_assert_eq!(&encoded_keys, &record_keys);

        let decoded = decode(&encoded).unwrap();
        let decoded_keys: Vec<&String> = decoded.keys().collect();
        prop_assert_eq!(decoded_keys, record_keys);
    }

    #[test]
    fn decode_many_is_element_wise(
        a in any::<i32>(),
        b in "[a-z]{0,6}",
    ) {
        let first = encode(&single("n", json!(a)));
        let second = encode(&single("s", json!(b)));

        let many = decode_many(&[first.clone(), second.clone()]).unwrap();
        prop_assert_eq!(many, vec![decode(&first).unwrap(), decode(&second).unwrap()]);
    }
}

#[test]
fn empty_sequence_encodes_and_decodes_as_string_set() {
    let encoded = serde_json::to_value(encode(&single("x", json!([])))).unwrap();
    assert_eq!(encoded["x"], json!({"SS": []}));

    let decoded = decode_json(&json!({"x": {"SS": []}})).unwrap();
    assert_eq!(decoded["x"], json!([]));
}

#[test]
fn numeric_sequence_is_not_stringified() {
    let encoded = serde_json::to_value(encode(&single("x", json!([1, 2, 3])))).unwrap();
    assert_eq!(encoded["x"], json!({"NS": [1, 2, 3]}));
}

#[test]
fn string_sequence_is_string_set() {
    let encoded = serde_json::to_value(encode(&single("x", json!(["a", "b"])))).unwrap();
    assert_eq!(encoded["x"], json!({"SS": ["a", "b"]}));
}

#[test]
fn nested_map_is_not_converted() {
    let encoded = serde_json::to_value(encode(&single("x", json!({"a": 1})))).unwrap();
    assert_eq!(encoded["x"], json!({"M": {"a": 1}}));
}

#[test]
fn unrecognized_tag_fails() {
    let result = decode_json(&json!({"x": {"ZZ": "v"}}));
    assert_eq!(result, Err(DecodeError::UnknownTag("ZZ".to_string())));
}
