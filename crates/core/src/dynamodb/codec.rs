//! Conversion between dynamically-typed records and attribute-value envelopes.
//!
//! Pure functions, testable without DynamoDB access.

use std::collections::HashMap;

use serde_json::{Map, Number, Value};

use super::attribute::AttributeValue;
use super::error::{DecodeError, Result};

/// A dynamically-typed item: field name to JSON value.
pub type Record = Map<String, Value>;

/// An item in attribute-value form: field name to tagged envelope.
pub type EncodedRecord = HashMap<String, AttributeValue>;

// ============================================================================
// Encoding
// ============================================================================

/// Encode every field of a record. Never fails; values with no dedicated
/// branch are stored as strings.
pub fn encode(record: &Record) -> EncodedRecord {
    record
        .iter()
        .map(|(key, value)| (key.clone(), encode_value(value)))
        .collect()
}

/// Encode a single value.
///
/// Objects are stored under `M` as-is; their children are not encoded.
pub fn encode_value(value: &Value) -> AttributeValue {
    match value {
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Array(items) => encode_sequence(items),
        Value::Object(map) => AttributeValue::M(map.clone()),
        other => AttributeValue::S(stringify(other)),
    }
}

/// A sequence whose first element is numeric and whose remaining elements are
/// all numeric becomes `NS`, elements left numeric. Anything else, including
/// the empty sequence and a numeric head followed by non-numbers, becomes `SS`.
fn encode_sequence(items: &[Value]) -> AttributeValue {
    let numbers: Option<Vec<Number>> = items
        .iter()
        .map(|item| match item {
            Value::Number(n) => Some(n.clone()),
            _ => None,
        })
        .collect();

    match numbers {
        Some(numbers) if !numbers.is_empty() => AttributeValue::Ns(numbers),
        _ => AttributeValue::Ss(items.iter().map(stringify).collect()),
    }
}

/// Canonical string form of a value: strings as themselves, everything else
/// as its JSON text.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode every field of an encoded record.
pub fn decode(item: &EncodedRecord) -> Result<Record> {
    item.iter()
        .map(|(key, value)| Ok((key.clone(), decode_value(value)?)))
        .collect()
}

/// Decode a sequence of encoded records, preserving order.
pub fn decode_many(items: &[EncodedRecord]) -> Result<Vec<Record>> {
    items.iter().map(decode).collect()
}

/// Decode a record given in raw JSON envelope form, e.g.
/// `{"id": {"S": "a"}, "total": {"N": "3"}}`.
pub fn decode_json(item: &Value) -> Result<Record> {
    let fields = item.as_object().ok_or_else(|| {
        DecodeError::MalformedEnvelope(format!("expected an object of envelopes, found {item}"))
    })?;

    fields
        .iter()
        .map(|(key, envelope)| {
            let attribute = AttributeValue::from_json(envelope)?;
            Ok((key.clone(), decode_value(&attribute)?))
        })
        .collect()
}

/// Decode a single attribute value into its native JSON form.
///
/// Numbers always come back as floating point.
pub fn decode_value(value: &AttributeValue) -> Result<Value> {
    match value {
        AttributeValue::N(raw) => parse_number(raw),
        AttributeValue::Bool(b) => Ok(Value::Bool(*b)),
        AttributeValue::Ns(numbers) => numbers
            .iter()
            .map(number_to_float)
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        AttributeValue::Ss(strings) | AttributeValue::Bs(strings) => Ok(Value::Array(
            strings.iter().cloned().map(Value::String).collect(),
        )),
        AttributeValue::M(map) => Ok(Value::Object(map.clone())),
        AttributeValue::S(s) | AttributeValue::B(s) => Ok(Value::String(s.clone())),
        AttributeValue::L(items) => items
            .iter()
            .map(decode_value)
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        AttributeValue::Null(_) => Ok(Value::Null),
    }
}

fn parse_number(raw: &str) -> Result<Value> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| DecodeError::InvalidNumber(raw.to_string()))
}

fn number_to_float(n: &Number) -> Result<Value> {
    n.as_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| DecodeError::InvalidNumber(n.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    fn encode_json(value: Value) -> Value {
        serde_json::to_value(encode(&record(value))).unwrap()
    }

    // ------------------------------------------------------------------------
    // encode
    // ------------------------------------------------------------------------

    #[test]
    fn test_encode_integer_and_float() {
        let encoded = encode_json(json!({"i": 42, "f": 1.5, "neg": -7}));
        assert_eq!(
            encoded,
            json!({"i": {"N": "42"}, "f": {"N": "1.5"}, "neg": {"N": "-7"}})
        );
    }

    #[test]
    fn test_encode_boolean_is_not_a_number() {
        let encoded = encode_json(json!({"yes": true, "no": false}));
        assert_eq!(encoded, json!({"yes": {"BOOL": true}, "no": {"BOOL": false}}));
    }

    #[test]
    fn test_encode_numeric_sequence_keeps_numbers() {
        let encoded = encode_json(json!({"x": [1, 2, 3]}));
        assert_eq!(encoded, json!({"x": {"NS": [1, 2, 3]}}));
    }

    #[test]
    fn test_encode_string_sequence() {
        let encoded = encode_json(json!({"x": ["a", "b"]}));
        assert_eq!(encoded, json!({"x": {"SS": ["a", "b"]}}));
    }

    #[test]
    fn test_encode_empty_sequence_is_string_set() {
        let encoded = encode_json(json!({"x": []}));
        assert_eq!(encoded, json!({"x": {"SS": []}}));
    }

    #[test]
    fn test_encode_non_numeric_first_element_stringifies_all() {
        let encoded = encode_json(json!({"x": [true, 2, "c"]}));
        assert_eq!(encoded, json!({"x": {"SS": ["true", "2", "c"]}}));
    }

    #[test]
    fn test_encode_mixed_sequence_starting_with_number_is_string_set() {
        let encoded = encode_json(json!({"x": [1, "b"]}));
        assert_eq!(encoded, json!({"x": {"SS": ["1", "b"]}}));
    }

    #[test]
    fn test_encode_map_is_shallow() {
        let encoded = encode_json(json!({"x": {"a": 1, "b": {"c": [1]}}}));
        assert_eq!(encoded, json!({"x": {"M": {"a": 1, "b": {"c": [1]}}}}));
    }

    #[test]
    fn test_encode_string_and_null_fall_back_to_string() {
        let encoded = encode_json(json!({"s": "hello", "n": null}));
        assert_eq!(encoded, json!({"s": {"S": "hello"}, "n": {"S": "null"}}));
    }

    // ------------------------------------------------------------------------
    // decode
    // ------------------------------------------------------------------------

    #[test]
    fn test_decode_number_becomes_float() {
        let decoded = decode_json(&json!({"x": {"N": "3"}})).unwrap();
        assert_eq!(decoded["x"], json!(3.0));
        assert!(decoded["x"].is_f64());
    }

    #[test]
    fn test_decode_invalid_number() {
        let result = decode_json(&json!({"x": {"N": "three"}}));
        assert_eq!(result, Err(DecodeError::InvalidNumber("three".to_string())));
    }

    #[test]
    fn test_decode_non_finite_number_is_rejected() {
        let result = decode_json(&json!({"x": {"N": "NaN"}}));
        assert_eq!(result, Err(DecodeError::InvalidNumber("NaN".to_string())));
    }

    #[test]
    fn test_decode_empty_string_set() {
        let decoded = decode_json(&json!({"x": {"SS": []}})).unwrap();
        assert_eq!(decoded["x"], json!([]));
    }

    #[test]
    fn test_decode_number_set_from_wire_strings() {
        let decoded = decode_json(&json!({"x": {"NS": ["1", "2.5"]}})).unwrap();
        assert_eq!(decoded["x"], json!([1.0, 2.5]));
    }

    #[test]
    fn test_decode_provider_only_tags() {
        let decoded = decode_json(&json!({
            "bin": {"B": "aGk="},
            "nothing": {"NULL": true},
            "list": {"L": [{"S": "a"}, {"N": "2"}, {"BOOL": true}]}
        }))
        .unwrap();

        assert_eq!(decoded["bin"], json!("aGk="));
        assert_eq!(decoded["nothing"], Value::Null);
        assert_eq!(decoded["list"], json!(["a", 2.0, true]));
    }

    #[test]
    fn test_decode_map_passes_through() {
        let decoded = decode_json(&json!({"x": {"M": {"a": 1}}})).unwrap();
        assert_eq!(decoded["x"], json!({"a": 1}));
    }

    #[test]
    fn test_decode_unknown_tag() {
        let result = decode_json(&json!({"x": {"ZZ": "v"}}));
        assert_eq!(result, Err(DecodeError::UnknownTag("ZZ".to_string())));
    }

    #[test]
    fn test_decode_json_requires_object() {
        let result = decode_json(&json!([1, 2]));
        assert!(matches!(result, Err(DecodeError::MalformedEnvelope(_))));
    }

    #[test]
    fn test_decode_many_preserves_order() {
        let first = encode(&record(json!({"id": "a", "n": 1})));
        let second = encode(&record(json!({"id": "b", "n": 2})));

        let decoded = decode_many(&[first.clone(), second.clone()]).unwrap();

        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0], decode(&first).unwrap());
        assert_eq!(decoded[1], decode(&second).unwrap());
        assert_eq!(decoded[1]["id"], json!("b"));
    }

    #[test]
    fn test_decode_many_stops_at_first_error() {
        let good = encode(&record(json!({"n": 1})));
        let mut bad = EncodedRecord::new();
        bad.insert("n".to_string(), AttributeValue::N("x".to_string()));

        assert!(decode_many(&[good, bad]).is_err());
    }

    #[test]
    fn test_decode_many_empty() {
        assert_eq!(decode_many(&[]).unwrap(), Vec::<Record>::new());
    }

    // ------------------------------------------------------------------------
    // round trip
    // ------------------------------------------------------------------------

    #[test]
    fn test_round_trip_mixed_record() {
        let original = record(json!({
            "id": "user-1",
            "age": 30,
            "active": true,
            "scores": [1, 2],
            "tags": ["x"],
            "empty": [],
            "meta": {"k": "v"}
        }));

        let decoded = decode(&encode(&original)).unwrap();

        assert_eq!(
            Value::Object(decoded),
            json!({
                "id": "user-1",
                "age": 30.0,
                "active": true,
                "scores": [1.0, 2.0],
                "tags": ["x"],
                "empty": [],
                "meta": {"k": "v"}
            })
        );
    }

    #[test]
    fn test_stringify() {
        assert_eq!(stringify(&json!("abc")), "abc");
        assert_eq!(stringify(&json!(12)), "12");
        assert_eq!(stringify(&json!(false)), "false");
        assert_eq!(stringify(&Value::Null), "null");
    }
}
