//! Conversions between the codec's attribute values and the AWS SDK's.
//!
//! The SDK wire type is stricter than the codec's envelope: set members are
//! strings, map children are themselves attribute values, and sets may not
//! be empty. Those gaps are closed here, so the codec itself stays shallow.

use std::collections::HashMap;

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue as SdkAttributeValue;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hdxutils_core::dynamodb::{
    decode, decode_many, decode_value, encode, encode_value, AttributeValue, DecodeError,
    EncodedRecord, Record,
};
use serde_json::{Map, Number};

/// An item as the SDK represents it.
pub type SdkItem = HashMap<String, SdkAttributeValue>;

// ============================================================================
// Codec -> SDK
// ============================================================================

/// Convert a codec attribute value into the SDK's attribute value.
///
/// Empty sets are sent as empty lists, which DynamoDB accepts and which
/// decode back to an empty sequence.
pub fn to_sdk_value(value: &AttributeValue) -> Result<SdkAttributeValue, DecodeError> {
    let converted = match value {
        AttributeValue::N(n) => SdkAttributeValue::N(n.clone()),
        AttributeValue::Bool(b) => SdkAttributeValue::Bool(*b),
        AttributeValue::Ns(numbers) if numbers.is_empty() => SdkAttributeValue::L(Vec::new()),
        AttributeValue::Ns(numbers) => {
            SdkAttributeValue::Ns(numbers.iter().map(Number::to_string).collect())
        }
        AttributeValue::Ss(strings) if strings.is_empty() => SdkAttributeValue::L(Vec::new()),
        AttributeValue::Ss(strings) => SdkAttributeValue::Ss(strings.clone()),
        AttributeValue::M(map) => SdkAttributeValue::M(
            map.iter()
                .map(|(key, child)| Ok((key.clone(), to_sdk_value(&encode_value(child))?)))
                .collect::<Result<_, DecodeError>>()?,
        ),
        AttributeValue::S(s) => SdkAttributeValue::S(s.clone()),
        AttributeValue::B(encoded) => SdkAttributeValue::B(decode_blob(encoded)?),
        AttributeValue::Bs(blobs) if blobs.is_empty() => SdkAttributeValue::L(Vec::new()),
        AttributeValue::Bs(blobs) => SdkAttributeValue::Bs(
            blobs
                .iter()
                .map(|encoded| decode_blob(encoded))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::L(items) => SdkAttributeValue::L(
            items
                .iter()
                .map(to_sdk_value)
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::Null(null) => SdkAttributeValue::Null(*null),
    };
    Ok(converted)
}

/// Convert an encoded record into an SDK item.
pub fn encoded_to_item(encoded: &EncodedRecord) -> Result<SdkItem, DecodeError> {
    encoded
        .iter()
        .map(|(key, value)| Ok((key.clone(), to_sdk_value(value)?)))
        .collect()
}

/// Encode a record and convert it into an SDK item.
pub fn record_to_item(record: &Record) -> Result<SdkItem, DecodeError> {
    encoded_to_item(&encode(record))
}

fn decode_blob(encoded: &str) -> Result<Blob, DecodeError> {
    STANDARD
        .decode(encoded)
        .map(Blob::new)
        .map_err(|e| DecodeError::MalformedEnvelope(format!("B is not valid base64: {e}")))
}

// ============================================================================
// SDK -> Codec
// ============================================================================

/// Convert an SDK attribute value into a codec attribute value.
///
/// Map children arrive as nested attribute values and are decoded into plain
/// JSON, so `M` carries native values on the codec side.
pub fn from_sdk_value(value: &SdkAttributeValue) -> Result<AttributeValue, DecodeError> {
    let converted = match value {
        SdkAttributeValue::N(n) => AttributeValue::N(n.clone()),
        SdkAttributeValue::Bool(b) => AttributeValue::Bool(*b),
        SdkAttributeValue::Ns(numbers) => AttributeValue::Ns(
            numbers
                .iter()
                .map(|raw| {
                    serde_json::from_str::<Number>(raw.trim())
                        .map_err(|_| DecodeError::InvalidNumber(raw.clone()))
                })
                .collect::<Result<_, _>>()?,
        ),
        SdkAttributeValue::Ss(strings) => AttributeValue::Ss(strings.clone()),
        SdkAttributeValue::M(map) => AttributeValue::M(
            map.iter()
                .map(|(key, child)| Ok((key.clone(), decode_value(&from_sdk_value(child)?)?)))
                .collect::<Result<Map<_, _>, DecodeError>>()?,
        ),
        SdkAttributeValue::S(s) => AttributeValue::S(s.clone()),
        SdkAttributeValue::B(blob) => AttributeValue::B(STANDARD.encode(blob.as_ref())),
        SdkAttributeValue::Bs(blobs) => AttributeValue::Bs(
            blobs
                .iter()
                .map(|blob| STANDARD.encode(blob.as_ref()))
                .collect(),
        ),
        SdkAttributeValue::L(items) => AttributeValue::L(
            items
                .iter()
                .map(from_sdk_value)
                .collect::<Result<_, _>>()?,
        ),
        SdkAttributeValue::Null(null) => AttributeValue::Null(*null),
        other => return Err(DecodeError::UnknownTag(format!("{other:?}"))),
    };
    Ok(converted)
}

/// Convert an SDK item into an encoded record.
pub fn item_to_encoded(item: &SdkItem) -> Result<EncodedRecord, DecodeError> {
    item.iter()
        .map(|(key, value)| Ok((key.clone(), from_sdk_value(value)?)))
        .collect()
}

/// Decode an SDK item into a record.
pub fn item_to_record(item: &SdkItem) -> Result<Record, DecodeError> {
    decode(&item_to_encoded(item)?)
}

/// Decode a page of SDK items, preserving order.
pub fn items_to_records(items: &[SdkItem]) -> Result<Vec<Record>, DecodeError> {
    let encoded = items
        .iter()
        .map(item_to_encoded)
        .collect::<Result<Vec<_>, _>>()?;
    decode_many(&encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_record_to_item_scalars() {
        let item = record_to_item(&record(json!({
            "id": "fund-1",
            "nav": 10.5,
            "active": true
        })))
        .unwrap();

        assert_eq!(item["id"], SdkAttributeValue::S("fund-1".to_string()));
        assert_eq!(item["nav"], SdkAttributeValue::N("10.5".to_string()));
        assert_eq!(item["active"], SdkAttributeValue::Bool(true));
    }

    #[test]
    fn test_number_set_is_stringified_for_the_sdk() {
        let item = record_to_item(&record(json!({"x": [1, 2.5]}))).unwrap();
        assert_eq!(
            item["x"],
            SdkAttributeValue::Ns(vec!["1".to_string(), "2.5".to_string()])
        );
    }

    #[test]
    fn test_empty_sequence_is_sent_as_empty_list() {
        let item = record_to_item(&record(json!({"x": []}))).unwrap();
        assert_eq!(item["x"], SdkAttributeValue::L(Vec::new()));

        let decoded = item_to_record(&item).unwrap();
        assert_eq!(decoded["x"], json!([]));
    }

    #[test]
    fn test_map_children_are_encoded_for_the_sdk() {
        let item = record_to_item(&record(json!({"meta": {"a": 1, "tags": ["x"]}}))).unwrap();

        let SdkAttributeValue::M(children) = &item["meta"] else {
            panic!("expected a map, got {:?}", item["meta"]);
        };
        assert_eq!(children["a"], SdkAttributeValue::N("1".to_string()));
        assert_eq!(children["tags"], SdkAttributeValue::Ss(vec!["x".to_string()]));
    }

    #[test]
    fn test_item_to_record_decodes_nested_map() {
        let mut nested = HashMap::new();
        nested.insert("a".to_string(), SdkAttributeValue::N("1".to_string()));
        nested.insert("b".to_string(), SdkAttributeValue::S("two".to_string()));

        let mut item = SdkItem::new();
        item.insert("meta".to_string(), SdkAttributeValue::M(nested));

        let decoded = item_to_record(&item).unwrap();
        assert_eq!(decoded["meta"], json!({"a": 1.0, "b": "two"}));
    }

    #[test]
    fn test_item_to_record_provider_types() {
        let mut item = SdkItem::new();
        item.insert("n".to_string(), SdkAttributeValue::N("42".to_string()));
        item.insert(
            "ns".to_string(),
            SdkAttributeValue::Ns(vec!["1".to_string(), "2".to_string()]),
        );
        item.insert("b".to_string(), SdkAttributeValue::B(Blob::new(b"hi".to_vec())));
        item.insert("null".to_string(), SdkAttributeValue::Null(true));
        item.insert(
            "list".to_string(),
            SdkAttributeValue::L(vec![
                SdkAttributeValue::S("a".to_string()),
                SdkAttributeValue::Bool(false),
            ]),
        );

        let decoded = item_to_record(&item).unwrap();

        assert_eq!(decoded["n"], json!(42.0));
        assert_eq!(decoded["ns"], json!([1.0, 2.0]));
        assert_eq!(decoded["b"], json!("aGk="));
        assert_eq!(decoded["null"], Value::Null);
        assert_eq!(decoded["list"], json!(["a", false]));
    }

    #[test]
    fn test_item_to_record_invalid_number() {
        let mut item = SdkItem::new();
        item.insert("n".to_string(), SdkAttributeValue::N("abc".to_string()));
        assert_eq!(
            item_to_record(&item),
            Err(DecodeError::InvalidNumber("abc".to_string()))
        );
    }

    #[test]
    fn test_binary_round_trip_through_sdk() {
        let sdk = to_sdk_value(&AttributeValue::B("aGk=".to_string())).unwrap();
        assert_eq!(sdk, SdkAttributeValue::B(Blob::new(b"hi".to_vec())));
        assert_eq!(
            from_sdk_value(&sdk).unwrap(),
            AttributeValue::B("aGk=".to_string())
        );
    }

    #[test]
    fn test_invalid_base64_is_rejected() {
        let result = to_sdk_value(&AttributeValue::B("%%%".to_string()));
        assert!(matches!(result, Err(DecodeError::MalformedEnvelope(_))));
    }

    #[test]
    fn test_items_to_records_preserves_order() {
        let items: Vec<SdkItem> = ["a", "b", "c"]
            .iter()
            .map(|id| {
                let mut item = SdkItem::new();
                item.insert("id".to_string(), SdkAttributeValue::S(id.to_string()));
                item
            })
            .collect();

        let records = items_to_records(&items).unwrap();
        let ids: Vec<&Value> = records.iter().map(|r| &r["id"]).collect();
        assert_eq!(ids, [&json!("a"), &json!("b"), &json!("c")]);
    }
}
