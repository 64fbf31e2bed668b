//! The attribute-value envelope: a single-key JSON object whose key names the
//! wire type (`{"N": "1"}`, `{"S": "a"}`, ...).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::error::{DecodeError, Result};

/// A tagged attribute value.
///
/// The encoder only ever emits `N`, `BOOL`, `NS`, `SS`, `M` and `S`. The
/// remaining variants exist so that items written by other producers can
/// still be decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub enum AttributeValue {
    /// Number, carried as its decimal string.
    #[serde(rename = "N")]
    N(String),
    #[serde(rename = "BOOL")]
    Bool(bool),
    /// Number set. Elements keep their numeric form here; they are only
    /// stringified when handed to the AWS SDK.
    #[serde(rename = "NS")]
    Ns(Vec<Number>),
    #[serde(rename = "SS")]
    Ss(Vec<String>),
    /// Map. Children are plain JSON values, not nested envelopes.
    #[serde(rename = "M")]
    M(Map<String, Value>),
    #[serde(rename = "S")]
    S(String),
    /// Binary, base64 encoded.
    #[serde(rename = "B")]
    B(String),
    #[serde(rename = "BS")]
    Bs(Vec<String>),
    #[serde(rename = "L")]
    L(Vec<AttributeValue>),
    #[serde(rename = "NULL")]
    Null(bool),
}

impl AttributeValue {
    /// Returns the wire tag of this value.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::N(_) => "N",
            Self::Bool(_) => "BOOL",
            Self::Ns(_) => "NS",
            Self::Ss(_) => "SS",
            Self::M(_) => "M",
            Self::S(_) => "S",
            Self::B(_) => "B",
            Self::Bs(_) => "BS",
            Self::L(_) => "L",
            Self::Null(_) => "NULL",
        }
    }

    /// Parses a JSON envelope such as `{"SS": ["a", "b"]}`.
    pub fn from_json(value: &Value) -> Result<Self> {
        let envelope = value.as_object().ok_or_else(|| {
            DecodeError::MalformedEnvelope(format!("expected an object, found {value}"))
        })?;

        let mut entries = envelope.iter();
        let (tag, payload) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            _ => {
                return Err(DecodeError::MalformedEnvelope(format!(
                    "expected exactly one tag, found {}",
                    envelope.len()
                )))
            }
        };

        match tag.as_str() {
            "N" => match payload {
                Value::String(raw) => Ok(Self::N(raw.clone())),
                Value::Number(n) => Ok(Self::N(n.to_string())),
                other => Err(wrong_payload(tag, "a string", other)),
            },
            "BOOL" => payload
                .as_bool()
                .map(Self::Bool)
                .ok_or_else(|| wrong_payload(tag, "a boolean", payload)),
            "NS" => expect_array(tag, payload)?
                .iter()
                .map(number_element)
                .collect::<Result<Vec<_>>>()
                .map(Self::Ns),
            "SS" => string_list(tag, payload).map(Self::Ss),
            "M" => payload
                .as_object()
                .cloned()
                .map(Self::M)
                .ok_or_else(|| wrong_payload(tag, "an object", payload)),
            "S" => payload
                .as_str()
                .map(|s| Self::S(s.to_string()))
                .ok_or_else(|| wrong_payload(tag, "a string", payload)),
            "B" => payload
                .as_str()
                .map(|s| Self::B(s.to_string()))
                .ok_or_else(|| wrong_payload(tag, "a base64 string", payload)),
            "BS" => string_list(tag, payload).map(Self::Bs),
            "L" => expect_array(tag, payload)?
                .iter()
                .map(Self::from_json)
                .collect::<Result<Vec<_>>>()
                .map(Self::L),
            "NULL" => payload
                .as_bool()
                .map(Self::Null)
                .ok_or_else(|| wrong_payload(tag, "a boolean", payload)),
            other => Err(DecodeError::UnknownTag(other.to_string())),
        }
    }
}

impl TryFrom<Value> for AttributeValue {
    type Error = DecodeError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_json(&value)
    }
}

fn wrong_payload(tag: &str, expected: &str, found: &Value) -> DecodeError {
    DecodeError::MalformedEnvelope(format!("{tag} expects {expected}, found {found}"))
}

fn expect_array<'a>(tag: &str, payload: &'a Value) -> Result<&'a Vec<Value>> {
    payload
        .as_array()
        .ok_or_else(|| wrong_payload(tag, "an array", payload))
}

fn string_list(tag: &str, payload: &Value) -> Result<Vec<String>> {
    expect_array(tag, payload)?
        .iter()
        .map(|element| {
            element
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| wrong_payload(tag, "string elements", element))
        })
        .collect()
}

/// Number set elements arrive either as raw numbers (our own encoder) or as
/// decimal strings (the provider's wire form).
fn number_element(element: &Value) -> Result<Number> {
    match element {
        Value::Number(n) => Ok(n.clone()),
        Value::String(raw) => serde_json::from_str::<Number>(raw.trim())
            .map_err(|_| DecodeError::InvalidNumber(raw.clone())),
        other => Err(wrong_payload("NS", "numeric elements", other)),
    }
}
