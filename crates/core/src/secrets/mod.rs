//! Secret payload parsing.
//!
//! Secrets are JSON documents stored either as text or as a base64 encoded
//! binary blob.

mod error;

pub use error::{Result, SecretError};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;

/// The raw payload of a secret version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretPayload {
    Text(String),
    Binary(Vec<u8>),
}

/// Parse a secret payload into JSON.
///
/// Binary payloads hold base64 text which is decoded before parsing.
pub fn parse_secret(payload: &SecretPayload) -> Result<Value> {
    match payload {
        SecretPayload::Text(text) => {
            serde_json::from_str(text).map_err(|e| SecretError::InvalidJson(e.to_string()))
        }
        SecretPayload::Binary(bytes) => {
            let trimmed = bytes.trim_ascii();
            let decoded = STANDARD
                .decode(trimmed)
                .map_err(|e| SecretError::InvalidBase64(e.to_string()))?;
            serde_json::from_slice(&decoded).map_err(|e| SecretError::InvalidJson(e.to_string()))
        }
    }
}

/// Cache key for a secret: `{region}:{name}`.
pub fn cache_key(region: &str, name: &str) -> String {
    format!("{region}:{name}")
}

/// Read a string field out of a parsed secret.
pub fn string_field<'a>(secret: &'a Value, field: &'static str) -> Result<&'a str> {
    secret
        .get(field)
        .and_then(Value::as_str)
        .ok_or(SecretError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_text_secret() {
        let payload = SecretPayload::Text(r#"{"username": "svc", "password": "pw"}"#.to_string());
        assert_eq!(
            parse_secret(&payload).unwrap(),
            json!({"username": "svc", "password": "pw"})
        );
    }

    #[test]
    fn test_parse_binary_secret() {
        let encoded = STANDARD.encode(br#"{"key": "AKIA", "secret": "s3cr3t"}"#);
        let payload = SecretPayload::Binary(encoded.into_bytes());
        assert_eq!(
            parse_secret(&payload).unwrap(),
            json!({"key": "AKIA", "secret": "s3cr3t"})
        );
    }

    #[test]
    fn test_parse_binary_secret_with_trailing_newline() {
        let mut encoded = STANDARD.encode(br#"{"a": 1}"#).into_bytes();
        encoded.push(b'\n');
        assert_eq!(
            parse_secret(&SecretPayload::Binary(encoded)).unwrap(),
            json!({"a": 1})
        );
    }

    #[test]
    fn test_invalid_json_text() {
        let result = parse_secret(&SecretPayload::Text("not json".to_string()));
        assert!(matches!(result, Err(SecretError::InvalidJson(_))));
    }

    #[test]
    fn test_invalid_base64_binary() {
        let result = parse_secret(&SecretPayload::Binary(b"%%%".to_vec()));
        assert!(matches!(result, Err(SecretError::InvalidBase64(_))));
    }

    #[test]
    fn test_cache_key() {
        assert_eq!(cache_key("us-east-1", "db/creds"), "us-east-1:db/creds");
    }

    #[test]
    fn test_string_field() {
        let secret = json!({"username": "svc", "port": 5432});
        assert_eq!(string_field(&secret, "username").unwrap(), "svc");
        assert_eq!(
            string_field(&secret, "port"),
            Err(SecretError::MissingField("port"))
        );
        assert_eq!(
            string_field(&secret, "password"),
            Err(SecretError::MissingField("password"))
        );
    }
}
