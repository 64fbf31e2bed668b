//! Lambda invocation payloads.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Client context forwarded to the invoked function.
///
/// Sent as base64 encoded JSON with all three keys present, `null` when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientContext {
    pub custom: Option<Value>,
    pub env: Option<Value>,
    pub client: Option<Value>,
}

impl ClientContext {
    pub fn with_custom(mut self, custom: Value) -> Self {
        self.custom = Some(custom);
        self
    }

    pub fn with_env(mut self, env: Value) -> Self {
        self.env = Some(env);
        self
    }

    pub fn with_client(mut self, client: Value) -> Self {
        self.client = Some(client);
        self
    }

    /// Encode as the base64 JSON blob expected by the invoke API.
    pub fn to_base64(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_vec(self)?;
        Ok(STANDARD.encode(json))
    }
}

/// Whether the caller waits for the function result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationMode {
    RequestResponse,
    Event,
}

impl InvocationMode {
    pub fn from_asynchronous(asynchronous: bool) -> Self {
        if asynchronous {
            Self::Event
        } else {
            Self::RequestResponse
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RequestResponse => "RequestResponse",
            Self::Event => "Event",
        }
    }
}

/// Request body for an invocation; `{}` when there are no parameters.
pub fn request_payload(params: Option<&Value>) -> Result<Vec<u8>, serde_json::Error> {
    match params {
        Some(params) => serde_json::to_vec(params),
        None => Ok(b"{}".to_vec()),
    }
}

/// Parse the function response. Asynchronous invocations return no body,
/// which is reported as `null`.
pub fn parse_response_payload(bytes: &[u8]) -> Result<Value, serde_json::Error> {
    if bytes.trim_ascii().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes)
}
