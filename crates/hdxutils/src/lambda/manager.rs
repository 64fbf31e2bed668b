//! Lambda manager implementation.

use aws_config::SdkConfig;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::{InvocationType, LogType};
use aws_sdk_lambda::Client;
use hdxutils_core::lambda::{
    parse_response_payload, request_payload, ClientContext, InvocationMode,
};
use serde_json::Value;

use super::error::{map_invoke_error, LambdaError, Result};
use crate::session;

fn invocation_type(mode: InvocationMode) -> InvocationType {
    match mode {
        InvocationMode::RequestResponse => InvocationType::RequestResponse,
        InvocationMode::Event => InvocationType::Event,
    }
}

/// Invokes functions by name with JSON payloads.
#[derive(Debug, Clone)]
pub struct LambdaManager {
    client: Client,
}

impl LambdaManager {
    pub fn new(client: Client) -> Self {
        tracing::info!("Creating instance of LambdaManager");
        Self { client }
    }

    pub fn from_conf(config: &SdkConfig) -> Self {
        Self::new(Client::new(config))
    }

    pub async fn from_env() -> Self {
        Self::from_conf(session::shared_sdk_config().await)
    }

    /// Invokes `function`.
    ///
    /// Asynchronous invocations return as soon as the event is queued and
    /// yield `null`. Synchronous invocations return the parsed response, or
    /// `LambdaError::FunctionError` when the function itself failed.
    pub async fn invoke(
        &self,
        function: &str,
        params: Option<&Value>,
        context: &ClientContext,
        asynchronous: bool,
    ) -> Result<Value> {
        let mode = InvocationMode::from_asynchronous(asynchronous);
        tracing::info!(function, mode = mode.as_str(), "Invoking function");

        let output = self
            .client
            .invoke()
            .function_name(function)
            .invocation_type(invocation_type(mode))
            .log_type(LogType::None)
            .client_context(context.to_base64()?)
            .payload(Blob::new(request_payload(params)?))
            .send()
            .await
            .map_err(|e| map_invoke_error(e, function))?;

        let body = output
            .payload()
            .map(|blob| blob.as_ref())
            .unwrap_or_default();
        let result = parse_response_payload(body)?;

        if let Some(kind) = output.function_error() {
            return Err(LambdaError::FunctionError {
                function: function.to_string(),
                kind: kind.to_string(),
                payload: result,
            });
        }

        tracing::debug!(function, status = output.status_code(), "Function returned");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_lambda::operation::invoke::InvokeOutput;
    use aws_smithy_mocks::{mock, mock_client};
    use serde_json::json;

    #[test]
    fn test_invocation_type_mapping() {
        assert_eq!(
            invocation_type(InvocationMode::from_asynchronous(true)),
            InvocationType::Event
        );
        assert_eq!(
            invocation_type(InvocationMode::from_asynchronous(false)),
            InvocationType::RequestResponse
        );
    }

    #[tokio::test]
    async fn test_invoke_returns_parsed_payload() {
        let invoke = mock!(Client::invoke)
            .match_requests(|req| {
                req.invocation_type() == Some(&InvocationType::RequestResponse)
                    && req.log_type() == Some(&LogType::None)
                    && req.client_context().is_some()
            })
            .then_output(|| {
                InvokeOutput::builder()
                    .status_code(200)
                    .payload(Blob::new(br#"{"nav": 42.1}"#.to_vec()))
                    .build()
            });
        let client = mock_client!(aws_sdk_lambda, [&invoke]);

        let response = LambdaManager::new(client)
            .invoke("pricing", Some(&json!({"day": 1})), &ClientContext::default(), false)
            .await
            .unwrap();

        assert_eq!(response, json!({"nav": 42.1}));
    }

    #[tokio::test]
    async fn test_invoke_async_returns_null() {
        let invoke = mock!(Client::invoke)
            .match_requests(|req| req.invocation_type() == Some(&InvocationType::Event))
            .then_output(|| InvokeOutput::builder().status_code(202).build());
        let client = mock_client!(aws_sdk_lambda, [&invoke]);

        let response = LambdaManager::new(client)
            .invoke("pricing", None, &ClientContext::default(), true)
            .await
            .unwrap();

        assert_eq!(response, Value::Null);
    }

    #[tokio::test]
    async fn test_invoke_function_error() {
        let invoke = mock!(Client::invoke).then_output(|| {
            InvokeOutput::builder()
                .status_code(200)
                .function_error("Unhandled")
                .payload(Blob::new(br#"{"errorMessage": "boom"}"#.to_vec()))
                .build()
        });
        let client = mock_client!(aws_sdk_lambda, [&invoke]);

        let result = LambdaManager::new(client)
            .invoke("pricing", None, &ClientContext::default(), false)
            .await;

        match result {
            Err(LambdaError::FunctionError {
                function,
                kind,
                payload,
            }) => {
                assert_eq!(function, "pricing");
                assert_eq!(kind, "Unhandled");
                assert_eq!(payload, json!({"errorMessage": "boom"}));
            }
            other => panic!("expected FunctionError, got {other:?}"),
        }
    }
}
