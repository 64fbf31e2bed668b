//! ApiManager against a local axum server.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::Path;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hdxutils::api::{ApiError, ApiManager};
use hdxutils::secrets::{Result as SecretsResult, SecretSource, SecretsManager};
use hdxutils_core::api::ApiCredentials;
use hdxutils_core::secrets::SecretPayload;
use serde_json::{json, Value};
use tokio::net::TcpListener;

async fn handle(
    Path((module, method)): Path<(String, String)>,
    headers: HeaderMap,
    Json(params): Json<Value>,
) -> Response {
    let expected = format!("Basic {}", STANDARD.encode("svc:pw"));
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);

    if !authorized {
        return (StatusCode::UNAUTHORIZED, "bad credentials").into_response();
    }
    if module == "broken" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }

    Json(json!({"module": module, "method": method, "params": params})).into_response()
}

async fn serve() -> SocketAddr {
    let app = Router::new().route("/api/{module}/{method}", post(handle));
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn secret(addr: SocketAddr, password: &str) -> Value {
    json!({
        "inoa_url": format!("http://{addr}"),
        "inoa_path_api": "/api",
        "username": "svc",
        "password": password
    })
}

fn manager(addr: SocketAddr, password: &str) -> ApiManager {
    ApiManager::new(ApiCredentials::from_secret(&secret(addr, password)).unwrap())
}

#[tokio::test]
async fn call_posts_json_with_basic_auth() {
    let addr = serve().await;

    let response = manager(addr, "pw")
        .call("portfolio", "positions", &json!({"fund": "HASH11"}))
        .await
        .unwrap();

    assert_eq!(
        response,
        json!({"module": "portfolio", "method": "positions", "params": {"fund": "HASH11"}})
    );
}

#[tokio::test]
async fn server_errors_carry_status_and_body() {
    let addr = serve().await;

    let err = manager(addr, "pw")
        .call("broken", "anything", &json!({}))
        .await
        .unwrap_err();

    match err {
        ApiError::ServerError { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected ServerError, got {other:?}"),
    }
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let addr = serve().await;

    let err = manager(addr, "nope")
        .call("portfolio", "positions", &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::ServerError { status: 401, .. }));
}

struct StaticSource {
    secret: Value,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl SecretSource for StaticSource {
    async fn fetch(&self, _name: &str) -> SecretsResult<SecretPayload> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(SecretPayload::Text(self.secret.to_string()))
    }
}

#[tokio::test]
async fn from_secret_reads_url_and_credentials() {
    let addr = serve().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let secrets = SecretsManager::new(
        StaticSource {
            secret: secret(addr, "pw"),
            calls: calls.clone(),
        },
        "us-east-1",
    );

    let api = ApiManager::from_secret(&secrets, "inoa-api").await.unwrap();
    assert_eq!(api.api_root(), format!("http://{addr}/api"));

    let response = api.call("risk", "var", &json!([1, 2])).await.unwrap();
    assert_eq!(response["params"], json!([1, 2]));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
