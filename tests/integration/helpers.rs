//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use reversevibe_api::{AppState, build_app};
use reversevibe_auth::CredentialStore;
use reversevibe_core::config::AppConfig;
use reversevibe_core::types::UserId;
use reversevibe_database::Database;
use reversevibe_database::seed::seed_database;

/// Signing secret of the default configuration.
pub const SECRET: &str = "reversevibe2025";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// State behind the router, for direct store access
    pub state: AppState,
    /// Per-test upload directory
    pub upload_dir: PathBuf,
}

impl TestApp {
    /// Create a new test application over an empty store
    pub async fn new() -> Self {
        let config = test_config();
        let state = AppState::new(config).expect("Failed to build state");
        Self::from_state(state)
    }

    /// Create a test application loaded with the demo data
    pub async fn seeded() -> Self {
        let app = Self::new().await;
        let hasher = app.state.hasher.clone();
        seed_database(&app.state.db, |p| hasher.hash_password(p))
            .await
            .expect("Failed to seed");
        app
    }

    /// Create a test application whose session resolver and login use `store`
    pub async fn with_store(store: Arc<dyn CredentialStore>) -> Self {
        let state = AppState::with_credentials(test_config(), Database::new(), store)
            .expect("Failed to build state");
        Self::from_state(state)
    }

    fn from_state(state: AppState) -> Self {
        let upload_dir = PathBuf::from(&state.config.storage.upload_dir);
        std::fs::create_dir_all(&upload_dir).expect("Failed to create upload dir");
        Self {
            router: build_app(state.clone()),
            state,
            upload_dir,
        }
    }

    /// Register a user with arbitrary fields; returns the user JSON and token
    pub async fn register(&self, fields: Value) -> (Value, String) {
        let response = self.request("POST", "/auth/register", Some(fields), None).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Register failed: {:?}",
            response.body
        );
        let token = response.body["data"]["token"]
            .as_str()
            .expect("No token in register response")
            .to_string();
        (response.body["data"]["user"].clone(), token)
    }

    /// Register an ordinary user named `name`
    pub async fn register_user(&self, name: &str) -> (Value, String) {
        self.register(json!({
            "username": name,
            "email": format!("{name}@test.com"),
            "password": "password123",
        }))
        .await
    }

    /// Login and return the token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/auth/login",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["data"]["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Make a JSON request, sending `token` as a bearer token
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let authorization = token.map(|t| format!("Bearer {t}"));
        self.request_with_authorization(method, path, body, authorization.as_deref())
            .await
    }

    /// Make a JSON request with a raw `Authorization` header value
    pub async fn request_with_authorization(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let body = body
            .map(|b| serde_json::to_vec(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.send(method, path, "application/json", body, authorization)
            .await
    }

    /// Make a request with an arbitrary body and content type
    pub async fn send(
        &self,
        method: &str,
        path: &str,
        content_type: &str,
        body: Vec<u8>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", content_type);

        if let Some(value) = authorization {
            req = req.header("Authorization", value);
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body")
            .to_vec();

        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            bytes,
        }
    }

    /// Id of a stored user looked up by email
    pub async fn user_id(&self, email: &str) -> UserId {
        self.state
            .db
            .users
            .find_by_email(email)
            .await
            .expect("Store lookup failed")
            .expect("No such user")
            .id
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.environment = "test".to_string();
    config.storage.upload_dir = std::env::temp_dir()
        .join(format!("reversevibe-test-{}", UserId::new()))
        .to_string_lossy()
        .into_owned();
    config
}

/// Builds a `multipart/form-data` body; returns the content type and bytes.
///
/// `file` is `(file name, content type, data)`.
pub fn multipart(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> (String, Vec<u8>) {
    let boundary = "reversevibe-test-boundary";
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some((file_name, content_type, data)) = file {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={boundary}"), body)
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body, `Null` when the body is not JSON
    pub body: Value,
    /// Raw body bytes
    pub bytes: Vec<u8>,
}

impl TestResponse {
    /// The `message` field of the body
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}
