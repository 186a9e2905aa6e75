mod common;

use common::{MockBackend, Reply};
use reqwest::Method;
use serde_json::{json, Value};

use therapy_client::auth::{AuthContext, MemoryStorage, Storage};
use therapy_client::error::StorageError;
use therapy_client::models::{Id, Role, User};
use therapy_client::{ApiClient, ApiError, RequestOptions};

/// Accepts writes but cannot delete, like a file that turned read-only.
#[derive(Default)]
struct StuckStorage(MemoryStorage);

impl Storage for StuckStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.0.set(key, value)
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        )))
    }
}

fn user(role: Role) -> User {
    serde_json::from_value(json!({"id": 1, "email": "jo@example.com", "role": role})).unwrap()
}

#[tokio::test]
async fn json_body_round_trips() {
    let backend = MockBackend::start().await;
    backend.on("POST", "/echo", Reply::Echo);
    let api = backend.client();

    let body = json!({
        "first_name": "Jo",
        "scheduled_date": "2026-04-01",
        "time_slots": ["09:00", "10:30"],
        "nested": {"price": 55.5, "flag": true, "none": null}
    });
    let back: Value = api.post("/echo", &body).await.unwrap();
    assert_eq!(back, body);

    let seen = backend.last();
    assert_eq!(seen.method, "POST");
    assert_eq!(seen.path, "/api/echo");
    assert_eq!(seen.content_type.as_deref(), Some("application/json"));
    assert_eq!(seen.json(), body);
}

#[tokio::test]
async fn bearer_header_follows_auth_context() {
    let backend = MockBackend::start().await;
    backend.on("GET", "/ping", Reply::Json(200, json!({"ok": true})));
    let api = backend.client();

    let _: Value = api.get("/ping").await.unwrap();
    assert_eq!(backend.last().authorization, None);

    api.auth().login(user(Role::Client), "secret-token").unwrap();
    let _: Value = api.get("/ping").await.unwrap();
    assert_eq!(
        backend.last().authorization.as_deref(),
        Some("Bearer secret-token")
    );

    let _: Value = api
        .request("/ping", RequestOptions::new(Method::GET).without_auth())
        .await
        .unwrap();
    assert_eq!(backend.last().authorization, None);
}

#[tokio::test]
async fn empty_success_body_is_null() {
    let backend = MockBackend::start().await;
    backend.on("DELETE", "/admin/users/3", Reply::Raw(204, String::new()));
    backend.on("PUT", "/blank", Reply::Raw(200, "  \n".to_string()));
    let api = backend.client();

    let value = api
        .request_value("/admin/users/3", RequestOptions::new(Method::DELETE))
        .await
        .unwrap();
    assert_eq!(value, Value::Null);

    let _: () = api.put("/blank", &json!({})).await.unwrap();
    let nothing: Option<User> = api.put("/blank", &json!({})).await.unwrap();
    assert!(nothing.is_none());
}

#[tokio::test]
async fn statuses_map_to_documented_messages() {
    let backend = MockBackend::start().await;
    let cases = [
        (401, "Authentication required. Please log in again."),
        (403, "You do not have permission to perform this action."),
        (404, "The requested resource was not found."),
        (500, "Internal server error. Please try again later."),
        (502, "Service temporarily unavailable. Please try again later."),
        (503, "Service temporarily unavailable. Please try again later."),
        (504, "Service temporarily unavailable. Please try again later."),
        (409, "Request failed with status 409."),
    ];
    for (status, _) in cases {
        backend.on(
            "GET",
            &format!("/fail/{}", status),
            Reply::Raw(status, "<html>oops</html>".to_string()),
        );
    }
    let api = backend.client();

    for (status, message) in cases {
        let err = api
            .get::<Value>(&format!("/fail/{}", status))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(status));
        assert_eq!(err.to_string(), message, "status {}", status);
    }
}

#[tokio::test]
async fn json_error_message_is_preferred() {
    let backend = MockBackend::start().await;
    backend.on(
        "POST",
        "/clients/sessions",
        Reply::Json(400, json!({"message": "This slot is no longer available"})),
    );
    let api = backend.client();

    let err = api
        .post::<Value, _>("/clients/sessions", &json!({}))
        .await
        .unwrap_err();
    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "This slot is no longer available");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn rejected_token_logs_out() {
    let backend = MockBackend::start().await;
    backend.on("GET", "/auth/me", Reply::Json(401, json!({"detail": "Token expired"})));
    let api = backend.client();
    api.auth().login(user(Role::Psychologist), "stale").unwrap();

    let err = api.get::<User>("/auth/me").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Token expired");
    assert!(!api.auth().is_authenticated());
    assert!(api.auth().token().is_none());
}

#[tokio::test]
async fn rejected_token_error_survives_storage_failure() {
    let backend = MockBackend::start().await;
    backend.on("GET", "/auth/me", Reply::Raw(401, String::new()));
    let auth = std::sync::Arc::new(AuthContext::new(std::sync::Arc::new(
        StuckStorage::default(),
    )));
    let api = ApiClient::with_http_client(reqwest::Client::new(), &backend.base_url, auth);
    api.auth().login(user(Role::Client), "stale").unwrap();

    let err = api.get::<User>("/auth/me").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Authentication required. Please log in again.");
    assert!(!api.auth().is_authenticated());
}

#[tokio::test]
async fn query_pairs_are_encoded() {
    let backend = MockBackend::start().await;
    backend.on("GET", "/psychologists", Reply::Json(200, json!([])));
    let api = backend.client();

    let doctors = api
        .directory()
        .psychologists(Some("anxiety & stress"), None)
        .await
        .unwrap();
    assert!(doctors.is_empty());
    assert_eq!(
        backend.last().query.as_deref(),
        Some("search=anxiety+%26+stress")
    );

    let _ = api.directory().psychologist(&Id::from(8)).await;
    assert_eq!(backend.last().path, "/api/psychologists/8");
}

#[tokio::test]
async fn network_failure_is_reported() {
    // nothing listens on port 9 of the loopback
    let auth = std::sync::Arc::new(therapy_client::AuthContext::new(std::sync::Arc::new(
        therapy_client::auth::MemoryStorage::new(),
    )));
    let api = therapy_client::ApiClient::new(
        &therapy_client::ClientConfig::new("http://127.0.0.1:9/api", "unused.json"),
        auth,
    );
    let err = api.get::<Value>("/psychologists").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}
