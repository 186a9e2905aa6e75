#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use therapy_client::auth::{AuthContext, MemoryStorage, Storage};
use therapy_client::{ApiClient, ClientConfig};

#[derive(Debug, Clone)]
pub enum Reply {
    Json(u16, Value),
    Raw(u16, String),
    /// Sends the request body back with 200.
    Echo,
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Clone, Default)]
struct MockState {
    replies: Arc<Mutex<HashMap<(String, String), Reply>>>,
    recorded: Arc<Mutex<Vec<Recorded>>>,
}

/// Canned-response backend on an ephemeral port. Unknown routes get 404
/// with an empty body.
pub struct MockBackend {
    state: MockState,
    pub base_url: String,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            state,
            base_url: format!("http://{}/api", addr),
        }
    }

    pub fn on(&self, method: &str, path: &str, reply: Reply) -> &Self {
        self.state
            .replies
            .lock()
            .unwrap()
            .insert((method.to_string(), format!("/api{}", path)), reply);
        self
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.state.recorded.lock().unwrap().clone()
    }

    pub fn last(&self) -> Recorded {
        self.recorded().pop().expect("no request recorded")
    }

    pub fn client(&self) -> ApiClient {
        self.client_with_storage(Arc::new(MemoryStorage::new()))
    }

    pub fn client_with_storage(&self, storage: Arc<dyn Storage>) -> ApiClient {
        let auth = Arc::new(AuthContext::hydrate(storage));
        let config = ClientConfig::new(self.base_url.clone(), "unused.json");
        ApiClient::new(&config, auth)
    }
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let recorded = Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body: String::from_utf8_lossy(&body).to_string(),
    };
    state.recorded.lock().unwrap().push(recorded.clone());

    let reply = state
        .replies
        .lock()
        .unwrap()
        .get(&(recorded.method.clone(), recorded.path.clone()))
        .cloned();

    let (status, text) = match reply {
        Some(Reply::Json(status, value)) => (status, value.to_string()),
        Some(Reply::Raw(status, text)) => (status, text),
        Some(Reply::Echo) => (200, recorded.body),
        None => (404, String::new()),
    };
    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        text,
    )
        .into_response()
}
