use serde_json::Value;
use thiserror::Error;

/// Errors raised while persisting the auth context.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Every call through `ApiClient` fails with one of these.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response. `message` is either the server's own message or the
    /// fixed fallback for the status code.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("could not encode request body: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("invalid request header: {0}")]
    Header(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Builds the error for a failed response from its status and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| extract_message(&json))
            .unwrap_or_else(|| status_message(status));
        ApiError::Status { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Fixed message for a status code when the server did not send one.
pub fn status_message(status: u16) -> String {
    match status {
        401 => "Authentication required. Please log in again.".to_string(),
        403 => "You do not have permission to perform this action.".to_string(),
        404 => "The requested resource was not found.".to_string(),
        500 => "Internal server error. Please try again later.".to_string(),
        502..=504 => "Service temporarily unavailable. Please try again later.".to_string(),
        other => format!("Request failed with status {}.", other),
    }
}

fn extract_message(json: &Value) -> Option<String> {
    for key in ["message", "error"] {
        if let Some(text) = json.get(key).and_then(Value::as_str) {
            if !text.trim().is_empty() {
                return Some(text.to_string());
            }
        }
    }

    match json.get("detail")? {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        // validation errors come back as a list of {loc, msg, type}
        Value::Array(items) => {
            let parts: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("; "))
            }
        }
        _ => None,
    }
}
