use dotenv::dotenv;
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_STORAGE_PATH: &str = ".therapy_auth.json";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub storage_path: PathBuf,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>, storage_path: impl Into<PathBuf>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            storage_path: storage_path.into(),
        }
    }

    /// Reads `THERAPY_API_URL` and `THERAPY_STORAGE_PATH`, loading `.env` first.
    pub fn from_env() -> Self {
        dotenv().ok();

        let api_base_url = std::env::var("THERAPY_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let storage_path = std::env::var("THERAPY_STORAGE_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STORAGE_PATH.to_string());

        Self::new(api_base_url, storage_path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, DEFAULT_STORAGE_PATH)
    }
}
