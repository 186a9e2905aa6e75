pub mod api;
pub mod auth;
pub mod booking;
pub mod calendar;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use api::{ApiClient, RequestOptions};
pub use auth::AuthContext;
pub use config::ClientConfig;
pub use error::ApiError;
