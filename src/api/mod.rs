// src/api/mod.rs

pub mod client;
pub mod endpoints;

pub use client::{ApiClient, RequestOptions};
