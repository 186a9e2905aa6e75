// src/auth/mod.rs

pub mod context;
pub mod storage;

pub use context::AuthContext;
pub use storage::{FileStorage, MemoryStorage, Storage};
