//! Promptdeck Core
//!
//! Foundational traits and error types for the promptdeck workspace. This
//! crate has no dependency on application-level code (database, HTTP, CLI).
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `store` - The key-value storage capability (`KeyValueStore`) and the in-memory backend
//! - `proxy` - Proxy configuration shared by the config file and the HTTP client factory

pub mod error;
pub mod proxy;
pub mod store;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Store Contract ─────────────────────────────────────────────────────
pub use store::{get_json, set_json, KeyValueStore, MemoryStore};

// ── Proxy Types ────────────────────────────────────────────────────────
pub use proxy::{ProxyConfig, ProxyProtocol};
