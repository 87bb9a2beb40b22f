//! `inkmath-config` — environment-sourced runtime configuration.
//!
//! Provides the typed `Settings` schema, env loading with defaults, and
//! secret redaction for safe startup logging.

pub mod redact;
pub mod schema;

pub use redact::{mask_secret, redacted};
pub use schema::Settings;
