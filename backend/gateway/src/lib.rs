//! inkmath HTTP API server.
//!
//! Thin routing layer over the analysis core: bearer auth, image decoding,
//! and the response envelope. All parsing/model failures are masked as
//! degraded-but-successful responses per the error policy.

pub mod auth;
pub mod server;

pub use server::{build_router, start_server, AppState};
