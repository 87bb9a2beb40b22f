//! Telemetry components for inkmath: console + rolling-file `tracing` setup.

pub mod logger;

pub use logger::init_logger;
