//! `inkmath-model` — vision model providers behind the `VisionModel` trait.

pub mod providers;

pub use providers::{GeminiProvider, MockProvider};
