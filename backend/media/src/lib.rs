//! `inkmath-media` — the image-decoding collaborator.
//!
//! Turns the wire-format data URL into validated image bytes for the model
//! invoker. Nothing here inspects pixels; only the container is checked.

pub mod data_url;
pub mod sniff;

pub use data_url::{parse_data_url, DecodedImage, MediaError};
pub use sniff::sniff_image;
