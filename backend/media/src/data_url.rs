//! Decoding of `data:<mime>;base64,<payload>` image uploads.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

use crate::sniff::sniff_image;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("image payload is missing the data URL delimiter")]
    MissingDelimiter,

    #[error("unsupported image encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("unrecognized image container")]
    UnknownContainer,
}

/// A decoded, validated image blob.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Sniffed container MIME type; the data URL label is not trusted.
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Decode the substring after the first comma of a data URL and validate
/// that the result is a recognized image container.
pub fn parse_data_url(raw: &str) -> Result<DecodedImage, MediaError> {
    let (header, payload) = raw
        .split_once(',')
        .ok_or(MediaError::MissingDelimiter)?;

    if !header.trim_end().ends_with(";base64") {
        return Err(MediaError::UnsupportedEncoding(header.to_string()));
    }

    // Browsers may wrap long data URLs; strip whitespace before decoding.
    let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD.decode(cleaned.as_bytes())?;

    let mime_type = sniff_image(&bytes).ok_or(MediaError::UnknownContainer)?;
    Ok(DecodedImage { mime_type, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 PNG
    const PNG_1X1: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    #[test]
    fn decodes_a_png_data_url() {
        let raw = format!("data:image/png;base64,{PNG_1X1}");
        let image = parse_data_url(&raw).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert!(image.bytes.starts_with(b"\x89PNG"));
    }

    #[test]
    fn sniffed_mime_wins_over_label() {
        let raw = format!("data:image/jpeg;base64,{PNG_1X1}");
        let image = parse_data_url(&raw).unwrap();
        assert_eq!(image.mime_type, "image/png");
    }

    #[test]
    fn tolerates_whitespace_in_payload() {
        let (head, tail) = PNG_1X1.split_at(20);
        let raw = format!("data:image/png;base64,{head}\n{tail}");
        assert!(parse_data_url(&raw).is_ok());
    }

    #[test]
    fn rejects_missing_delimiter() {
        let err = parse_data_url("data:image/png;base64").unwrap_err();
        assert!(matches!(err, MediaError::MissingDelimiter));
    }

    #[test]
    fn rejects_non_base64_encoding() {
        let err = parse_data_url("data:image/png;utf8,abc").unwrap_err();
        assert!(matches!(err, MediaError::UnsupportedEncoding(_)));
    }

    #[test]
    fn rejects_malformed_base64() {
        let err = parse_data_url("data:image/png;base64,!!!not-base64!!!").unwrap_err();
        assert!(matches!(err, MediaError::Base64(_)));
    }

    #[test]
    fn rejects_undetectable_containers() {
        let payload = STANDARD.encode(b"plain text, not an image");
        let raw = format!("data:image/png;base64,{payload}");
        let err = parse_data_url(&raw).unwrap_err();
        assert!(matches!(err, MediaError::UnknownContainer));
    }
}
