use anyhow::Result;
use async_trait::async_trait;

/// Trait for hosted multimodal model providers.
///
/// One operation: send a prompt (optionally with an inline image) and get
/// the raw reply text back. The caller treats the provider as a black box;
/// there is no determinism guarantee across identical calls.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Perform a single generation round trip.
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateReply>;
}

/// One prompt + image round trip to a vision model.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub prompt: String,
    /// Inline image payload; text-only requests (quiz generation) leave
    /// this empty.
    pub image: Option<ImagePart>,
}

/// An image attachment, already base64 encoded for the wire.
#[derive(Debug, Clone)]
pub struct ImagePart {
    pub mime_type: String,
    pub data_b64: String,
}

/// Raw reply from a vision model.
#[derive(Debug, Clone)]
pub struct GenerateReply {
    pub text: String,
    pub model: String,
}
