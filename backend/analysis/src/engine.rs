//! The `Analyzer` — one model round trip per request, no retries, no
//! shared mutable state.

use std::sync::Arc;
use std::time::Instant;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use inkmath_core::{
    AnalysisRecord, GenerateRequest, ImagePart, InkError, QuizItem, QuizRequest, VisionModel,
};
use inkmath_media::DecodedImage;

use crate::parse::parse_records;
use crate::prompt::{analysis_prompt, quiz_prompt};
use crate::quiz::{placeholder_quiz_item, validate_quiz_items};
use crate::sanitize::sanitize;

pub struct Analyzer {
    model: Arc<dyn VisionModel>,
}

impl Analyzer {
    pub fn new(model: Arc<dyn VisionModel>) -> Self {
        Self { model }
    }

    /// Analyze an image and normalize the reply into records.
    ///
    /// Only upstream failures surface as errors; an unparseable reply
    /// degrades to fallback records inside `Ok`.
    pub async fn analyze(
        &self,
        image: &DecodedImage,
        vars: &Map<String, Value>,
    ) -> Result<Vec<AnalysisRecord>, InkError> {
        let prompt = analysis_prompt(vars);
        let request = GenerateRequest {
            prompt,
            image: Some(ImagePart {
                mime_type: image.mime_type.to_string(),
                data_b64: STANDARD.encode(&image.bytes),
            }),
        };

        debug!(
            model = self.model.name(),
            image_bytes = image.bytes.len(),
            vars = vars.len(),
            "Requesting analysis"
        );
        let start = Instant::now();

        let reply = self
            .model
            .generate(&request)
            .await
            .map_err(|e| InkError::Upstream {
                provider: self.model.name().to_string(),
                message: e.to_string(),
            })?;

        info!(
            model = %reply.model,
            latency_ms = start.elapsed().as_millis() as u64,
            reply_chars = reply.text.len(),
            "Model replied"
        );

        Ok(parse_records(&sanitize(&reply.text)))
    }

    /// Generate a batch of quiz questions.
    ///
    /// Never fails: any upstream or decode problem yields the single
    /// placeholder item.
    pub async fn generate_quiz(&self, request: &QuizRequest) -> Vec<QuizItem> {
        let prompt = quiz_prompt(
            &request.topic,
            &request.concepts,
            request.number_of_questions,
        );
        let generate = GenerateRequest {
            prompt,
            image: None,
        };

        let reply = match self.model.generate(&generate).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, topic = %request.topic, "Quiz generation failed upstream");
                return vec![placeholder_quiz_item()];
            }
        };

        let sanitized = sanitize(&reply.text);
        let decoded = match serde_json::from_str::<Value>(&sanitized) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, topic = %request.topic, "Quiz reply was not valid JSON");
                return vec![placeholder_quiz_item()];
            }
        };

        let items = validate_quiz_items(&decoded, request.number_of_questions as usize);
        if items.is_empty() {
            return vec![placeholder_quiz_item()];
        }
        items
    }
}
