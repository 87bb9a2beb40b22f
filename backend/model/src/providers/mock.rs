use anyhow::Result;
use async_trait::async_trait;

use inkmath_core::{GenerateReply, GenerateRequest, VisionModel};

/// A mock vision model that returns canned replies, for tests.
pub struct MockProvider {
    name: String,
    reply: Option<String>,
    fail: bool,
}

impl MockProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reply: None,
            fail: false,
        }
    }

    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = Some(reply.into());
        self
    }

    /// Make every `generate` call fail, simulating an upstream outage.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

#[async_trait]
impl VisionModel for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, _request: &GenerateRequest) -> Result<GenerateReply> {
        if self.fail {
            anyhow::bail!("mock provider failure");
        }
        Ok(GenerateReply {
            text: self
                .reply
                .clone()
                .unwrap_or_else(|| "Mock reply".to_string()),
            model: "mock".to_string(),
        })
    }
}
