//! The seam between advice logic and the model transport.

use async_trait::async_trait;
use serde_json::Value;

use gratia_core::error::{GratiaError, Result};

/// A single prompt sent to the text model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub system_instruction: Option<String>,
    /// When set, the model is asked for `application/json` matching this schema.
    pub response_schema: Option<Value>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_json_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

/// Inline image bytes returned by the image model, base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub data: String,
}

impl GeneratedImage {
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Text and image generation.
///
/// Errors are `GratiaError::RemoteServiceUnavailable`; `quota_exceeded` is set
/// when the model refused for rate or quota reasons.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<String>;

    /// `Ok(None)` when the model answered without an image part.
    async fn generate_image(&self, prompt: &str) -> Result<Option<GeneratedImage>>;
}

/// Stand-in used when no API key is configured; every call fails, so the
/// advice service answers with its fallbacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredGenerator;

#[async_trait]
impl TextGenerator for UnconfiguredGenerator {
    async fn generate(&self, _request: GenerationRequest) -> Result<String> {
        Err(GratiaError::remote("gemini", "API key not configured"))
    }

    async fn generate_image(&self, _prompt: &str) -> Result<Option<GeneratedImage>> {
        Err(GratiaError::remote("gemini", "API key not configured"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_always_fails_without_quota() {
        let err = UnconfiguredGenerator
            .generate(GenerationRequest::new("hello"))
            .await
            .unwrap_err();
        assert!(err.is_remote());
        assert!(!err.is_quota_exceeded());
    }

    #[test]
    fn test_request_builder() {
        let request = GenerationRequest::new("q")
            .with_system_instruction("be kind")
            .with_json_schema(serde_json::json!({"type": "OBJECT"}));
        assert_eq!(request.system_instruction.as_deref(), Some("be kind"));
        assert!(request.response_schema.is_some());
    }
}
