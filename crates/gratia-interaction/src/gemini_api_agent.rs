//! GeminiApiAgent - Direct REST API implementation for Gemini.
//!
//! Text requests go to the configured text model, image requests to the image
//! model. The API key comes from `[gemini] api_key` or `GEMINI_API_KEY`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use gratia_core::config::{DEFAULT_GEMINI_IMAGE_MODEL, DEFAULT_GEMINI_MODEL, GeminiSettings};
use gratia_core::error::{GratiaError, Result};

use crate::generator::{GeneratedImage, GenerationRequest, TextGenerator};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const SERVICE: &str = "gemini";

/// Agent implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    model: String,
    image_model: String,
}

impl GeminiApiAgent {
    /// Creates a new agent with the provided API key and text model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            image_model: DEFAULT_GEMINI_IMAGE_MODEL.to_string(),
        }
    }

    /// Builds an agent from the `[gemini]` config section.
    ///
    /// Fails with a `Config` error when no API key is configured.
    pub fn from_settings(settings: &GeminiSettings) -> Result<Self> {
        let api_key = settings
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GratiaError::config("Gemini API key is not configured"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| GratiaError::config(format!("Failed to build HTTP client: {e}")))?;

        let model: &str = if settings.model.is_empty() {
            DEFAULT_GEMINI_MODEL
        } else {
            &settings.model
        };

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model: model.to_string(),
            image_model: settings.image_model.clone(),
        })
    }

    /// Overrides the text model after construction.
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_request(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            BASE_URL,
            api_key = self.api_key
        );

        tracing::debug!(model = %model, "sending Gemini request");
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                GratiaError::remote(SERVICE, format!("Gemini API request failed: {err}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            let err = map_http_error(status, body_text);
            tracing::warn!(model = %model, status = status.as_u16(), error = %err, "Gemini request rejected");
            return Err(err);
        }

        response.json().await.map_err(|err| {
            GratiaError::remote(SERVICE, format!("Failed to parse Gemini response: {err}"))
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiApiAgent {
    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        let contents = vec![Content::user_text(request.prompt)];

        let system_instruction = request.system_instruction.map(|text| Content {
            role: "system".to_string(),
            parts: vec![Part::Text { text }],
        });

        let generation_config = request.response_schema.map(|schema| GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: schema,
        });

        let body = GenerateContentRequest {
            contents,
            system_instruction,
            generation_config,
        };
        let parsed = self.send_request(&self.model, &body).await?;
        extract_text_response(parsed)
    }

    async fn generate_image(&self, prompt: &str) -> Result<Option<GeneratedImage>> {
        let body = GenerateContentRequest {
            contents: vec![Content::user_text(prompt.to_string())],
            system_instruction: None,
            generation_config: None,
        };
        let parsed = self.send_request(&self.image_model, &body).await?;
        Ok(extract_image_response(parsed))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

impl Content {
    fn user_text(text: String) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part::Text { text }],
        }
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartResponse {
    text: Option<String>,
    inline_data: Option<InlineDataResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataResponse {
    mime_type: Option<String>,
    data: String,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    code: Option<i32>,
    message: Option<String>,
    status: Option<String>,
}

fn first_parts(response: GenerateContentResponse) -> Vec<PartResponse> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .unwrap_or_default()
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String> {
    first_parts(response)
        .into_iter()
        .find_map(|part| part.text.filter(|text| !text.trim().is_empty()))
        .ok_or_else(|| {
            GratiaError::remote(SERVICE, "Gemini API returned no text in the response candidates")
        })
}

fn extract_image_response(response: GenerateContentResponse) -> Option<GeneratedImage> {
    first_parts(response).into_iter().find_map(|part| {
        part.inline_data.map(|inline| GeneratedImage {
            mime_type: inline.mime_type.unwrap_or_else(|| "image/png".to_string()),
            data: inline.data,
        })
    })
}

fn map_http_error(status: StatusCode, body: String) -> GratiaError {
    let mut exhausted = status == StatusCode::TOO_MANY_REQUESTS;
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            exhausted |= status_text == "RESOURCE_EXHAUSTED";
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let message = format!("HTTP {}: {message}", status.as_u16());
    if exhausted {
        GratiaError::quota_exceeded(SERVICE, message)
    } else {
        GratiaError::remote(SERVICE, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_extract_text_response() {
        let parsed = response(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Rest well."}]}}]}"#,
        );
        assert_eq!(extract_text_response(parsed).unwrap(), "Rest well.");
    }

    #[test]
    fn test_empty_text_is_remote_error() {
        let parsed = response(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#);
        assert!(extract_text_response(parsed).unwrap_err().is_remote());
        assert!(extract_text_response(response("{}")).is_err());
    }

    #[test]
    fn test_extract_image_response() {
        let parsed = response(
            r#"{"candidates":[{"content":{"parts":[
                {"text":"Here is your dish"},
                {"inlineData":{"mimeType":"image/jpeg","data":"QUJD"}}
            ]}}]}"#,
        );
        let image = extract_image_response(parsed).unwrap();
        assert_eq!(image.to_data_url(), "data:image/jpeg;base64,QUJD");

        let text_only = response(r#"{"candidates":[{"content":{"parts":[{"text":"no"}]}}]}"#);
        assert!(extract_image_response(text_only).is_none());
    }

    #[test]
    fn test_map_http_error_detects_quota() {
        let err = map_http_error(StatusCode::TOO_MANY_REQUESTS, "slow down".into());
        assert!(err.is_quota_exceeded());

        let body = r#"{"error":{"code":400,"message":"Quota","status":"RESOURCE_EXHAUSTED"}}"#;
        let err = map_http_error(StatusCode::BAD_REQUEST, body.into());
        assert!(err.is_quota_exceeded());
        assert!(err.to_string().contains("RESOURCE_EXHAUSTED: Quota"));
    }

    #[test]
    fn test_map_http_error_other_failures() {
        let body = r#"{"error":{"code":500,"message":"boom","status":"INTERNAL"}}"#;
        let err = map_http_error(StatusCode::INTERNAL_SERVER_ERROR, body.into());
        assert!(err.is_remote());
        assert!(!err.is_quota_exceeded());
    }

    #[test]
    fn test_request_serialization() {
        let body = GenerateContentRequest {
            contents: vec![Content::user_text("hi".into())],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".into(),
                response_schema: serde_json::json!({"type": "OBJECT"}),
            }),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
        assert!(json.get("systemInstruction").is_none());
    }

    #[test]
    fn test_from_settings_requires_key() {
        let settings = GeminiSettings::default();
        assert!(matches!(
            GeminiApiAgent::from_settings(&settings),
            Err(GratiaError::Config(_))
        ));

        let settings = GeminiSettings {
            api_key: Some("key".into()),
            ..GeminiSettings::default()
        };
        let agent = GeminiApiAgent::from_settings(&settings).unwrap();
        assert_eq!(agent.model(), DEFAULT_GEMINI_MODEL);
    }
}
