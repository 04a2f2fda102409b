//! Gemini `generateContent` client.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ChatModel;
use crate::error::GatewayError;

/// Model identifier pinned for chat replies.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Hosted Gemini model reached over the REST API.
///
/// The key travels in a header rather than the query string so it never
/// shows up in a logged URL.
#[derive(Debug, Clone)]
pub struct GeminiModel {
    client: HttpClient,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiModel {
    pub fn new(api_key: Option<String>, model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: HttpClient::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn key(&self) -> Result<&str, GatewayError> {
        self.api_key.as_deref().ok_or(GatewayError::MissingApiKey)
    }

    /// Names of the models that accept `generateContent` calls with this key.
    pub async fn list_models(&self) -> Result<Vec<String>, GatewayError> {
        let url = format!("{}/v1beta/models?pageSize=1000", self.base_url);
        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, self.key()?)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status { status, body });
        }

        let listing: ModelList = response.json().await?;
        Ok(listing.generate_content_models())
    }
}

#[async_trait]
impl ChatModel for GeminiModel {
    async fn generate(&self, system_instruction: &str, user_text: &str) -> Result<String, GatewayError> {
        let request = GenerateRequest {
            system_instruction: SystemInstruction {
                parts: vec![TextPart { text: system_instruction.to_owned() }],
            },
            contents: vec![Content {
                role: "user".to_owned(),
                parts: vec![TextPart { text: user_text.to_owned() }],
            }],
        };

        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);
        debug!(model = %self.model, prompt_len = user_text.len(), "calling generateContent");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.key()?)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status { status, body });
        }

        let reply: GenerateResponse = response.json().await?;
        reply.into_text().ok_or(GatewayError::EmptyResponse)
    }
}

// ── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: SystemInstruction,
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

impl ModelList {
    fn generate_content_models(self) -> Vec<String> {
        self.models
            .into_iter()
            .filter(|m| {
                m.supported_generation_methods
                    .iter()
                    .any(|method| method == "generateContent")
            })
            .map(|m| m.name)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ModelInfo {
    name: String,
    #[serde(rename = "supportedGenerationMethods", default)]
    supported_generation_methods: Vec<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reply_text_joins_first_candidate_parts() {
        let raw = r#"{"candidates":[
            {"content":{"role":"model","parts":[{"text":"Take a "},{"text":"short break."}]}},
            {"content":{"role":"model","parts":[{"text":"ignored"}]}}
        ]}"#;
        let reply: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(reply.into_text().as_deref(), Some("Take a short break."));
    }

    #[test]
    fn reply_without_candidates_has_no_text() {
        let reply: GenerateResponse = serde_json::from_str(r#"{"promptFeedback":{}}"#).unwrap();
        assert!(reply.into_text().is_none());
    }

    #[test]
    fn request_uses_camel_case_system_instruction() {
        let req = GenerateRequest {
            system_instruction: SystemInstruction {
                parts: vec![TextPart { text: "persona".into() }],
            },
            contents: vec![Content {
                role: "user".into(),
                parts: vec![TextPart { text: "hi".into() }],
            }],
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["systemInstruction"]["parts"][0]["text"], "persona");
        assert_eq!(v["contents"][0]["role"], "user");
    }

    #[test]
    fn model_listing_keeps_generate_content_models() {
        let raw = r#"{"models":[
            {"name":"models/gemini-1.5-flash","supportedGenerationMethods":["generateContent","countTokens"]},
            {"name":"models/embedding-001","supportedGenerationMethods":["embedContent"]}
        ]}"#;
        let listing: ModelList = serde_json::from_str(raw).unwrap();
        assert_eq!(listing.generate_content_models(), vec!["models/gemini-1.5-flash"]);
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let model = GeminiModel::new(Some("   ".into()), DEFAULT_MODEL, DEFAULT_BASE_URL);
        assert!(!model.has_api_key());
        let err = model.generate("persona", "hello").await.unwrap_err();
        assert!(matches!(err, GatewayError::MissingApiKey));
    }
}
