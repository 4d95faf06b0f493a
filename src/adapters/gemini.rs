//! Analysis client for the Gemini `generateContent` REST endpoint.

use crate::domain::ports::{AnalysisProvider, ConfigProvider};
use crate::utils::error::{InsightError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;
pub const DEFAULT_SYSTEM_INSTRUCTION: &str =
    "You are an expert YouTube content strategist. Always respond with valid JSON only.";

pub struct GeminiClient {
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    timeout_seconds: u64,
    system_instruction: String,
    client: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GeminiClient {
    /// Fails with `ConfigurationAbsent` when no API key is configured.
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let api_key = config
            .api_key()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| InsightError::ConfigurationAbsent {
                field: "provider.api_key".to_string(),
            })?
            .to_string();

        let timeout_seconds = config.timeout_seconds();
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| InsightError::provider(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            base_url: config.api_base_url().trim_end_matches('/').to_string(),
            model: config.model().to_string(),
            temperature: config.temperature(),
            timeout_seconds,
            system_instruction: config.system_instruction().to_string(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn classify(&self, error: reqwest::Error) -> InsightError {
        if error.is_timeout() {
            InsightError::Timeout {
                seconds: self.timeout_seconds,
            }
        } else if error.is_connect() {
            InsightError::ProviderUnavailable(error)
        } else {
            InsightError::ProviderError {
                status: error.status().map(|s| s.as_u16()),
                message: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl AnalysisProvider for GeminiClient {
    async fn invoke(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &self.system_instruction,
                }],
            },
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        tracing::debug!("Making Gemini request to: {}", self.endpoint());
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        tracing::debug!("Gemini response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InsightError::ProviderError {
                status: Some(status.as_u16()),
                message: body.chars().take(500).collect(),
            });
        }

        let envelope: GenerateContentResponse =
            response.json().await.map_err(|e| self.classify(e))?;

        if let Some(reason) = envelope
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Err(InsightError::provider(format!("Prompt blocked: {}", reason)));
        }

        let text: String = envelope
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(InsightError::provider("No content in Gemini response"));
        }

        Ok(text)
    }

    fn name(&self) -> &str {
        &self.model
    }
}
