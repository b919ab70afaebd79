//! Reqwest-based client for the Gemini `generateContent` endpoint.

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    StatusCode,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("missing API key (set GEMINI_API_KEY)")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service returned {status}: {message}")]
    Service { status: StatusCode, message: String },
    #[error("service returned no text")]
    EmptyResponse,
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The one capability both adapters depend on: instruction in, completion out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, instruction: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub model: String,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
}

#[derive(Debug)]
pub struct LlmClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    opts: GenerationOptions,
}

impl LlmClient {
    pub fn from_config(cfg: &Config, opts: GenerationOptions) -> anyhow::Result<Self> {
        let api_base_url = cfg.get("API_BASE_URL").unwrap_or_else(|| "default".into());
        let base_url = if api_base_url == "default" {
            DEFAULT_BASE_URL.to_string()
        } else {
            api_base_url.trim_end_matches('/').to_string()
        };

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = cfg.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self { http, base_url, api_key: cfg.api_key(), opts })
    }

    pub fn model(&self) -> &str {
        &self.opts.model
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.opts.model)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate_text(&self, instruction: &str) -> Result<String, LlmError> {
        let key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let hv = HeaderValue::from_str(key).map_err(|_| LlmError::MissingApiKey)?;
        headers.insert("x-goog-api-key", hv);

        let body = GenerateContentRequest::new(instruction, &self.opts);
        tracing::debug!(model = %self.opts.model, chars = instruction.len(), "sending generateContent request");

        let resp = self
            .http
            .post(self.endpoint())
            .headers(headers)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            let message = service_error_message(&text);
            tracing::debug!(%status, %message, "generateContent failed");
            return Err(LlmError::Service { status, message });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)?;
        parsed.into_text()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "GenerationConfig::is_empty")]
    generation_config: GenerationConfig,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(instruction: &'a str, opts: &GenerationOptions) -> Self {
        Self {
            contents: vec![Content { role: "user", parts: vec![Part { text: instruction }] }],
            generation_config: GenerationConfig { temperature: opts.temperature, top_p: opts.top_p },
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

impl GenerationConfig {
    fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.top_p.is_none()
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
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
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Result<String, LlmError> {
        let content = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .ok_or(LlmError::EmptyResponse)?;
        let texts: Vec<String> = content.parts.into_iter().filter_map(|p| p.text).collect();
        if texts.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(texts.concat())
    }
}

fn service_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
