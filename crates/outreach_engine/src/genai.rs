use std::time::Duration;

use outreach_logging::{outreach_debug, outreach_warn};
use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const API_KEY_HEADER: &str = "x-goog-api-key";
const MAX_ERROR_BODY: usize = 300;

#[derive(Debug, Clone)]
pub struct GenAiSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for GenAiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenAiError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("http status {status}: {message}")]
    HttpStatus { status: u16, message: String },
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("unreadable response: {0}")]
    Decode(String),
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

/// Subset of a `generateContent` response this crate reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebSource {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    /// Web citations from the grounding metadata of every candidate.
    pub fn web_sources(&self) -> impl Iterator<Item = &WebSource> {
        self.candidates
            .iter()
            .filter_map(|c| c.grounding_metadata.as_ref())
            .flat_map(|m| m.grounding_chunks.iter())
            .filter_map(|chunk| chunk.web.as_ref())
    }
}

/// Thin client for the `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GenAiClient {
    settings: GenAiSettings,
    http: reqwest::Client,
}

impl GenAiClient {
    pub fn new(settings: GenAiSettings) -> Result<Self, GenAiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| GenAiError::Network(err.to_string()))?;
        Ok(Self { settings, http })
    }

    /// Sends one prompt. With `google_search`, the model may ground its
    /// answer on web results and return citations.
    pub async fn generate(
        &self,
        prompt: &str,
        google_search: bool,
    ) -> Result<GenerateResponse, GenAiError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(GenAiError::MissingApiKey)?;
        let key_header =
            HeaderValue::from_str(api_key).map_err(|_| GenAiError::MissingApiKey)?;

        let request = GenerateRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            tools: if google_search {
                vec![Tool {
                    google_search: GoogleSearch {},
                }]
            } else {
                Vec::new()
            },
        };

        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        );
        outreach_debug!(
            "generateContent model={} prompt_len={} search={}",
            self.settings.model,
            prompt.len(),
            google_search
        );

        let response = self
            .http
            .post(&endpoint)
            .header(API_KEY_HEADER, key_header)
            .json(&request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = truncate(body.trim(), MAX_ERROR_BODY);
            outreach_warn!("generateContent returned {}: {}", status, message);
            return Err(GenAiError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(map_reqwest_error)?;
        serde_json::from_str(&body).map_err(|err| GenAiError::Decode(err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> GenAiError {
    if err.is_timeout() {
        GenAiError::Timeout
    } else {
        GenAiError::Network(err.to_string())
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
