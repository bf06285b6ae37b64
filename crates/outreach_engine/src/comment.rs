use async_trait::async_trait;
use outreach_logging::outreach_info;
use thiserror::Error;

use crate::genai::{GenAiClient, GenAiError};

const DEFAULT_TONE: &str = "friendly and genuine";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("{0}")]
    Failed(#[from] GenAiError),
    #[error("generator returned no text")]
    Empty,
}

/// Produces comment text that wraps one keyword in a link to `link_target`.
#[async_trait]
pub trait CommentGenerator: Send + Sync {
    async fn generate(
        &self,
        keywords: &str,
        link_target: &str,
        tone: Option<&str>,
    ) -> Result<String, GenerationError>;
}

pub struct GeminiCommentGenerator {
    client: GenAiClient,
}

impl GeminiCommentGenerator {
    pub fn new(client: GenAiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CommentGenerator for GeminiCommentGenerator {
    async fn generate(
        &self,
        keywords: &str,
        link_target: &str,
        tone: Option<&str>,
    ) -> Result<String, GenerationError> {
        let prompt = build_comment_prompt(keywords, link_target, tone);
        let response = self.client.generate(&prompt, false).await?;
        let comment = response.text().trim().to_string();
        if comment.is_empty() {
            return Err(GenerationError::Empty);
        }
        outreach_info!("Generated comment: len={}", comment.len());
        Ok(comment)
    }
}

pub(crate) fn build_comment_prompt(keywords: &str, link_target: &str, tone: Option<&str>) -> String {
    let tone = tone
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TONE);
    format!(
        "Write a short blog comment of two or three sentences in a {tone} tone. \
         It should read like a reader reacting to a post related to these keywords: {keywords}. \
         Include exactly one HTML link of the form <a href=\"{link_target}\">KEYWORD</a>, \
         where KEYWORD is one of the keywords above placed naturally in a sentence. \
         Return only the comment text, without quotes or explanations."
    )
}
