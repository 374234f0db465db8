use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::web::models::Message;

#[derive(Debug, Serialize)]
pub struct ModerationRequest<'a> {
    pub input: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ModerationResponse {
    #[serde(default)]
    pub results: Vec<ModerationResult>,
}

#[derive(Debug, Deserialize)]
pub struct ModerationResult {
    pub flagged: bool,
    #[serde(default)]
    pub categories: BTreeMap<String, bool>,
}

/// Outcome of the moderation pre-check on a single input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationVerdict {
    pub flagged: bool,
    pub categories: Vec<String>,
}

impl From<ModerationResult> for ModerationVerdict {
    fn from(result: ModerationResult) -> Self {
        let categories = result
            .categories
            .into_iter()
            .filter(|(_, hit)| *hit)
            .map(|(name, _)| name)
            .collect();
        Self {
            flagged: result.flagged,
            categories,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<&'a Message>,
    pub temperature: f64,
    pub stream: bool,
}

impl<'a> ChatCompletionRequest<'a> {
    /// Streaming request with the persona placed ahead of the caller's messages.
    pub fn streaming(
        model: &'a str,
        temperature: f64,
        persona: &'a Message,
        conversation: &'a [Message],
    ) -> Self {
        let messages = std::iter::once(persona).chain(conversation).collect();
        Self {
            model,
            messages,
            temperature,
            stream: true,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProviderErrorBody {
    pub error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ProviderErrorDetail {
    pub message: String,
}
