pub mod types;

use log::{debug, info};
use reqwest::{Client, Response};

use crate::error::RelayError;
use types::{
    ChatCompletionRequest, ModerationRequest, ModerationResponse, ModerationVerdict,
    ProviderErrorBody,
};

const MODERATIONS_PATH: &str = "/v1/moderations";
const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

// A thin wrapper over the provider's REST API
pub struct OpenAiClient {
    api_base: String,
    client: Client,
}

impl OpenAiClient {
    pub fn new(api_base: impl Into<String>) -> Self {
        let api_base = api_base.into();
        info!("Using provider API at: {}", api_base);

        Self {
            api_base,
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }

    /// Runs the moderation classifier on `input` and returns the first result.
    pub async fn moderate(
        &self,
        api_key: &str,
        input: &str,
    ) -> Result<ModerationVerdict, RelayError> {
        let response = self
            .client
            .post(self.url(MODERATIONS_PATH))
            .bearer_auth(api_key)
            .json(&ModerationRequest { input })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(upstream_error("moderations", response).await);
        }

        let status = response.status().as_u16();
        let moderation: ModerationResponse = response.json().await?;
        debug!("Moderation returned {} result(s)", moderation.results.len());

        moderation
            .results
            .into_iter()
            .next()
            .map(ModerationVerdict::from)
            .ok_or_else(|| RelayError::Upstream {
                endpoint: "moderations",
                status,
                message: "response contained no results".to_string(),
            })
    }

    /// Opens a streaming completion. The returned response body has not been read.
    pub async fn stream_chat(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest<'_>,
    ) -> Result<Response, RelayError> {
        debug!(
            "Requesting completion from {} with {} message(s)",
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(self.url(CHAT_COMPLETIONS_PATH))
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(upstream_error("chat/completions", response).await);
        }

        Ok(response)
    }
}

async fn upstream_error(endpoint: &'static str, response: Response) -> RelayError {
    let status = response.status().as_u16();
    match response.text().await {
        Ok(body) => RelayError::Upstream {
            endpoint,
            status,
            message: error_message(&body),
        },
        Err(err) => RelayError::Transport(err),
    }
}

/// Pulls `error.message` out of a provider error body, falling back to the raw text.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ProviderErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => "empty error body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
