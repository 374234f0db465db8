use actix_web::{web, HttpResponse, Responder};
use futures_util::TryStreamExt;
use log::{debug, error, info, warn};
use serde_json::json;
use uuid::Uuid;

use crate::error::RelayError;
use crate::provider::types::ChatCompletionRequest;
use crate::tokens::TokenBudget;
use crate::web::models::{ChatRequest, Message};
use crate::AppState;

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

// Chat relay endpoint
pub async fn chat(
    data: web::Data<AppState>,
    body: Result<web::Bytes, actix_web::Error>,
) -> Result<HttpResponse, RelayError> {
    let request_id = Uuid::new_v4();

    relay(&data, body, request_id).await.map_err(|e| {
        error!("[{}] Chat request failed ({}): {}", request_id, e.kind(), e);
        e
    })
}

async fn relay(
    data: &AppState,
    body: Result<web::Bytes, actix_web::Error>,
    request_id: Uuid,
) -> Result<HttpResponse, RelayError> {
    let api_key = data.config.api_key().ok_or(RelayError::Configuration)?;

    let body =
        body.map_err(|e| RelayError::InvalidRequest(format!("unreadable body: {}", e)))?;
    let messages = parse_messages(&body)?;

    let mut budget = TokenBudget::new(data.config.token_limit);
    for message in &messages {
        budget.charge(data.tokenizer.count_tokens(&message.content));
    }
    budget.charge(data.persona_tokens);

    if budget.is_exhausted() {
        return Err(RelayError::QuotaExceeded {
            used: budget.used(),
            limit: budget.limit(),
        });
    }

    info!(
        "[{}] Chat request with {} message(s), {} tokens",
        request_id,
        messages.len(),
        budget.used()
    );

    let last = messages
        .last()
        .ok_or_else(|| RelayError::InvalidRequest("no messages provided".to_string()))?;

    let verdict = data.provider.moderate(api_key, &last.content).await?;
    if verdict.flagged {
        warn!(
            "[{}] Query flagged for: {}",
            request_id,
            verdict.categories.join(", ")
        );
        return Err(RelayError::PolicyViolation);
    }
    debug!("[{}] Moderation passed", request_id);

    let persona = Message::system(data.config.persona_prompt.as_str());
    let request = ChatCompletionRequest::streaming(
        &data.config.model,
        data.config.temperature,
        &persona,
        &messages,
    );
    let upstream = data.provider.stream_chat(api_key, &request).await?;

    info!("[{}] Streaming completion to client", request_id);

    let stream = upstream.bytes_stream().inspect_err(move |e| {
        error!("[{}] Upstream stream interrupted: {}", request_id, e);
    });

    Ok(HttpResponse::Ok().content_type("text/event-stream").streaming(stream))
}

fn parse_messages(body: &[u8]) -> Result<Vec<Message>, RelayError> {
    let payload: Option<ChatRequest> = serde_json::from_slice(body)
        .map_err(|e| RelayError::InvalidRequest(format!("malformed body: {}", e)))?;

    let payload =
        payload.ok_or_else(|| RelayError::InvalidRequest("no request data".to_string()))?;

    let messages = payload
        .messages
        .ok_or_else(|| RelayError::InvalidRequest("no messages provided".to_string()))?;

    if messages.is_empty() {
        return Err(RelayError::InvalidRequest(
            "messages must not be empty".to_string(),
        ));
    }

    Ok(messages)
}
