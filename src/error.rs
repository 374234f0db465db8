use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::web::models::ErrorResponse;

/// The only error text a caller ever sees.
pub const GENERIC_ERROR_MESSAGE: &str = "There was an error processing your request";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("OPENAI_KEY env variable not set")]
    Configuration,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("query too large: {used} tokens against a limit of {limit}")]
    QuotaExceeded { used: usize, limit: usize },

    #[error("query flagged by moderation")]
    PolicyViolation,

    #[error("{endpoint} returned {status}: {message}")]
    Upstream {
        endpoint: &'static str,
        status: u16,
        message: String,
    },

    #[error("request to provider failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl RelayError {
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Configuration => "configuration",
            RelayError::InvalidRequest(_) => "invalid_request",
            RelayError::QuotaExceeded { .. } => "quota_exceeded",
            RelayError::PolicyViolation => "policy_violation",
            RelayError::Upstream { .. } | RelayError::Transport(_) => "upstream",
        }
    }
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: GENERIC_ERROR_MESSAGE.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn every_kind_collapses_to_the_same_response() {
        let errors = vec![
            RelayError::Configuration,
            RelayError::InvalidRequest("no messages provided".to_string()),
            RelayError::QuotaExceeded {
                used: 5000,
                limit: 4000,
            },
            RelayError::PolicyViolation,
            RelayError::Upstream {
                endpoint: "moderations",
                status: 401,
                message: "Incorrect API key provided".to_string(),
            },
        ];

        for err in errors {
            let response = err.error_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let body = to_bytes(response.into_body()).await.unwrap();
            assert_eq!(
                body,
                r#"{"error":"There was an error processing your request"}"#
            );
        }
    }

    #[test]
    fn display_keeps_the_internal_cause() {
        let err = RelayError::Upstream {
            endpoint: "chat/completions",
            status: 429,
            message: "Rate limit reached".to_string(),
        };
        assert_eq!(err.to_string(), "chat/completions returned 429: Rate limit reached");
        assert_eq!(err.kind(), "upstream");
    }
}
