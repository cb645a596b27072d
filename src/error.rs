use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SerpError {
    /// The provider rejected the API key. Fatal for a whole batch.
    #[error("provider rejected the API key")]
    Auth,

    #[error("provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("{0}")]
    InvalidInput(String),

    #[error("request to provider failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected provider payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to render csv: {0}")]
    Csv(#[from] csv::Error),
}

impl SerpError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        SerpError::InvalidInput(message.into())
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, SerpError::Auth)
    }
}

impl ResponseError for SerpError {
    fn status_code(&self) -> StatusCode {
        match self {
            SerpError::Auth => StatusCode::UNAUTHORIZED,
            SerpError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            SerpError::Provider { .. } | SerpError::Network(_) | SerpError::Decode(_) => {
                StatusCode::BAD_GATEWAY
            }
            SerpError::Csv(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
