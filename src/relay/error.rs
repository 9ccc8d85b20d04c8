use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::utils::constants::GENERIC_ERROR_MESSAGE;

/// Everything that can end a submission early.
///
/// Only [`RelayError::Downstream`] carries a response the caller gets to see;
/// every other variant is answered with the same opaque 500.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("missing required auth configuration: {}", .missing.join(", "))]
    MissingCredentials { missing: Vec<&'static str> },

    #[error("token endpoint answered {status}")]
    TokenEndpoint { status: StatusCode, body: String },

    #[error("token endpoint response has no access_token")]
    MissingAccessToken,

    #[error("invalid token endpoint response: {0}")]
    InvalidTokenResponse(#[source] serde_json::Error),

    #[error("lead endpoint answered {status}")]
    Downstream {
        status: StatusCode,
        content_type: Option<HeaderValue>,
        body: Vec<u8>,
    },

    #[error("invalid submission body: {0}")]
    InvalidSubmission(#[source] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl RelayError {
    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::MissingCredentials { .. } => "config",
            RelayError::TokenEndpoint { .. } => "token_endpoint",
            RelayError::MissingAccessToken => "token_missing",
            RelayError::InvalidTokenResponse(_) => "token_invalid",
            RelayError::Downstream { .. } => "downstream",
            RelayError::InvalidSubmission(_) => "submission",
            RelayError::Transport(_) => "transport",
        }
    }

    /// Whether the caller sees the downstream response instead of the generic 500.
    pub fn is_passthrough(&self) -> bool {
        matches!(self, RelayError::Downstream { .. })
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match self {
            RelayError::Downstream { status, content_type, body } => {
                let mut response = (status, Body::from(body)).into_response();
                if let Some(content_type) = content_type {
                    response.headers_mut().insert(CONTENT_TYPE, content_type);
                }
                response
            }
            other => {
                error!(kind = other.kind(), "unexpected error: {}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR_MESSAGE).into_response()
            }
        }
    }
}
