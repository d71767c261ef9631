//! Server error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use canva_client::CanvaError;
use serde_json::{json, Value};
use thiserror::Error;

/// Server error type
#[derive(Debug, Error)]
pub enum ServerError {
    /// Bad arguments from the caller
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unknown tool or route
    #[error("Not found: {0}")]
    NotFound(String),

    /// Canva answered with a non-success status
    #[error("Upstream error {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Canva could not be reached or answered garbage
    #[error("Bad gateway: {0}")]
    BadGateway(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Upstream { .. } | ServerError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ServerError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            ServerError::Upstream { status: upstream, body } => {
                // Keep structured Canva error payloads structured
                let upstream_body =
                    serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body));
                json!({
                    "error": format!("Canva API returned status {}", upstream),
                    "status": status.as_u16(),
                    "upstream_status": upstream,
                    "upstream_body": upstream_body,
                })
            }
            other => json!({
                "error": other.to_string(),
                "status": status.as_u16(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<CanvaError> for ServerError {
    fn from(err: CanvaError) -> Self {
        match err {
            CanvaError::MissingParameter(_) | CanvaError::InvalidParameter { .. } => {
                ServerError::InvalidRequest(err.to_string())
            }
            CanvaError::UnknownTool(name) => ServerError::NotFound(format!("tool '{}'", name)),
            CanvaError::Http { status, body } => ServerError::Upstream { status, body },
            CanvaError::Transport(_) | CanvaError::InvalidResponse(_) => {
                ServerError::BadGateway(err.to_string())
            }
            other => ServerError::InternalError(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::InternalError(err.to_string())
    }
}
