use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Method not allowed. Use POST.")]
    MethodNotAllowed,

    #[error("Please provide text to analyze")]
    InvalidInput,

    /// Configuration or upstream failure, carried with its full cause chain.
    #[error(transparent)]
    Server(anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AnalyzeError {
    pub fn status(&self) -> StatusCode {
        match self {
            AnalyzeError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AnalyzeError::InvalidInput => StatusCode::BAD_REQUEST,
            AnalyzeError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// `details` is only filled for server errors when `expose_details` is set.
    pub fn body(&self, expose_details: bool) -> ErrorBody {
        match self {
            AnalyzeError::Server(cause) => ErrorBody {
                error: "Failed to analyze text".to_string(),
                message: Some(cause.to_string()),
                details: expose_details.then(|| format!("{cause:?}")),
            },
            client => ErrorBody {
                error: client.to_string(),
                message: None,
                details: None,
            },
        }
    }

    pub fn into_response_with(self, expose_details: bool) -> Response {
        (self.status(), Json(self.body(expose_details))).into_response()
    }
}

impl IntoResponse for AnalyzeError {
    fn into_response(self) -> Response {
        self.into_response_with(false)
    }
}
