use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, Request, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
        },
        HeaderValue, StatusCode,
    },
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{error, info};

use crate::analysis::{AnalysisResponse, Analyzer};
use crate::error::AnalyzeError;

#[derive(Clone)]
pub struct AppState {
    analyzer: Arc<Analyzer>,
}

pub fn create_router(analyzer: Analyzer) -> Router {
    let state = AppState {
        analyzer: Arc::new(analyzer),
    };

    Router::new()
        .route(
            "/analyze",
            post(analyze_text)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(middleware::from_fn(log_request))
        // The Lambda payload cap bounds request size.
        .layer(DefaultBodyLimit::disable())
        .layer(response_header(CONTENT_TYPE, "application/json"))
        .layer(response_header(ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .layer(response_header(ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"))
        .layer(response_header(ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"))
        .with_state(state)
}

fn response_header(
    name: axum::http::HeaderName,
    value: &'static str,
) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}

/// Pulls a non-blank `text` string out of the request body.
///
/// Anything that is not a JSON object with such a field, including a body that is
/// not JSON at all, is invalid input. The returned text is not trimmed.
pub fn extract_text(body: &[u8]) -> Result<String, AnalyzeError> {
    let payload: Value = serde_json::from_slice(body).unwrap_or(Value::Null);

    match payload.get("text").and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
        _ => Err(AnalyzeError::InvalidInput),
    }
}

async fn run(analyzer: &Analyzer, body: &[u8]) -> Result<AnalysisResponse, AnalyzeError> {
    let text = extract_text(body)?;
    analyzer.analyze(&text).await.map_err(AnalyzeError::Server)
}

async fn log_request(request: Request, next: Next) -> Response {
    info!(method = %request.method(), "Processing text analysis request");
    next.run(request).await
}

/// An unreadable body is treated like an empty one.
#[axum::debug_handler]
async fn analyze_text(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = body.unwrap_or_default();

    match run(&state.analyzer, &body).await {
        Ok(analysis) => (StatusCode::OK, Json(analysis)).into_response(),
        Err(err) => {
            if let AnalyzeError::Server(cause) = &err {
                error!(error = ?cause, "Error analyzing text");
            }
            err.into_response_with(state.analyzer.settings().development)
        }
    }
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> AnalyzeError {
    AnalyzeError::MethodNotAllowed
}
