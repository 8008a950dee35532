//! REST API endpoints.
//!
//! Axum-based HTTP API for listing regions and champion rates and for
//! running divergence analysis.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::calculate::AnalysisError;
use crate::provider::ProviderError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upstream timeout: {0}")]
    UpstreamTimeout(String),

    #[error("Upstream error: {0}")]
    Upstream(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::UpstreamTimeout(_) => (StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT"),
            ApiError::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
        };

        if status.is_server_error() {
            warn!(status = status.as_u16(), "{}", self);
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::UnknownChampion(_) => ApiError::NotFound(err.to_string()),
            ProviderError::Timeout { .. } => ApiError::UpstreamTimeout(err.to_string()),
            _ => ApiError::Upstream(err.to_string()),
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health::health))
        .route("/api/regions", get(routes::regions::list_regions))
        .route("/api/champions", get(routes::champions::list_champions))
        .route("/api/champion/:name", get(routes::champions::champion_detail))
        .route("/api/analysis", post(routes::analysis::analyze_rates))
        .route("/api/analysis/:name", get(routes::analysis::champion_analysis))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS layer for a configured origin. `"*"` allows any origin.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, axum::http::header::InvalidHeaderValue> {
    let allow_origin = if origin.trim() == "*" {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::exact(HeaderValue::from_str(origin.trim())?)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    use super::state::AppState;
    use crate::calculate::DivergenceAnalyzer;
    use crate::provider::DatasetProvider;

    pub fn sample_state() -> AppState {
        AppState {
            provider: Arc::new(DatasetProvider::sample().unwrap()),
            analyzer: Arc::new(DivergenceAnalyzer::default()),
        }
    }

    pub async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        read_json(resp).await
    }

    pub async fn post_json(app: axum::Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        read_json(resp).await
    }

    async fn read_json(resp: axum::response::Response) -> (StatusCode, Value) {
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }
}
