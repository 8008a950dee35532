use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: &'static str,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.provider.name(),
    })
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::test_support::{get_json, sample_state};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health() {
        let app = build_router(sample_state());
        let (status, json) = get_json(app, "/api/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["provider"], "dataset");
    }
}
