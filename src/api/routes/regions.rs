use axum::extract::State;
use axum::Json;

use crate::api::state::AppState;
use crate::api::ApiError;

/// Region codes in display order.
pub async fn list_regions(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let regions = state.provider.list_regions().await?;
    Ok(Json(regions.into_iter().map(|r| r.code).collect()))
}
