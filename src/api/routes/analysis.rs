use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use tracing::{debug, info};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{AnalysisResult, RateMap};

/// Fetch a champion's regional win rates and analyze them.
pub async fn champion_analysis(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let rates = state.provider.fetch(&name).await?;
    // The caller only named the champion; unusable rates are the provider's fault
    let result = state
        .analyzer
        .analyze(&rates)
        .map_err(|e| ApiError::Upstream(format!("{} for champion {}", e, name)))?;

    info!(
        champion = %name,
        regions = rates.len(),
        divergences = result.divergences.len(),
        "Analyzed champion"
    );

    Ok(Json(result))
}

/// Analyze a caller-supplied `{region: winrate}` object.
pub async fn analyze_rates(
    State(state): State<AppState>,
    payload: Result<Json<RateMap>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(rates) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let result = state.analyzer.analyze(&rates)?;

    debug!(
        regions = rates.len(),
        divergences = result.divergences.len(),
        "Analyzed submitted rates"
    );

    Ok(Json(result))
}
