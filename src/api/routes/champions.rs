use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::Json;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{ChampionRates, RegionRateTable};

/// All champions with their per-region rates, keyed by champion name.
pub async fn list_champions(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, RegionRateTable>>, ApiError> {
    let champions = state.provider.fetch_all().await?;
    Ok(Json(
        champions.into_iter().map(|c| (c.name, c.regions)).collect(),
    ))
}

pub async fn champion_detail(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ChampionRates>, ApiError> {
    let champion = state.provider.fetch_champion(&name).await?;
    Ok(Json(champion))
}
