use axum::{
    extract::{Path, Query, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use market_sim::{generate_history, PriceSeries};
use portfolio_store::StoreError;

use crate::{ApiResponse, AppError, AppState};

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub days: Option<i64>,
}

pub fn history_routes() -> Router<AppState> {
    Router::new().route("/api/assets/:id/history", post(generate_asset_history))
}

/// Synthesize a fresh hourly price path for a known asset, anchored at its
/// current price.  Each call produces a new random path.
async fn generate_asset_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<PriceSeries>>, AppError> {
    let days = query.days.unwrap_or(30);

    let portfolio = state.store.portfolio().await;
    let asset = portfolio
        .assets
        .iter()
        .find(|a| a.id == id || a.symbol == id)
        .ok_or_else(|| StoreError::UnknownAsset(id))?;

    let series = generate_history(asset.current_price, days, asset.is_stable)?;

    Ok(Json(ApiResponse::success(series)))
}
