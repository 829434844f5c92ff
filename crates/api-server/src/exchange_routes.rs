use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use portfolio_store::{ExchangeOutcome, ExchangePair, ExchangeRequest, StoreError};

use crate::{ApiResponse, AppError, AppState};

#[derive(Deserialize)]
pub struct RateQuery {
    pub from: String,
    pub to: String,
}

pub fn exchange_routes() -> Router<AppState> {
    Router::new()
        .route("/api/exchange/rate", get(get_exchange_rate))
        .route("/api/portfolio/exchange", post(perform_exchange))
}

async fn get_exchange_rate(
    State(state): State<AppState>,
    Query(query): Query<RateQuery>,
) -> Result<Json<ApiResponse<ExchangePair>>, AppError> {
    let pair = state
        .store
        .exchange_rate(&query.from, &query.to)
        .await
        .ok_or(StoreError::UnknownPair {
            from: query.from,
            to: query.to,
        })?;

    Ok(Json(ApiResponse::success(pair)))
}

/// Submit an exchange and wait for its simulated settlement.  The response
/// carries the updated portfolio snapshot and the recorded transaction.
async fn perform_exchange(
    State(state): State<AppState>,
    Json(req): Json<ExchangeRequest>,
) -> Result<Json<ApiResponse<ExchangeOutcome>>, AppError> {
    let outcome = state.desk.submit(req).settled().await?;

    Ok(Json(ApiResponse::success(outcome)))
}
