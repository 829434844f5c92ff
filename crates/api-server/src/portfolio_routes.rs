use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use market_sim::{combine_series, PriceSeries};
use portfolio_store::{Portfolio, StoreError, TimePeriod, Transaction};

use crate::{ApiResponse, AppError, AppState};

#[derive(Deserialize)]
pub struct AggregateRequest {
    pub symbols: Vec<String>,
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub period: Option<TimePeriod>,
}

pub fn portfolio_routes() -> Router<AppState> {
    Router::new()
        .route("/api/portfolio", get(get_portfolio))
        .route("/api/portfolio/history", get(get_portfolio_history))
        .route("/api/transactions", get(get_transactions))
        .route("/api/portfolio/aggregate", post(aggregate_series))
}

async fn get_portfolio(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Portfolio>>, AppError> {
    let portfolio = state.store.portfolio().await;

    Ok(Json(ApiResponse::success(portfolio)))
}

/// Tail of the aggregate portfolio history for the requested period
/// (`1H`, `8H`, `1D`, `1W`, `1M` or `1Y`; defaults to a day).
async fn get_portfolio_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<PriceSeries>>, AppError> {
    let period = query.period.unwrap_or(TimePeriod::OneDay);
    let history = state.store.portfolio_history(period).await;

    Ok(Json(ApiResponse::success(history)))
}

async fn get_transactions(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Transaction>>>, AppError> {
    let transactions = state.store.transactions().await;

    Ok(Json(ApiResponse::success(transactions)))
}

/// Sum the stored histories of the named assets into one series.
async fn aggregate_series(
    State(state): State<AppState>,
    Json(req): Json<AggregateRequest>,
) -> Result<Json<ApiResponse<PriceSeries>>, AppError> {
    let portfolio = state.store.portfolio().await;

    let mut histories = Vec::with_capacity(req.symbols.len());
    for symbol in &req.symbols {
        let asset = portfolio
            .assets
            .iter()
            .find(|a| &a.symbol == symbol)
            .ok_or_else(|| StoreError::UnknownAsset(symbol.clone()))?;
        histories.push(asset.history.clone());
    }

    Ok(Json(ApiResponse::success(combine_series(&histories))))
}
