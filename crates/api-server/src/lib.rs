use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use market_sim::SimError;
use portfolio_store::{ExchangeDesk, PortfolioStore, StoreError};

pub mod config;
pub mod exchange_routes;
pub mod history_routes;
pub mod portfolio_routes;

use config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PortfolioStore>,
    pub desk: Arc<ExchangeDesk>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        let store = Arc::new(PortfolioStore::with_demo_data()?);
        let desk = Arc::new(ExchangeDesk::new(
            store.clone(),
            Duration::from_millis(config.settlement_delay_ms),
            config.exchange_fee,
        ));
        Ok(Self { store, desk })
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Route-level error wrapper: anyhow inside, JSON envelope outside.
/// Domain errors keep their meaning as HTTP statuses; everything else
/// is a 500.
pub struct AppError(anyhow::Error);

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if let Some(store_err) = self.0.downcast_ref::<StoreError>() {
            match store_err {
                StoreError::UnknownAsset(_) | StoreError::UnknownPair { .. } => StatusCode::NOT_FOUND,
                StoreError::Cancelled => StatusCode::CONFLICT,
                StoreError::SettlementFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        } else if self.0.downcast_ref::<SimError>().is_some() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {:#}", self.0);
        }

        (status, Json(ApiResponse::<()>::error(self.0.to_string()))).into_response()
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .merge(portfolio_routes::portfolio_routes())
        .merge(history_routes::history_routes())
        .merge(exchange_routes::exchange_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    let config = ServerConfig::from_env()?;
    tracing::info!("Starting Coinfolio API server");
    tracing::info!("  Settlement delay: {}ms", config.settlement_delay_ms);
    tracing::info!("  Exchange fee: {}", config.exchange_fee);

    let state = AppState::new(&config)?;
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    fn test_app() -> Router {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            settlement_delay_ms: 0,
            exchange_fee: 0.1,
        };
        router(AppState::new(&config).unwrap())
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_portfolio_snapshot() {
        let response = test_app()
            .oneshot(Request::get("/api/portfolio").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["assets"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_history_for_unknown_asset_is_404() {
        let response = test_app()
            .oneshot(
                Request::post("/api/assets/dogecoin/history?days=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_history_with_negative_days_is_400() {
        let response = test_app()
            .oneshot(
                Request::post("/api/assets/bitcoin/history?days=-3")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_history_length_matches_days() {
        let response = test_app()
            .oneshot(
                Request::post("/api/assets/bitcoin/history?days=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 48);
    }

    #[tokio::test]
    async fn test_portfolio_history_respects_period_param() {
        let app = test_app();
        let windowed = app
            .clone()
            .oneshot(
                Request::get("/api/portfolio/history?period=8H")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(windowed.status(), StatusCode::OK);
        assert_eq!(body_json(windowed).await["data"].as_array().unwrap().len(), 8);

        // No period falls back to a day of points.
        let default = app
            .oneshot(
                Request::get("/api/portfolio/history")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(body_json(default).await["data"].as_array().unwrap().len(), 24);
    }

    #[tokio::test]
    async fn test_aggregate_endpoint_sums_named_assets() {
        let body = serde_json::json!({ "symbols": ["BTC", "ETH"] });
        let response = test_app()
            .oneshot(
                Request::post("/api/portfolio/aggregate")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 365 * 24);
    }

    #[tokio::test]
    async fn test_exchange_rate_lookup() {
        let app = test_app();
        let found = app
            .clone()
            .oneshot(
                Request::get("/api/exchange/rate?from=ETH&to=INR")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(found.status(), StatusCode::OK);

        let missing = app
            .oneshot(
                Request::get("/api/exchange/rate?from=INR&to=USD")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_exchange_roundtrip() {
        let app = test_app();
        let body = serde_json::json!({
            "from_symbol": "ETH",
            "to_symbol": "INR",
            "from_amount": 1.0,
            "to_amount": 258742.35,
        });
        let response = app
            .oneshot(
                Request::post("/api/portfolio/exchange")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["data"]["transaction"]["kind"], "exchanged");
        assert_eq!(json["data"]["transaction"]["asset"], "ETH");
    }
}
