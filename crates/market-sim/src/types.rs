use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single hourly observation on a price path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Hourly price path, oldest point first, exactly one point per hour.
pub type PriceSeries = Vec<PricePoint>;

/// Input description for synthesizing an asset's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetSpec {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub base_value: f64,
    pub is_stable: bool,
}
