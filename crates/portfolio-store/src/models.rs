use chrono::{DateTime, Utc};
use market_sim::PriceSeries;
use serde::{Deserialize, Serialize};

/// A held asset with its current valuation and synthesized history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub amount: f64,
    pub value: f64,
    pub percentage_change: f64,
    pub change_amount: f64,
    pub is_stable: bool,
    pub history: PriceSeries,
}

/// Full portfolio snapshot: holdings plus the derived aggregate history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub total_value: f64,
    pub currency: Currency,
    pub last_updated: DateTime<Utc>,
    pub assets: Vec<Asset>,
    pub history: PriceSeries,
    pub percentage_change: f64,
    pub change_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub asset: String,
    pub amount: f64,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    pub status: TransactionStatus,
    pub fee: Option<f64>,
    pub from_address: Option<String>,
    pub to_address: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Received,
    Sent,
    Bought,
    Sold,
    Exchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

/// Quoted conversion between two assets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangePair {
    pub from_asset: String,
    pub to_asset: String,
    pub rate: f64,
    pub spread: f64,
    pub gas_fee: f64,
    pub minimum_amount: f64,
    pub maximum_amount: f64,
}

/// Chart window over an hourly series, as the demo's period picker
/// exposes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimePeriod {
    #[serde(rename = "1H")]
    OneHour,
    #[serde(rename = "8H")]
    EightHours,
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "1W")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "1Y")]
    OneYear,
}

impl TimePeriod {
    /// Number of hourly points the window spans.
    pub fn hours(&self) -> usize {
        match self {
            TimePeriod::OneHour => 1,
            TimePeriod::EightHours => 8,
            TimePeriod::OneDay => 24,
            TimePeriod::OneWeek => 168,
            TimePeriod::OneMonth => 720,
            TimePeriod::OneYear => 8760,
        }
    }
}

/// Display currency for portfolio totals.  Switching it does not convert
/// values, matching the demo this store simulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Inr,
    Usd,
    Crypto,
}
