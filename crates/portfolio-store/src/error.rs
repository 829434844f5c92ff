use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unknown asset: {0}")]
    UnknownAsset(String),

    #[error("No rate quoted for {from} -> {to}")]
    UnknownPair { from: String, to: String },

    #[error("Exchange cancelled before settlement")]
    Cancelled,

    #[error("Settlement task failed: {0}")]
    SettlementFailed(String),
}
