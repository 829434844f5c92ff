pub mod error;
pub mod exchange;
pub mod models;
pub mod seed;
pub mod store;

pub use error::StoreError;
pub use exchange::{ExchangeDesk, ExchangeOutcome, ExchangeRequest, PendingExchange};
pub use models::*;
pub use store::PortfolioStore;
