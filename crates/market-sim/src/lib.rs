pub mod aggregate;
pub mod error;
pub mod synth;
pub mod types;

pub use aggregate::combine_series;
pub use error::SimError;
pub use synth::{generate_history, generate_history_at};
pub use types::{AssetSpec, PricePoint, PriceSeries};
