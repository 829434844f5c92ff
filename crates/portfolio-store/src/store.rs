use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use market_sim::SimError;

use crate::error::StoreError;
use crate::models::*;
use crate::seed;

/// In-memory portfolio state behind a single async mutex.
///
/// All mutations take the lock for their full duration, so only one balance
/// update or exchange is ever in flight at a time and concurrent callers
/// cannot lose updates to each other.
pub struct PortfolioStore {
    inner: Mutex<Inner>,
}

struct Inner {
    portfolio: Portfolio,
    transactions: Vec<Transaction>,
    pairs: Vec<ExchangePair>,
}

impl PortfolioStore {
    pub fn new(
        portfolio: Portfolio,
        transactions: Vec<Transaction>,
        pairs: Vec<ExchangePair>,
    ) -> Self {
        Self {
            inner: Mutex::new(Inner {
                portfolio,
                transactions,
                pairs,
            }),
        }
    }

    /// Build a store seeded with the demo BTC / ETH / INR portfolio,
    /// fixture transactions and exchange pairs.
    pub fn with_demo_data() -> Result<Self, SimError> {
        let (portfolio, transactions, pairs) = seed::demo_data()?;
        Ok(Self::new(portfolio, transactions, pairs))
    }

    /// Current portfolio snapshot (assets, aggregate history, totals).
    pub async fn portfolio(&self) -> Portfolio {
        self.inner.lock().await.portfolio.clone()
    }

    /// Transaction log, newest first.
    pub async fn transactions(&self) -> Vec<Transaction> {
        self.inner.lock().await.transactions.clone()
    }

    /// Tail of the aggregate history covering the given period: the last
    /// `period.hours()` points, or the whole series if it is shorter.
    pub async fn portfolio_history(&self, period: TimePeriod) -> market_sim::PriceSeries {
        let inner = self.inner.lock().await;
        let history = &inner.portfolio.history;
        let window = period.hours().min(history.len());
        history[history.len() - window..].to_vec()
    }

    /// Quoted rate for a directed pair, if one exists.
    pub async fn exchange_rate(&self, from: &str, to: &str) -> Option<ExchangePair> {
        self.inner
            .lock()
            .await
            .pairs
            .iter()
            .find(|p| p.from_asset == from && p.to_asset == to)
            .cloned()
    }

    /// Switch the display currency.  Values are not converted.
    pub async fn set_currency(&self, currency: Currency) {
        self.inner.lock().await.portfolio.currency = currency;
    }

    /// Set an asset's held amount, revaluing it at its current price and
    /// recomputing the portfolio total.
    pub async fn update_asset_balance(&self, symbol: &str, new_amount: f64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        apply_balance(&mut inner.portfolio, symbol, new_amount)
    }

    /// Apply an exchange: debit the source asset, credit the destination,
    /// and prepend a completed `exchanged` transaction.
    ///
    /// Both symbols are checked before anything is mutated, so an unknown
    /// asset on either side leaves the store untouched.  There is no
    /// sufficiency check on the source balance: exchanging more than is
    /// held drives the balance negative, as in the demo this reproduces.
    pub async fn perform_exchange(
        &self,
        from_symbol: &str,
        to_symbol: &str,
        from_amount: f64,
        to_amount: f64,
        fee: f64,
    ) -> Result<(Portfolio, Transaction), StoreError> {
        let mut inner = self.inner.lock().await;

        let find_amounts = |portfolio: &Portfolio| -> Result<(f64, f64, f64), StoreError> {
            let from = portfolio
                .assets
                .iter()
                .find(|a| a.symbol == from_symbol)
                .ok_or_else(|| StoreError::UnknownAsset(from_symbol.to_string()))?;
            let to = portfolio
                .assets
                .iter()
                .find(|a| a.symbol == to_symbol)
                .ok_or_else(|| StoreError::UnknownAsset(to_symbol.to_string()))?;
            Ok((from.amount, to.amount, from.current_price))
        };
        let (from_held, to_held, from_price) = find_amounts(&inner.portfolio)?;

        apply_balance(&mut inner.portfolio, from_symbol, from_held - from_amount)?;
        apply_balance(&mut inner.portfolio, to_symbol, to_held + to_amount)?;

        let transaction = Transaction {
            id: format!("tx_{}", &Uuid::new_v4().simple().to_string()[..8]),
            kind: TransactionKind::Exchanged,
            asset: from_symbol.to_string(),
            amount: from_amount,
            value: from_amount * from_price,
            timestamp: Utc::now(),
            status: TransactionStatus::Completed,
            fee: Some(fee),
            from_address: None,
            to_address: None,
        };
        inner.transactions.insert(0, transaction.clone());

        tracing::info!(
            from = from_symbol,
            to = to_symbol,
            from_amount,
            to_amount,
            "exchange applied"
        );

        Ok((inner.portfolio.clone(), transaction))
    }
}

fn apply_balance(portfolio: &mut Portfolio, symbol: &str, new_amount: f64) -> Result<(), StoreError> {
    let asset = portfolio
        .assets
        .iter_mut()
        .find(|a| a.symbol == symbol)
        .ok_or_else(|| StoreError::UnknownAsset(symbol.to_string()))?;

    asset.amount = new_amount;
    asset.value = new_amount * asset.current_price;

    portfolio.total_value = portfolio.assets.iter().map(|a| a.value).sum();
    portfolio.last_updated = Utc::now();
    Ok(())
}
