use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::error::StoreError;
use crate::models::{Portfolio, Transaction};
use crate::store::PortfolioStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRequest {
    pub from_symbol: String,
    pub to_symbol: String,
    pub from_amount: f64,
    pub to_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeOutcome {
    pub portfolio: Portfolio,
    pub transaction: Transaction,
}

/// Executes exchanges against the store after a simulated settlement delay.
///
/// There is no real venue behind this; the delay stands in for one.  Each
/// submission runs as its own task so it can be cancelled while the timer
/// is still pending, in which case nothing is mutated and no transaction is
/// recorded.
pub struct ExchangeDesk {
    store: Arc<PortfolioStore>,
    settlement_delay: Duration,
    fee: f64,
}

impl ExchangeDesk {
    pub fn new(store: Arc<PortfolioStore>, settlement_delay: Duration, fee: f64) -> Self {
        Self {
            store,
            settlement_delay,
            fee,
        }
    }

    pub fn submit(&self, request: ExchangeRequest) -> PendingExchange {
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        let store = self.store.clone();
        let delay = self.settlement_delay;
        let fee = self.fee;

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    let (portfolio, transaction) = store
                        .perform_exchange(
                            &request.from_symbol,
                            &request.to_symbol,
                            request.from_amount,
                            request.to_amount,
                            fee,
                        )
                        .await?;
                    Ok(ExchangeOutcome { portfolio, transaction })
                }
                _ = cancel_rx => {
                    tracing::debug!(
                        from = %request.from_symbol,
                        to = %request.to_symbol,
                        "exchange cancelled before settlement"
                    );
                    Err(StoreError::Cancelled)
                }
            }
        });

        PendingExchange {
            cancel: Some(cancel_tx),
            handle,
        }
    }
}

/// Handle to an exchange waiting out its settlement delay.
///
/// Dropping the handle also cancels the exchange: the cancel sender is
/// dropped with it, which resolves the task's cancel branch.
pub struct PendingExchange {
    cancel: Option<oneshot::Sender<()>>,
    handle: JoinHandle<Result<ExchangeOutcome, StoreError>>,
}

impl PendingExchange {
    /// Cancel the exchange if it has not settled yet.  Calling this after
    /// settlement has no effect.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel.take() {
            let _ = tx.send(());
        }
    }

    /// Wait for the settlement timer and the resulting store mutation.
    pub async fn settled(self) -> Result<ExchangeOutcome, StoreError> {
        // Keep the cancel sender alive until the task finishes, otherwise
        // awaiting would race our own implicit cancellation.
        let PendingExchange { cancel, handle } = self;
        let result = match handle.await {
            Ok(result) => result,
            Err(err) if err.is_cancelled() => Err(StoreError::Cancelled),
            Err(err) => {
                tracing::error!("settlement task failed: {err}");
                Err(StoreError::SettlementFailed(err.to_string()))
            }
        };
        drop(cancel);
        result
    }
}
