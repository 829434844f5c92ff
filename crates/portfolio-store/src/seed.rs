use chrono::{Duration, Utc};

use market_sim::{combine_series, generate_history_at, AssetSpec, SimError};

use crate::models::*;

const HISTORY_DAYS: i64 = 365;

fn demo_specs() -> [AssetSpec; 3] {
    let spec = |id: &str, symbol: &str, name: &str, base_value, is_stable| AssetSpec {
        id: id.to_string(),
        symbol: symbol.to_string(),
        name: name.to_string(),
        base_value,
        is_stable,
    };
    [
        spec("bitcoin", "BTC", "Bitcoin", 50_000.0, false),
        spec("ethereum", "ETH", "Ethereum", 3_000.0, false),
        spec("indian-rupee", "INR", "Indian Rupee", 1.0, true),
    ]
}

/// Build the demo portfolio: BTC and ETH as volatile assets, INR as a
/// stable one, each with a year of synthesized hourly history, plus a
/// fixture transaction log (newest first) and the quoted exchange pairs.
///
/// All three histories are generated against the same "now" so the
/// aggregate's index alignment holds exactly.
pub fn demo_data() -> Result<(Portfolio, Vec<Transaction>, Vec<ExchangePair>), SimError> {
    let now = Utc::now();
    let mut rng = rand::thread_rng();

    let [btc, eth, inr] = demo_specs();
    let btc_history = generate_history_at(btc.base_value, HISTORY_DAYS, btc.is_stable, now, &mut rng)?;
    let eth_history = generate_history_at(eth.base_value, HISTORY_DAYS, eth.is_stable, now, &mut rng)?;
    let inr_history = generate_history_at(inr.base_value, HISTORY_DAYS, inr.is_stable, now, &mut rng)?;

    let combined = combine_series(&[btc_history.clone(), eth_history.clone(), inr_history.clone()]);

    let assets = vec![
        Asset {
            id: btc.id,
            symbol: btc.symbol,
            name: btc.name,
            current_price: 52_340.67,
            amount: 0.08536,
            value: 4_469.84,
            percentage_change: 2.34,
            change_amount: 102.45,
            is_stable: btc.is_stable,
            history: btc_history,
        },
        Asset {
            id: eth.id,
            symbol: eth.symbol,
            name: eth.name,
            current_price: 3_124.89,
            amount: 1.2456,
            value: 3_891.23,
            percentage_change: -1.67,
            change_amount: -66.12,
            is_stable: eth.is_stable,
            history: eth_history,
        },
        Asset {
            id: inr.id,
            symbol: inr.symbol,
            name: inr.name,
            current_price: 1.0,
            amount: 15_420.50,
            value: 15_420.50,
            percentage_change: 0.0,
            change_amount: 0.0,
            is_stable: inr.is_stable,
            history: inr_history,
        },
    ];

    let portfolio = Portfolio {
        total_value: 23_781.57,
        currency: Currency::Inr,
        last_updated: now,
        assets,
        history: combined,
        percentage_change: 0.45,
        change_amount: 106.82,
    };

    Ok((portfolio, demo_transactions(), demo_pairs()))
}

fn demo_transactions() -> Vec<Transaction> {
    let now = Utc::now();
    let tx = |id: &str,
              kind,
              asset: &str,
              amount,
              value,
              age: Duration,
              status,
              fee,
              from: Option<&str>,
              to: Option<&str>| Transaction {
        id: id.to_string(),
        kind,
        asset: asset.to_string(),
        amount,
        value,
        timestamp: now - age,
        status,
        fee,
        from_address: from.map(str::to_string),
        to_address: to.map(str::to_string),
    };

    use TransactionKind::*;
    use TransactionStatus::*;
    vec![
        tx(
            "tx1", Received, "BTC", 0.00234, 122.45, Duration::hours(2), Completed,
            Some(0.0001), Some("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"), None,
        ),
        tx(
            "tx2", Sent, "ETH", 0.5, 1_562.45, Duration::days(1), Completed,
            Some(0.02), None, Some("0x742d35Cc6633C0532925a3b8D6A23bb67C5b7c9F"),
        ),
        tx(
            "tx7", Exchanged, "INR", 5_000.0, 5_000.0, Duration::days(2), Completed,
            Some(0.0), None, None,
        ),
        tx(
            "tx3", Bought, "BTC", 0.01, 523.41, Duration::days(3), Completed,
            Some(5.23), None, None,
        ),
        tx(
            "tx4", Exchanged, "ETH", 0.2, 624.98, Duration::days(5), Completed,
            Some(15.67), None, None,
        ),
        tx(
            "tx5", Received, "BTC", 0.005, 261.70, Duration::days(7), Completed,
            Some(0.0001), Some("3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy"), None,
        ),
        tx(
            "tx6", Sent, "ETH", 1.0, 3_124.89, Duration::days(10), Pending,
            Some(0.05), None, Some("0x8ba1f109551bD432803012645Hac136c22C"),
        ),
        tx(
            "tx8", Received, "INR", 10_000.0, 10_000.0, Duration::days(12), Completed,
            Some(0.0), None, None,
        ),
    ]
}

fn demo_pairs() -> Vec<ExchangePair> {
    let pair = |from: &str, to: &str, rate, spread, gas_fee, min, max| ExchangePair {
        from_asset: from.to_string(),
        to_asset: to.to_string(),
        rate,
        spread,
        gas_fee,
        minimum_amount: min,
        maximum_amount: max,
    };

    vec![
        pair("ETH", "INR", 258_742.35, 0.5, 1_250.00, 0.001, 100.0),
        pair("BTC", "INR", 4_334_523.78, 0.3, 2_100.00, 0.0001, 10.0),
        pair("INR", "ETH", 0.000_003_86, 0.5, 1_250.00, 1_000.0, 10_000_000.0),
        pair("INR", "BTC", 0.000_000_23, 0.3, 2_100.00, 1_000.0, 50_000_000.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_histories_are_aligned_year_long_series() {
        let (portfolio, _, _) = demo_data().unwrap();

        assert_eq!(portfolio.assets.len(), 3);
        for asset in &portfolio.assets {
            assert_eq!(asset.history.len(), (HISTORY_DAYS * 24) as usize);
        }
        assert_eq!(portfolio.history.len(), (HISTORY_DAYS * 24) as usize);

        // Aggregate points are the per-index sums of the asset histories.
        for i in [0usize, 1000, 8759] {
            let expected: f64 = portfolio.assets.iter().map(|a| a.history[i].value).sum();
            assert!((portfolio.history[i].value - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_demo_transactions_are_newest_first() {
        let (_, transactions, _) = demo_data().unwrap();
        assert_eq!(transactions.len(), 8);
        for pair in transactions.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
    }

    #[test]
    fn test_demo_transfers_carry_counterparty_addresses() {
        let (_, transactions, _) = demo_data().unwrap();

        let tx1 = transactions.iter().find(|t| t.id == "tx1").unwrap();
        assert_eq!(tx1.from_address.as_deref(), Some("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"));
        assert!(tx1.to_address.is_none());

        let tx2 = transactions.iter().find(|t| t.id == "tx2").unwrap();
        assert!(tx2.from_address.is_none());
        assert_eq!(tx2.to_address.as_deref(), Some("0x742d35Cc6633C0532925a3b8D6A23bb67C5b7c9F"));

        // Buys and exchanges have no counterparty.
        let tx3 = transactions.iter().find(|t| t.id == "tx3").unwrap();
        assert!(tx3.from_address.is_none() && tx3.to_address.is_none());
    }

    #[test]
    fn test_demo_pairs_cover_both_directions() {
        let (_, _, pairs) = demo_data().unwrap();
        assert_eq!(pairs.len(), 4);
        assert!(pairs.iter().any(|p| p.from_asset == "ETH" && p.to_asset == "INR"));
        assert!(pairs.iter().any(|p| p.from_asset == "INR" && p.to_asset == "ETH"));
    }
}
