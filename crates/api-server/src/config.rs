use std::env;

use anyhow::Result;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    // Exchange simulation
    pub settlement_delay_ms: u64, // 2000 (the demo's fixed delay)
    pub exchange_fee: f64,        // flat fee recorded on each exchange
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("COINFOLIO_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("COINFOLIO_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            settlement_delay_ms: env::var("SETTLEMENT_DELAY_MS")
                .unwrap_or_else(|_| "2000".to_string())
                .parse()?,
            exchange_fee: env::var("EXCHANGE_FEE")
                .unwrap_or_else(|_| "0.1".to_string())
                .parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.settlement_delay_ms, 2_000);
        assert!((config.exchange_fee - 0.1).abs() < 1e-12);
        assert_eq!(config.port, 8080);
    }
}
