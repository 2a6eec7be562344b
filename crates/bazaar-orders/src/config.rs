//! Order service configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. The single business tunable is the discount period N: every
//! Nth order (1-indexed) is discount-eligible.

use serde::{Deserialize, Serialize};
use std::env;

use bazaar_core::{DiscountPolicy, DEFAULT_DISCOUNT_PERCENT, DEFAULT_DISCOUNT_PERIOD};

/// Order service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersConfig {
    /// Path to the SQLite database file
    pub database_path: String,

    /// Discount period N: every Nth order qualifies
    pub discount_period: u32,

    /// Discount percentage applied to qualifying orders
    pub discount_percent: u32,
}

impl OrdersConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = OrdersConfig {
            database_path: env::var("BAZAAR_DATABASE_PATH")
                .unwrap_or_else(|_| "./bazaar.db".to_string()),

            discount_period: env::var("BAZAAR_DISCOUNT_PERIOD")
                .unwrap_or_else(|_| DEFAULT_DISCOUNT_PERIOD.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BAZAAR_DISCOUNT_PERIOD".to_string()))?,

            discount_percent: env::var("BAZAAR_DISCOUNT_PERCENT")
                .unwrap_or_else(|_| DEFAULT_DISCOUNT_PERCENT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BAZAAR_DISCOUNT_PERCENT".to_string()))?,
        };

        // The policy constructor owns the range rules; run them now so a bad
        // environment fails at startup, not at the first qualifying order
        config.policy()?;

        Ok(config)
    }

    /// Builds the discount policy this configuration describes.
    pub fn policy(&self) -> Result<DiscountPolicy, ConfigError> {
        DiscountPolicy::new(self.discount_period, self.discount_percent)
            .map_err(|e| ConfigError::InvalidPolicy(e.to_string()))
    }
}

impl Default for OrdersConfig {
    fn default() -> Self {
        OrdersConfig {
            database_path: "./bazaar.db".to_string(),
            discount_period: DEFAULT_DISCOUNT_PERIOD,
            discount_percent: DEFAULT_DISCOUNT_PERCENT,
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}")]
    InvalidValue(String),

    #[error("invalid discount policy: {0}")]
    InvalidPolicy(String),
}

// =============================================================================
// Unit Tests
// =============================================================================
