//! Configuration for the clearing process around the matching core.

use serde::{Deserialize, Serialize};

use crate::{CxError, Result, constants};

/// Limits applied by round generation and ledger application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearingConfig {
    /// Maximum number of order allocations cleared in one round.
    pub max_orders_per_round: usize,
    /// Number of `(round, order)` keys the ledger remembers for idempotency.
    pub idempotency_cache_size: usize,
}

impl Default for ClearingConfig {
    fn default() -> Self {
        Self {
            max_orders_per_round: constants::DEFAULT_MAX_ORDERS_PER_ROUND,
            idempotency_cache_size: constants::DEFAULT_IDEMPOTENCY_CACHE_SIZE,
        }
    }
}

impl ClearingConfig {
    /// Parse from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// [`CxError::Serialization`] on malformed JSON,
    /// [`CxError::Configuration`] if a limit is zero.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_orders_per_round == 0 {
            return Err(CxError::Configuration(
                "max_orders_per_round must be > 0".into(),
            ));
        }
        if self.idempotency_cache_size == 0 {
            return Err(CxError::Configuration(
                "idempotency_cache_size must be > 0".into(),
            ));
        }
        Ok(())
    }
}
