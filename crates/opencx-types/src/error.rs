//! Error types for the OpenCX auction core.
//!
//! All errors use the `CX_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Order / price errors
//! - 2xx: Resting order set errors
//! - 3xx: Settlement errors
//! - 9xx: General errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{Asset, OrderId, Pair, Side};

/// Central error enum for all OpenCX operations.
///
/// Every variant is a synchronous, local validation failure. An error always
/// means that no state change occurred.
#[derive(Debug, Error)]
pub enum CxError {
    // =================================================================
    // Order / Price Errors (1xx)
    // =================================================================
    /// The order side is neither buy nor sell.
    #[error("CX_ERR_100: Invalid side: {side}")]
    InvalidSide { side: Side },

    /// The clearing price is zero or negative.
    #[error("CX_ERR_101: Invalid price: {price} must be greater than zero")]
    InvalidPrice { price: Decimal },

    /// One of the order amounts is zero, so no rate can be derived.
    #[error("CX_ERR_102: Invalid amount: have={amount_have}, want={amount_want}")]
    InvalidAmount { amount_have: u64, amount_want: u64 },

    /// `consumed × price` does not fit in a `u64`.
    #[error("CX_ERR_103: Overflow computing {consumed} x {price}")]
    Overflow { consumed: u64, price: Decimal },

    /// The order's pair does not belong to the market being cleared.
    #[error("CX_ERR_104: Invalid pair {pair} for market {market}")]
    InvalidPair { pair: Pair, market: Pair },

    // =================================================================
    // Resting Order Set Errors (2xx)
    // =================================================================
    /// The order is not in the resting set.
    #[error("CX_ERR_200: Order not found: {0}")]
    OrderNotFound(OrderId),

    /// An order with this ID is already resting.
    #[error("CX_ERR_201: Order already exists: {0}")]
    DuplicateOrder(OrderId),

    // =================================================================
    // Settlement Errors (3xx)
    // =================================================================
    /// A credit would take the account balance below zero.
    #[error("CX_ERR_300: Insufficient balance of {asset}: need {needed}, have {available}")]
    InsufficientBalance {
        asset: Asset,
        needed: u128,
        available: u128,
    },

    /// This order's execution was already applied in this round.
    #[error("CX_ERR_301: Execution already applied: round {round_id}, order {order_id}")]
    ExecutionAlreadyApplied { round_id: u64, order_id: OrderId },

    /// Debits and credits of an asset do not cancel out across the round.
    #[error("CX_ERR_302: Round imbalance on {asset}: debits {debits} != credits {credits}")]
    RoundImbalance {
        asset: Asset,
        debits: u128,
        credits: u128,
    },

    /// The round carries more allocations than the configured maximum.
    #[error("CX_ERR_303: Round too large: {count} orders exceeds limit of {limit}")]
    RoundTooLarge { count: usize, limit: usize },

    /// Total balances of an asset no longer match total deposits.
    #[error("CX_ERR_304: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    // =================================================================
    // General (9xx)
    // =================================================================
    /// Configuration error (invalid values, missing fields, etc.).
    #[error("CX_ERR_900: Configuration error: {0}")]
    Configuration(String),

    /// Serialization / deserialization error.
    #[error("CX_ERR_901: Serialization error: {0}")]
    Serialization(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, CxError>;

impl From<serde_json::Error> for CxError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
