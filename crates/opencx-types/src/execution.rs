//! Execution records produced by the auction matching core.
//!
//! One call to the execution generator yields an [`OrderExecution`] (the
//! order's new resting state) and exactly two [`SettlementExecution`]s (the
//! ledger movements). Both are plain values with structural equality so the
//! clearing process can dedup and verify recomputation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Asset, OrderId};

/// Direction of a single ledger movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum SettlementType {
    /// Movement on the asset the order wanted.
    Debit,
    /// Movement on the asset the order offered.
    Credit,
}

impl fmt::Display for SettlementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debit => write!(f, "DEBIT"),
            Self::Credit => write!(f, "CREDIT"),
        }
    }
}

/// An order's state after a partial or full fill.
///
/// `filled` holds exactly when `new_amount_have == 0`. The zero value
/// (`Default`) is what a failed generation is observed as.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderExecution {
    pub order_id: OrderId,
    pub new_amount_want: u64,
    pub new_amount_have: u64,
    pub filled: bool,
}

impl fmt::Display for OrderExecution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OrderExecution[{}] have {} want {} filled {}",
            self.order_id.short(),
            self.new_amount_have,
            self.new_amount_want,
            self.filled,
        )
    }
}

/// One ledger movement of `amount` units of `asset`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SettlementExecution {
    pub amount: u64,
    pub asset: Asset,
    pub settlement_type: SettlementType,
}

impl SettlementExecution {
    #[must_use]
    pub fn debit(asset: impl Into<Asset>, amount: u64) -> Self {
        Self {
            amount,
            asset: asset.into(),
            settlement_type: SettlementType::Debit,
        }
    }

    #[must_use]
    pub fn credit(asset: impl Into<Asset>, amount: u64) -> Self {
        Self {
            amount,
            asset: asset.into(),
            settlement_type: SettlementType::Credit,
        }
    }

    #[must_use]
    pub fn is_debit(&self) -> bool {
        self.settlement_type == SettlementType::Debit
    }
}

impl fmt::Display for SettlementExecution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.settlement_type, self.amount, self.asset)
    }
}

/// Everything one generator call returns.
///
/// `remainder` is the part of the offered quantity the order could not
/// absorb. `Default` is the empty result: zero execution, no settlements,
/// zero remainder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub execution: OrderExecution,
    pub settlements: Vec<SettlementExecution>,
    pub remainder: u64,
}

impl ExecutionOutcome {
    /// The debit movement, if any.
    #[must_use]
    pub fn debit(&self) -> Option<&SettlementExecution> {
        self.settlements.iter().find(|s| s.is_debit())
    }

    /// The credit movement, if any.
    #[must_use]
    pub fn credit(&self) -> Option<&SettlementExecution> {
        self.settlements.iter().find(|s| !s.is_debit())
    }
}
