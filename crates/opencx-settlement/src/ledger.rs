//! In-memory ledger that applies a round's settlements atomically.
//!
//! Sign convention: a **Debit** on an account *increases* its balance of the
//! asset (the order receives what it wanted), a **Credit** *decreases* it
//! (the order pays what it offered).
//!
//! Round invariants enforced before anything is written:
//! ```text
//! ∀ (round, order): applied at most once
//! ∀ asset:          Σ debits == Σ credits
//! ∀ (account, asset): balance + debits - credits >= 0
//! ```
//! If any check fails, the ledger is left untouched.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use opencx_types::{
    Asset, ClearingConfig, CxError, OrderExecution, OrderId, Result, SettlementExecution,
    SettlementType,
};
use serde::{Deserialize, Serialize};

use crate::idempotency::{ExecutionKey, IdempotencyGuard};

/// Owner of balances in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "acct:{}", self.0)
    }
}

/// One order's contribution to a round: its execution and the account the
/// settlements land on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Posting {
    pub account: AccountId,
    pub execution: OrderExecution,
    pub settlements: Vec<SettlementExecution>,
}

#[derive(Default)]
struct Movement {
    debits: u128,
    credits: u128,
}

/// Per-(account, asset) balances with atomic round application.
pub struct Ledger {
    balances: HashMap<(AccountId, Asset), u128>,
    /// Total deposits per asset since genesis.
    deposits: HashMap<Asset, u128>,
    idempotency: IdempotencyGuard,
}

impl Ledger {
    /// Create an empty ledger.
    ///
    /// # Errors
    /// [`CxError::Configuration`] if `config` fails validation.
    pub fn new(config: &ClearingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            balances: HashMap::new(),
            deposits: HashMap::new(),
            idempotency: IdempotencyGuard::new(config.idempotency_cache_size),
        })
    }

    pub fn deposit(&mut self, account: AccountId, asset: &str, amount: u64) {
        *self
            .balances
            .entry((account, asset.to_string()))
            .or_insert(0) += u128::from(amount);
        *self.deposits.entry(asset.to_string()).or_insert(0) += u128::from(amount);
    }

    #[must_use]
    pub fn balance(&self, account: AccountId, asset: &str) -> u128 {
        self.balances
            .get(&(account, asset.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Apply every posting of a round, or none of them.
    ///
    /// # Errors
    /// - [`CxError::ExecutionAlreadyApplied`] if an order was already applied
    ///   in this round, or appears twice in `postings`
    /// - [`CxError::RoundImbalance`] if debits and credits of an asset differ
    /// - [`CxError::InsufficientBalance`] if a credit is not covered
    pub fn apply_round(&mut self, round_id: u64, postings: &[Posting]) -> Result<()> {
        // 1. Idempotency, including duplicates within this batch.
        let mut seen = HashSet::with_capacity(postings.len());
        let mut keys = Vec::with_capacity(postings.len());
        for posting in postings {
            let key = ExecutionKey::new(round_id, posting.execution.order_id);
            self.idempotency.check(key)?;
            keys.push(key);
            if !seen.insert(key) {
                return Err(CxError::ExecutionAlreadyApplied {
                    round_id,
                    order_id: posting.execution.order_id,
                });
            }
        }

        // 2. Round balance per asset, and net movement per account.
        let mut per_asset: BTreeMap<&str, Movement> = BTreeMap::new();
        let mut per_account: BTreeMap<(AccountId, &str), Movement> = BTreeMap::new();
        for posting in postings {
            for settlement in &posting.settlements {
                let amount = u128::from(settlement.amount);
                let asset_total = per_asset.entry(settlement.asset.as_str()).or_default();
                let account_total = per_account
                    .entry((posting.account, settlement.asset.as_str()))
                    .or_default();
                match settlement.settlement_type {
                    SettlementType::Debit => {
                        asset_total.debits += amount;
                        account_total.debits += amount;
                    }
                    SettlementType::Credit => {
                        asset_total.credits += amount;
                        account_total.credits += amount;
                    }
                }
            }
        }
        for (asset, movement) in &per_asset {
            if movement.debits != movement.credits {
                tracing::warn!(round_id, asset, "round imbalance");
                return Err(CxError::RoundImbalance {
                    asset: (*asset).to_string(),
                    debits: movement.debits,
                    credits: movement.credits,
                });
            }
        }

        // 3. Coverage: compute every new balance before writing any.
        let mut updates = Vec::with_capacity(per_account.len());
        for ((account, asset), movement) in &per_account {
            let available = self.balance(*account, asset) + movement.debits;
            let new_balance = available.checked_sub(movement.credits).ok_or_else(|| {
                CxError::InsufficientBalance {
                    asset: (*asset).to_string(),
                    needed: movement.credits,
                    available,
                }
            })?;
            updates.push(((*account, (*asset).to_string()), new_balance));
        }

        // 4. Commit.
        for (key, new_balance) in updates {
            self.balances.insert(key, new_balance);
        }
        // Posting order, so guard eviction is the same on every node.
        for key in keys {
            self.idempotency.mark_applied(key)?;
        }

        tracing::info!(
            round_id,
            postings = postings.len(),
            assets = per_asset.len(),
            "round applied to ledger"
        );
        Ok(())
    }

    /// Verify that the balances of `asset` sum to its total deposits.
    ///
    /// # Errors
    /// Returns [`CxError::SupplyInvariantViolation`] if they differ.
    pub fn verify_supply(&self, asset: &str) -> Result<()> {
        let actual: u128 = self
            .balances
            .iter()
            .filter(|((_, a), _)| a == asset)
            .map(|(_, balance)| *balance)
            .sum();
        let expected = self.deposits.get(asset).copied().unwrap_or(0);
        if actual != expected {
            return Err(CxError::SupplyInvariantViolation {
                reason: format!("Asset {asset}: balances {actual} != deposits {expected}"),
            });
        }
        Ok(())
    }

    pub fn applied_count(&self) -> usize {
        self.idempotency.len()
    }

    /// Whether `order_id` was already applied in `round_id`.
    pub fn is_applied(&self, round_id: u64, order_id: OrderId) -> bool {
        self.idempotency
            .is_applied(&ExecutionKey::new(round_id, order_id))
    }
}
