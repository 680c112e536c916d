//! Determinism verification utilities for cross-node consistency.
//!
//! Every node clearing the same round must produce the exact same
//! executions. The `execution_root` is a hash over all outcomes that enables
//! quick verification without comparing full payloads.

use opencx_types::{ExecutionOutcome, SettlementType, constants};
use sha2::{Digest, Sha256};

/// Compute the execution root hash over a round's outcomes.
///
/// Depends on every field of every execution and settlement, in order.
#[must_use]
pub fn compute_execution_root(outcomes: &[ExecutionOutcome]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(constants::EXECUTION_ROOT_DOMAIN);
    hasher.update((outcomes.len() as u64).to_le_bytes());

    for outcome in outcomes {
        let exec = &outcome.execution;
        hasher.update(exec.order_id.as_bytes());
        hasher.update(exec.new_amount_want.to_le_bytes());
        hasher.update(exec.new_amount_have.to_le_bytes());
        hasher.update([u8::from(exec.filled)]);
        hasher.update(outcome.remainder.to_le_bytes());

        hasher.update((outcome.settlements.len() as u64).to_le_bytes());
        for settlement in &outcome.settlements {
            hasher.update(match settlement.settlement_type {
                SettlementType::Debit => [0u8],
                SettlementType::Credit => [1u8],
            });
            hasher.update((settlement.asset.len() as u64).to_le_bytes());
            hasher.update(settlement.asset.as_bytes());
            hasher.update(settlement.amount.to_le_bytes());
        }
    }

    let result = hasher.finalize();
    let mut root = [0u8; 32];
    root.copy_from_slice(&result);
    root
}

/// Recompute the root from the outcomes and compare with the expected one.
#[must_use]
pub fn verify_execution_root(outcomes: &[ExecutionOutcome], expected_root: &[u8; 32]) -> bool {
    compute_execution_root(outcomes) == *expected_root
}
