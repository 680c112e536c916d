//! Round generation: one clearing price applied to every allocation of a
//! market.
//!
//! The clearing process decides the uniform price and how much of each order
//! is consumed; this module only runs the execution generator over those
//! decisions and seals the result with an execution root. The round is
//! all-or-nothing: the first failing allocation aborts it.

use opencx_types::{
    AuctionOrder, ClearingConfig, CxError, ExecutionOutcome, OrderId, Pair, Result,
};
use rust_decimal::Decimal;

use crate::{determinism::compute_execution_root, execution::generate_execution_from_price};

/// The clearing process's decision for one order in a round.
#[derive(Debug, Clone)]
pub struct Allocation {
    pub order_id: OrderId,
    pub order: AuctionOrder,
    /// Quantity of the order's `asset_have` offered to it this round.
    pub have_amount: u64,
}

/// Everything produced by clearing one market for one round.
#[derive(Debug, Clone)]
pub struct RoundResult {
    pub market: Pair,
    /// Price in `market.asset_want` per `market.asset_have`.
    pub clearing_price: Decimal,
    /// One outcome per allocation, in allocation order.
    pub outcomes: Vec<ExecutionOutcome>,
    /// Hash over all outcomes for cross-node verification.
    pub execution_root: [u8; 32],
}

impl RoundResult {
    /// Number of orders that reached their terminal state this round.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.execution.filled).count()
    }
}

/// Generate executions for every allocation of `market` at `clearing_price`.
///
/// Orders on `market` itself execute at `clearing_price`; orders on the
/// reversed pair (the counter side) execute at its reciprocal. Rounding can
/// make the reciprocal inexact; the ledger's round balance check catches any
/// resulting imbalance.
///
/// # Errors
/// - [`CxError::RoundTooLarge`] if there are more allocations than
///   `config.max_orders_per_round`
/// - [`CxError::InvalidPair`] if the market is degenerate or an order belongs
///   to another market
/// - [`CxError::InvalidPrice`] if `clearing_price <= 0`
/// - any error of [`generate_execution_from_price`]
pub fn generate_round(
    market: &Pair,
    clearing_price: Decimal,
    allocations: &[Allocation],
    config: &ClearingConfig,
) -> Result<RoundResult> {
    if allocations.len() > config.max_orders_per_round {
        return Err(CxError::RoundTooLarge {
            count: allocations.len(),
            limit: config.max_orders_per_round,
        });
    }
    if !market.is_valid() {
        return Err(CxError::InvalidPair {
            pair: market.clone(),
            market: market.clone(),
        });
    }
    if clearing_price <= Decimal::ZERO {
        return Err(CxError::InvalidPrice {
            price: clearing_price,
        });
    }

    let counter_market = market.reversed();
    let counter_price = Decimal::ONE
        .checked_div(clearing_price)
        .ok_or(CxError::Overflow {
            consumed: 1,
            price: clearing_price,
        })?;

    let mut outcomes = Vec::with_capacity(allocations.len());
    for alloc in allocations {
        let price = if alloc.order.trading_pair == *market {
            clearing_price
        } else if alloc.order.trading_pair == counter_market {
            counter_price
        } else {
            return Err(CxError::InvalidPair {
                pair: alloc.order.trading_pair.clone(),
                market: market.clone(),
            });
        };
        outcomes.push(generate_execution_from_price(
            &alloc.order,
            &alloc.order_id,
            price,
            alloc.have_amount,
        )?);
    }

    let execution_root = compute_execution_root(&outcomes);
    let result = RoundResult {
        market: market.clone(),
        clearing_price,
        outcomes,
        execution_root,
    };

    tracing::info!(
        market = %result.market,
        price = %clearing_price,
        orders = result.outcomes.len(),
        filled = result.filled_count(),
        root = %hex::encode(&execution_root[..4]),
        "round generated"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use opencx_types::{SettlementExecution, Side};

    use super::*;

    fn market() -> Pair {
        Pair::new("BTC", "VTC")
    }

    fn alloc(seed: u8, order: AuctionOrder, have_amount: u64) -> Allocation {
        Allocation {
            order_id: OrderId::from_bytes([seed; 32]),
            order,
            have_amount,
        }
    }

    #[test]
    fn both_sides_clear_at_reciprocal_prices() {
        // Buyer offers 100 VTC for BTC; seller offers 50 BTC for VTC.
        let buy = AuctionOrder::dummy(Side::Buy, market(), 100, 50);
        let sell = AuctionOrder::dummy(Side::Sell, market().reversed(), 50, 100);
        let allocations = vec![alloc(1, buy, 100), alloc(2, sell, 50)];

        let round = generate_round(
            &market(),
            Decimal::new(5, 1),
            &allocations,
            &ClearingConfig::default(),
        )
        .unwrap();

        assert_eq!(round.outcomes.len(), 2);
        assert_eq!(round.filled_count(), 2);
        assert_eq!(
            round.outcomes[0].settlements,
            vec![
                SettlementExecution::debit("BTC", 50),
                SettlementExecution::credit("VTC", 100),
            ]
        );
        assert_eq!(
            round.outcomes[1].settlements,
            vec![
                SettlementExecution::debit("VTC", 100),
                SettlementExecution::credit("BTC", 50),
            ]
        );
    }

    #[test]
    fn foreign_pair_rejected() {
        let order = AuctionOrder::dummy(Side::Buy, Pair::new("BTC", "LTC"), 10, 10);
        let err = generate_round(
            &market(),
            Decimal::ONE,
            &[alloc(1, order, 10)],
            &ClearingConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CxError::InvalidPair { .. }));
    }

    #[test]
    fn degenerate_market_rejected() {
        let err = generate_round(
            &Pair::new("BTC", "BTC"),
            Decimal::ONE,
            &[],
            &ClearingConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CxError::InvalidPair { .. }));
    }

    #[test]
    fn one_bad_allocation_aborts_round() {
        let good = AuctionOrder::dummy(Side::Buy, market(), 10, 10);
        let bad = AuctionOrder::dummy(Side::Unknown, market(), 10, 10);
        let result = generate_round(
            &market(),
            Decimal::ONE,
            &[alloc(1, good, 10), alloc(2, bad, 10)],
            &ClearingConfig::default(),
        );
        assert!(matches!(result, Err(CxError::InvalidSide { .. })));
    }

    #[test]
    fn round_size_limit() {
        let config = ClearingConfig {
            max_orders_per_round: 1,
            ..ClearingConfig::default()
        };
        let order = AuctionOrder::dummy(Side::Buy, market(), 10, 10);
        let allocations = vec![alloc(1, order.clone(), 10), alloc(2, order, 10)];
        let err = generate_round(&market(), Decimal::ONE, &allocations, &config).unwrap_err();
        assert!(matches!(err, CxError::RoundTooLarge { count: 2, limit: 1 }));
    }

    #[test]
    fn zero_clearing_price_rejected() {
        let err = generate_round(&market(), Decimal::ZERO, &[], &ClearingConfig::default())
            .unwrap_err();
        assert!(matches!(err, CxError::InvalidPrice { .. }));
    }

    #[test]
    fn empty_round_has_stable_root() {
        let a = generate_round(&market(), Decimal::ONE, &[], &ClearingConfig::default()).unwrap();
        let b = generate_round(&market(), Decimal::TWO, &[], &ClearingConfig::default()).unwrap();
        assert!(a.outcomes.is_empty());
        assert_eq!(a.execution_root, b.execution_root);
    }
}
