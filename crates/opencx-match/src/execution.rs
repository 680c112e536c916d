//! Execution and fill generation.
//!
//! ```text
//! generate_execution_from_price(order, id, price, have) -> (execution, [debit, credit], remainder)
//! generate_order_fill(order, id, price)                 -> (execution, [debit, credit])
//! ```
//!
//! Both are pure functions of their inputs. The caller owns persisting the
//! new resting state and applying the two settlements atomically.

use opencx_types::{
    AuctionOrder, CxError, ExecutionOutcome, OrderExecution, OrderId, Result,
    SettlementExecution,
};
use rust_decimal::Decimal;

use crate::price::settle_amount;

/// Consume up to `have_amount` of the order's offered quantity at `price`.
///
/// ## Algorithm
///
/// 1. `consumed = min(have_amount, order.amount_have)`, the rest is returned
///    as `remainder`
/// 2. `want = round(consumed × price)` (half-to-even)
/// 3. New state: `amount_have - consumed`, `amount_want - want` (floored at 0),
///    filled when nothing is left to offer
/// 4. Settlements: Debit `want` on `asset_want`, Credit `consumed` on
///    `asset_have`
///
/// # Errors
/// - [`CxError::InvalidSide`] if the side is neither buy nor sell
/// - [`CxError::InvalidPrice`] if `price <= 0`
/// - [`CxError::Overflow`] if `consumed × price` does not fit in a `u64`
///
/// On error nothing is produced; `unwrap_or_default()` yields the empty
/// [`ExecutionOutcome`].
pub fn generate_execution_from_price(
    order: &AuctionOrder,
    order_id: &OrderId,
    price: Decimal,
    have_amount: u64,
) -> Result<ExecutionOutcome> {
    build_execution(order, order_id, price, have_amount).inspect_err(|err| {
        tracing::warn!(order_id = %order_id.short(), %price, %err, "execution rejected");
    })
}

/// Fully consume the order's offered quantity at `price`.
///
/// Same error taxonomy as [`generate_execution_from_price`]; the remainder
/// is always zero and is dropped.
pub fn generate_order_fill(
    order: &AuctionOrder,
    order_id: &OrderId,
    price: Decimal,
) -> Result<(OrderExecution, Vec<SettlementExecution>)> {
    let outcome = generate_execution_from_price(order, order_id, price, order.amount_have)?;
    debug_assert_eq!(outcome.remainder, 0);
    Ok((outcome.execution, outcome.settlements))
}

fn build_execution(
    order: &AuctionOrder,
    order_id: &OrderId,
    price: Decimal,
    have_amount: u64,
) -> Result<ExecutionOutcome> {
    if !order.is_buy_side() && !order.is_sell_side() {
        return Err(CxError::InvalidSide { side: order.side });
    }
    if price <= Decimal::ZERO {
        return Err(CxError::InvalidPrice { price });
    }

    let consumed = have_amount.min(order.amount_have);
    let remainder = have_amount - consumed;
    let want_amount = settle_amount(consumed, price)?;

    let new_amount_have = order.amount_have - consumed;
    let execution = OrderExecution {
        order_id: *order_id,
        new_amount_want: order.amount_want.saturating_sub(want_amount),
        new_amount_have,
        filled: new_amount_have == 0,
    };

    let pair = &order.trading_pair;
    let settlements = vec![
        SettlementExecution::debit(pair.asset_want.clone(), want_amount),
        SettlementExecution::credit(pair.asset_have.clone(), consumed),
    ];

    tracing::debug!(
        order_id = %order_id.short(),
        pair = %pair,
        consumed,
        want_amount,
        remainder,
        filled = execution.filled,
        "execution generated"
    );

    Ok(ExecutionOutcome {
        execution,
        settlements,
        remainder,
    })
}
