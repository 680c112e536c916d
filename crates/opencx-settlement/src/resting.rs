//! The resting order set carried between clearing rounds.
//!
//! Orders enter as [`OrderState::Resting`] and leave the set the moment an
//! execution reports them filled. Partially filled orders stay with their
//! updated amounts.

use std::collections::BTreeMap;

use opencx_types::{AuctionOrder, CxError, OrderExecution, OrderId, OrderState, Result};

/// Orders awaiting the next clearing round, keyed by content ID.
#[derive(Debug, Default)]
pub struct RestingOrders {
    orders: BTreeMap<OrderId, AuctionOrder>,
}

impl RestingOrders {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a newly submitted order.
    ///
    /// # Errors
    /// [`CxError::DuplicateOrder`] if the ID is already resting.
    pub fn insert(&mut self, order_id: OrderId, order: AuctionOrder) -> Result<()> {
        if self.orders.contains_key(&order_id) {
            return Err(CxError::DuplicateOrder(order_id));
        }
        self.orders.insert(order_id, order);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, order_id: &OrderId) -> Option<&AuctionOrder> {
        self.orders.get(order_id)
    }

    /// Move an order to the state reported by `execution`.
    ///
    /// # Errors
    /// [`CxError::OrderNotFound`] if the order is not resting, which includes
    /// orders already removed as filled.
    pub fn apply_execution(&mut self, execution: &OrderExecution) -> Result<OrderState> {
        let state = OrderState::after(execution);
        match state {
            OrderState::Filled => {
                self.orders
                    .remove(&execution.order_id)
                    .ok_or(CxError::OrderNotFound(execution.order_id))?;
            }
            OrderState::Resting => {
                let order = self
                    .orders
                    .get_mut(&execution.order_id)
                    .ok_or(CxError::OrderNotFound(execution.order_id))?;
                order.amount_have = execution.new_amount_have;
                order.amount_want = execution.new_amount_want;
            }
        }
        tracing::debug!(order_id = %execution.order_id.short(), %state, "resting order updated");
        Ok(state)
    }

    /// Iterate in order-ID order.
    pub fn iter(&self) -> impl Iterator<Item = (&OrderId, &AuctionOrder)> {
        self.orders.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
