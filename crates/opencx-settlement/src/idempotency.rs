//! Execution idempotency guard: prevents applying the same order's
//! settlements twice in one round.
//!
//! The guard maintains a bounded cache so memory usage stays predictable in
//! long-running nodes; the oldest keys are evicted first.

use std::collections::{HashSet, VecDeque};

use opencx_types::{CxError, OrderId, Result};

/// Identity of one applied execution: which order, in which round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExecutionKey {
    pub round_id: u64,
    pub order_id: OrderId,
}

impl ExecutionKey {
    #[must_use]
    pub fn new(round_id: u64, order_id: OrderId) -> Self {
        Self { round_id, order_id }
    }

    fn already_applied(self) -> CxError {
        CxError::ExecutionAlreadyApplied {
            round_id: self.round_id,
            order_id: self.order_id,
        }
    }
}

/// Bounded set of applied [`ExecutionKey`]s with FIFO eviction.
pub struct IdempotencyGuard {
    applied: HashSet<ExecutionKey>,
    /// Insertion order for eviction (front = oldest).
    order: VecDeque<ExecutionKey>,
    max_size: usize,
}

impl IdempotencyGuard {
    /// Create a new guard with the given maximum cache size.
    ///
    /// # Panics
    /// Panics if `max_size` is zero.
    pub fn new(max_size: usize) -> Self {
        assert!(max_size > 0, "IdempotencyGuard max_size must be > 0");
        Self {
            applied: HashSet::new(),
            order: VecDeque::new(),
            max_size,
        }
    }

    /// Fail if `key` was already applied. Does not record it.
    pub fn check(&self, key: ExecutionKey) -> Result<()> {
        if self.applied.contains(&key) {
            return Err(key.already_applied());
        }
        Ok(())
    }

    /// Record `key` as applied.
    ///
    /// # Errors
    /// Returns [`CxError::ExecutionAlreadyApplied`] if it already was.
    pub fn mark_applied(&mut self, key: ExecutionKey) -> Result<()> {
        self.check(key)?;

        if self.applied.len() >= self.max_size {
            if let Some(oldest) = self.order.pop_front() {
                self.applied.remove(&oldest);
            }
        }

        self.applied.insert(key);
        self.order.push_back(key);
        Ok(())
    }

    pub fn is_applied(&self, key: &ExecutionKey) -> bool {
        self.applied.contains(key)
    }

    pub fn len(&self) -> usize {
        self.applied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }
}
