//! # opencx-settlement
//!
//! The clearing-round side of the auction core: everything that consumes
//! the executions produced by `opencx-match`.
//!
//! ## Architecture
//!
//! After a round is generated, the clearing process:
//! 1. Applies every order's settlements to the [`Ledger`] in one atomic step
//!    (idempotency, round balance and coverage are checked before anything
//!    is written)
//! 2. Applies every [`OrderExecution`](opencx_types::OrderExecution) to the
//!    [`RestingOrders`] set, removing filled orders
//!
//! Serializing rounds per market is the caller's responsibility.

pub mod idempotency;
pub mod ledger;
pub mod resting;

pub use idempotency::{ExecutionKey, IdempotencyGuard};
pub use ledger::{AccountId, Ledger, Posting};
pub use resting::RestingOrders;
