//! # opencx-match
//!
//! **Pure deterministic execution generator for OpenCX auctions.**
//!
//! Given a resting [`AuctionOrder`](opencx_types::AuctionOrder), an externally
//! agreed clearing price and a quantity to consume, this crate produces the
//! order's new resting state and the two ledger movements that settle it.
//!
//! - **Zero side effects**: no I/O, no locking, no shared state
//! - **Deterministic output**: same input -> same output on every node
//! - **Exact arithmetic**: integer amounts, decimal prices, checked overflow
//! - **No partial results**: any error means nothing was produced
//!
//! Deciding *which* orders match and *at what price* belongs to the
//! surrounding clearing process, which must also serialize calls per pair.

pub mod determinism;
pub mod execution;
pub mod price;
pub mod round;

pub use determinism::{compute_execution_root, verify_execution_root};
pub use execution::{generate_execution_from_price, generate_order_fill};
pub use price::settle_amount;
pub use round::{Allocation, RoundResult, generate_round};
