//! # opencx-types
//!
//! Shared types, errors, and configuration for the **OpenCX** auction core.
//!
//! This crate is the leaf dependency of the workspace: every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`OrderId`], [`Nonce`], [`Pair`], [`Asset`]
//! - **Order model**: [`AuctionOrder`], [`Side`], [`OrderState`]
//! - **Execution model**: [`OrderExecution`], [`SettlementExecution`], [`SettlementType`], [`ExecutionOutcome`]
//! - **Configuration**: [`ClearingConfig`]
//! - **Errors**: [`CxError`] with `CX_ERR_` prefix codes
//! - **Constants**: defaults and the settlement rounding rule

pub mod config;
pub mod constants;
pub mod error;
pub mod execution;
pub mod ids;
pub mod order;

// Re-export all primary types at crate root for ergonomic imports:
//   use opencx_types::{AuctionOrder, Side, OrderExecution, ...};

pub use config::*;
pub use error::*;
pub use execution::*;
pub use ids::*;
pub use order::*;

// Constants are accessed via `opencx_types::constants::FOO`
// (not re-exported to avoid name collisions).
