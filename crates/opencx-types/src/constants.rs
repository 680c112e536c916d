//! System-wide constants for the OpenCX auction core.

use rust_decimal::RoundingStrategy;

/// Rounding applied to `consumed × price` when computing the want-side
/// settlement amount. Half-way values go to the nearest even integer.
pub const SETTLEMENT_ROUNDING: RoundingStrategy = RoundingStrategy::MidpointNearestEven;

/// Maximum number of order allocations cleared in a single round (default).
pub const DEFAULT_MAX_ORDERS_PER_ROUND: usize = 100_000;

/// Default number of `(round, order)` keys remembered by the ledger's
/// idempotency guard.
pub const DEFAULT_IDEMPOTENCY_CACHE_SIZE: usize = 500_000;

/// Domain separation tag for order content identifiers.
pub const ORDER_ID_DOMAIN: &[u8] = b"opencx:order_id:v1:";

/// Domain separation tag for the execution root hash.
pub const EXECUTION_ROOT_DOMAIN: &[u8] = b"opencx:execution_root:v1:";
