//! Auction order types for the OpenCX matching core.
//!
//! An [`AuctionOrder`] rests between clearing rounds. Each round consumes
//! some or all of its `amount_have`, moving it from [`OrderState::Resting`]
//! towards the terminal [`OrderState::Filled`].

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{CxError, Nonce, OrderExecution, OrderId, Pair, Result, constants};

/// Which side of the market this order is on.
///
/// Parsing from text is exact and case-sensitive: only `"buy"` and `"sell"`
/// classify, everything else is [`Side::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Side {
    Buy,
    Sell,
    Unknown,
}

impl Side {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Unknown => "unknown",
        }
    }
}

impl From<&str> for Side {
    fn from(s: &str) -> Self {
        match s {
            "buy" => Self::Buy,
            "sell" => Self::Sell,
            _ => Self::Unknown,
        }
    }
}

impl From<String> for Side {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of an order across clearing rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderState {
    /// Still has offered quantity left; feeds the next round.
    Resting,
    /// Fully consumed. Terminal.
    Filled,
}

impl OrderState {
    /// The state an order is in after the given execution.
    #[must_use]
    pub fn after(execution: &OrderExecution) -> Self {
        if execution.filled {
            Self::Filled
        } else {
            Self::Resting
        }
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resting => write!(f, "RESTING"),
            Self::Filled => write!(f, "FILLED"),
        }
    }
}

/// A resting auction order: offers `amount_have` of `asset_have` in exchange
/// for `amount_want` of `asset_want`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuctionOrder {
    pub side: Side,
    pub trading_pair: Pair,
    pub amount_have: u64,
    pub amount_want: u64,
    pub nonce: Nonce,
}

impl AuctionOrder {
    #[must_use]
    pub fn is_buy_side(&self) -> bool {
        self.side == Side::Buy
    }

    #[must_use]
    pub fn is_sell_side(&self) -> bool {
        self.side == Side::Sell
    }

    /// Implied exchange rate in `asset_want` units per `asset_have` unit.
    ///
    /// Independent of side: a buy and a sell with the same amounts report
    /// the same rate.
    ///
    /// # Errors
    /// [`CxError::InvalidAmount`] if either amount is zero.
    pub fn price(&self) -> Result<Decimal> {
        if self.amount_have == 0 || self.amount_want == 0 {
            return Err(CxError::InvalidAmount {
                amount_have: self.amount_have,
                amount_want: self.amount_want,
            });
        }
        Ok(Decimal::from(self.amount_want) / Decimal::from(self.amount_have))
    }

    /// Content identifier: SHA-256 over side, pair, amounts and nonce.
    ///
    /// Ingress uses this to mint the [`OrderId`] handed to the matching core.
    /// The core itself never recomputes or checks it.
    #[must_use]
    pub fn content_id(&self) -> OrderId {
        let mut hasher = Sha256::new();
        hasher.update(constants::ORDER_ID_DOMAIN);
        hasher.update(self.side.as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update((self.trading_pair.asset_want.len() as u64).to_le_bytes());
        hasher.update(self.trading_pair.asset_want.as_bytes());
        hasher.update((self.trading_pair.asset_have.len() as u64).to_le_bytes());
        hasher.update(self.trading_pair.asset_have.as_bytes());
        hasher.update(self.amount_have.to_le_bytes());
        hasher.update(self.amount_want.to_le_bytes());
        hasher.update(self.nonce.0);
        let hash = hasher.finalize();
        let mut id = [0u8; 32];
        id.copy_from_slice(&hash);
        OrderId(id)
    }
}

impl fmt::Display for AuctionOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AuctionOrder[{}] {} have {} want {} nonce {}",
            self.side, self.trading_pair, self.amount_have, self.amount_want, self.nonce,
        )
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl AuctionOrder {
    pub fn dummy(side: Side, pair: Pair, amount_have: u64, amount_want: u64) -> Self {
        Self {
            side,
            trading_pair: pair,
            amount_have,
            amount_want,
            nonce: Nonce([0xff, 0x12]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn btc_vtc() -> Pair {
        Pair::new("BTC", "VTC")
    }

    #[test]
    fn side_parsing_is_exact() {
        assert_eq!(Side::from("buy"), Side::Buy);
        assert_eq!(Side::from("sell"), Side::Sell);
        assert_eq!(Side::from("BUY"), Side::Unknown);
        assert_eq!(Side::from("Sell"), Side::Unknown);
        assert_eq!(Side::from("idk"), Side::Unknown);
        assert_eq!(Side::from(""), Side::Unknown);
    }

    #[test]
    fn buy_side_predicates() {
        let order = AuctionOrder::dummy(Side::Buy, btc_vtc(), 1, 1);
        assert!(order.is_buy_side());
        assert!(!order.is_sell_side());
    }

    #[test]
    fn sell_side_predicates() {
        let order = AuctionOrder::dummy(Side::Sell, btc_vtc(), 1, 1);
        assert!(order.is_sell_side());
        assert!(!order.is_buy_side());
    }

    #[test]
    fn unknown_side_is_neither() {
        let order = AuctionOrder::dummy(Side::from("idk"), btc_vtc(), 1, 1);
        assert!(!order.is_buy_side());
        assert!(!order.is_sell_side());
    }

    #[test]
    fn price_one() {
        let order = AuctionOrder::dummy(Side::Buy, btc_vtc(), 100_000_000, 100_000_000);
        assert_eq!(order.price().unwrap(), Decimal::ONE);
    }

    #[test]
    fn price_same_for_buy_and_sell() {
        let pair = Pair::new("BTC", "LTC");
        let buy = AuctionOrder::dummy(Side::Buy, pair.clone(), 100_000_000, 200_000_000);
        let sell = AuctionOrder::dummy(Side::Sell, pair, 100_000_000, 200_000_000);
        assert_eq!(buy.price().unwrap(), Decimal::TWO);
        assert_eq!(sell.price().unwrap(), Decimal::TWO);
    }

    #[test]
    fn price_is_exact_ratio() {
        let order = AuctionOrder::dummy(Side::Sell, btc_vtc(), 3, 1);
        let price = order.price().unwrap();
        assert!(price < Decimal::new(34, 2));
        assert!(price > Decimal::new(33, 2));
    }

    #[test]
    fn price_rejects_zero_amounts() {
        let pair = btc_vtc();
        for (have, want) in [(100_000_000, 0), (0, 200_000_000), (0, 0)] {
            let order = AuctionOrder::dummy(Side::Buy, pair.clone(), have, want);
            let err = order.price().unwrap_err();
            assert!(
                matches!(err, CxError::InvalidAmount { amount_have, amount_want }
                    if amount_have == have && amount_want == want),
                "Expected InvalidAmount, got: {err:?}"
            );
        }
    }

    #[test]
    fn content_id_depends_on_nonce() {
        let a = AuctionOrder::dummy(Side::Buy, btc_vtc(), 10, 10);
        let mut b = a.clone();
        assert_eq!(a.content_id(), b.content_id());
        b.nonce = Nonce([0xf1, 0x23]);
        assert_ne!(a.content_id(), b.content_id());
    }

    #[test]
    fn content_id_depends_on_side() {
        let buy = AuctionOrder::dummy(Side::Buy, btc_vtc(), 10, 10);
        let sell = AuctionOrder::dummy(Side::Sell, btc_vtc(), 10, 10);
        assert_ne!(buy.content_id(), sell.content_id());
    }

    #[test]
    fn order_state_after_execution() {
        let mut exec = OrderExecution::default();
        assert_eq!(OrderState::after(&exec), OrderState::Resting);
        exec.filled = true;
        assert_eq!(OrderState::after(&exec), OrderState::Filled);
    }

    #[test]
    fn side_serde_roundtrip() {
        assert_eq!(serde_json::to_string(&Side::Buy).unwrap(), "\"buy\"");
        let back: Side = serde_json::from_str("\"sell\"").unwrap();
        assert_eq!(back, Side::Sell);
        let odd: Side = serde_json::from_str("\"Buy\"").unwrap();
        assert_eq!(odd, Side::Unknown);
    }

    #[test]
    fn order_display() {
        let order = AuctionOrder::dummy(Side::Buy, btc_vtc(), 5, 7);
        let s = format!("{order}");
        assert!(s.contains("buy"));
        assert!(s.contains("BTC/VTC"));
        assert!(s.contains("ff12"));
    }
}
