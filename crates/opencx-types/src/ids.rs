//! Identifiers and the asset pair model.
//!
//! [`OrderId`] and [`Nonce`] are owned fixed-size buffers. The order ID is a
//! content identifier minted by the ingress layer (see
//! [`AuctionOrder::content_id`](crate::AuctionOrder::content_id)); the matching
//! core treats it as opaque and never verifies it. Callers guarantee
//! uniqueness and integrity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Type alias for asset identifiers (e.g., "BTC", "VTC", "LTC").
pub type Asset = String;

// ---------------------------------------------------------------------------
// OrderId
// ---------------------------------------------------------------------------

/// 32-byte content identifier of an auction order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct OrderId(pub [u8; 32]);

impl OrderId {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// First four bytes in hex, for compact log lines.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// Nonce
// ---------------------------------------------------------------------------

/// Two bytes that disambiguate otherwise identical orders when hashing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nonce(pub [u8; 2]);

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// Pair
// ---------------------------------------------------------------------------

/// A trading pair seen from one side: the asset wanted and the asset offered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Pair {
    pub asset_want: Asset,
    pub asset_have: Asset,
}

impl Pair {
    #[must_use]
    pub fn new(asset_want: impl Into<Asset>, asset_have: impl Into<Asset>) -> Self {
        Self {
            asset_want: asset_want.into(),
            asset_have: asset_have.into(),
        }
    }

    /// The same market seen from the counter side.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            asset_want: self.asset_have.clone(),
            asset_have: self.asset_want.clone(),
        }
    }

    /// A pair is only tradeable when its two assets differ.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.asset_want != self.asset_have
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.asset_want, self.asset_have)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
