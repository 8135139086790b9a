//! Integer tick price representation
//!
//! All prices in the simulation are whole ticks. Batch clearing takes the
//! floor midpoint of a crossing pair, so there is never a fractional price.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Price in whole ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Price(i64);

impl Price {
    pub const ZERO: Price = Price(0);

    /// Create from an integer tick count
    #[inline(always)]
    pub const fn from_int(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw tick count
    #[inline(always)]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Floor midpoint between two prices
    ///
    /// Used both as the uniform batch clearing price and as the arbitrage
    /// limit price between a crossed bid and ask.
    #[inline]
    pub const fn midpoint(a: Price, b: Price) -> Price {
        Price((a.0 + b.0) / 2)
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
