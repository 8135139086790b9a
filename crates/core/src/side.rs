use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side (Buy or Sell)
///
/// A half of an order book is named after the orders resting on it, so the
/// buy side is the bid queue and the sell side is the ask queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "bid"),
            Side::Sell => write!(f, "ask"),
        }
    }
}
