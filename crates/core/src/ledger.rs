//! Participant position and trade ledger
//!
//! Signed unit position plus the ordered sequence of realized trades. Every
//! fill moves the position by exactly one unit, so bilateral trades net to
//! zero across the two counterparties.

use crate::{Price, Side};
use serde::{Deserialize, Serialize};

/// One realized trade: the side the participant traded and the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub side: Side,
    pub price: Price,
}

/// Position and realized trades of one participant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticipantLedger {
    position: i64,
    trades: Vec<Trade>,
}

impl ParticipantLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one executed leg: buys add a unit, sells remove one.
    pub fn apply_fill(&mut self, side: Side, price: Price) {
        match side {
            Side::Buy => self.position += 1,
            Side::Sell => self.position -= 1,
        }
        self.trades.push(Trade { side, price });
    }

    pub fn position(&self) -> i64 {
        self.position
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Sum of sale prices minus sum of purchase prices.
    pub fn trading_profit(&self) -> i64 {
        self.trades
            .iter()
            .map(|t| match t.side {
                Side::Buy => -t.price.raw(),
                Side::Sell => t.price.raw(),
            })
            .sum()
    }

    /// Trading profit plus the open position valued at the last reference
    /// price.
    pub fn mark_to_market(&self, last_price: Price) -> i64 {
        self.trading_profit() + self.position * last_price.raw()
    }
}
