//! Latency arbitrageur
//!
//! The fast participant. Invoked after every event rather than on a
//! schedule, it reads the accurate consolidated quote with no observation
//! delay. Whenever fragmentation leaves the consolidated book strictly
//! crossed it sells into the rich bid and buys the cheap ask, both at the
//! floor midpoint, capturing the dislocation the slower participants have
//! not seen yet.

use crate::trader::{Blotter, OrderIntent, Trader, TraderKind};
use hermes_core::{Order, ParticipantId, ParticipantLedger, Price, RestingOrder, Side};
use hermes_regulator::Regulator;
use log::debug;

/// Cross-venue arbitrageur with no observation delay.
pub struct Arbitrageur {
    id: ParticipantId,
    blotter: Blotter,
}

impl Arbitrageur {
    pub fn new(id: ParticipantId) -> Self {
        Self {
            id,
            blotter: Blotter::default(),
        }
    }
}

impl Trader for Arbitrageur {
    fn id(&self) -> ParticipantId {
        self.id
    }

    fn kind(&self) -> TraderKind {
        TraderKind::Arbitrageur
    }

    fn decide(&mut self, market: &Regulator) -> Vec<OrderIntent> {
        let quote = market.accurate_quote(&[]);
        if !quote.is_crossed() {
            return Vec::new();
        }
        let (Some(bid), Some(ask)) = (quote.bid, quote.ask) else {
            return Vec::new();
        };
        let mid = Price::midpoint(ask.price, bid.price);
        debug!(
            "{} arbitraging {} over {} at {mid}",
            self.id, bid.price, ask.price
        );
        // Hit the bid before lifting the ask.
        vec![
            OrderIntent::Place(Order::new(Side::Sell, mid, bid.venue)),
            OrderIntent::Place(Order::new(Side::Buy, mid, ask.venue)),
        ]
    }

    fn on_admitted(&mut self, order: RestingOrder, price: Price) {
        self.blotter.on_admitted(order, price);
    }

    fn on_filled(&mut self, order: RestingOrder, price: Price) {
        self.blotter.on_filled(order, price);
    }

    fn ledger(&self) -> &ParticipantLedger {
        self.blotter.ledger()
    }

    /// Realized trading profit only; the arbitrageur carries no private
    /// valuation and should end flat anyway.
    fn surplus(&self, _last_price: Price) -> f64 {
        self.blotter.ledger().trading_profit() as f64
    }
}
