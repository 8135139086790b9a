//! Participant contract
//!
//! Strategies decide, the session runner applies. A participant never holds
//! a reference into the market: it reads quotes through `&Regulator`, hands
//! back intents, and hears about the consequences through the addition and
//! execution reports the runner feeds to its blotter. Cancels alone are
//! unreported: the blotter forgets an order as the cancel intent is emitted.

use hermes_core::{Order, ParticipantId, ParticipantLedger, Price, RestingOrder};
use hermes_regulator::Regulator;
use std::collections::BTreeMap;
use std::fmt;
use std::mem;

/// Actions a participant can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderIntent {
    /// Cancel one of the participant's own resting orders. Must name a
    /// live order; the market rejects a cancel it cannot find.
    Cancel(RestingOrder),
    /// Place a new one-unit limit order.
    Place(Order),
}

/// Participant classes, used for surplus aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraderKind {
    ZeroIntelligence,
    MarketMaker,
    Arbitrageur,
}

impl fmt::Display for TraderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraderKind::ZeroIntelligence => write!(f, "zero-intelligence"),
            TraderKind::MarketMaker => write!(f, "market-maker"),
            TraderKind::Arbitrageur => write!(f, "arbitrageur"),
        }
    }
}

/// A participant's local mirror: its live resting orders and its ledger.
///
/// The regulator's ownership map is the source of truth; the blotter tracks
/// admissions and fills as the reports confirm them, and forgets cancelled
/// orders through [`Blotter::take_resting`] since no report confirms a
/// cancel. A fill for an order the blotter never saw admitted (the
/// aggressive leg of a continuous match) still reaches the ledger.
#[derive(Debug, Default)]
pub struct Blotter {
    resting: BTreeMap<RestingOrder, Price>,
    ledger: ParticipantLedger,
}

impl Blotter {
    pub fn on_admitted(&mut self, order: RestingOrder, price: Price) {
        self.resting.insert(order, price);
    }

    pub fn on_filled(&mut self, order: RestingOrder, price: Price) {
        self.resting.remove(&order);
        self.ledger.apply_fill(order.side, price);
    }

    /// Removes and returns every tracked resting order, in id order.
    /// Strategies call this while turning their book into cancel intents;
    /// an order handed out here is the emitter's to cancel, exactly once.
    pub fn take_resting(&mut self) -> Vec<RestingOrder> {
        mem::take(&mut self.resting).into_keys().collect()
    }

    /// Live resting orders, in id order.
    pub fn resting(&self) -> impl Iterator<Item = RestingOrder> + '_ {
        self.resting.keys().copied()
    }

    pub fn ledger(&self) -> &ParticipantLedger {
        &self.ledger
    }
}

/// Trader trait, implemented by every participant class.
pub trait Trader {
    fn id(&self) -> ParticipantId;

    /// Class for logging and report aggregation.
    fn kind(&self) -> TraderKind;

    /// Called on the participant's scheduled turn. The runner applies the
    /// returned intents in order: cancels immediately, placements under the
    /// session's matching mode.
    fn decide(&mut self, market: &Regulator) -> Vec<OrderIntent>;

    /// An addition report confirmed one of this participant's orders.
    fn on_admitted(&mut self, order: RestingOrder, price: Price);

    /// An execution report filled one of this participant's orders.
    fn on_filled(&mut self, order: RestingOrder, price: Price);

    fn ledger(&self) -> &ParticipantLedger;

    /// End-of-session surplus, marked at the final reference price.
    fn surplus(&self, last_price: Price) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermes_core::{OrderId, Side, VenueId};

    fn resting(id: u64) -> RestingOrder {
        RestingOrder::new(OrderId(id), Side::Buy, VenueId(0))
    }

    #[test]
    fn test_blotter_mirrors_admissions_and_fills() {
        let mut blotter = Blotter::default();
        blotter.on_admitted(resting(1), Price::from_int(100));
        blotter.on_admitted(resting(2), Price::from_int(101));
        assert_eq!(blotter.resting().count(), 2);

        blotter.on_filled(resting(1), Price::from_int(100));
        assert_eq!(blotter.resting().collect::<Vec<_>>(), vec![resting(2)]);
        assert_eq!(blotter.ledger().position(), 1);
    }

    #[test]
    fn test_take_resting_forgets_the_whole_book() {
        let mut blotter = Blotter::default();
        blotter.on_admitted(resting(3), Price::from_int(99));
        blotter.on_admitted(resting(7), Price::from_int(98));

        assert_eq!(blotter.take_resting(), vec![resting(3), resting(7)]);
        assert_eq!(blotter.resting().count(), 0);
        // A second sweep has nothing left to hand out.
        assert!(blotter.take_resting().is_empty());
    }

    #[test]
    fn test_fill_without_admission_still_reaches_the_ledger() {
        let mut blotter = Blotter::default();
        blotter.on_filled(resting(9), Price::from_int(105));
        assert_eq!(blotter.resting().count(), 0);
        assert_eq!(blotter.ledger().position(), 1);
    }
}
