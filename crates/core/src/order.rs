use crate::{OrderId, ParticipantId, Price, Side, SimTime, VenueId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An aggressive order intent: side, limit price and target venue.
///
/// Transient by design. It either executes against the best opposite resting
/// order or is admitted into a book as a `RestingOrder`; it is never stored
/// in this form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub side: Side,
    pub price: Price,
    pub venue: VenueId,
}

impl Order {
    pub fn new(side: Side, price: Price, venue: VenueId) -> Self {
        Self { side, price, venue }
    }
}

/// Identity of an order resting in a venue's book.
///
/// The id is unique per side only, so the full identity is the
/// (id, side, venue) triple. Plain value equality and ordering: this is the
/// key of the ownership map and of the cycle reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RestingOrder {
    pub id: OrderId,
    pub side: Side,
    pub venue: VenueId,
}

impl RestingOrder {
    pub fn new(id: OrderId, side: Side, venue: VenueId) -> Self {
        Self { id, side, venue }
    }
}

impl fmt::Display for RestingOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}@{}", self.side, self.id, self.venue)
    }
}

/// Ownership record for one live resting order.
///
/// Exactly one entry exists per book-resident order; it is removed in the
/// same step that removes the order from its venue. The submission time
/// feeds the execution-latency series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ownership {
    pub owner: ParticipantId,
    pub submitted_at: SimTime,
}
