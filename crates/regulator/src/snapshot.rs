//! Timestamped copies of all venue books.
//!
//! Slow traders see a different consolidated quote than the infinitely fast
//! arbitrageur, so after every event the regulator keeps a snapshot of every
//! book. The chain is ordered most-recent-first and the delayed quote reads
//! its oldest retained entry.

use hermes_core::SimTime;
use hermes_venue::Book;

/// Full market state as of one event, indexed by venue.
#[derive(Debug, Clone)]
pub struct HistoricSnapshot {
    pub taken_at: SimTime,
    pub books: Vec<Book>,
}

impl HistoricSnapshot {
    pub fn new(taken_at: SimTime, books: Vec<Book>) -> Self {
        Self { taken_at, books }
    }

    /// Age of this snapshot relative to the given clock.
    pub fn age(&self, now: SimTime) -> SimTime {
        now - self.taken_at
    }
}
