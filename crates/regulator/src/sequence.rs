//! Monotonic order-id sequences.

use hermes_core::OrderId;

/// Generator of order identifiers, one instance per book side.
///
/// Identifiers start at 1 and are never reused within a session. A resting
/// order is only unique together with its side, so bid #1 and ask #1 are
/// distinct orders.
#[derive(Debug, Clone, Default)]
pub struct IdSequence {
    last: u64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the sequence and return the fresh identifier.
    pub fn next_id(&mut self) -> OrderId {
        self.last += 1;
        OrderId(self.last)
    }
}
