use serde::{Deserialize, Serialize};
use std::fmt;

/// Order identifier, unique per side across all venues within one session.
///
/// Assigned by the regulator's per-side sequence; a bid and an ask may carry
/// the same number, so an order is only fully identified together with its
/// side (see `RestingOrder`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Venue identifier: the index of the venue in the regulator's venue list.
///
/// Cross-venue quote ties resolve to the lowest index, so the index order is
/// part of the observable semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct VenueId(pub usize);

impl VenueId {
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "venue{}", self.0)
    }
}

/// Participant identifier: the index of the trader in the session roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ParticipantId(pub usize);

impl ParticipantId {
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trader{}", self.0)
    }
}
