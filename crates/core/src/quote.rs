use crate::{Price, VenueId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One side of the consolidated quote: the best price and the venue showing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSide {
    pub price: Price,
    pub venue: VenueId,
}

/// Consolidated best bid and offer across all venues.
///
/// Each side is independently the extremum over the venues' current bests and
/// carries its source venue. An empty side is `None`, never an error. Venues
/// quoting the identical best price resolve to the lowest venue index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConsolidatedQuote {
    pub bid: Option<QuoteSide>,
    pub ask: Option<QuoteSide>,
}

impl ConsolidatedQuote {
    pub fn has_both_sides(&self) -> bool {
        self.bid.is_some() && self.ask.is_some()
    }

    /// Quoted spread in ticks (ask minus bid); `None` unless both sides exist.
    ///
    /// Negative across venues when a stale or fragmented market is crossed.
    pub fn spread(&self) -> Option<i64> {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) => Some(ask.price.raw() - bid.price.raw()),
            _ => None,
        }
    }

    /// True when the consolidated bid is strictly above the consolidated ask.
    ///
    /// A locked market (bid == ask) is not crossed: there is no spread left
    /// to capture.
    pub fn is_crossed(&self) -> bool {
        matches!(self.spread(), Some(s) if s < 0)
    }
}

impl fmt::Display for ConsolidatedQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bid {
            Some(bid) => write!(f, "{}({})", bid.price, bid.venue)?,
            None => write!(f, "-")?,
        }
        write!(f, " x ")?;
        match self.ask {
            Some(ask) => write!(f, "{}({})", ask.price, ask.venue),
            None => write!(f, "-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(bid: Option<i64>, ask: Option<i64>) -> ConsolidatedQuote {
        ConsolidatedQuote {
            bid: bid.map(|p| QuoteSide {
                price: Price::from_int(p),
                venue: VenueId(0),
            }),
            ask: ask.map(|p| QuoteSide {
                price: Price::from_int(p),
                venue: VenueId(1),
            }),
        }
    }

    #[test]
    fn test_spread_requires_both_sides() {
        assert_eq!(quote(Some(500), None).spread(), None);
        assert_eq!(quote(None, Some(1000)).spread(), None);
        assert_eq!(quote(Some(500), Some(1000)).spread(), Some(500));
    }

    #[test]
    fn test_crossed_is_strict() {
        assert!(quote(Some(1000), Some(500)).is_crossed());
        assert!(!quote(Some(500), Some(500)).is_crossed());
        assert!(!quote(Some(500), Some(1000)).is_crossed());
        assert!(!quote(Some(500), None).is_crossed());
    }
}
