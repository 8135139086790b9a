//! Processing-cycle reports
//!
//! The regulator reports what each cycle did through two maps: orders newly
//! admitted to a book and orders executed. The orchestrator applies them to
//! the owning participants and resets the set before the next cycle.

use crate::{ParticipantId, Price, RestingOrder};
use std::collections::BTreeMap;

/// One admission: who now owns the resting order and at what limit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub owner: ParticipantId,
    pub price: Price,
}

/// One executed leg: the owner of the filled order and the realized price.
///
/// The price is the trade price, not the order's limit: in a batch it is the
/// uniform clearing price, in continuous matching the resting side's quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Execution {
    pub owner: ParticipantId,
    pub price: Price,
}

/// Additions and executions of one processing cycle.
///
/// BTreeMap keyed by the full resting-order identity, so application order is
/// deterministic. An order admitted and cleared within the same batch tick is
/// struck from the additions before the set is handed out and only appears as
/// an execution.
#[derive(Debug, Clone, Default)]
pub struct ReportSet {
    pub additions: BTreeMap<RestingOrder, Posting>,
    pub executions: BTreeMap<RestingOrder, Execution>,
}

impl ReportSet {
    pub fn record_addition(&mut self, order: RestingOrder, posting: Posting) {
        self.additions.insert(order, posting);
    }

    /// Remove a same-cycle admission so it is never reported twice.
    pub fn strike_addition(&mut self, order: &RestingOrder) -> bool {
        self.additions.remove(order).is_some()
    }

    pub fn record_execution(&mut self, order: RestingOrder, execution: Execution) {
        self.executions.insert(order, execution);
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.executions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OrderId, Side, VenueId};

    fn resting(id: u64) -> RestingOrder {
        RestingOrder::new(OrderId(id), Side::Buy, VenueId(0))
    }

    #[test]
    fn test_strike_addition() {
        let mut reports = ReportSet::default();
        let order = resting(1);
        reports.record_addition(
            order,
            Posting {
                owner: ParticipantId(3),
                price: Price::from_int(1000),
            },
        );

        assert!(reports.strike_addition(&order));
        assert!(!reports.strike_addition(&order));
        assert!(reports.is_empty());
    }

    #[test]
    fn test_deterministic_iteration() {
        let mut reports = ReportSet::default();
        for id in [5u64, 1, 3] {
            reports.record_addition(
                resting(id),
                Posting {
                    owner: ParticipantId(0),
                    price: Price::from_int(100),
                },
            );
        }
        let ids: Vec<u64> = reports.additions.keys().map(|o| o.id.0).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }
}
