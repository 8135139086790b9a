use crate::{ParticipantId, RestingOrder, VenueId};
use thiserror::Error;

/// Fatal conditions in the market core.
///
/// Every variant is an invariant violation, not a runtime condition: the
/// simulation is a deterministic computation, so a failed lookup means a
/// participant's mirror and the regulator's books have desynchronized.
/// Callers propagate these to the session boundary and abort; nothing is
/// retried or silently ignored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    #[error("No ownership entry for {0}: book and ownership map desynchronized")]
    UnknownOrder(RestingOrder),

    #[error("{0} does not exist")]
    UnknownVenue(VenueId),

    #[error("{0} has more than one pending order at continuous clearing")]
    MultiplePendingOrders(ParticipantId),
}

pub type MarketResult<T> = std::result::Result<T, MarketError>;
