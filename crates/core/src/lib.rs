//! Core domain types for the Hermes fragmented-market simulator
//!
//! Value types shared by every bounded context: sides, integer tick prices,
//! order identities, consolidated quotes, processing-cycle reports and the
//! participant ledger. No behavior beyond what the types themselves own.

mod error;
mod ids;
mod ledger;
mod order;
mod price;
mod quote;
mod report;
mod side;

pub use error::{MarketError, MarketResult};
pub use ids::{OrderId, ParticipantId, VenueId};
pub use ledger::{ParticipantLedger, Trade};
pub use order::{Order, Ownership, RestingOrder};
pub use price::Price;
pub use quote::{ConsolidatedQuote, QuoteSide};
pub use report::{Execution, Posting, ReportSet};
pub use side::Side;

/// Simulation timestamp. Event times come from Poisson arrival processes and
/// are therefore real-valued, not integer ticks.
pub type SimTime = f64;
