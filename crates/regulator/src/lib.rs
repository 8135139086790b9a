//! Market regulator: the authoritative core of the simulated market.
//!
//! The regulator owns every venue, assigns order identifiers, keeps the
//! historic snapshot chain that latency-limited observers quote against,
//! matches orders under continuous or batch rules, and reports additions
//! and executions back to the orchestrator after each event.

mod asset;
mod batch;
mod nbbo;
mod regulator;
mod sequence;
mod snapshot;

pub use asset::Asset;
pub use regulator::{MatchingMode, Regulator};
pub use sequence::IdSequence;
pub use snapshot::HistoricSnapshot;
