//! Participant strategies for the fragmented-market simulator
//!
//! Provides the participant contract and the three built-in classes:
//! - Zero-intelligence traders quoting private valuations at random
//! - Ladder market makers quoting both sides against the delayed quote
//! - A latency arbitrageur trading the accurate quote after every event
//!
//! Strategies are decision functions over `&Regulator`: they return
//! [`OrderIntent`]s and the session runner applies them, so all book
//! mutation stays inside the regulator.

pub mod arbitrageur;
pub mod market_maker;
pub mod trader;
pub mod zero_intelligence;

pub use arbitrageur::Arbitrageur;
pub use market_maker::{MarketMaker, MarketMakerConfig};
pub use trader::{Blotter, OrderIntent, Trader, TraderKind};
pub use zero_intelligence::{ZeroIntelligence, ZeroIntelligenceConfig};
