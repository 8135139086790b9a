//! Zero-intelligence trader
//!
//! The Gode-Sunder style budget-constrained random trader:
//! - Draws a private descending gain schedule at construction
//! - Picks a side at random, forced at the position bounds
//! - Quotes reference value plus the marginal gain, shaded toward the market
//! - One order per turn to its home venue, replacing the previous one

use crate::trader::{Blotter, OrderIntent, Trader, TraderKind};
use hermes_core::{Order, ParticipantId, ParticipantLedger, Price, RestingOrder, Side, VenueId};
use hermes_regulator::Regulator;
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::StandardNormal;

/// Configuration for a zero-intelligence trader
#[derive(Debug, Clone)]
pub struct ZeroIntelligenceConfig {
    /// Venue all of this trader's orders target
    pub venue: VenueId,
    /// Position bound; the gain schedule holds 2*q_max entries
    pub q_max: i64,
    /// Standard deviation of the private gain draws
    pub sigma_utility: f64,
    /// Shading draw bounds, inclusive; `shading_min <= shading_max`
    pub shading_min: i64,
    pub shading_max: i64,
}

impl Default for ZeroIntelligenceConfig {
    fn default() -> Self {
        Self {
            venue: VenueId(0),
            q_max: 10,
            sigma_utility: (5e6f64).sqrt(),
            shading_min: 0, // no shading: quote the full private valuation
            shading_max: 0,
        }
    }
}

/// Budget-constrained random trader.
pub struct ZeroIntelligence {
    id: ParticipantId,
    config: ZeroIntelligenceConfig,
    /// Private marginal gains, sorted descending. Index `q_max + position`
    /// is the gain of the next unit bought; one below it, the gain of the
    /// unit given up by selling.
    gains: Vec<f64>,
    blotter: Blotter,
    rng: StdRng,
}

impl ZeroIntelligence {
    pub fn new(id: ParticipantId, config: ZeroIntelligenceConfig, mut rng: StdRng) -> Self {
        let mut gains: Vec<f64> = (0..2 * config.q_max)
            .map(|_| {
                let draw: f64 = rng.sample(StandardNormal);
                draw * config.sigma_utility
            })
            .collect();
        gains.sort_by(|a, b| b.total_cmp(a));
        Self {
            id,
            config,
            gains,
            blotter: Blotter::default(),
            rng,
        }
    }

    /// Signed private value of holding `position` units at session end.
    fn private_value(&self, position: i64) -> f64 {
        let origin = self.config.q_max;
        if position >= 0 {
            self.gains[origin as usize..(origin + position) as usize]
                .iter()
                .sum()
        } else {
            -self.gains[(origin + position) as usize..origin as usize]
                .iter()
                .sum::<f64>()
        }
    }
}

impl Trader for ZeroIntelligence {
    fn id(&self) -> ParticipantId {
        self.id
    }

    fn kind(&self) -> TraderKind {
        TraderKind::ZeroIntelligence
    }

    fn decide(&mut self, market: &Regulator) -> Vec<OrderIntent> {
        let position = self.blotter.ledger().position();
        // The position bounds force the side; anywhere between them a fair
        // coin picks it.
        let side = if position <= -self.config.q_max {
            Side::Buy
        } else if position >= self.config.q_max {
            Side::Sell
        } else if self.rng.gen_bool(0.5) {
            Side::Buy
        } else {
            Side::Sell
        };
        let utility = match side {
            Side::Buy => self.gains[(self.config.q_max + position) as usize],
            Side::Sell => self.gains[(self.config.q_max + position - 1) as usize],
        };
        let shade = self
            .rng
            .gen_range(self.config.shading_min..=self.config.shading_max);
        let valuation = (market.reference_price().raw() as f64 + utility) as i64;
        let limit = match side {
            Side::Buy => valuation - shade,
            Side::Sell => valuation + shade,
        }
        .max(0);
        debug!("{} quoting {side} at {limit} from position {position}", self.id);

        let mut intents: Vec<OrderIntent> = self
            .blotter
            .take_resting()
            .into_iter()
            .map(OrderIntent::Cancel)
            .collect();
        intents.push(OrderIntent::Place(Order::new(
            side,
            Price::from_int(limit),
            self.config.venue,
        )));
        intents
    }

    fn on_admitted(&mut self, order: RestingOrder, price: Price) {
        self.blotter.on_admitted(order, price);
    }

    fn on_filled(&mut self, order: RestingOrder, price: Price) {
        self.blotter.on_filled(order, price);
    }

    fn ledger(&self) -> &ParticipantLedger {
        self.blotter.ledger()
    }

    fn surplus(&self, last_price: Price) -> f64 {
        let position = self.blotter.ledger().position();
        self.blotter.ledger().mark_to_market(last_price) as f64 + self.private_value(position)
    }
}
