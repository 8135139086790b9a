//! Ladder market maker
//!
//! Quotes symmetric price ladders around the reference value:
//! - Central bid/ask at the reference estimate minus/plus half the spread
//! - `num_orders` rungs per side, `tick_gap` apart, strictly positive only
//! - Withholds rungs the delayed consolidated quote would fill immediately
//! - Cancels its whole book and requotes every turn
//!
//! The trim reads the *delayed* quote, so a market that moved inside the
//! observation window can still pick the fresh rungs off. That exposure is
//! the point of the model, not a flaw in the strategy.

use crate::trader::{Blotter, OrderIntent, Trader, TraderKind};
use hermes_core::{Order, ParticipantId, ParticipantLedger, Price, RestingOrder, Side, VenueId};
use hermes_regulator::Regulator;
use log::debug;

/// Configuration for the ladder market maker
#[derive(Debug, Clone)]
pub struct MarketMakerConfig {
    /// Venue all of this maker's orders target
    pub venue: VenueId,
    /// Rungs per side
    pub num_orders: usize,
    /// Price distance between adjacent rungs
    pub tick_gap: i64,
    /// Distance between the central bid and the central ask
    pub spread: i64,
}

impl Default for MarketMakerConfig {
    fn default() -> Self {
        Self {
            venue: VenueId(0),
            num_orders: 10,
            tick_gap: 50,
            spread: 2000,
        }
    }
}

/// Passive liquidity provider quoting both sides of one venue.
pub struct MarketMaker {
    id: ParticipantId,
    config: MarketMakerConfig,
    blotter: Blotter,
}

impl MarketMaker {
    pub fn new(id: ParticipantId, config: MarketMakerConfig) -> Self {
        Self {
            id,
            config,
            blotter: Blotter::default(),
        }
    }

    /// Central bid and ask around the estimate, both clamped at zero.
    fn central_prices(&self, estimate: i64) -> (i64, i64) {
        let half = self.config.spread / 2;
        ((estimate - half).max(0), (estimate + half).max(0))
    }

    /// Rung prices walking from the central price by `step`, keeping only
    /// strictly positive levels.
    fn ladder(&self, central: i64, step: i64) -> Vec<Price> {
        (0..self.config.num_orders as i64)
            .map(|k| central + step * k)
            .filter(|price| *price > 0)
            .map(Price::from_int)
            .collect()
    }
}

impl Trader for MarketMaker {
    fn id(&self) -> ParticipantId {
        self.id
    }

    fn kind(&self) -> TraderKind {
        TraderKind::MarketMaker
    }

    fn decide(&mut self, market: &Regulator) -> Vec<OrderIntent> {
        // The previous ladder is cancelled below but still rests right now,
        // so it must not count as a rival touch in the trim.
        let own = self.blotter.take_resting();
        let nbbo = market.delayed_quote(&own);
        let (central_bid, central_ask) = self.central_prices(market.reference_price().raw());

        let mut intents: Vec<OrderIntent> = own.into_iter().map(OrderIntent::Cancel).collect();
        // Asks first, then bids. A rung the lagged touch would execute
        // against is withheld this turn.
        for price in self.ladder(central_ask, self.config.tick_gap) {
            if nbbo.bid.is_none_or(|touch| price > touch.price) {
                intents.push(OrderIntent::Place(Order::new(
                    Side::Sell,
                    price,
                    self.config.venue,
                )));
            }
        }
        for price in self.ladder(central_bid, -self.config.tick_gap) {
            if nbbo.ask.is_none_or(|touch| price < touch.price) {
                intents.push(OrderIntent::Place(Order::new(
                    Side::Buy,
                    price,
                    self.config.venue,
                )));
            }
        }
        debug!(
            "{} requoting around {central_bid}/{central_ask} with {} intents",
            self.id,
            intents.len()
        );
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
        self.blotter.ledger().mark_to_market(last_price) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hermes_regulator::{Asset, MatchingMode};
    use hermes_venue::Venue;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn maker(num_orders: usize, tick_gap: i64, spread: i64) -> MarketMaker {
        let config = MarketMakerConfig {
            venue: VenueId(0),
            num_orders,
            tick_gap,
            spread,
        };
        MarketMaker::new(ParticipantId(50), config)
    }

    /// Zero-delay market so the delayed quote tracks the live books after
    /// every snapshot.
    fn market(initial: i64) -> Regulator {
        let asset = Asset::new(Price::from_int(initial), 0.05, 0.0, StdRng::seed_from_u64(1));
        Regulator::new(
            vec![Venue::new("New York"), Venue::new("Chicago")],
            0.0,
            MatchingMode::Continuous,
            asset,
            StdRng::seed_from_u64(2),
        )
    }

    fn refresh(market: &mut Regulator) {
        market.append_snapshot();
        market.prune_history();
    }

    fn placed(intents: &[OrderIntent]) -> Vec<(Side, i64)> {
        intents
            .iter()
            .filter_map(|intent| match intent {
                OrderIntent::Place(order) => Some((order.side, order.price.raw())),
                OrderIntent::Cancel(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_central_prices_straddle_the_estimate() {
        let mm = maker(10, 50, 20);
        assert_eq!(mm.central_prices(100), (90, 110));
    }

    #[test]
    fn test_central_prices_clamp_at_zero() {
        assert_eq!(maker(10, 50, 10).central_prices(0), (0, 5));
        assert_eq!(maker(10, 50, 100).central_prices(50), (0, 100));
    }

    #[test]
    fn test_ladder_walks_from_the_central_price() {
        let mm = maker(2, 5, 0);
        assert_eq!(
            mm.ladder(50, -5),
            vec![Price::from_int(50), Price::from_int(45)]
        );
        assert_eq!(
            mm.ladder(100, 5),
            vec![Price::from_int(100), Price::from_int(105)]
        );
    }

    #[test]
    fn test_ladder_drops_nonpositive_rungs() {
        let mm = maker(3, 10, 0);
        assert!(mm.ladder(0, -10).is_empty());
        assert_eq!(
            mm.ladder(5, 10),
            vec![Price::from_int(5), Price::from_int(15), Price::from_int(25)]
        );

        let wide = maker(3, 15, 0);
        assert_eq!(
            wide.ladder(30, -15),
            vec![Price::from_int(30), Price::from_int(15)]
        );
        assert_eq!(
            wide.ladder(40, 15),
            vec![Price::from_int(40), Price::from_int(55), Price::from_int(70)]
        );
    }

    #[test]
    fn test_rungs_inside_the_lagged_touch_are_withheld() {
        let mut market = market(100);
        // A rival bid at 112 on the other venue enters the delayed view.
        market
            .process(ParticipantId(0), Order::new(Side::Buy, Price::from_int(112), VenueId(1)))
            .unwrap();
        market.take_reports();
        refresh(&mut market);

        let mut mm = maker(3, 5, 20);
        let intents = mm.decide(&market);
        // Asks 110/115/120 lose the 110 rung; all three bids survive.
        assert_eq!(
            placed(&intents),
            vec![
                (Side::Sell, 115),
                (Side::Sell, 120),
                (Side::Buy, 90),
                (Side::Buy, 85),
                (Side::Buy, 80),
            ]
        );
    }

    #[test]
    fn test_own_quotes_do_not_trim_the_requote() {
        let mut market = market(100);
        let mut mm = maker(1, 5, 4);

        // First turn rests ask 102 / bid 98 on an otherwise empty market.
        for intent in mm.decide(&market) {
            match intent {
                OrderIntent::Place(order) => market.process(mm.id(), order).unwrap(),
                OrderIntent::Cancel(order) => market.cancel(order).unwrap(),
            }
        }
        let reports = market.take_reports();
        for (resting, posting) in &reports.additions {
            mm.on_admitted(*resting, posting.price);
        }
        refresh(&mut market);

        // The reference value jumps to 110 via a trade on the other venue.
        market
            .process(ParticipantId(1), Order::new(Side::Sell, Price::from_int(110), VenueId(1)))
            .unwrap();
        market
            .process(ParticipantId(2), Order::new(Side::Buy, Price::from_int(110), VenueId(1)))
            .unwrap();
        market.take_reports();
        refresh(&mut market);
        assert_eq!(market.reference_price(), Price::from_int(110));

        // The requote must not treat the stale own ask at 102 as a rival
        // touch: the new bid at 108 stays.
        let intents = mm.decide(&market);
        assert!(matches!(intents[0], OrderIntent::Cancel(_)));
        assert!(matches!(intents[1], OrderIntent::Cancel(_)));
        assert_eq!(placed(&intents), vec![(Side::Sell, 112), (Side::Buy, 108)]);
    }

    #[test]
    fn test_requote_cycle_mirrors_the_venue_book() {
        let mut market = market(100);
        let mut mm = maker(2, 5, 4);

        // Three full turns of cancel-and-requote with the reports fed back.
        // Turn one rests the ladder, turns two and three replace it; every
        // cancel must name an order the venue still holds.
        for _ in 0..3 {
            for intent in mm.decide(&market) {
                match intent {
                    OrderIntent::Cancel(order) => market.cancel(order).unwrap(),
                    OrderIntent::Place(order) => market.process(mm.id(), order).unwrap(),
                }
            }
            let reports = market.take_reports();
            for (resting, posting) in &reports.additions {
                mm.on_admitted(*resting, posting.price);
            }
            for (resting, execution) in &reports.executions {
                mm.on_filled(*resting, execution.price);
            }
            refresh(&mut market);

            // Two rungs per side rest after every turn, and the blotter
            // and the venue agree on them.
            let book = market.venues()[0].book();
            assert_eq!(book.len(Side::Buy), 2);
            assert_eq!(book.len(Side::Sell), 2);
            assert_eq!(mm.blotter.resting().count(), 4);
            assert!(mm.blotter.resting().all(|order| order.venue == VenueId(0)));
        }
    }

    #[test]
    fn test_surplus_is_mark_to_market() {
        let mut mm = maker(1, 5, 4);
        mm.on_filled(
            RestingOrder::new(hermes_core::OrderId(1), Side::Buy, VenueId(0)),
            Price::from_int(900),
        );
        assert_relative_eq!(mm.surplus(Price::from_int(1000)), 100.0);
    }
}
