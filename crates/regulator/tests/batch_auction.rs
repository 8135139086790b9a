//! Integration test: uniform-price batch clearing under random order flow
//!
//! Drives several ticks of seeded random submissions and checks the
//! auction's global invariants:
//! 1. Books are never crossed after a tick
//! 2. Every submitted order is either resting or executed, exactly once
//! 3. Executions never violate the submitted limit
//! 4. The same seed replays the same session

use hermes_core::{Order, ParticipantId, Price, Side, VenueId};
use hermes_regulator::{Asset, MatchingMode, Regulator};
use hermes_venue::Venue;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

const INTERVAL: f64 = 500.0;
const TICKS: usize = 6;
const ORDERS_PER_TICK: usize = 40;

fn market(seed: u64) -> Regulator {
    let _ = env_logger::try_init();
    let asset = Asset::new(Price::from_int(10_000), 0.05, 0.0, StdRng::seed_from_u64(1));
    Regulator::new(
        vec![Venue::new("New York"), Venue::new("Chicago")],
        100.0,
        MatchingMode::Batch { interval: INTERVAL },
        asset,
        StdRng::seed_from_u64(seed),
    )
}

/// Runs one full session, asserting the per-tick invariants along the way.
fn run_session(seed: u64) -> (Regulator, Vec<(f64, Price)>) {
    let mut market = market(seed);
    let mut flow = StdRng::seed_from_u64(seed ^ 0xA5A5);
    let mut limits: HashMap<ParticipantId, (Side, Price)> = HashMap::new();
    let mut submitted = 0usize;
    let mut executed = 0usize;
    let mut owner = 0usize;

    for tick in 0..TICKS {
        // === Random submissions during the interval ===
        for step in 0..ORDERS_PER_TICK {
            let at = tick as f64 * INTERVAL + step as f64;
            market.set_time(at);
            let side = if flow.gen_bool(0.5) { Side::Buy } else { Side::Sell };
            let price = Price::from_int(flow.gen_range(9_000..=11_000));
            let venue = VenueId(flow.gen_range(0..2));
            // One order per owner so nothing is superseded at intake.
            let id = ParticipantId(owner);
            owner += 1;
            limits.insert(id, (side, price));
            market.submit(id, Order::new(side, price, venue)).unwrap();
            submitted += 1;
        }

        // === Tick boundary ===
        market.set_time((tick + 1) as f64 * INTERVAL);
        market.run_batch_tick().unwrap();
        let reports = market.take_reports();
        executed += reports.executions.len();

        for (resting, execution) in &reports.executions {
            let (side, limit) = limits[&execution.owner];
            assert_eq!(side, resting.side);
            match side {
                Side::Buy => assert!(
                    limit >= execution.price,
                    "buy limit {limit} filled above at {}",
                    execution.price
                ),
                Side::Sell => assert!(
                    limit <= execution.price,
                    "sell limit {limit} filled below at {}",
                    execution.price
                ),
            }
        }

        for venue in market.venues() {
            assert!(
                !venue.book().is_crossed(),
                "book crossed after tick {tick}"
            );
        }
    }

    // === Conservation: no order lost, none duplicated ===
    let resting: usize = market
        .venues()
        .iter()
        .map(|v| v.book().len(Side::Buy) + v.book().len(Side::Sell))
        .sum();
    assert_eq!(resting + executed, submitted);
    assert!(executed > 0, "flow this heavy should cross at least once");
    assert_eq!(executed as u64, market.trade_count() * 2);

    let prices = market.trade_prices().to_vec();
    (market, prices)
}

#[test]
fn test_random_flow_respects_auction_invariants() {
    let (market, prices) = run_session(42);
    println!(
        "cleared {} pairs over {} ticks, last price {:?}",
        market.trade_count(),
        TICKS,
        prices.last()
    );
}

#[test]
fn test_same_seed_replays_the_same_session() {
    let (first, first_prices) = run_session(1234);
    let (second, second_prices) = run_session(1234);

    assert_eq!(first_prices, second_prices);
    assert_eq!(first.trade_count(), second.trade_count());
    for (a, b) in first.venues().iter().zip(second.venues()) {
        assert_eq!(a.book().best(Side::Buy), b.book().best(Side::Buy));
        assert_eq!(a.book().best(Side::Sell), b.book().best(Side::Sell));
    }
}
