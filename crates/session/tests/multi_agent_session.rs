//! Integration test: full sessions over the whole participant population
//!
//! Runs complete sessions end to end and checks the global accounting:
//! 1. Sessions run their schedule without tripping a market invariant
//! 2. Positions net to zero across all participants
//! 3. Continuous books are never left crossed
//! 4. A session replays bit-for-bit from its master seed

use hermes_core::Side;
use hermes_regulator::MatchingMode;
use hermes_session::{Session, SessionConfig, SessionError, SessionReport};

fn small_config(seed: u64) -> SessionConfig {
    SessionConfig {
        zero_intelligence: 8,
        market_makers: 2,
        zi_intensity: 0.05,
        mm_intensity: 0.01,
        session_length: 3_000.0,
        sigma: 200.0,
        seed: Some(seed),
        ..SessionConfig::default()
    }
}

fn run(config: SessionConfig) -> (Session, SessionReport) {
    let _ = env_logger::try_init();
    let mut session = Session::new(config).unwrap();
    let report = session.run().unwrap();
    (session, report)
}

fn net_position(session: &Session) -> i64 {
    session
        .participants()
        .map(|participant| participant.ledger().position())
        .sum()
}

#[test]
fn test_continuous_session_accounting() {
    let (session, report) = run(small_config(42));

    assert!(report.trade_count > 0, "this population should trade");
    assert_eq!(report.trade_count, session.regulator().trade_count());
    assert_eq!(net_position(&session), 0, "fills come in buy/sell pairs");
    assert!(
        session
            .regulator()
            .venues()
            .iter()
            .all(|venue| !venue.book().is_crossed()),
        "continuous matching never leaves a crossed book"
    );
    assert!(report.mean_execution_latency.is_some());
    assert!(
        session
            .regulator()
            .execution_latencies()
            .iter()
            .all(|latency| *latency >= 0.0)
    );
    assert_eq!(report.final_price, session.regulator().reference_price());
}

#[test]
fn test_batch_session_accounting() {
    let mut config = small_config(43);
    config.matching = MatchingMode::Batch { interval: 300.0 };
    let (session, report) = run(config);

    assert!(report.trade_count > 0);
    assert_eq!(net_position(&session), 0);
    assert!(
        session
            .regulator()
            .venues()
            .iter()
            .all(|venue| !venue.book().is_crossed()),
        "a clearing tick never leaves a crossed book behind"
    );
    assert!(
        session
            .regulator()
            .execution_latencies()
            .iter()
            .all(|latency| *latency >= 0.0)
    );
}

#[test]
fn test_session_replays_exactly_from_the_seed() {
    let (_, first) = run(small_config(7));
    let (_, second) = run(small_config(7));
    assert_eq!(first, second);
}

#[test]
fn test_entropy_seeded_session_still_balances() {
    let mut config = small_config(0);
    config.seed = None;
    config.session_length = 500.0;
    let (session, report) = run(config);

    assert_eq!(net_position(&session), 0);
    assert_eq!(report.matching, MatchingMode::Continuous);
}

#[test]
fn test_lone_market_maker_quotes_without_trading() {
    let mut config = small_config(5);
    config.zero_intelligence = 0;
    config.market_makers = 1;
    config.session_length = 2_000.0;
    config.sigma = 100.0;
    let (session, report) = run(config);

    // Nobody ever takes the other side.
    assert_eq!(report.trade_count, 0);
    assert_eq!(report.mean_execution_latency, None);
    assert_eq!(report.price_volatility, None);
    assert_eq!(report.zero_intelligence_surplus, 0.0);
    assert_eq!(report.market_maker_surplus, 0.0);
    assert_eq!(report.arbitrageur_surplus, 0.0);

    // The full ladder rests on the maker's home venue; the quoted spread is
    // pinned at the configured central spread.
    assert_eq!(report.mean_spread, Some(2_000.0));
    let home = &session.regulator().venues()[0];
    assert_eq!(home.book().len(Side::Buy), 10);
    assert_eq!(home.book().len(Side::Sell), 10);
    assert!(session.regulator().venues()[1].book().is_empty());
}

#[test]
fn test_invalid_config_is_rejected_at_build() {
    let mut config = small_config(1);
    config.zi_intensity = 0.0;
    assert!(matches!(
        Session::new(config),
        Err(SessionError::InvalidConfig(_))
    ));
}
