//! Event schedule
//!
//! Each participant arrives by an independent Poisson process over the
//! session, so the merged schedule interleaves the classes in proportion to
//! their intensities. Batch mode adds the fixed clearing-tick grid.

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use hermes_regulator::MatchingMode;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Exp};

/// What the runner does when a scheduled time is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledEvent {
    /// A participant's turn, by trader index.
    Turn(usize),
    /// A uniform-price clearing tick.
    BatchTick,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub time: f64,
    pub event: ScheduledEvent,
}

/// Draws every participant's arrival times, merges in the tick grid and
/// sorts by time.
pub fn build(config: &SessionConfig, rng: &mut StdRng) -> SessionResult<Vec<Event>> {
    let mut events = Vec::new();
    let trader_count = config.zero_intelligence + config.market_makers;
    for index in 0..trader_count {
        let intensity = if index < config.zero_intelligence {
            config.zi_intensity
        } else {
            config.mm_intensity
        };
        let arrivals = Exp::new(intensity).map_err(|source| {
            SessionError::InvalidConfig(format!("arrival intensity {intensity}: {source}"))
        })?;
        let mut clock = 0.0;
        loop {
            clock += arrivals.sample(rng);
            if clock > config.session_length {
                break;
            }
            events.push(Event {
                time: clock,
                event: ScheduledEvent::Turn(index),
            });
        }
    }

    if let MatchingMode::Batch { interval } = config.matching {
        let mut tick = 1u64;
        loop {
            let time = tick as f64 * interval;
            if time > config.session_length {
                break;
            }
            events.push(Event {
                time,
                event: ScheduledEvent::BatchTick,
            });
            tick += 1;
        }
    }

    // Stable sort: simultaneous arrivals keep participant order, ticks last.
    events.sort_by(|a, b| a.time.total_cmp(&b.time));
    Ok(events)
}
