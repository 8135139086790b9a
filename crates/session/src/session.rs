//! Session orchestration
//!
//! `Session::new` wires venues, the regulator and the participant
//! population from one config; `run` drives the event loop to the end of
//! the schedule and distills the run into a [`SessionReport`].
//!
//! Per event the loop is: advance the clock and the exogenous price, age
//! the snapshot chain, let the scheduled participant (or the batch tick)
//! act, clear, apply reports, append the snapshot, then give the
//! arbitrageur its turn against the fresh books.

use crate::config::SessionConfig;
use crate::error::SessionResult;
use crate::report::{self, SessionReport};
use crate::schedule::{self, Event, ScheduledEvent};
use hermes_core::{ParticipantId, Price, VenueId};
use hermes_regulator::{Asset, Regulator};
use hermes_traders::{
    Arbitrageur, MarketMaker, MarketMakerConfig, OrderIntent, Trader, TraderKind,
    ZeroIntelligence, ZeroIntelligenceConfig,
};
use hermes_venue::Venue;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::mem;

/// One configured simulation run.
pub struct Session {
    config: SessionConfig,
    seed: u64,
    regulator: Regulator,
    traders: Vec<Box<dyn Trader>>,
    arbitrageur: Arbitrageur,
    schedule: Vec<Event>,
}

impl Session {
    /// Builds venues, participants and the event schedule. Every random
    /// stream derives its seed from the master seed, so a session is fully
    /// reproducible from the config alone.
    pub fn new(config: SessionConfig) -> SessionResult<Self> {
        config.validate()?;
        let seed = match config.seed {
            Some(seed) => seed,
            None => StdRng::from_entropy().r#gen(),
        };
        info!("building session from master seed {seed}");

        let asset = Asset::new(
            Price::from_int(config.initial_price),
            config.mean_reversion,
            config.sigma,
            StdRng::seed_from_u64(seed.wrapping_add(1)),
        );
        let venues: Vec<Venue> = config.venues.iter().cloned().map(Venue::new).collect();
        let regulator = Regulator::new(
            venues,
            config.nbbo_delay,
            config.matching,
            asset,
            StdRng::seed_from_u64(seed.wrapping_add(2)),
        );

        let mut schedule_rng = StdRng::seed_from_u64(seed.wrapping_add(3));
        let schedule = schedule::build(&config, &mut schedule_rng)?;

        // Home venues round-robin over the participant index.
        let venue_count = config.venues.len();
        let mut traders: Vec<Box<dyn Trader>> =
            Vec::with_capacity(config.zero_intelligence + config.market_makers);
        for index in 0..config.zero_intelligence {
            let zi = ZeroIntelligence::new(
                ParticipantId(index),
                ZeroIntelligenceConfig {
                    venue: VenueId(index % venue_count),
                    q_max: config.q_max,
                    sigma_utility: config.sigma_utility,
                    shading_min: config.shading_min,
                    shading_max: config.shading_max,
                },
                StdRng::seed_from_u64(seed.wrapping_add(10 + index as u64)),
            );
            traders.push(Box::new(zi));
        }
        for offset in 0..config.market_makers {
            let index = config.zero_intelligence + offset;
            let mm = MarketMaker::new(
                ParticipantId(index),
                MarketMakerConfig {
                    venue: VenueId(index % venue_count),
                    num_orders: config.mm_num_orders,
                    tick_gap: config.mm_tick_gap,
                    spread: config.mm_spread,
                },
            );
            traders.push(Box::new(mm));
        }
        let arbitrageur = Arbitrageur::new(ParticipantId(traders.len()));

        info!(
            "{} zero-intelligence, {} market makers, 1 arbitrageur over {} venues; {} scheduled events",
            config.zero_intelligence,
            config.market_makers,
            venue_count,
            schedule.len()
        );
        Ok(Self {
            config,
            seed,
            regulator,
            traders,
            arbitrageur,
            schedule,
        })
    }

    pub fn regulator(&self) -> &Regulator {
        &self.regulator
    }

    /// Every participant, the arbitrageur last.
    pub fn participants(&self) -> impl Iterator<Item = &dyn Trader> {
        self.traders
            .iter()
            .map(|trader| trader.as_ref())
            .chain(std::iter::once(&self.arbitrageur as &dyn Trader))
    }

    /// Runs the whole schedule and assembles the report. The schedule is
    /// consumed; a second call finds it empty and only rebuilds the report.
    pub fn run(&mut self) -> SessionResult<SessionReport> {
        let events = mem::take(&mut self.schedule);
        for event in &events {
            self.step(event)?;
        }
        info!(
            "session complete: {} trades, final price {}",
            self.regulator.trade_count(),
            self.regulator.reference_price()
        );
        Ok(self.report())
    }

    fn step(&mut self, event: &Event) -> SessionResult<()> {
        // 1. Clock, exogenous price, snapshot aging.
        self.regulator.set_time(event.time);
        self.regulator.step_reference_price();
        self.regulator.prune_history();

        // 2. The scheduled action.
        match event.event {
            ScheduledEvent::Turn(index) => {
                let intents = self.traders[index].decide(&self.regulator);
                let owner = self.traders[index].id();
                self.apply_intents(owner, intents)?;
            }
            ScheduledEvent::BatchTick => self.regulator.run_batch_tick()?,
        }

        // 3. Clear, then let participants reconcile what happened.
        if self.regulator.mode().is_continuous() {
            self.regulator.clear_continuous()?;
        }
        self.apply_reports();

        // 4. The event becomes observable history.
        self.regulator.append_snapshot();

        // 5. The arbitrageur reacts to every event.
        let intents = self.arbitrageur.decide(&self.regulator);
        let owner = self.arbitrageur.id();
        self.apply_intents(owner, intents)?;
        if self.regulator.mode().is_continuous() {
            self.regulator.clear_continuous()?;
            self.apply_reports();
        }
        Ok(())
    }

    /// Cancels apply immediately; placements follow the matching mode.
    fn apply_intents(
        &mut self,
        owner: ParticipantId,
        intents: Vec<OrderIntent>,
    ) -> SessionResult<()> {
        for intent in intents {
            match intent {
                OrderIntent::Cancel(order) => self.regulator.cancel(order)?,
                OrderIntent::Place(order) => self.regulator.route(owner, order)?,
            }
        }
        Ok(())
    }

    /// Feeds this cycle's addition and execution reports to their owners,
    /// additions first.
    fn apply_reports(&mut self) {
        let reports = self.regulator.take_reports();
        for (resting, posting) in &reports.additions {
            self.participant_mut(posting.owner)
                .on_admitted(*resting, posting.price);
        }
        for (resting, execution) in &reports.executions {
            self.participant_mut(execution.owner)
                .on_filled(*resting, execution.price);
        }
    }

    fn participant_mut(&mut self, id: ParticipantId) -> &mut dyn Trader {
        if id.index() < self.traders.len() {
            self.traders[id.index()].as_mut()
        } else {
            &mut self.arbitrageur
        }
    }

    fn report(&self) -> SessionReport {
        let last = self.regulator.reference_price();
        let mut zero_intelligence_surplus = 0.0;
        let mut market_maker_surplus = 0.0;
        let mut arbitrageur_surplus = 0.0;
        for participant in self.participants() {
            let surplus = participant.surplus(last);
            match participant.kind() {
                TraderKind::ZeroIntelligence => zero_intelligence_surplus += surplus,
                TraderKind::MarketMaker => market_maker_surplus += surplus,
                TraderKind::Arbitrageur => arbitrageur_surplus += surplus,
            }
        }

        let spreads: Vec<f64> = self
            .regulator
            .spread_samples()
            .iter()
            .map(|spread| *spread as f64)
            .collect();
        SessionReport {
            seed: self.seed,
            matching: self.regulator.mode(),
            trade_count: self.regulator.trade_count(),
            mean_execution_latency: report::mean(self.regulator.execution_latencies()),
            mean_spread: report::mean(&spreads),
            price_volatility: report::price_volatility(
                self.regulator.trade_prices(),
                self.config.session_length,
                self.config.resample_interval,
            ),
            zero_intelligence_surplus,
            market_maker_surplus,
            arbitrageur_surplus,
            final_price: last,
        }
    }
}
