//! The regulator: venue owner, matcher and bookkeeper.
//!
//! All book mutation happens here, on the single control thread, in event
//! order. Participants only hand in intents; the orchestrator drives one
//! event to completion before presenting the next, which is what makes the
//! delayed quote and the batch aggregation well defined.

use crate::asset::Asset;
use crate::batch::{self, PendingSubmission};
use crate::nbbo;
use crate::sequence::IdSequence;
use crate::snapshot::HistoricSnapshot;
use hermes_core::{
    ConsolidatedQuote, Execution, MarketError, MarketResult, Order, OrderId, Ownership,
    ParticipantId, Posting, Price, ReportSet, RestingOrder, Side, SimTime, VenueId,
};
use hermes_venue::Venue;
use log::{debug, info};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::mem;

/// Matching regime, fixed for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchingMode {
    /// Match every inbound order immediately against the best opposite
    /// resting order of its target venue.
    Continuous,
    /// Accumulate orders and clear each venue at a uniform price once per
    /// `interval` time units.
    Batch { interval: f64 },
}

impl MatchingMode {
    pub fn is_continuous(self) -> bool {
        matches!(self, MatchingMode::Continuous)
    }
}

/// Owner of all venue state and sole author of matches.
pub struct Regulator {
    delay: f64,
    mode: MatchingMode,
    venues: Vec<Venue>,
    /// Snapshot chain, most recent first. Never empty: the delayed quote
    /// always has an entry to read.
    history: VecDeque<HistoricSnapshot>,
    current_time: SimTime,
    bid_ids: IdSequence,
    ask_ids: IdSequence,
    ownership: HashMap<RestingOrder, Ownership>,
    reports: ReportSet,
    pending: Vec<PendingSubmission>,
    asset: Asset,
    /// Tiebreak source for batch sequencing; seeded so runs replay exactly.
    rng: StdRng,
    execution_latencies: Vec<f64>,
    trade_prices: Vec<(SimTime, Price)>,
    spread_samples: Vec<i64>,
    trade_count: u64,
}

impl Regulator {
    pub fn new(
        venues: Vec<Venue>,
        delay: f64,
        mode: MatchingMode,
        asset: Asset,
        rng: StdRng,
    ) -> Self {
        let books = venues.iter().map(|v| v.book().clone()).collect();
        Self {
            delay,
            mode,
            venues,
            history: VecDeque::from([HistoricSnapshot::new(0.0, books)]),
            current_time: 0.0,
            bid_ids: IdSequence::new(),
            ask_ids: IdSequence::new(),
            ownership: HashMap::new(),
            reports: ReportSet::default(),
            pending: Vec::new(),
            asset,
            rng,
            execution_latencies: Vec::new(),
            trade_prices: Vec::new(),
            spread_samples: Vec::new(),
            trade_count: 0,
        }
    }

    pub fn mode(&self) -> MatchingMode {
        self.mode
    }

    pub fn current_time(&self) -> SimTime {
        self.current_time
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    /// Current value of the reference-price process.
    pub fn reference_price(&self) -> Price {
        self.asset.price()
    }

    /// Running mean of the reference-price process.
    pub fn reference_mean(&self) -> f64 {
        self.asset.mean()
    }

    /// Advance the simulated clock. Event times arrive in non-decreasing
    /// order from the schedule.
    pub fn set_time(&mut self, time: SimTime) {
        self.current_time = time;
    }

    /// Advance the exogenous reference-price process one step.
    pub fn step_reference_price(&mut self) {
        self.asset.step();
    }

    /// Consolidated quote over the live books.
    pub fn accurate_quote(&self, exclude: &[RestingOrder]) -> ConsolidatedQuote {
        nbbo::consolidate(self.venues.iter().map(Venue::book), exclude)
    }

    /// Consolidated quote as a latency-limited observer sees it.
    ///
    /// Reads the oldest retained snapshot, which pruning keeps at the
    /// smallest age at or past the configured delay. A participant passing
    /// its own resting orders here only hides the ones old enough to have
    /// entered that snapshot, exactly what a slow observer would still see
    /// others showing.
    pub fn delayed_quote(&self, exclude: &[RestingOrder]) -> ConsolidatedQuote {
        match self.history.back() {
            Some(snapshot) => nbbo::consolidate(&snapshot.books, exclude),
            None => ConsolidatedQuote::default(),
        }
    }

    /// Clone every book into a new snapshot at the head of the chain and
    /// sample the quoted spread.
    pub fn append_snapshot(&mut self) {
        let books = self.venues.iter().map(|v| v.book().clone()).collect();
        self.history
            .push_front(HistoricSnapshot::new(self.current_time, books));
        if let Some(spread) = self.accurate_quote(&[]).spread() {
            self.spread_samples.push(spread);
        }
    }

    /// Drop snapshots older than the delay requires.
    ///
    /// Walks newest-first and truncates after the first entry whose age
    /// reached the delay; that entry stays as the delayed observers' view.
    /// With a delay of zero exactly one snapshot survives. When no entry is
    /// old enough yet, nothing is removed.
    pub fn prune_history(&mut self) {
        let cutoff = self.current_time - self.delay;
        if let Some(index) = self.history.iter().position(|s| s.taken_at <= cutoff) {
            self.history.truncate(index + 1);
        }
    }

    /// Queue an order for the next clearing.
    pub fn submit(&mut self, owner: ParticipantId, order: Order) -> MarketResult<()> {
        self.check_venue(order.venue)?;
        self.pending.push(PendingSubmission {
            owner,
            order,
            submitted_at: self.current_time,
        });
        Ok(())
    }

    /// Mode-aware intake: matched immediately under continuous rules,
    /// queued until the next tick under batch rules.
    pub fn route(&mut self, owner: ParticipantId, order: Order) -> MarketResult<()> {
        match self.mode {
            MatchingMode::Continuous => self.process(owner, order),
            MatchingMode::Batch { .. } => self.submit(owner, order),
        }
    }

    /// Match one order under continuous rules.
    ///
    /// Routing is fixed-venue: the order trades against its target venue's
    /// own best opposite order or rests there. It never walks other books,
    /// even when one of them shows a better price.
    pub fn process(&mut self, owner: ParticipantId, order: Order) -> MarketResult<()> {
        self.check_venue(order.venue)?;
        let opposite = order.side.opposite();
        let top = self.venues[order.venue.index()]
            .book()
            .iter(opposite)
            .next()
            .copied();
        match top {
            Some(best) if crosses(order.side, order.price, best.price) => {
                self.execute_pair(owner, order, best.id, best.price)
            }
            _ => {
                self.admit(owner, order, self.current_time);
                Ok(())
            }
        }
    }

    /// Drain the intake queue under continuous rules.
    ///
    /// At most one order may be staged per participant per event; a second
    /// one means two turns overlapped upstream and the session must abort.
    pub fn clear_continuous(&mut self) -> MarketResult<()> {
        let staged = mem::take(&mut self.pending);
        let mut seen: HashSet<ParticipantId> = HashSet::with_capacity(staged.len());
        for submission in &staged {
            if !seen.insert(submission.owner) {
                return Err(MarketError::MultiplePendingOrders(submission.owner));
            }
        }
        for submission in staged {
            self.process(submission.owner, submission.order)?;
        }
        Ok(())
    }

    /// Admit everything queued since the previous tick, then clear each
    /// venue's crossing prefix at one uniform price.
    pub fn run_batch_tick(&mut self) -> MarketResult<()> {
        let staged = mem::take(&mut self.pending);
        if staged.is_empty() {
            return Ok(());
        }
        for submission in batch::sequence_intake(staged, &mut self.rng) {
            self.admit(submission.owner, submission.order, submission.submitted_at);
        }

        for index in 0..self.venues.len() {
            let Some(clearing) = batch::crossing_prefix(self.venues[index].book()) else {
                continue;
            };
            let venue = VenueId(index);
            let pairs = clearing.bids.len();
            for (side, entries) in [(Side::Buy, &clearing.bids), (Side::Sell, &clearing.asks)] {
                for entry in entries {
                    let resting = RestingOrder::new(entry.id, side, venue);
                    self.venues[index]
                        .book_mut()
                        .fill(entry.id, 1, side)
                        .ok_or(MarketError::UnknownOrder(resting))?;
                    // An order admitted this tick is struck from the
                    // additions and its apparent age is not real waiting.
                    let admitted_this_tick = self.reports.strike_addition(&resting);
                    self.settle(resting, clearing.price, admitted_this_tick)?;
                }
            }
            self.trade_count += pairs as u64;
            self.trade_prices.push((self.current_time, clearing.price));
            info!("{venue} cleared {pairs} pairs at {}", clearing.price);
        }
        Ok(())
    }

    /// Remove a resting order from its venue and from the ownership map.
    pub fn cancel(&mut self, order: RestingOrder) -> MarketResult<()> {
        self.check_venue(order.venue)?;
        self.ownership
            .remove(&order)
            .ok_or(MarketError::UnknownOrder(order))?;
        self.venues[order.venue.index()]
            .book_mut()
            .cancel(order.id, order.side)
            .ok_or(MarketError::UnknownOrder(order))?;
        debug!("cancelled {order}");
        Ok(())
    }

    /// Hand out this cycle's reports, resetting for the next cycle.
    pub fn take_reports(&mut self) -> ReportSet {
        mem::take(&mut self.reports)
    }

    pub fn execution_latencies(&self) -> &[f64] {
        &self.execution_latencies
    }

    pub fn spread_samples(&self) -> &[i64] {
        &self.spread_samples
    }

    /// Realized trade prices with their times, one entry per continuous
    /// match and one per venue batch clearing.
    pub fn trade_prices(&self) -> &[(SimTime, Price)] {
        &self.trade_prices
    }

    pub fn trade_count(&self) -> u64 {
        self.trade_count
    }

    /// Fill the resting order for one unit and settle both legs at its
    /// price.
    fn execute_pair(
        &mut self,
        aggressor: ParticipantId,
        order: Order,
        resting_id: OrderId,
        price: Price,
    ) -> MarketResult<()> {
        let opposite = order.side.opposite();
        let resting = RestingOrder::new(resting_id, opposite, order.venue);
        self.venues[order.venue.index()]
            .book_mut()
            .fill(resting_id, 1, opposite)
            .ok_or(MarketError::UnknownOrder(resting))?;
        self.settle(resting, price, false)?;

        // The aggressor gets a synthesized resting-order record so both legs
        // run through the same settlement path.
        let id = self.next_id(order.side);
        let synthetic = RestingOrder::new(id, order.side, order.venue);
        self.ownership.insert(
            synthetic,
            Ownership {
                owner: aggressor,
                submitted_at: self.current_time,
            },
        );
        self.settle(synthetic, price, false)?;

        self.trade_count += 1;
        self.trade_prices.push((self.current_time, price));
        // Realized prices overwrite the reference value: continuous trading
        // feeds its price discovery back into the exogenous process.
        self.asset.record_trade(price);
        debug!("trade at {price}: {synthetic} against {resting}");
        Ok(())
    }

    /// Remove the ownership entry, report the execution and record the
    /// waiting time.
    fn settle(&mut self, resting: RestingOrder, price: Price, same_tick: bool) -> MarketResult<()> {
        let owned = self
            .ownership
            .remove(&resting)
            .ok_or(MarketError::UnknownOrder(resting))?;
        self.reports.record_execution(
            resting,
            Execution {
                owner: owned.owner,
                price,
            },
        );
        if !same_tick {
            self.execution_latencies
                .push(self.current_time - owned.submitted_at);
        }
        Ok(())
    }

    /// Create a resting order in its venue with a fresh id, record the
    /// ownership and report the addition.
    fn admit(&mut self, owner: ParticipantId, order: Order, submitted_at: SimTime) -> RestingOrder {
        let id = self.next_id(order.side);
        let resting = RestingOrder::new(id, order.side, order.venue);
        self.venues[order.venue.index()]
            .book_mut()
            .add(order.side, id, order.price, 1);
        self.ownership.insert(
            resting,
            Ownership {
                owner,
                submitted_at,
            },
        );
        self.reports.record_addition(
            resting,
            Posting {
                owner,
                price: order.price,
            },
        );
        debug!("admitted {resting} at {} for {owner}", order.price);
        resting
    }

    fn next_id(&mut self, side: Side) -> OrderId {
        match side {
            Side::Buy => self.bid_ids.next_id(),
            Side::Sell => self.ask_ids.next_id(),
        }
    }

    fn check_venue(&self, venue: VenueId) -> MarketResult<()> {
        if venue.index() < self.venues.len() {
            Ok(())
        } else {
            Err(MarketError::UnknownVenue(venue))
        }
    }
}

fn crosses(side: Side, limit: Price, best_opposite: Price) -> bool {
    match side {
        Side::Buy => limit >= best_opposite,
        Side::Sell => limit <= best_opposite,
    }
}
