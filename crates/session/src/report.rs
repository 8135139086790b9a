//! End-of-session report
//!
//! The quantities the latency-arbitrage literature compares across matching
//! regimes: execution latency, quoted spread, realized volatility and the
//! surplus split between the participant classes.

use hermes_core::{Price, SimTime};
use hermes_regulator::MatchingMode;
use serde::Serialize;

/// Summary statistics of one completed session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    /// Master seed the session ran under
    pub seed: u64,
    /// Matching regime
    pub matching: MatchingMode,
    /// Completed bilateral trades
    pub trade_count: u64,
    /// Mean waiting time from submission to execution
    pub mean_execution_latency: Option<f64>,
    /// Mean consolidated spread over the per-event samples
    pub mean_spread: Option<f64>,
    /// Population standard deviation of the resampled log price series
    pub price_volatility: Option<f64>,
    /// Aggregate surplus per participant class
    pub zero_intelligence_surplus: f64,
    pub market_maker_surplus: f64,
    pub arbitrageur_surplus: f64,
    /// Reference price at session end
    pub final_price: Price,
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn std_dev(values: &[f64]) -> Option<f64> {
    let mu = mean(values)?;
    let variance = values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Forward-fills the realized prices onto the resample grid and returns the
/// log series. Grid points before the first trade and non-positive prices
/// contribute nothing.
fn resampled_log_prices(trades: &[(SimTime, Price)], length: f64, interval: f64) -> Vec<f64> {
    let mut series = Vec::new();
    let mut next = 0;
    let mut last: Option<Price> = None;
    let mut step = 1u64;
    loop {
        let grid = step as f64 * interval;
        if grid > length {
            break;
        }
        while next < trades.len() && trades[next].0 <= grid {
            last = Some(trades[next].1);
            next += 1;
        }
        if let Some(price) = last {
            if price.raw() > 0 {
                series.push((price.raw() as f64).ln());
            }
        }
        step += 1;
    }
    series
}

/// Volatility of the realized-price series on a fixed grid.
pub(crate) fn price_volatility(
    trades: &[(SimTime, Price)],
    length: f64,
    interval: f64,
) -> Option<f64> {
    std_dev(&resampled_log_prices(trades, length, interval))
}
