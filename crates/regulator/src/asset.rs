//! Exogenous reference-price process.
//!
//! A mean-reverting walk with Gaussian shocks. In continuous trading the
//! regulator overwrites the current value with each realized trade price, so
//! price discovery feeds back into the process the slow observers estimate
//! from.

use hermes_core::Price;
use rand::prelude::*;
use rand_distr::StandardNormal;

/// Reference value of the traded asset.
pub struct Asset {
    /// Raw value series, one entry per step taken.
    series: Vec<i64>,
    /// Current value, possibly overwritten by a realized trade price.
    current: i64,
    mean_reversion: f64,
    sigma: f64,
    rng: StdRng,
}

impl Asset {
    pub fn new(initial_price: Price, mean_reversion: f64, sigma: f64, rng: StdRng) -> Self {
        Self {
            series: vec![initial_price.raw()],
            current: initial_price.raw(),
            mean_reversion,
            sigma,
            rng,
        }
    }

    /// Current reference price.
    pub fn price(&self) -> Price {
        Price::from_int(self.current)
    }

    /// Running mean of the stepped value series. Trade overwrites do not
    /// enter the mean.
    pub fn mean(&self) -> f64 {
        self.series.iter().sum::<i64>() as f64 / self.series.len() as f64
    }

    /// Draw a Gaussian shock and advance the process one step.
    pub fn step(&mut self) {
        let draw: f64 = self.rng.sample(StandardNormal);
        self.apply_shock(draw * self.sigma);
    }

    /// Replace the current value with a realized trade price.
    pub fn record_trade(&mut self, price: Price) {
        self.current = price.raw();
    }

    fn apply_shock(&mut self, shock: f64) {
        let raw = self.current as f64 * self.mean_reversion
            + self.mean() * (1.0 - self.mean_reversion)
            + shock;
        let next = (raw as i64).max(0);
        self.series.push(next);
        self.current = next;
    }
}
