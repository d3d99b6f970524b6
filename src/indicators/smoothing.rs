//! First-order smoothing recurrences shared by EMA, MACD, KDJ and RSI.

use crate::core::error::{require_period, require_weight};
use crate::core::Result;

/// EMA coefficients for a period `n`: `a = 2/(n+1)`, `b = (n-1)/(n+1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmaFactor {
    /// Weight of the new observation.
    pub a: f64,
    /// Weight of the previous value.
    pub b: f64,
}

impl EmaFactor {
    pub fn new(period: usize) -> Result<Self> {
        require_period("EMA", period)?;
        let n = period as f64;
        Ok(Self {
            a: 2.0 / (n + 1.0),
            b: (n - 1.0) / (n + 1.0),
        })
    }

    /// `a·x + b·prev`
    #[inline]
    pub fn apply(&self, x: f64, prev: f64) -> f64 {
        self.a * x + self.b * prev
    }
}

/// Running EMA state.
#[derive(Debug, Clone, Copy)]
pub struct Ema {
    factor: EmaFactor,
    last: f64,
}

impl Ema {
    /// Start an EMA at `seed`.
    pub fn seed(period: usize, seed: f64) -> Result<Self> {
        Ok(Self {
            factor: EmaFactor::new(period)?,
            last: seed,
        })
    }

    /// Feed one observation and return the new value.
    #[inline]
    pub fn next(&mut self, x: f64) -> f64 {
        self.last = self.factor.apply(x, self.last);
        self.last
    }
}

/// Weighted moving average step: `(m·x + (n-m)·prev) / n`.
///
/// With `m = 1` this is Wilder-style smoothing over `n` periods.
#[inline]
pub fn weighted_sma(x: f64, period: usize, weight: usize, prev: f64) -> f64 {
    let n = period as f64;
    let m = weight as f64;
    (m * x + (n - m) * prev) / n
}

/// Running state for [`weighted_sma`].
#[derive(Debug, Clone, Copy)]
pub struct WeightedSma {
    period: usize,
    weight: usize,
    last: f64,
}

impl WeightedSma {
    /// Start at `seed`. Requires `1 <= weight <= period`.
    pub fn seed(period: usize, weight: usize, seed: f64) -> Result<Self> {
        require_period("Weighted SMA", period)?;
        require_weight("Weighted SMA", weight, period)?;
        Ok(Self {
            period,
            weight,
            last: seed,
        })
    }

    #[inline]
    pub fn next(&mut self, x: f64) -> f64 {
        self.last = weighted_sma(x, self.period, self.weight, self.last);
        self.last
    }
}
