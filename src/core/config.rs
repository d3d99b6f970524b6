//! Indicator parameters and the engine configuration.
//!
//! Every calculator also takes its parameters as plain integers; these
//! structs only bundle the conventional defaults for callers that compute a
//! whole set of overlays at once.

use serde::{Deserialize, Serialize};

use super::error::{IndicatorError, Result};

/// MACD periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MacdParams {
    /// Short EMA period.
    pub short: usize,
    /// Long EMA period.
    pub long: usize,
    /// Signal (DEA) EMA period.
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            short: 12,
            long: 26,
            signal: 9,
        }
    }
}

/// Bollinger band parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BollParams {
    /// Window length.
    pub period: usize,
    /// Root taken of the sample variance (2 = standard deviation).
    pub k: u32,
}

impl Default for BollParams {
    fn default() -> Self {
        Self { period: 20, k: 2 }
    }
}

/// KDJ parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KdjParams {
    /// High/low lookback.
    pub period: usize,
    /// K smoothing period.
    pub k_period: usize,
    /// D smoothing period.
    pub d_period: usize,
    /// Weight of the newest value in both smoothings.
    pub weight: usize,
}

impl Default for KdjParams {
    fn default() -> Self {
        Self {
            period: 9,
            k_period: 3,
            d_period: 3,
            weight: 1,
        }
    }
}

/// RSI parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RsiParams {
    /// Smoothing period; also the number of warm-up bars.
    pub period: usize,
    /// Weight of the newest change.
    pub weight: usize,
}

impl RsiParams {
    /// RSI with unit weight.
    pub fn new(period: usize) -> Self {
        Self { period, weight: 1 }
    }
}

impl Default for RsiParams {
    fn default() -> Self {
        Self::new(14)
    }
}

/// The set of overlays computed by [`IndicatorEngine`](crate::engine::IndicatorEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// One MA series per period.
    pub ma_periods: Vec<usize>,
    /// One EMA series per period.
    pub ema_periods: Vec<usize>,
    /// `None` skips MACD.
    pub macd: Option<MacdParams>,
    /// `None` skips Bollinger bands.
    pub boll: Option<BollParams>,
    /// `None` skips KDJ.
    pub kdj: Option<KdjParams>,
    /// One RSI series per parameter set; periods must be distinct.
    pub rsi: Vec<RsiParams>,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ma_periods: vec![5, 10, 20, 30],
            ema_periods: vec![12, 26],
            macd: Some(MacdParams::default()),
            boll: Some(BollParams::default()),
            kdj: Some(KdjParams::default()),
            rsi: vec![RsiParams::new(6), RsiParams::new(12), RsiParams::new(24)],
        }
    }
}

impl IndicatorConfig {
    /// Configuration with nothing enabled.
    pub fn empty() -> Self {
        Self {
            ma_periods: Vec::new(),
            ema_periods: Vec::new(),
            macd: None,
            boll: None,
            kdj: None,
            rsi: Vec::new(),
        }
    }

    /// Number of output series this configuration produces.
    pub fn series_count(&self) -> usize {
        self.ma_periods.len()
            + self.ema_periods.len()
            + self.rsi.len()
            + 3 * (self.macd.is_some() as usize
                + self.boll.is_some() as usize
                + self.kdj.is_some() as usize)
    }

    /// Check the configuration before any computation.
    ///
    /// Catches problems a per-calculator parameter check cannot see, such as
    /// duplicate periods that would produce indistinguishable series.
    pub fn validate(&self) -> Result<()> {
        check_unique("ma_periods", &self.ma_periods)?;
        check_unique("ema_periods", &self.ema_periods)?;
        let rsi_periods: Vec<usize> = self.rsi.iter().map(|p| p.period).collect();
        check_unique("rsi", &rsi_periods)?;

        if let Some(macd) = &self.macd {
            if macd.short >= macd.long {
                return Err(IndicatorError::invalid_config(format!(
                    "macd short period ({}) must be below long period ({})",
                    macd.short, macd.long
                )));
            }
        }
        Ok(())
    }
}

fn check_unique(name: &str, periods: &[usize]) -> Result<()> {
    for (i, p) in periods.iter().enumerate() {
        if periods[..i].contains(p) {
            return Err(IndicatorError::invalid_config(format!(
                "{name} lists period {p} more than once"
            )));
        }
    }
    Ok(())
}
