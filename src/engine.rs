//! Parallel computation of a configured set of overlays.
//!
//! Calculators share nothing but the borrowed bar slice, so the engine fans
//! them out over the rayon pool and gathers the named results.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::IndicatorConfig;
use crate::core::error::{IndicatorError, Result};
use crate::core::types::{OutputSeries, PriceBar};
use crate::indicators::{self, BollResult, KdjResult, MacdResult};

/// A single-series indicator tagged with its period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSeries {
    pub period: usize,
    pub series: OutputSeries,
}

/// Everything produced by one [`IndicatorEngine::compute`] call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub ma: Vec<PeriodSeries>,
    pub ema: Vec<PeriodSeries>,
    pub macd: Option<MacdResult>,
    pub boll: Option<BollResult>,
    pub kdj: Option<KdjResult>,
    pub rsi: Vec<PeriodSeries>,
}

impl IndicatorSet {
    /// MA series for `period`, if configured.
    pub fn ma(&self, period: usize) -> Option<&OutputSeries> {
        find_period(&self.ma, period)
    }

    /// EMA series for `period`, if configured.
    pub fn ema(&self, period: usize) -> Option<&OutputSeries> {
        find_period(&self.ema, period)
    }

    /// RSI series for `period`, if configured.
    pub fn rsi(&self, period: usize) -> Option<&OutputSeries> {
        find_period(&self.rsi, period)
    }
}

fn find_period(list: &[PeriodSeries], period: usize) -> Option<&OutputSeries> {
    list.iter()
        .find(|entry| entry.period == period)
        .map(|entry| &entry.series)
}

/// Computes an [`IndicatorConfig`] worth of overlays.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    config: IndicatorConfig,
}

impl IndicatorEngine {
    /// Create an engine, rejecting an invalid configuration up front.
    pub fn new(config: IndicatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run every configured calculator over `bars`.
    ///
    /// Bars must be ordered by non-decreasing x. The first failing calculator
    /// (invalid parameter) fails the whole call.
    pub fn compute(&self, bars: &[PriceBar]) -> Result<IndicatorSet> {
        check_ordered(bars)?;

        let config = &self.config;
        debug!(
            bars = bars.len(),
            series = config.series_count(),
            "computing indicator set"
        );

        let ((ma, ema), (rsi, (macd, (boll, kdj)))) = rayon::join(
            || {
                rayon::join(
                    || per_period(&config.ma_periods, |&p| p, |&p| indicators::ma(bars, p)),
                    || per_period(&config.ema_periods, |&p| p, |&p| indicators::ema(bars, p)),
                )
            },
            || {
                rayon::join(
                    || {
                        per_period(
                            &config.rsi,
                            |p| p.period,
                            |p| indicators::rsi(bars, p.period, p.weight),
                        )
                    },
                    || {
                        rayon::join(
                            || {
                                config
                                    .macd
                                    .map(|p| indicators::macd(bars, p.short, p.long, p.signal))
                                    .transpose()
                            },
                            || {
                                rayon::join(
                                    || {
                                        config
                                            .boll
                                            .map(|p| indicators::boll(bars, p.period, p.k))
                                            .transpose()
                                    },
                                    || {
                                        config
                                            .kdj
                                            .map(|p| {
                                                indicators::kdj(
                                                    bars, p.period, p.k_period, p.d_period,
                                                    p.weight,
                                                )
                                            })
                                            .transpose()
                                    },
                                )
                            },
                        )
                    },
                )
            },
        );

        let set = IndicatorSet {
            ma: ma?,
            ema: ema?,
            macd: macd?,
            boll: boll?,
            kdj: kdj?,
            rsi: rsi?,
        };
        debug!("indicator set complete");
        Ok(set)
    }
}

/// Compute one series per parameter set in parallel, keeping config order.
fn per_period<P, K, F>(params: &[P], key: K, calc: F) -> Result<Vec<PeriodSeries>>
where
    P: Sync,
    K: Fn(&P) -> usize + Sync + Send,
    F: Fn(&P) -> Result<OutputSeries> + Sync + Send,
{
    params
        .par_iter()
        .map(|p| {
            calc(p).map(|series| PeriodSeries {
                period: key(p),
                series,
            })
        })
        .collect()
}

/// Reject bars whose x decreases.
pub fn check_ordered(bars: &[PriceBar]) -> Result<()> {
    match bars.windows(2).position(|pair| pair[1].x < pair[0].x) {
        Some(i) => Err(IndicatorError::unordered_input(i + 1)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{MacdParams, RsiParams};
    use crate::core::types::bars_from_closes;

    fn sample_bars(n: usize) -> Vec<PriceBar> {
        let closes: Vec<f64> = (0..n).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0).collect();
        bars_from_closes(&closes)
    }

    #[test]
    fn test_matches_direct_calls() {
        let bars = sample_bars(60);
        let engine = IndicatorEngine::new(IndicatorConfig::default()).unwrap();
        let set = engine.compute(&bars).unwrap();

        assert_eq!(set.ma.len(), 4);
        assert_eq!(set.ma(20), Some(&indicators::ma(&bars, 20).unwrap()));
        assert_eq!(set.ema(26), Some(&indicators::ema(&bars, 26).unwrap()));
        assert_eq!(set.rsi(6), Some(&indicators::rsi(&bars, 6, 1).unwrap()));
        assert_eq!(set.macd, Some(indicators::macd(&bars, 12, 26, 9).unwrap()));
        assert_eq!(set.boll, Some(indicators::boll(&bars, 20, 2).unwrap()));
        assert_eq!(set.kdj, Some(indicators::kdj(&bars, 9, 3, 3, 1).unwrap()));
    }

    #[test]
    fn test_config_order_preserved() {
        let config = IndicatorConfig {
            ma_periods: vec![30, 5, 10],
            ..IndicatorConfig::empty()
        };
        let set = IndicatorEngine::new(config).unwrap().compute(&sample_bars(40)).unwrap();
        let periods: Vec<usize> = set.ma.iter().map(|s| s.period).collect();
        assert_eq!(periods, vec![30, 5, 10]);
        assert!(set.macd.is_none());
        assert!(set.rsi.is_empty());
    }

    #[test]
    fn test_unordered_input_rejected() {
        let mut bars = sample_bars(5);
        bars[3].x = 1.5;
        let engine = IndicatorEngine::new(IndicatorConfig::default()).unwrap();
        assert_eq!(
            engine.compute(&bars),
            Err(IndicatorError::UnorderedInput { index: 3 })
        );
    }

    #[test]
    fn test_invalid_parameter_propagates() {
        let config = IndicatorConfig {
            rsi: vec![RsiParams { period: 6, weight: 7 }],
            ..IndicatorConfig::empty()
        };
        let engine = IndicatorEngine::new(config).unwrap();
        assert!(matches!(
            engine.compute(&sample_bars(10)),
            Err(IndicatorError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = IndicatorConfig {
            macd: Some(MacdParams { short: 26, long: 26, signal: 9 }),
            ..IndicatorConfig::default()
        };
        assert!(IndicatorEngine::new(config).is_err());
    }

    #[test]
    fn test_empty_input() {
        let engine = IndicatorEngine::new(IndicatorConfig::default()).unwrap();
        let set = engine.compute(&[]).unwrap();
        assert!(set.ma.iter().all(|s| s.series.is_empty()));
        assert!(set.macd.unwrap().is_empty());
    }
}
