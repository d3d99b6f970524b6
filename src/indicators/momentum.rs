//! Momentum indicators: MACD, KDJ, RSI.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::rolling::{rolling_max, rolling_min};
use super::smoothing::{Ema, WeightedSma};
use crate::core::error::{require_period, require_weight};
use crate::core::types::{BarField, OutputPoint, OutputSeries, PriceBar, field_values};
use crate::core::Result;

/// Initial K and D before the first window.
const KDJ_SEED: f64 = 50.0;

/// RSI emitted whenever the smoothed absolute change is zero.
pub const RSI_FLAT_VALUE: f64 = 100.0;

/// MACD result structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdResult {
    /// DIF: short EMA - long EMA.
    pub dif: OutputSeries,
    /// DEA: EMA of DIF.
    pub dea: OutputSeries,
    /// Histogram bar: 2·(DIF - DEA).
    pub macd: OutputSeries,
}

impl MacdResult {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            dif: Vec::with_capacity(capacity),
            dea: Vec::with_capacity(capacity),
            macd: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, x: f64, dif: f64, dea: f64) {
        self.dif.push(OutputPoint::new(x, dif));
        self.dea.push(OutputPoint::new(x, dea));
        self.macd.push(OutputPoint::new(x, 2.0 * (dif - dea)));
    }

    pub fn len(&self) -> usize {
        self.dif.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dif.is_empty()
    }
}

/// Moving Average Convergence Divergence (MACD).
///
/// Both close EMAs are seeded with the first close, so DIF, DEA and the
/// histogram all start at 0 on the first bar and the output is as long as
/// the input.
///
/// # Arguments
/// * `bars` - Price bars
/// * `short_period` - Short EMA period (default: 12)
/// * `long_period` - Long EMA period (default: 26)
/// * `signal_period` - DEA period (default: 9)
///
/// # Returns
/// MacdResult with DIF, DEA and histogram
pub fn macd(
    bars: &[PriceBar],
    short_period: usize,
    long_period: usize,
    signal_period: usize,
) -> Result<MacdResult> {
    require_period("MACD short", short_period)?;
    require_period("MACD long", long_period)?;
    require_period("MACD signal", signal_period)?;

    let Some(first) = bars.first() else {
        return Ok(MacdResult::default());
    };

    let mut short = Ema::seed(short_period, first.close)?;
    let mut long = Ema::seed(long_period, first.close)?;
    let mut signal = Ema::seed(signal_period, 0.0)?;

    let mut result = MacdResult::with_capacity(bars.len());
    result.push(first.x, 0.0, 0.0);

    for bar in &bars[1..] {
        let dif = short.next(bar.close) - long.next(bar.close);
        let dea = signal.next(dif);
        result.push(bar.x, dif, dea);
    }

    Ok(result)
}

/// KDJ result structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KdjResult {
    pub k: OutputSeries,
    pub d: OutputSeries,
    /// J = 3K - 2D.
    pub j: OutputSeries,
}

impl KdjResult {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            k: Vec::with_capacity(capacity),
            d: Vec::with_capacity(capacity),
            j: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.k.len()
    }

    pub fn is_empty(&self) -> bool {
        self.k.is_empty()
    }
}

/// KDJ stochastic oscillator.
///
/// ```text
/// RSV = (close - LLV(low, n)) / (HHV(high, n) - LLV(low, n)) · 100
/// K   = (m·RSV + (p1 - m)·K') / p1
/// D   = (m·K + (p2 - m)·D') / p2
/// J   = 3K - 2D
/// ```
///
/// K and D start at 50. When a window has no range the previous RSV is
/// reused (0 before the first window with a range). Values are not clamped.
///
/// # Arguments
/// * `bars` - Price bars
/// * `period` - High/low lookback (default: 9)
/// * `k_period` - K smoothing period (default: 3)
/// * `d_period` - D smoothing period (default: 3)
/// * `weight` - Weight of the newest value (default: 1)
///
/// # Returns
/// Three aligned series of `len - period + 1` points each
pub fn kdj(
    bars: &[PriceBar],
    period: usize,
    k_period: usize,
    d_period: usize,
    weight: usize,
) -> Result<KdjResult> {
    require_period("KDJ", period)?;
    require_period("KDJ K", k_period)?;
    require_period("KDJ D", d_period)?;
    require_weight("KDJ K", weight, k_period)?;
    require_weight("KDJ D", weight, d_period)?;

    let n = bars.len();
    if period > n {
        return Ok(KdjResult::default());
    }

    // Compact: highest[0] belongs to bar period - 1.
    let highest = rolling_max(&field_values(bars, BarField::High), period)?;
    let lowest = rolling_min(&field_values(bars, BarField::Low), period)?;

    let mut k_line = WeightedSma::seed(k_period, weight, KDJ_SEED)?;
    let mut d_line = WeightedSma::seed(d_period, weight, KDJ_SEED)?;
    let mut rsv = 0.0;
    let mut result = KdjResult::with_capacity(n - period + 1);

    for (offset, bar) in bars[period - 1..].iter().enumerate() {
        let range = highest[offset] - lowest[offset];
        if range == 0.0 {
            trace!(x = bar.x, rsv, "KDJ window has no range, reusing RSV");
        } else {
            rsv = (bar.close - lowest[offset]) / range * 100.0;
        }

        let k = k_line.next(rsv);
        let d = d_line.next(k);
        result.k.push(OutputPoint::new(bar.x, k));
        result.d.push(OutputPoint::new(bar.x, d));
        result.j.push(OutputPoint::new(bar.x, 3.0 * k - 2.0 * d));
    }

    Ok(result)
}

/// Relative Strength Index (RSI).
///
/// ```text
/// G = SMA(max(close - close', 0), n, m)
/// L = SMA(|close - close'|, n, m)
/// RSI = G / L · 100
/// ```
///
/// Both averages start at 0 on the first change. The first `n - 1` changes
/// only warm the averages up; a point is emitted from bar `n` onwards.
/// Whenever `L` is zero the point is [`RSI_FLAT_VALUE`]. With `m < n` that
/// only happens before the first price change; with `m == n` the history
/// term drops out and every flat bar has `L == 0`.
///
/// # Arguments
/// * `bars` - Price bars
/// * `period` - Smoothing period (commonly 6, 12, 24 or 14)
/// * `weight` - Weight of the newest change (default: 1)
///
/// # Returns
/// `len - period` points, or nothing if `len <= period`
pub fn rsi(bars: &[PriceBar], period: usize, weight: usize) -> Result<OutputSeries> {
    require_period("RSI", period)?;
    require_weight("RSI", weight, period)?;

    let n = bars.len();
    if n <= period {
        return Ok(Vec::new());
    }

    let mut gain = WeightedSma::seed(period, weight, 0.0)?;
    let mut change = WeightedSma::seed(period, weight, 0.0)?;
    let mut result = Vec::with_capacity(n - period);

    for i in 1..n {
        let diff = bars[i].close - bars[i - 1].close;
        let g = gain.next(diff.max(0.0));
        let l = change.next(diff.abs());

        if i < period {
            continue;
        }

        let value = if l == 0.0 {
            trace!(x = bars[i].x, "RSI smoothed absolute change is zero");
            RSI_FLAT_VALUE
        } else {
            g / l * 100.0
        };
        result.push(OutputPoint::new(bars[i].x, value));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{bars_from_closes, SeriesExt};

    #[test]
    fn test_macd() {
        let bars = bars_from_closes(&[10.0, 20.0]);
        let result = macd(&bars, 1, 3, 3).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result.dif[0].y, 0.0);
        // short EMA(1) = 20, long EMA(3) = 15
        assert!((result.dif[1].y - 5.0).abs() < 1e-10);
        // DEA = 0.5·5 + 0.5·0
        assert!((result.dea[1].y - 2.5).abs() < 1e-10);
        assert!((result.macd[1].y - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_macd_empty_and_invalid() {
        assert!(macd(&[], 12, 26, 9).unwrap().is_empty());
        let bars = bars_from_closes(&[1.0]);
        assert!(macd(&bars, 0, 26, 9).is_err());
        assert!(macd(&bars, 12, 26, 0).is_err());
    }

    #[test]
    fn test_kdj_first_point() {
        let bars = vec![
            PriceBar::new(0.0, 10.0, 12.0, 8.0, 11.0),
            PriceBar::new(1.0, 11.0, 14.0, 10.0, 13.0),
            PriceBar::new(2.0, 13.0, 13.5, 9.0, 12.0),
        ];
        let result = kdj(&bars, 2, 3, 3, 1).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.k.xs(), vec![1.0, 2.0]);

        // window [0, 1]: high 14, low 8, rsv = (13 - 8) / 6 · 100
        let rsv = 5.0 / 6.0 * 100.0;
        let k = (rsv + 2.0 * 50.0) / 3.0;
        let d = (k + 2.0 * 50.0) / 3.0;
        assert!((result.k[0].y - k).abs() < 1e-10);
        assert!((result.d[0].y - d).abs() < 1e-10);
        assert!((result.j[0].y - (3.0 * k - 2.0 * d)).abs() < 1e-10);
    }

    #[test]
    fn test_kdj_flat_window_reuses_rsv() {
        let mut bars = bars_from_closes(&[5.0, 5.0, 5.0]);
        bars.push(PriceBar::new(3.0, 5.0, 7.0, 5.0, 7.0));
        bars.push(PriceBar::flat(4.0, 7.0));
        let result = kdj(&bars, 1, 3, 3, 1).unwrap();

        // flat first window: rsv stays 0
        assert!((result.k[0].y - 100.0 / 3.0).abs() < 1e-10);
        // bar 3 has range 2 and closes at the high; bar 4 is flat and reuses 100
        let k3 = (100.0 + 2.0 * result.k[2].y) / 3.0;
        let k4 = (100.0 + 2.0 * k3) / 3.0;
        assert!((result.k[3].y - k3).abs() < 1e-10);
        assert!((result.k[4].y - k4).abs() < 1e-10);
    }

    #[test]
    fn test_kdj_invalid_parameters() {
        let bars = bars_from_closes(&[1.0, 2.0, 3.0]);
        assert!(kdj(&bars, 0, 3, 3, 1).is_err());
        assert!(kdj(&bars, 2, 0, 3, 1).is_err());
        assert!(kdj(&bars, 2, 3, 3, 0).is_err());
        assert!(kdj(&bars, 2, 3, 2, 3).is_err());
        assert!(kdj(&bars, 9, 3, 3, 1).unwrap().is_empty());
    }

    #[test]
    fn test_rsi() {
        // changes: +2, -1, +1
        let bars = bars_from_closes(&[10.0, 12.0, 11.0, 12.0]);
        let result = rsi(&bars, 2, 1).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.xs(), vec![2.0, 3.0]);

        // G: 1, 0.5, 0.75   L: 1, 1, 1
        assert!((result[0].y - 50.0).abs() < 1e-10);
        assert!((result[1].y - 75.0).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_flat_prices() {
        let bars = bars_from_closes(&[3.0; 6]);
        let result = rsi(&bars, 3, 1).unwrap();
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|p| p.y == RSI_FLAT_VALUE));
    }

    #[test]
    fn test_rsi_full_weight_flat_bars() {
        // m == n: a flat bar zeroes L even after a move
        let bars = bars_from_closes(&[1.0, 2.0, 2.0, 2.0]);
        let result = rsi(&bars, 2, 2).unwrap();
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|p| p.y == RSI_FLAT_VALUE));

        // and a falling bar alone decides the value
        let bars = bars_from_closes(&[1.0, 2.0, 2.0, 1.0]);
        let result = rsi(&bars, 2, 2).unwrap();
        assert_eq!(result[1].y, 0.0);
    }

    #[test]
    fn test_kdj_full_weight_tracks_rsv() {
        // m == p1 == p2: K and D equal the raw RSV
        let bars = vec![
            PriceBar::new(0.0, 10.0, 12.0, 8.0, 11.0),
            PriceBar::new(1.0, 11.0, 14.0, 10.0, 13.0),
        ];
        let result = kdj(&bars, 2, 2, 2, 2).unwrap();
        let rsv = 5.0 / 6.0 * 100.0;
        assert!((result.k[0].y - rsv).abs() < 1e-10);
        assert!((result.d[0].y - rsv).abs() < 1e-10);
        assert!((result.j[0].y - rsv).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_short_input_and_invalid() {
        let bars = bars_from_closes(&[1.0, 2.0, 3.0]);
        assert!(rsi(&bars, 3, 1).unwrap().is_empty());
        assert!(rsi(&bars, 0, 1).is_err());
        assert!(rsi(&bars, 2, 3).is_err());
    }
}
