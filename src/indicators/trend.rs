//! Trend indicators: MA, EMA.

use super::smoothing::Ema;
use crate::core::error::require_period;
use crate::core::types::{OutputPoint, OutputSeries, PriceBar};
use crate::core::Result;

/// Simple Moving Average of the close.
///
/// # Arguments
/// * `bars` - Price bars
/// * `period` - Lookback period
///
/// # Returns
/// One point per full window (`len - period + 1` points), each at the x of
/// the window's last bar. Empty if the input is shorter than `period`.
pub fn ma(bars: &[PriceBar], period: usize) -> Result<OutputSeries> {
    require_period("MA", period)?;

    let n = bars.len();
    if period > n {
        return Ok(Vec::new());
    }

    // Re-sum every window; nothing carries between points.
    Ok(((period - 1)..n)
        .map(|i| {
            let sum: f64 = bars[i + 1 - period..=i].iter().map(|b| b.close).sum();
            OutputPoint::new(bars[i].x, sum / period as f64)
        })
        .collect())
}

/// Exponential Moving Average of the close.
///
/// Seeded with the first close, so the output is as long as the input:
/// `EMA[i] = a·close[i] + b·EMA[i-1]` with `a = 2/(n+1)`, `b = (n-1)/(n+1)`.
pub fn ema(bars: &[PriceBar], period: usize) -> Result<OutputSeries> {
    require_period("EMA", period)?;

    let Some(first) = bars.first() else {
        return Ok(Vec::new());
    };

    let mut state = Ema::seed(period, first.close)?;
    let mut result = Vec::with_capacity(bars.len());
    result.push(OutputPoint::new(first.x, first.close));

    for bar in &bars[1..] {
        result.push(OutputPoint::new(bar.x, state.next(bar.close)));
    }

    Ok(result)
}
