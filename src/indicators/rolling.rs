//! Trailing-window min/max (LLV/HHV).
//!
//! Outputs are compact: one value per full window, so the first element
//! corresponds to input index `period - 1`.

use crate::core::error::require_period;
use crate::core::types::{BarField, OutputPoint, OutputSeries, PriceBar};
use crate::core::Result;

/// Which extreme a rolling window reduces to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    Min,
    Max,
}

impl Extreme {
    #[inline]
    fn pick(self, a: f64, b: f64) -> f64 {
        match self {
            Extreme::Min => a.min(b),
            Extreme::Max => a.max(b),
        }
    }
}

/// Extreme of `data[end + 1 - period..=end]`.
///
/// Caller guarantees `period >= 1` and `end + 1 >= period`.
#[inline]
pub(crate) fn window_extreme(data: &[f64], end: usize, period: usize, extreme: Extreme) -> f64 {
    let start = end + 1 - period;
    data[start + 1..=end]
        .iter()
        .fold(data[start], |acc, &v| extreme.pick(acc, v))
}

/// Rolling extreme over every full `period`-length window.
///
/// Returns `len - period + 1` values, or nothing if the input is shorter
/// than one window.
pub fn rolling_extreme(data: &[f64], period: usize, extreme: Extreme) -> Result<Vec<f64>> {
    require_period("Rolling window", period)?;

    if data.len() < period {
        return Ok(Vec::new());
    }

    Ok(((period - 1)..data.len())
        .map(|i| window_extreme(data, i, period, extreme))
        .collect())
}

/// Calculate rolling minimum (Lowest Low Value) over a period.
///
/// # Arguments
/// * `data` - Input data slice
/// * `period` - Lookback period
///
/// # Returns
/// One minimum per full window (`len - period + 1` values)
pub fn rolling_min(data: &[f64], period: usize) -> Result<Vec<f64>> {
    rolling_extreme(data, period, Extreme::Min)
}

/// Calculate rolling maximum (Highest High Value) over a period.
///
/// # Arguments
/// * `data` - Input data slice
/// * `period` - Lookback period
///
/// # Returns
/// One maximum per full window (`len - period + 1` values)
pub fn rolling_max(data: &[f64], period: usize) -> Result<Vec<f64>> {
    rolling_extreme(data, period, Extreme::Max)
}

/// Rolling extreme of one bar field, placed at the x of each window's last bar.
pub fn rolling_field(
    bars: &[PriceBar],
    period: usize,
    field: BarField,
    extreme: Extreme,
) -> Result<OutputSeries> {
    let values: Vec<f64> = bars.iter().map(|bar| bar.field(field)).collect();
    let reduced = rolling_extreme(&values, period, extreme)?;

    Ok(bars
        .iter()
        .skip(period - 1)
        .zip(reduced)
        .map(|(bar, y)| OutputPoint::new(bar.x, y))
        .collect())
}

/// Highest high over the trailing `period` bars.
pub fn highest_high(bars: &[PriceBar], period: usize) -> Result<OutputSeries> {
    rolling_field(bars, period, BarField::High, Extreme::Max)
}

/// Lowest low over the trailing `period` bars.
pub fn lowest_low(bars: &[PriceBar], period: usize) -> Result<OutputSeries> {
    rolling_field(bars, period, BarField::Low, Extreme::Min)
}
