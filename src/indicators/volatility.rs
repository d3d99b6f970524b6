//! Volatility indicators: Bollinger Bands.

use serde::{Deserialize, Serialize};

use crate::core::error::IndicatorError;
use crate::core::types::{OutputPoint, OutputSeries, PriceBar};
use crate::core::Result;

/// Bollinger Bands result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BollResult {
    /// Middle band (MB): mean close over the window.
    pub mid: OutputSeries,
    /// Upper band: MB + 2·MD.
    pub upper: OutputSeries,
    /// Lower band: MB - 2·MD.
    pub lower: OutputSeries,
}

impl BollResult {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            mid: Vec::with_capacity(capacity),
            upper: Vec::with_capacity(capacity),
            lower: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.mid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mid.is_empty()
    }
}

/// Bollinger Bands.
///
/// For every full window of `period` closes:
///
/// ```text
/// MB = mean(close)
/// MD = (Σ (close - MB)² / (period - 1)) ^ (1/k)
/// UP = MB + 2·MD
/// DN = MB - 2·MD
/// ```
///
/// With `k = 2`, MD is the sample standard deviation.
///
/// # Arguments
/// * `bars` - Price bars
/// * `period` - Window length (default: 20), at least 2
/// * `k` - Root applied to the variance (default: 2), at least 1
///
/// # Returns
/// Three aligned series of `len - period + 1` points each
pub fn boll(bars: &[PriceBar], period: usize, k: u32) -> Result<BollResult> {
    if period < 2 {
        return Err(IndicatorError::invalid_parameter(
            "BOLL period must be >= 2",
        ));
    }
    if k == 0 {
        return Err(IndicatorError::invalid_parameter("BOLL k must be > 0"));
    }

    let n = bars.len();
    if period > n {
        return Ok(BollResult::default());
    }

    let mut result = BollResult::with_capacity(n - period + 1);

    for i in (period - 1)..n {
        let window = &bars[i + 1 - period..=i];
        let mb = window.iter().map(|b| b.close).sum::<f64>() / period as f64;

        let variance = window
            .iter()
            .map(|b| (b.close - mb).powi(2))
            .sum::<f64>()
            / (period - 1) as f64;
        let md = if k == 2 {
            variance.sqrt()
        } else {
            variance.powf(1.0 / k as f64)
        };

        let x = bars[i].x;
        result.mid.push(OutputPoint::new(x, mb));
        result.upper.push(OutputPoint::new(x, mb + 2.0 * md));
        result.lower.push(OutputPoint::new(x, mb - 2.0 * md));
    }

    Ok(result)
}
