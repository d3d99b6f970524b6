//! Core data types for klinechart-ta.

use serde::{Deserialize, Serialize};

/// Type alias for price values.
pub type Price = f64;

/// One OHLC price observation.
///
/// `x` is the plot coordinate of the bar (a timestamp or an index). It is
/// copied verbatim into every output point derived from the bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub x: f64,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
}

impl PriceBar {
    /// Create a new bar.
    pub fn new(x: f64, open: Price, high: Price, low: Price, close: Price) -> Self {
        Self {
            x,
            open,
            high,
            low,
            close,
        }
    }

    /// Bar whose open, high, low and close all equal `price`.
    pub fn flat(x: f64, price: Price) -> Self {
        Self::new(x, price, price, price, price)
    }

    /// Value of the given field.
    #[inline]
    pub fn field(&self, field: BarField) -> Price {
        match field {
            BarField::Open => self.open,
            BarField::High => self.high,
            BarField::Low => self.low,
            BarField::Close => self.close,
        }
    }
}

/// Scalar field of a [`PriceBar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarField {
    Open,
    High,
    Low,
    Close,
}

/// One plotted value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputPoint {
    pub x: f64,
    pub y: f64,
}

impl OutputPoint {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Ordered sequence of plotted values.
pub type OutputSeries = Vec<OutputPoint>;

/// Projection over an [`OutputSeries`].
pub trait SeriesExt {
    /// The x-coordinates, in order.
    fn xs(&self) -> Vec<f64>;

}

impl SeriesExt for [OutputPoint] {
    fn xs(&self) -> Vec<f64> {
        self.iter().map(|p| p.x).collect()
    }

}

/// Extract one field of every bar.
pub fn field_values(bars: &[PriceBar], field: BarField) -> Vec<Price> {
    bars.iter().map(|bar| bar.field(field)).collect()
}

/// Build bars from closing prices, using the index as x.
///
/// Open, high and low are set to the close.
pub fn bars_from_closes(closes: &[Price]) -> Vec<PriceBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceBar::flat(i as f64, close))
        .collect()
}
