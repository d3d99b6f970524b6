//! klinechart-ta - technical indicators for candlestick chart overlays.
//!
//! This crate provides:
//! - Moving averages (MA, EMA)
//! - MACD, Bollinger bands (BOLL), KDJ and RSI
//! - The shared primitives behind them (trailing min/max, smoothing recurrences)
//! - A parallel engine that computes a configured set of overlays in one call
//!
//! Every calculator takes a borrowed `&[PriceBar]` and returns `(x, y)`
//! point series ready for plotting.

pub mod core;
pub mod engine;
pub mod indicators;

pub use crate::core::{
    BollParams, IndicatorConfig, IndicatorError, KdjParams, MacdParams, OutputPoint,
    OutputSeries, PriceBar, Result, RsiParams,
};
pub use crate::engine::{IndicatorEngine, IndicatorSet, PeriodSeries};
