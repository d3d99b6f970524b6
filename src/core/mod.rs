//! Core types and utilities for klinechart-ta.

pub mod config;
pub mod error;
pub mod types;

pub use config::{BollParams, IndicatorConfig, KdjParams, MacdParams, RsiParams};
pub use error::{IndicatorError, Result};
pub use types::*;
