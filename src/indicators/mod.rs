//! Technical indicators for klinechart-ta.
//!
//! All indicators are pure functions that borrow a slice of bars and return
//! freshly built point series. Warm-up bars produce no points rather than
//! placeholder values, and every point keeps the x of the bar it came from.

pub mod momentum;
pub mod rolling;
pub mod smoothing;
pub mod trend;
pub mod volatility;

pub use momentum::{kdj, macd, rsi, KdjResult, MacdResult, RSI_FLAT_VALUE};
pub use rolling::{highest_high, lowest_low, rolling_max, rolling_min};
pub use smoothing::{weighted_sma, Ema, EmaFactor, WeightedSma};
pub use trend::{ema, ma};
pub use volatility::{boll, BollResult};
