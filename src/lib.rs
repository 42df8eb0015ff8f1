//! quant_engine: indicators, pairwise screens and heuristic forecasters for
//! date-indexed price series.
//!
//! Purpose
//! -------
//! Serve as the crate root for a dashboard-style analysis engine. The host
//! supplies price series and display parameters; every analysis is a pure
//! function returning dated result rows or a typed error.
//!
//! Key behaviors
//! -------------
//! - [`indicators`]: RSI, EMA/MACD, and the custom `date,value` CSV parser.
//! - [`statistical_tests`]: Pearson correlation, the same-timestep
//!   chi-square screen, and the cointegration screen.
//! - [`forecast`]: ARIMA-like and GARCH-like forecasts built on the
//!   [`regressor`] lag networks, and the closed-form VAR heuristic.
//! - [`timeline`]: merging history and forecast rows on future trading dates.
//! - [`engine`]: a serializable request/response dispatcher over a
//!   [`StockSet`](series::StockSet), configured by [`config`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Computation is synchronous and single-threaded per call; no state is
//!   shared or cached between calls.
//! - Numeric edge cases (zero variance, zero denominators) are resolved by
//!   epsilon substitution and recorded as [`Degeneracy`] flags; callers that
//!   prefer failure use [`Flagged::strict`] or `EngineConfig::strict`.
//! - The library logs through `tracing` and never installs a subscriber.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; `tests/` holds end-to-end
//!   scenarios over the public API.

pub mod config;
pub mod engine;
pub mod errors;
pub mod forecast;
pub mod indicators;
pub mod optimization;
pub mod regressor;
pub mod series;
pub mod statistical_tests;
pub mod timeline;

pub use self::config::EngineConfig;
pub use self::engine::{AnalysisOutput, AnalysisRequest, Engine};
pub use self::errors::{AnalysisError, AnalysisResult, Degeneracy, Flagged};

pub mod prelude {
    pub use super::config::EngineConfig;
    pub use super::engine::{AnalysisOutput, AnalysisRequest, Engine};
    pub use super::errors::{AnalysisError, AnalysisResult, Degeneracy, Flagged};
    pub use super::forecast::prelude::*;
    pub use super::indicators::{MacdParams, RsiParams, compute_macd, compute_rsi};
    pub use super::regressor::{Solver, TrainingOptions};
    pub use super::series::{PricePoint, Series, Stock, StockSet};
    pub use super::statistical_tests::prelude::*;
    pub use super::timeline::{ResultRow, Timeline};
}
