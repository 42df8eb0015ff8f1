//! forecast: ARIMA-like, GARCH-like and heuristic VAR forecasters.
//!
//! Purpose
//! -------
//! Turn a price history into a merged history-plus-forecast [`Timeline`]
//! (or a pair of them), each path a pure function of `(series, params)`.
//!
//! Key behaviors
//! -------------
//! - [`forecast_arima`]: differenced, normalized levels through a lag
//!   regressor, integrated back to prices.
//! - [`forecast_garch`]: returns and squared returns through two regressors
//!   stepped together; yields price and volatility timelines.
//! - [`forecast_var`]: closed-form lag-covariance heuristic over a target
//!   and optional features, on raw and last-value-normalized scales.
//!
//! Invariants & assumptions
//! ------------------------
//! - Regressors are built and trained inside each call; nothing is cached
//!   between calls.
//! - Forecast rows are placed on future trading dates derived from the
//!   history's own calendar.
//!
//! [`Timeline`]: crate::timeline::Timeline

pub mod arima;
pub mod garch;
pub mod params;
pub mod var;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::arima::forecast_arima;
pub use self::garch::{GarchForecast, forecast_garch};
pub use self::params::{ArimaParams, GarchParams, MAX_ORDER, VarParams};
pub use self::var::{
    COEFFICIENT_DAMPING, TREND_EPSILON, TREND_THRESHOLD, VAR_WINDOW, VarForecast,
    estimate_coefficients, forecast_var, trend_strength,
};

pub mod prelude {
    pub use super::{
        ArimaParams, GarchForecast, GarchParams, VarForecast, VarParams, forecast_arima,
        forecast_garch, forecast_var,
    };
}
