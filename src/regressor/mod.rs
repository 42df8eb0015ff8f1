//! regressor: small feed-forward networks for one-step-ahead regression.
//!
//! Purpose
//! -------
//! Provide the learned component of the ARIMA-like and GARCH-like
//! forecasters: a single-hidden-layer network mapping a window of `lag`
//! values to the next value, plus recursive multi-step forecasting.
//!
//! Key behaviors
//! -------------
//! - [`Regressor`] is the seam the forecasters depend on;
//!   [`FeedForwardRegressor`] is its only implementation.
//! - Training runs a fixed number of epochs with either mini-batch Adam or
//!   full-batch L-BFGS ([`Solver`]); both use analytic gradients.
//! - [`recursive_forecast`] feeds each prediction back as the newest input.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are expected on a normalized scale (roughly `[0, 1]`); callers
//!   normalize before fitting and denormalize the forecasts.

pub mod adam;
pub mod forecast;
pub mod lbfgs;
pub mod model;
pub mod network;
pub mod options;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::forecast::{MAX_HORIZON, recursive_forecast, recursive_forecast_pair};
pub use self::lbfgs::MseObjective;
pub use self::model::{FeedForwardRegressor, Regressor};
pub use self::network::{Layers, OutputActivation, Shape};
pub use self::options::{
    DEFAULT_BATCH_SIZE, DEFAULT_HIDDEN_UNITS, DEFAULT_LEARNING_RATE, MAX_HIDDEN_UNITS, Solver,
    TrainingOptions,
};
