//! ARIMA-like forecast: difference, normalize, fit a lag regressor, roll
//! forward, then map back to price levels.
use crate::errors::{AnalysisError, AnalysisResult};
use crate::forecast::params::ArimaParams;
use crate::regressor::{
    FeedForwardRegressor, OutputActivation, Regressor, TrainingOptions, recursive_forecast,
};
use crate::series::{Differenced, Series, build_lagged_dataset, normalize_flagged};
use crate::timeline::Timeline;

/// Forecast `params.steps` future prices of `series`.
///
/// Pipeline: difference `d` times, min-max normalize, fit a
/// `lag = max(p, q)` regressor with a linear output, forecast recursively
/// from the last `lag` normalized values, denormalize, and integrate back
/// to levels seeded at the last observed prices.
///
/// Errors
/// ------
/// - `AnalysisError::InvalidParameter` for invalid params or options.
/// - `AnalysisError::InsufficientData` if fewer than `lag + d + 1` points
///   are given.
/// - `AnalysisError::Optimization` if the L-BFGS solver fails.
pub fn forecast_arima(
    series: &Series, params: &ArimaParams, training: &TrainingOptions,
) -> AnalysisResult<Timeline> {
    params.validate()?;
    let lag = params.lag();
    let required = lag.saturating_add(params.d).saturating_add(1);
    if series.len() < required {
        return Err(AnalysisError::InsufficientData { required, actual: series.len() });
    }
    tracing::debug!(n = series.len(), p = params.p, d = params.d, q = params.q, "ARIMA forecast");

    let mut flags = Vec::new();
    let differenced = Differenced::new(&series.values(), params.d)?;
    let norm = normalize_flagged(&differenced.values, &mut flags)?;
    let data = build_lagged_dataset(&norm.values, lag)?;

    let mut model = FeedForwardRegressor::new(lag, OutputActivation::Linear, training)?;
    model.fit(&data)?;
    let scaled = recursive_forecast(&model, &norm.values, params.steps)?;
    let forecast = differenced.integrate(&norm.denormalize(&scaled));

    Timeline::merge(series, &forecast, flags)
}
