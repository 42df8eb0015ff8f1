//! Recursive multi-step forecasting with a fitted [`Regressor`].
use std::collections::VecDeque;

use crate::errors::{AnalysisError, AnalysisResult};
use crate::regressor::model::Regressor;

/// Longest horizon any forecast path will roll forward.
pub const MAX_HORIZON: usize = 10_000;

/// Reject a horizon of zero or beyond [`MAX_HORIZON`].
pub(crate) fn check_horizon(steps: usize) -> AnalysisResult<()> {
    if steps == 0 {
        return Err(AnalysisError::invalid("steps", "forecast horizon must be at least 1"));
    }
    if steps > MAX_HORIZON {
        return Err(AnalysisError::invalid(
            "steps",
            format!("forecast horizon {steps} exceeds the maximum of {MAX_HORIZON}"),
        ));
    }
    Ok(())
}

/// Roll `model` forward `steps` times from the last `lag` values of `seed`.
///
/// Each prediction is appended to the window and the oldest value dropped,
/// so later steps are conditioned on earlier predictions.
///
/// Errors
/// ------
/// - `AnalysisError::InvalidParameter` if `steps` is zero or above
///   [`MAX_HORIZON`].
/// - `AnalysisError::InsufficientData` if `seed` is shorter than the lag.
/// - Any prediction error from `model`.
pub fn recursive_forecast<R: Regressor + ?Sized>(
    model: &R, seed: &[f64], steps: usize,
) -> AnalysisResult<Vec<f64>> {
    check_horizon(steps)?;
    let mut window = seed_window(model.lag(), seed)?;
    let mut out = Vec::with_capacity(steps);
    for _ in 0..steps {
        let next = model.predict_next(window.make_contiguous())?;
        out.push(next);
        window.pop_front();
        window.push_back(next);
    }
    Ok(out)
}

/// Step two models forward together, each over its own rolling window.
///
/// Used for the returns/variance pair: `mean` sees the returns window and
/// `variance` the squared-returns window. Every step appends each model's
/// own prediction to its own window.
///
/// Errors
/// ------
/// - Same as [`recursive_forecast`], for either model.
pub fn recursive_forecast_pair<A, B>(
    mean: &A, mean_seed: &[f64], variance: &B, variance_seed: &[f64], steps: usize,
) -> AnalysisResult<(Vec<f64>, Vec<f64>)>
where
    A: Regressor + ?Sized,
    B: Regressor + ?Sized,
{
    check_horizon(steps)?;
    let mut mean_window = seed_window(mean.lag(), mean_seed)?;
    let mut var_window = seed_window(variance.lag(), variance_seed)?;
    let mut means = Vec::with_capacity(steps);
    let mut variances = Vec::with_capacity(steps);
    for _ in 0..steps {
        let m = mean.predict_next(mean_window.make_contiguous())?;
        let v = variance.predict_next(var_window.make_contiguous())?;
        mean_window.pop_front();
        mean_window.push_back(m);
        var_window.pop_front();
        var_window.push_back(v);
        means.push(m);
        variances.push(v);
    }
    Ok((means, variances))
}

fn seed_window(lag: usize, seed: &[f64]) -> AnalysisResult<VecDeque<f64>> {
    if seed.len() < lag {
        return Err(AnalysisError::InsufficientData { required: lag, actual: seed.len() });
    }
    Ok(seed[seed.len() - lag..].iter().copied().collect())
}
