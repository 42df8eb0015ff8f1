//! Heuristic VAR forecast from lagged co-movement averages.
//!
//! Purpose
//! -------
//! Forecast one target series from itself and any number of feature series
//! without fitting a model: coefficients are damped averages of lagged
//! change products, and the forecast is rolled forward step by step.
//!
//! Key behaviors
//! -------------
//! - Inputs are inner-joined on date and truncated to the last
//!   [`VAR_WINDOW`] points; the target is column 0.
//! - Each column whose [`trend_strength`] exceeds [`TREND_THRESHOLD`] is
//!   differenced once; undifferenced columns drop their first point so all
//!   columns stay the same length.
//! - `coef[l][j]` is the mean of `Δtarget(t) · Δseries_j(t − l − 1)`; every
//!   row is rescaled to an absolute sum of [`COEFFICIENT_DAMPING`].
//! - Features are continued by repeating their last change; only the target
//!   forecast is surfaced.
//! - [`forecast_var`] runs the same logic on raw prices and on prices divided
//!   by their last value, and anchors both timelines at the last observation.
//!   A feature whose last value is zero stays on its raw scale in the
//!   normalized pass and is flagged as [`Degeneracy::ZeroLastFeature`].
//!
//! Invariants & assumptions
//! ------------------------
//! - A zero series mean in the trend check uses [`TREND_EPSILON`] and is
//!   flagged as [`Degeneracy::ZeroMeanTrend`]; an all-zero coefficient row
//!   is left at zero and flagged as [`Degeneracy::ZeroCoefficientRow`].
use serde::Serialize;

use crate::errors::{self, AnalysisError, AnalysisResult, Degeneracy, Flagged};
use crate::forecast::params::VarParams;
use crate::series::{Series, align_many, integrate, scale_by_last};
use crate::timeline::Timeline;

/// Most recent aligned points used by the heuristic.
pub const VAR_WINDOW: usize = 100;

/// Trend strength above which a series is differenced once.
pub const TREND_THRESHOLD: f64 = 0.1;

/// Absolute row sum every coefficient row is rescaled to.
pub const COEFFICIENT_DAMPING: f64 = 0.5;

/// Denominator substituted for a zero mean in [`trend_strength`].
pub const TREND_EPSILON: f64 = 1e-10;

/// Raw-price and last-value-normalized forecasts of the same target.
///
/// `degeneracies` is the union of both timelines' flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarForecast {
    pub raw: Timeline,
    pub normalized: Timeline,
    pub degeneracies: Vec<Degeneracy>,
}

impl VarForecast {
    fn new(raw: Timeline, normalized: Timeline) -> Self {
        let mut degeneracies = raw.degeneracies.clone();
        for &d in &normalized.degeneracies {
            if !degeneracies.contains(&d) {
                degeneracies.push(d);
            }
        }
        Self { raw, normalized, degeneracies }
    }
}

impl Flagged for VarForecast {
    fn degeneracies(&self) -> &[Degeneracy] {
        &self.degeneracies
    }
}

/// `|slope · n / mean|` of the OLS trend line through `values`.
///
/// Needs at least two values; shorter input has no trend (`0`).
pub fn trend_strength(values: &[f64], flags: &mut Vec<Degeneracy>) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let x_mean = (nf - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / nf;
    let (sxy, sxx) = values.iter().enumerate().fold((0.0, 0.0), |(sxy, sxx), (i, &y)| {
        let dx = i as f64 - x_mean;
        (sxy + dx * (y - y_mean), sxx + dx * dx)
    });
    let slope = sxy / sxx;
    let mean = if y_mean.abs() < TREND_EPSILON {
        errors::record(flags, Degeneracy::ZeroMeanTrend);
        TREND_EPSILON
    } else {
        y_mean
    };
    (slope * nf / mean).abs()
}

/// Damped lag-covariance coefficients, indexed `[lag][column]`.
///
/// `columns` must share one length `m ≥ lag + 2`.
pub fn estimate_coefficients(
    columns: &[Vec<f64>], lag: usize, flags: &mut Vec<Degeneracy>,
) -> Vec<Vec<f64>> {
    let changes: Vec<Vec<f64>> =
        columns.iter().map(|c| c.windows(2).map(|w| w[1] - w[0]).collect()).collect();
    let target = &changes[0];

    (0..lag)
        .map(|l| {
            let mut row: Vec<f64> = changes
                .iter()
                .map(|cj| {
                    let terms: Vec<f64> =
                        (l + 1..target.len()).map(|t| target[t] * cj[t - l - 1]).collect();
                    if terms.is_empty() {
                        0.0
                    } else {
                        terms.iter().sum::<f64>() / terms.len() as f64
                    }
                })
                .collect();
            let total: f64 = row.iter().map(|c| c.abs()).sum();
            if total == 0.0 {
                errors::record(flags, Degeneracy::ZeroCoefficientRow);
            } else {
                row.iter_mut().for_each(|c| *c *= COEFFICIENT_DAMPING / total);
            }
            row
        })
        .collect()
}

/// Roll the joint window forward `steps` times; returns target values.
fn roll_forward(columns: &[Vec<f64>], coef: &[Vec<f64>], steps: usize) -> Vec<f64> {
    let lag = coef.len();
    let m = columns[0].len();
    // window[0] is the newest joint observation.
    let mut window: Vec<Vec<f64>> =
        (0..=lag).map(|k| columns.iter().map(|c| c[m - 1 - k]).collect()).collect();

    let mut out = Vec::with_capacity(steps);
    for _ in 0..steps {
        let mut change = 0.0;
        for (l, row) in coef.iter().enumerate() {
            for (j, c) in row.iter().enumerate() {
                change += c * (window[l][j] - window[l + 1][j]);
            }
        }
        let mut next: Vec<f64> =
            window[0].iter().zip(&window[1]).map(|(now, prev)| now + (now - prev)).collect();
        next[0] = window[0][0] + change;
        out.push(next[0]);
        window.insert(0, next);
        window.truncate(lag + 1);
    }
    out
}

/// The heuristic on already aligned, truncated columns (target first).
fn var_timeline(
    dates: &[chrono::NaiveDate], columns: &[Vec<f64>], params: &VarParams,
    mut flags: Vec<Degeneracy>,
) -> AnalysisResult<Timeline> {
    let differenced: Vec<bool> =
        columns.iter().map(|c| trend_strength(c, &mut flags) > TREND_THRESHOLD).collect();
    let any = differenced.iter().any(|&d| d);
    tracing::trace!(?differenced, "VAR stationarity check");

    let working: Vec<Vec<f64>> = columns
        .iter()
        .zip(&differenced)
        .map(|(c, &diff)| match (diff, any) {
            (true, _) => c.windows(2).map(|w| w[1] - w[0]).collect(),
            (false, true) => c[1..].to_vec(),
            (false, false) => c.clone(),
        })
        .collect();

    let coef = estimate_coefficients(&working, params.lag, &mut flags);
    let stepped = roll_forward(&working, &coef, params.steps);

    let target = &columns[0];
    let last = target[target.len() - 1];
    let forecast = if differenced[0] { integrate(&stepped, last) } else { stepped };
    Timeline::merge_anchored(dates, target, &forecast, flags)
}

/// Forecast `params.steps` values of `target` using `features` as extra
/// regressors.
///
/// Errors
/// ------
/// - `AnalysisError::InvalidParameter` for invalid params.
/// - `AnalysisError::InsufficientData` if the target alone has fewer than
///   `lag + 3` points.
/// - `AnalysisError::InsufficientOverlap` if joining the features leaves
///   fewer than `lag + 3` common dates.
/// - `AnalysisError::MalformedInput` if the target's last value is zero (the
///   normalized variant divides by it).
pub fn forecast_var(
    target: &Series, features: &[&Series], params: &VarParams,
) -> AnalysisResult<VarForecast> {
    params.validate()?;
    let required = params.lag.saturating_add(3);
    if target.len() < required {
        return Err(AnalysisError::InsufficientData { required, actual: target.len() });
    }
    let all: Vec<&Series> = std::iter::once(target).chain(features.iter().copied()).collect();
    let (dates, columns) = align_many(&all);
    if dates.len() < required {
        return Err(AnalysisError::InsufficientOverlap { required, actual: dates.len() });
    }
    tracing::debug!(series = all.len(), aligned = dates.len(), lag = params.lag, "VAR forecast");

    let start = dates.len().saturating_sub(VAR_WINDOW);
    let dates = &dates[start..];
    let columns: Vec<Vec<f64>> = columns.into_iter().map(|c| c[start..].to_vec()).collect();
    let mut scale_flags = Vec::new();
    let scaled: Vec<Vec<f64>> = columns
        .iter()
        .enumerate()
        .map(|(j, c)| match c.last() {
            Some(&last) if j > 0 && last == 0.0 => {
                errors::record(&mut scale_flags, Degeneracy::ZeroLastFeature);
                Ok(c.clone())
            }
            _ => scale_by_last(c),
        })
        .collect::<AnalysisResult<_>>()?;

    let raw = var_timeline(dates, &columns, params, Vec::new())?;
    let normalized = var_timeline(dates, &scaled, params, scale_flags)?;
    Ok(VarForecast::new(raw, normalized))
}
