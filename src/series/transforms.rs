//! Series transforms: differencing, normalization, returns, rescaling.
//!
//! Purpose
//! -------
//! Collect the scalar-series transforms every analysis path reuses, together
//! with their inverses, so forecasts produced on a transformed scale can be
//! mapped back onto the real price level.
//!
//! Key behaviors
//! -------------
//! - [`difference`] applies first differences `order` times; [`Differenced`]
//!   remembers the last value of every level so [`Differenced::integrate`]
//!   can undo all passes.
//! - [`normalize`] min-max scales into `[0, 1]`; [`denormalize`] is the exact
//!   affine inverse.
//! - [`log_returns`] and [`scale_by_last`] prepare series for the GARCH and
//!   scale-free VAR paths.
//!
//! Invariants & assumptions
//! ------------------------
//! - A constant input to [`normalize`] uses [`NORMALIZATION_EPSILON`] as its
//!   denominator and flags [`Degeneracy::ConstantSeries`]; no `NaN` is ever
//!   produced.
//! - [`denormalize`] applies the same denominator rule as [`normalize`], so
//!   `denormalize(normalize(x)) == x` up to floating rounding even for
//!   constant input.
use crate::errors::{self, AnalysisError, AnalysisResult, Degeneracy};

/// Denominator reserved for min-max scaling of a constant series.
pub const NORMALIZATION_EPSILON: f64 = 1e-8;

/// Apply first differences `order` times; each pass drops the leading element.
///
/// Errors
/// ------
/// - `AnalysisError::InsufficientData` if `order >= values.len()`.
pub fn difference(values: &[f64], order: usize) -> AnalysisResult<Vec<f64>> {
    if order >= values.len() {
        return Err(AnalysisError::InsufficientData { required: order + 1, actual: values.len() });
    }
    let mut out = values.to_vec();
    for _ in 0..order {
        out = out.windows(2).map(|w| w[1] - w[0]).collect();
    }
    Ok(out)
}

/// Cumulative sum of `diffs` seeded at `seed`: the inverse of one differencing
/// pass when `seed` is the last value of the undifferenced series.
pub fn integrate(diffs: &[f64], seed: f64) -> Vec<f64> {
    diffs
        .iter()
        .scan(seed, |level, &d| {
            *level += d;
            Some(*level)
        })
        .collect()
}

/// `Differenced`: a differenced series plus what is needed to invert it.
///
/// Fields
/// ------
/// - `values`: the series after `order` differencing passes.
/// - `anchors`: last value of each level before differencing; `anchors[k]` is
///   the last element of the series after `k` passes (`anchors[0]` is the last
///   real observation).
#[derive(Debug, Clone, PartialEq)]
pub struct Differenced {
    pub values: Vec<f64>,
    anchors: Vec<f64>,
}

impl Differenced {
    /// Difference `values` `order` times, keeping the per-level anchors.
    ///
    /// Errors
    /// ------
    /// - `AnalysisError::InsufficientData` if `order >= values.len()`.
    pub fn new(values: &[f64], order: usize) -> AnalysisResult<Self> {
        if order >= values.len() {
            return Err(AnalysisError::InsufficientData {
                required: order + 1,
                actual: values.len(),
            });
        }
        let mut anchors = Vec::with_capacity(order);
        let mut level = values.to_vec();
        for _ in 0..order {
            anchors.push(level[level.len() - 1]);
            level = difference(&level, 1)?;
        }
        Ok(Self { values: level, anchors })
    }

    pub fn order(&self) -> usize {
        self.anchors.len()
    }

    /// Map a forecast made on the differenced scale back to levels.
    ///
    /// Each pass is a cumulative sum seeded at the last real value of the
    /// level above it; with `order == 0` the forecast is returned unchanged.
    pub fn integrate(&self, forecast: &[f64]) -> Vec<f64> {
        self.anchors.iter().rev().fold(forecast.to_vec(), |acc, &seed| integrate(&acc, seed))
    }
}

/// `Normalization`: min-max scaled values and the affine map that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalization {
    pub values: Vec<f64>,
    pub min: f64,
    pub max: f64,
}

impl Normalization {
    /// `true` when the input was constant and the epsilon denominator was used.
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    pub fn denormalize(&self, values: &[f64]) -> Vec<f64> {
        denormalize(values, self.min, self.max)
    }

    pub fn normalize_value(&self, value: f64) -> f64 {
        (value - self.min) / scale(self.min, self.max)
    }
}

#[inline]
fn scale(min: f64, max: f64) -> f64 {
    if max == min { NORMALIZATION_EPSILON } else { max - min }
}

/// Min-max scale `values` into `[0, 1]`.
///
/// A constant input maps every element to `0` using
/// [`NORMALIZATION_EPSILON`] as the denominator. Callers that track
/// degeneracies should check [`Normalization::is_degenerate`] or use
/// [`normalize_flagged`].
///
/// Errors
/// ------
/// - `AnalysisError::InsufficientData` for an empty slice.
pub fn normalize(values: &[f64]) -> AnalysisResult<Normalization> {
    if values.is_empty() {
        return Err(AnalysisError::InsufficientData { required: 1, actual: 0 });
    }
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let denom = scale(min, max);
    let values = values.iter().map(|v| (v - min) / denom).collect();
    Ok(Normalization { values, min, max })
}

/// [`normalize`], recording [`Degeneracy::ConstantSeries`] into `flags`.
pub fn normalize_flagged(
    values: &[f64], flags: &mut Vec<Degeneracy>,
) -> AnalysisResult<Normalization> {
    let norm = normalize(values)?;
    if norm.is_degenerate() {
        errors::record(flags, Degeneracy::ConstantSeries);
    }
    Ok(norm)
}

/// Exact inverse of [`normalize`] on the affine map `x ↦ (x - min) / (max - min)`.
pub fn denormalize(values: &[f64], min: f64, max: f64) -> Vec<f64> {
    let denom = scale(min, max);
    values.iter().map(|v| v * denom + min).collect()
}

/// Log returns `r_t = ln(p_t / p_{t-1})`, one shorter than the input.
///
/// Errors
/// ------
/// - `AnalysisError::InsufficientData` if fewer than 2 values are given.
/// - `AnalysisError::MalformedInput` for the first non-positive value.
pub fn log_returns(values: &[f64]) -> AnalysisResult<Vec<f64>> {
    if values.len() < 2 {
        return Err(AnalysisError::InsufficientData { required: 2, actual: values.len() });
    }
    if let Some(index) = values.iter().position(|&v| v <= 0.0) {
        return Err(AnalysisError::malformed(
            index,
            format!("log returns need positive prices, got {}", values[index]),
        ));
    }
    Ok(values.windows(2).map(|w| (w[1] / w[0]).ln()).collect())
}

/// Divide every value by the last one (`value / last_value`).
///
/// Errors
/// ------
/// - `AnalysisError::InsufficientData` for an empty slice.
/// - `AnalysisError::MalformedInput` if the last value is zero.
pub fn scale_by_last(values: &[f64]) -> AnalysisResult<Vec<f64>> {
    let Some(&last) = values.last() else {
        return Err(AnalysisError::InsufficientData { required: 1, actual: 0 });
    };
    if last == 0.0 {
        return Err(AnalysisError::malformed(values.len() - 1, "cannot rescale by a zero value"));
    }
    Ok(values.iter().map(|v| v / last).collect())
}
