//! Pearson correlation between date-aligned series.
//!
//! Purpose
//! -------
//! Measure linear co-movement between two stocks (or custom indicators) on
//! their common dates, and return the aligned columns alongside the
//! coefficient so the host can plot the scatter it was computed from.
//!
//! Key behaviors
//! -------------
//! - Inner-join on dates, require [`MIN_OVERLAP`](super::MIN_OVERLAP) common
//!   points, and compute `Σ(dx·dy) / sqrt(Σdx² · Σdy²)` on mean-centered
//!   values.
//! - [`correlation_matrix`] runs [`correlate`] over every unordered pair of
//!   the requested symbols.
//!
//! Invariants & assumptions
//! ------------------------
//! - The coefficient is clamped to `[-1, 1]` to absorb rounding overshoot.
//! - If either side has zero variance the coefficient is `0` and
//!   [`Degeneracy::ZeroVariance`] is recorded; no `NaN` is returned.
use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::{self, AnalysisResult, Degeneracy, Flagged};
use crate::series::{Stock, StockSet};
use crate::statistical_tests::validation::aligned_pair;

/// CorrelationResult: coefficient plus the aligned data behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationResult {
    pub series_a: String,
    pub series_b: String,
    pub coefficient: f64,
    pub dates: Vec<NaiveDate>,
    pub values_a: Vec<f64>,
    pub values_b: Vec<f64>,
    pub degeneracies: Vec<Degeneracy>,
}

impl Flagged for CorrelationResult {
    fn degeneracies(&self) -> &[Degeneracy] {
        &self.degeneracies
    }
}

/// Pearson coefficient of two equal-length columns.
///
/// Zero variance on either side yields `0` and records
/// [`Degeneracy::ZeroVariance`].
pub fn pearson(x: &[f64], y: &[f64], flags: &mut Vec<Degeneracy>) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        errors::record(flags, Degeneracy::ZeroVariance);
        return 0.0;
    }
    let mean_x = x[..n].iter().sum::<f64>() / n as f64;
    let mean_y = y[..n].iter().sum::<f64>() / n as f64;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (xi, yi) in x[..n].iter().zip(&y[..n]) {
        let (dx, dy) = (xi - mean_x, yi - mean_y);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        errors::record(flags, Degeneracy::ZeroVariance);
        return 0.0;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

/// Correlate two stocks on their common dates.
///
/// Errors
/// ------
/// - `AnalysisError::InsufficientOverlap` if fewer than 30 dates are shared.
pub fn correlate(a: &Stock, b: &Stock) -> AnalysisResult<CorrelationResult> {
    let aligned = aligned_pair(&a.series, &b.series)?;
    let mut degeneracies = Vec::new();
    let coefficient = pearson(&aligned.a, &aligned.b, &mut degeneracies);
    tracing::debug!(a = %a.symbol, b = %b.symbol, coefficient, overlap = aligned.len(), "correlated");
    Ok(CorrelationResult {
        series_a: a.symbol.clone(),
        series_b: b.symbol.clone(),
        coefficient,
        dates: aligned.dates,
        values_a: aligned.a,
        values_b: aligned.b,
        degeneracies,
    })
}

/// Correlate every unordered pair of `symbols`, in `(i, j)` order with
/// `i < j`.
///
/// Errors
/// ------
/// - `AnalysisError::NotFound` for the first unknown symbol.
/// - `AnalysisError::InsufficientOverlap` for the first pair sharing fewer
///   than 30 dates.
pub fn correlation_matrix(
    stocks: &StockSet, symbols: &[&str],
) -> AnalysisResult<Vec<CorrelationResult>> {
    let resolved = symbols.iter().map(|s| stocks.get(s)).collect::<AnalysisResult<Vec<_>>>()?;
    let mut out = Vec::with_capacity(resolved.len() * resolved.len().saturating_sub(1) / 2);
    for (i, a) in resolved.iter().enumerate() {
        for b in &resolved[i + 1..] {
            out.push(correlate(a, b)?);
        }
    }
    Ok(out)
}
