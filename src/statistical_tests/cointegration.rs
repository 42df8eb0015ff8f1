//! Residual-based cointegration screen.
//!
//! Purpose
//! -------
//! Screen two series for a long-run linear relationship with a simplified,
//! Engle–Granger-style two-step procedure. This is a heuristic: the p-value
//! is `exp(−0.5 · statistic)`, not a Dickey–Fuller table lookup, and the 0.05
//! significance call depends on that exact formula.
//!
//! Key behaviors
//! -------------
//! - Express both aligned series as cumulative differences from their first
//!   observation and regress the first on the second through the origin.
//! - Fit `Δe_t = β · e_{t−1} + u_t` to the residuals by least squares and
//!   report `statistic = |β| / se(β)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - At least 30 aligned dates are required.
//! - Zero sums of squares use [`VARIANCE_EPSILON`] and are flagged
//!   ([`Degeneracy::ZeroRegressorVariance`], [`Degeneracy::ZeroResidualVariance`]);
//!   identical series therefore give `statistic = 0` and `p_value = 1`.
use crate::errors::{self, AnalysisResult, Degeneracy};
use crate::series::Series;
use crate::statistical_tests::outcome::{TestOutcome, VARIANCE_EPSILON};
use crate::statistical_tests::validation::aligned_pair;

/// Heuristic p-value of the residual unit-root statistic.
#[inline]
pub fn heuristic_p_value(statistic: f64) -> f64 {
    (-0.5 * statistic).exp()
}

fn guarded(denominator: f64, flag: Degeneracy, flags: &mut Vec<Degeneracy>) -> f64 {
    if denominator == 0.0 {
        errors::record(flags, flag);
        VARIANCE_EPSILON
    } else {
        denominator
    }
}

/// Residual AR(1) statistic for two aligned columns (`y` on `x`).
///
/// Returns `(statistic, beta)`.
pub fn residual_statistic(y: &[f64], x: &[f64], flags: &mut Vec<Degeneracy>) -> (f64, f64) {
    let n = y.len().min(x.len());
    let cy: Vec<f64> = y[..n].iter().map(|v| v - y[0]).collect();
    let cx: Vec<f64> = x[..n].iter().map(|v| v - x[0]).collect();

    let sxy: f64 = cx.iter().zip(&cy).map(|(a, b)| a * b).sum();
    let sxx: f64 = cx.iter().map(|a| a * a).sum();
    let gamma = sxy / guarded(sxx, Degeneracy::ZeroRegressorVariance, flags);
    let resid: Vec<f64> = cy.iter().zip(&cx).map(|(b, a)| b - gamma * a).collect();

    let lagged = &resid[..n - 1];
    let delta: Vec<f64> = resid.windows(2).map(|w| w[1] - w[0]).collect();
    let see = guarded(
        lagged.iter().map(|e| e * e).sum(),
        Degeneracy::ZeroResidualVariance,
        flags,
    );
    let beta = delta.iter().zip(lagged).map(|(d, e)| d * e).sum::<f64>() / see;

    let ssr: f64 = delta.iter().zip(lagged).map(|(d, e)| (d - beta * e).powi(2)).sum();
    let dof = (n as f64 - 2.0).max(1.0);
    let mut se = ((ssr / dof) / see).sqrt();
    if se == 0.0 {
        errors::record(flags, Degeneracy::ZeroResidualVariance);
        se = VARIANCE_EPSILON;
    }
    (beta.abs() / se, beta)
}

/// Screen `a` and `b` for cointegration.
///
/// Errors
/// ------
/// - `AnalysisError::InsufficientOverlap` if fewer than 30 dates are shared.
pub fn cointegration_screen(a: &Series, b: &Series) -> AnalysisResult<TestOutcome> {
    let aligned = aligned_pair(a, b)?;
    let mut degeneracies = Vec::new();
    let (statistic, beta) = residual_statistic(&aligned.a, &aligned.b, &mut degeneracies);
    let p_value = heuristic_p_value(statistic);
    tracing::debug!(statistic, beta, p_value, overlap = aligned.len(), "cointegration screen");
    Ok(TestOutcome::new(statistic, p_value, degeneracies))
}
