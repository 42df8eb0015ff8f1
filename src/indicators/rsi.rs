//! Relative Strength Index with Wilder smoothing.
//!
//! Purpose
//! -------
//! Compute the bounded `[0, 100]` momentum oscillator from average gains
//! versus average losses over a fixed period.
//!
//! Key behaviors
//! -------------
//! - Seed average gain/loss with the simple mean of the first `period`
//!   deltas, then smooth with `avg = (avg · (period − 1) + new) / period`.
//! - A zero average loss uses [`RS_EPSILON`] as the denominator (flagged as
//!   [`Degeneracy::ZeroAverageLoss`]) instead of dividing by zero.
//!
//! Invariants & assumptions
//! ------------------------
//! - Output starts at input index `period`; its length is `len − period`.
//! - Every emitted value lies in `[0, 100]`.
use serde::{Deserialize, Serialize};

use crate::errors::{self, AnalysisError, AnalysisResult, Degeneracy};
use crate::series::Series;
use crate::timeline::{ResultRow, Timeline};

/// Denominator substituted for a zero average loss.
pub const RS_EPSILON: f64 = 1e-10;

/// RSI look-back period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiParams {
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl RsiParams {
    /// Errors
    /// ------
    /// - `AnalysisError::InvalidParameter` if `period == 0`.
    pub fn new(period: usize) -> AnalysisResult<Self> {
        let params = Self { period };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> AnalysisResult<()> {
        if self.period == 0 {
            return Err(AnalysisError::invalid("period", "RSI period must be at least 1"));
        }
        Ok(())
    }
}

/// Wilder RSI over `values`, one element per input index `period..len`.
///
/// Errors
/// ------
/// - `AnalysisError::InvalidParameter` if `period == 0`.
/// - `AnalysisError::InsufficientData` if `values.len() <= period`.
pub fn rsi_values(
    values: &[f64], period: usize, flags: &mut Vec<Degeneracy>,
) -> AnalysisResult<Vec<f64>> {
    RsiParams::new(period)?;
    if values.len() <= period {
        return Err(AnalysisError::InsufficientData {
            required: period.saturating_add(1),
            actual: values.len(),
        });
    }
    let deltas: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    let gain = |d: f64| d.max(0.0);
    let loss = |d: f64| (-d).max(0.0);

    let p = period as f64;
    let mut avg_gain = deltas[..period].iter().map(|&d| gain(d)).sum::<f64>() / p;
    let mut avg_loss = deltas[..period].iter().map(|&d| loss(d)).sum::<f64>() / p;

    let mut out = Vec::with_capacity(values.len() - period);
    out.push(rsi_from(avg_gain, avg_loss, flags));
    for &d in &deltas[period..] {
        avg_gain = (avg_gain * (p - 1.0) + gain(d)) / p;
        avg_loss = (avg_loss * (p - 1.0) + loss(d)) / p;
        out.push(rsi_from(avg_gain, avg_loss, flags));
    }
    Ok(out)
}

fn rsi_from(avg_gain: f64, avg_loss: f64, flags: &mut Vec<Degeneracy>) -> f64 {
    let denom = if avg_loss == 0.0 {
        errors::record(flags, Degeneracy::ZeroAverageLoss);
        RS_EPSILON
    } else {
        avg_loss
    };
    let rs = avg_gain / denom;
    (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
}

/// RSI rows for `series`, dated from input index `period` onwards.
///
/// Errors
/// ------
/// - `AnalysisError::InvalidParameter` if `params.period == 0`.
/// - `AnalysisError::InsufficientData` if `series.len() <= params.period`.
pub fn compute_rsi(series: &Series, params: &RsiParams) -> AnalysisResult<Timeline> {
    tracing::debug!(period = params.period, len = series.len(), "computing RSI");
    let mut flags = Vec::new();
    let rsi = rsi_values(&series.values(), params.period, &mut flags)?;
    let rows = series.points()[params.period..]
        .iter()
        .zip(rsi)
        .map(|(p, v)| ResultRow::history(p.date, v))
        .collect();
    Ok(Timeline::new(rows, flags))
}
