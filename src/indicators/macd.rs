//! Exponential moving averages and MACD.
//!
//! Purpose
//! -------
//! Provide the SMA-seeded EMA recurrence and the MACD triple (MACD line,
//! signal line, histogram) built on it.
//!
//! Key behaviors
//! -------------
//! - [`ema`] uses `k = 2 / (n + 1)` and seeds with the simple mean of the
//!   first `n` points; element `i` of its output belongs to input index
//!   `i + n − 1`.
//! - [`compute_macd`] aligns fast and slow EMAs on their common suffix, runs
//!   the signal EMA over the MACD line, and reports all three series on the
//!   rows where the smoothed signal exists (input indices
//!   `slow + signal − 1 ..`).
//!
//! Invariants & assumptions
//! ------------------------
//! - The three output series share dates and have length
//!   `len − slow − signal + 1`.
//! - `histogram = macd − signal`, rounded to 4 decimals.
use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, AnalysisResult};
use crate::series::Series;
use crate::timeline::ResultRow;

/// MACD fast/slow/signal periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self { fast: 12, slow: 26, signal: 9 }
    }
}

impl MacdParams {
    /// Errors
    /// ------
    /// - `AnalysisError::InvalidParameter` if any period is zero or
    ///   `fast >= slow`.
    pub fn new(fast: usize, slow: usize, signal: usize) -> AnalysisResult<Self> {
        let params = Self { fast, slow, signal };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> AnalysisResult<()> {
        for (name, value) in [("fast", self.fast), ("slow", self.slow), ("signal", self.signal)] {
            if value == 0 {
                return Err(AnalysisError::invalid(name, "MACD periods must be at least 1"));
            }
        }
        if self.fast >= self.slow {
            return Err(AnalysisError::invalid(
                "fast",
                format!("fast period {} must be shorter than slow period {}", self.fast, self.slow),
            ));
        }
        Ok(())
    }
}

/// The three aligned MACD series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacdOutput {
    pub macd_line: Vec<ResultRow>,
    pub signal_line: Vec<ResultRow>,
    pub histogram: Vec<ResultRow>,
}

impl MacdOutput {
    pub fn len(&self) -> usize {
        self.histogram.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histogram.is_empty()
    }
}

/// SMA-seeded exponential moving average of `values` over `period`.
///
/// Errors
/// ------
/// - `AnalysisError::InvalidParameter` if `period == 0`.
/// - `AnalysisError::InsufficientData` if `values.len() < period`.
pub fn ema(values: &[f64], period: usize) -> AnalysisResult<Vec<f64>> {
    if period == 0 {
        return Err(AnalysisError::invalid("period", "EMA period must be at least 1"));
    }
    if values.len() < period {
        return Err(AnalysisError::InsufficientData { required: period, actual: values.len() });
    }
    let k = 2.0 / (period as f64 + 1.0);
    let seed = values[..period].iter().sum::<f64>() / period as f64;
    let mut out = Vec::with_capacity(values.len() - period + 1);
    out.push(seed);
    let mut prev = seed;
    for &price in &values[period..] {
        prev = price * k + prev * (1.0 - k);
        out.push(prev);
    }
    Ok(out)
}

#[inline]
fn round4(x: f64) -> f64 {
    (x * 1e4).round() / 1e4
}

/// MACD line, signal line and histogram for `series`.
///
/// Errors
/// ------
/// - `AnalysisError::InvalidParameter` for zero periods or `fast >= slow`.
/// - `AnalysisError::InsufficientData` if `series.len() <= slow + signal`;
///   the required count saturates instead of overflowing for huge periods.
pub fn compute_macd(series: &Series, params: &MacdParams) -> AnalysisResult<MacdOutput> {
    params.validate()?;
    let MacdParams { fast, slow, signal } = *params;
    let values = series.values();
    let required = slow.saturating_add(signal).saturating_add(1);
    if values.len() < required {
        return Err(AnalysisError::InsufficientData { required, actual: values.len() });
    }
    tracing::debug!(fast, slow, signal, len = values.len(), "computing MACD");

    let fast_ema = ema(&values, fast)?;
    let slow_ema = ema(&values, slow)?;
    // fast_ema starts at input index fast-1, slow_ema at slow-1.
    let offset = slow - fast;
    let macd: Vec<f64> = slow_ema.iter().enumerate().map(|(i, s)| fast_ema[i + offset] - s).collect();
    let signal_ema = ema(&macd, signal)?;

    // Skip the signal seed row so every row carries a smoothed signal.
    let first = slow + signal - 1;
    let dates = &series.points()[first..];
    let macd_tail = &macd[signal..];
    let signal_tail = &signal_ema[1..];

    let mut out = MacdOutput {
        macd_line: Vec::with_capacity(dates.len()),
        signal_line: Vec::with_capacity(dates.len()),
        histogram: Vec::with_capacity(dates.len()),
    };
    for ((point, &m), &s) in dates.iter().zip(macd_tail).zip(signal_tail) {
        out.macd_line.push(ResultRow::history(point.date, m));
        out.signal_line.push(ResultRow::history(point.date, s));
        out.histogram.push(ResultRow::history(point.date, round4(m - s)));
    }
    Ok(out)
}
