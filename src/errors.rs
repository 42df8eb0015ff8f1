//! errors: crate-wide error taxonomy and degeneracy flags.
//!
//! Purpose
//! -------
//! Provide one error enum, [`AnalysisError`], that every analysis entry point
//! returns, so callers can branch on the *kind* of failure instead of parsing
//! message text. Alongside it, [`Degeneracy`] names the numeric edge cases
//! that are handled by epsilon substitution rather than raised.
//!
//! Key behaviors
//! -------------
//! - Attach human-readable `Display` messages to each variant, phrased in
//!   terms of domain constraints ("need at least 30 aligned points") rather
//!   than low-level details.
//! - Normalize optimizer failures into [`AnalysisError::Optimization`] via
//!   `From<OptError>`.
//! - Let callers opt into strict handling of degenerate inputs through
//!   [`Flagged::strict`], which turns the first recorded [`Degeneracy`] into
//!   [`AnalysisError::DegenerateInput`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Errors are returned at the point of detection and propagate unmodified;
//!   no routine in this crate retries or returns a truncated result.
//! - Variants are small and cloneable so they are cheap to use in tests and
//!   in higher-level orchestration code.
//!
//! Testing notes
//! -------------
//! - Unit tests check that `Display` messages embed their payloads and that
//!   strict mode only fails when a degeneracy was recorded.
use serde::{Deserialize, Serialize};

use crate::optimization::errors::OptError;

/// Crate-wide result alias for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// AnalysisError: failure kinds surfaced by the analysis engine.
///
/// Variants
/// --------
/// - `InsufficientData { required, actual }`
///   The series is shorter than the minimum the method requires.
/// - `InsufficientOverlap { required, actual }`
///   Two series share fewer aligned dates than a pairwise method requires.
/// - `NotFound { symbol }`
///   A referenced symbol is absent from the provided set.
/// - `MalformedInput { index, reason }`
///   A CSV row or series element cannot be used (bad date, unsorted dates,
///   non-finite or non-positive values). `index` is the offending row/line.
/// - `DegenerateInput { degeneracy }`
///   Only produced in strict mode; see [`Flagged::strict`].
/// - `InvalidParameter { name, reason }`
///   A period, order, horizon, training or config value is out of range.
/// - `Optimization(OptError)`
///   The L-BFGS backend failed while training a regressor.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    InsufficientData { required: usize, actual: usize },
    InsufficientOverlap { required: usize, actual: usize },
    NotFound { symbol: String },
    MalformedInput { index: usize, reason: String },
    DegenerateInput { degeneracy: Degeneracy },
    InvalidParameter { name: &'static str, reason: String },
    Optimization(OptError),
}

impl AnalysisError {
    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        AnalysisError::MalformedInput { index, reason: reason.into() }
    }

    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidParameter { name, reason: reason.into() }
    }
}

impl std::error::Error for AnalysisError {}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::InsufficientData { required, actual } => {
                write!(f, "Insufficient data: need at least {required} observations, got {actual}")
            }
            AnalysisError::InsufficientOverlap { required, actual } => {
                write!(
                    f,
                    "Insufficient overlap: need at least {required} aligned dates, got {actual}"
                )
            }
            AnalysisError::NotFound { symbol } => {
                write!(f, "Symbol '{symbol}' not found in the provided set")
            }
            AnalysisError::MalformedInput { index, reason } => {
                write!(f, "Malformed input at {index}: {reason}")
            }
            AnalysisError::DegenerateInput { degeneracy } => {
                write!(f, "Degenerate input: {degeneracy}")
            }
            AnalysisError::InvalidParameter { name, reason } => {
                write!(f, "Invalid parameter '{name}': {reason}")
            }
            AnalysisError::Optimization(err) => write!(f, "Optimization failed: {err}"),
        }
    }
}

impl From<OptError> for AnalysisError {
    fn from(err: OptError) -> Self {
        AnalysisError::Optimization(err)
    }
}

/// Degeneracy: numeric edge cases resolved by epsilon substitution.
///
/// Each variant records one place where a zero denominator was replaced by a
/// reserved epsilon instead of producing `NaN`/`∞`. Results carry the list so
/// callers that care can inspect it or escalate it via [`Flagged::strict`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Degeneracy {
    /// `max == min` during min-max normalization.
    ConstantSeries,
    /// Average loss was zero while computing RSI.
    ZeroAverageLoss,
    /// One or both aligned series have zero variance (correlation).
    ZeroVariance,
    /// Cointegration regressor (cumulative differences) has zero energy.
    ZeroRegressorVariance,
    /// Cointegration residuals (or their lags) have zero energy.
    ZeroResidualVariance,
    /// Series mean was zero in the VAR trend-strength check.
    ZeroMeanTrend,
    /// A VAR coefficient row summed to zero in absolute value.
    ZeroCoefficientRow,
    /// A VAR feature ended at zero and was left unscaled in the normalized pass.
    ZeroLastFeature,
}

impl std::fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Degeneracy::ConstantSeries => "series is constant (max == min) during normalization",
            Degeneracy::ZeroAverageLoss => "average loss is zero in RSI smoothing",
            Degeneracy::ZeroVariance => "aligned series have zero variance",
            Degeneracy::ZeroRegressorVariance => "cointegration regressor has zero variance",
            Degeneracy::ZeroResidualVariance => "cointegration residuals have zero variance",
            Degeneracy::ZeroMeanTrend => "series mean is zero in the trend-strength check",
            Degeneracy::ZeroCoefficientRow => "VAR coefficient row sums to zero",
            Degeneracy::ZeroLastFeature => "VAR feature ends at zero and was left unscaled",
        };
        f.write_str(text)
    }
}

/// Results that record epsilon substitutions in a `degeneracies` list.
pub trait Flagged: Sized {
    fn degeneracies(&self) -> &[Degeneracy];

    /// Escalate the first recorded degeneracy into an error.
    ///
    /// Errors
    /// ------
    /// - `AnalysisError::DegenerateInput` if any degeneracy was recorded.
    fn strict(self) -> AnalysisResult<Self> {
        match self.degeneracies().first() {
            Some(&degeneracy) => Err(AnalysisError::DegenerateInput { degeneracy }),
            None => Ok(self),
        }
    }

    fn is_degenerate(&self) -> bool {
        !self.degeneracies().is_empty()
    }
}

/// Append `degeneracy` once, logging the substitution.
pub(crate) fn record(flags: &mut Vec<Degeneracy>, degeneracy: Degeneracy) {
    if !flags.contains(&degeneracy) {
        tracing::warn!(%degeneracy, "epsilon substitution applied");
        flags.push(degeneracy);
    }
}
