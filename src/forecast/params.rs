//! Parameter structs for the three forecasting paths.
use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, AnalysisResult};
use crate::regressor::forecast::check_horizon;

/// Largest lag, order or differencing count accepted by the forecasters.
pub const MAX_ORDER: usize = 250;

fn check_order(name: &'static str, value: usize) -> AnalysisResult<()> {
    if value > MAX_ORDER {
        return Err(AnalysisError::invalid(
            name,
            format!("{value} exceeds the maximum order of {MAX_ORDER}"),
        ));
    }
    Ok(())
}

/// ARIMA-like orders and horizon.
///
/// `p` and `q` only matter through `lag = max(p, q)`; `d` is the number of
/// differencing passes applied before fitting (zero fits the levels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArimaParams {
    pub p: usize,
    pub d: usize,
    pub q: usize,
    pub steps: usize,
}

impl Default for ArimaParams {
    fn default() -> Self {
        Self { p: 2, d: 1, q: 2, steps: 30 }
    }
}

impl ArimaParams {
    /// Errors
    /// ------
    /// - `AnalysisError::InvalidParameter` if `p` and `q` are both zero, an
    ///   order exceeds [`MAX_ORDER`], or `steps` is zero or above
    ///   [`MAX_HORIZON`](crate::regressor::MAX_HORIZON).
    pub fn new(p: usize, d: usize, q: usize, steps: usize) -> AnalysisResult<Self> {
        let params = Self { p, d, q, steps };
        params.validate()?;
        Ok(params)
    }

    pub fn lag(&self) -> usize {
        self.p.max(self.q)
    }

    pub fn validate(&self) -> AnalysisResult<()> {
        if self.lag() == 0 {
            return Err(AnalysisError::invalid("p", "at least one of p and q must be positive"));
        }
        check_order("p", self.p)?;
        check_order("d", self.d)?;
        check_order("q", self.q)?;
        check_horizon(self.steps)
    }
}

/// GARCH-like orders and horizon; `lag = max(p, q)` for both windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GarchParams {
    pub p: usize,
    pub q: usize,
    pub steps: usize,
}

impl Default for GarchParams {
    fn default() -> Self {
        Self { p: 1, q: 1, steps: 30 }
    }
}

impl GarchParams {
    /// Errors
    /// ------
    /// - `AnalysisError::InvalidParameter` if `p` or `q` is zero or above
    ///   [`MAX_ORDER`], or `steps` is out of range.
    pub fn new(p: usize, q: usize, steps: usize) -> AnalysisResult<Self> {
        let params = Self { p, q, steps };
        params.validate()?;
        Ok(params)
    }

    pub fn lag(&self) -> usize {
        self.p.max(self.q)
    }

    pub fn validate(&self) -> AnalysisResult<()> {
        if self.p == 0 {
            return Err(AnalysisError::invalid("p", "GARCH order p must be at least 1"));
        }
        if self.q == 0 {
            return Err(AnalysisError::invalid("q", "GARCH order q must be at least 1"));
        }
        check_order("p", self.p)?;
        check_order("q", self.q)?;
        check_horizon(self.steps)
    }
}

/// Heuristic VAR lag and horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VarParams {
    pub lag: usize,
    pub steps: usize,
}

impl Default for VarParams {
    fn default() -> Self {
        Self { lag: 2, steps: 30 }
    }
}

impl VarParams {
    /// Errors
    /// ------
    /// - `AnalysisError::InvalidParameter` if `lag` is zero or above
    ///   [`MAX_ORDER`], or `steps` is out of range.
    pub fn new(lag: usize, steps: usize) -> AnalysisResult<Self> {
        let params = Self { lag, steps };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> AnalysisResult<()> {
        if self.lag == 0 {
            return Err(AnalysisError::invalid("lag", "VAR lag must be at least 1"));
        }
        check_order("lag", self.lag)?;
        check_horizon(self.steps)
    }
}
