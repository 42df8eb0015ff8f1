//! Lagged-feature construction for the lag regressors.
use ndarray::{Array1, Array2};

use crate::errors::{AnalysisError, AnalysisResult};

/// Supervised view of a scalar series for one-step-ahead regression.
///
/// - `features`: `(n - lag) × lag`; row `i` is `series[i .. i + lag]`.
/// - `targets`: length `n - lag`; element `i` is `series[i + lag]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LaggedDataset {
    pub features: Array2<f64>,
    pub targets: Array1<f64>,
}

impl LaggedDataset {
    pub fn rows(&self) -> usize {
        self.targets.len()
    }

    pub fn lag(&self) -> usize {
        self.features.ncols()
    }
}

/// Build the lagged design matrix and targets for `lag` trailing observations.
///
/// Errors
/// ------
/// - `AnalysisError::InvalidParameter` if `lag == 0`.
/// - `AnalysisError::InsufficientData` if `values.len() <= lag`.
pub fn build_lagged_dataset(values: &[f64], lag: usize) -> AnalysisResult<LaggedDataset> {
    if lag == 0 {
        return Err(AnalysisError::invalid("lag", "lag must be at least 1"));
    }
    if values.len() <= lag {
        return Err(AnalysisError::InsufficientData { required: lag + 1, actual: values.len() });
    }
    let rows = values.len() - lag;
    let features = Array2::from_shape_fn((rows, lag), |(i, j)| values[i + j]);
    let targets = Array1::from_iter(values[lag..].iter().copied());
    Ok(LaggedDataset { features, targets })
}
