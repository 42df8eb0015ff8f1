//! Training configuration for the lag regressors.
//!
//! Purpose
//! -------
//! Collect the knobs that control how a regressor is fitted: network width,
//! fixed epoch and batch counts, the Adam learning rate, the RNG seed, and
//! which solver runs the fit.
//!
//! Key behaviors
//! -------------
//! - [`TrainingOptions::arima`] and [`TrainingOptions::garch`] reproduce the
//!   two dashboard presets (50 and 100 epochs, batch 32, 20 hidden units).
//! - [`Solver::Adam`] trains with shuffled mini-batches; [`Solver::Lbfgs`]
//!   runs full-batch L-BFGS with `epochs` as the iteration cap.
//!
//! Invariants & assumptions
//! ------------------------
//! - Effort is fixed: there is no early stopping and no validation split,
//!   so identical options and seed reproduce identical fits.
//! - `seed = None` draws a fresh seed from the OS for every fit.
use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, AnalysisResult};
use crate::optimization::minimizer::LbfgsOptions;

/// Hidden-layer width used by both presets.
pub const DEFAULT_HIDDEN_UNITS: usize = 20;

/// Widest hidden layer accepted by [`TrainingOptions::validate`].
pub const MAX_HIDDEN_UNITS: usize = 1024;

/// Mini-batch size used by both presets.
pub const DEFAULT_BATCH_SIZE: usize = 32;

/// Adam step size.
pub const DEFAULT_LEARNING_RATE: f64 = 1e-3;

/// Gradient-based optimizer used to fit a regressor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Solver {
    /// Mini-batch Adam over shuffled batches.
    #[default]
    Adam,
    /// Full-batch L-BFGS through the `argmin` backend.
    Lbfgs(LbfgsOptions),
}

/// TrainingOptions: fixed-effort training configuration.
///
/// Fields
/// ------
/// - `hidden_units`: width of the single ReLU hidden layer.
/// - `epochs`: passes over the data (Adam) or iteration cap (L-BFGS).
/// - `batch_size`: rows per Adam step; the last batch may be smaller.
/// - `learning_rate`: Adam step size.
/// - `seed`: RNG seed for weight initialization and shuffling.
/// - `solver`: see [`Solver`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingOptions {
    pub hidden_units: usize,
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub seed: Option<u64>,
    pub solver: Solver,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self::arima()
    }
}

impl TrainingOptions {
    /// Preset for the price-level (ARIMA-like) path: 50 epochs.
    pub fn arima() -> Self {
        Self {
            hidden_units: DEFAULT_HIDDEN_UNITS,
            epochs: 50,
            batch_size: DEFAULT_BATCH_SIZE,
            learning_rate: DEFAULT_LEARNING_RATE,
            seed: None,
            solver: Solver::Adam,
        }
    }

    /// Preset for the returns/variance (GARCH-like) path: 100 epochs.
    pub fn garch() -> Self {
        Self { epochs: 100, ..Self::arima() }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_solver(mut self, solver: Solver) -> Self {
        self.solver = solver;
        self
    }

    /// Errors
    /// ------
    /// - `AnalysisError::InvalidParameter` for a width of zero or above
    ///   [`MAX_HIDDEN_UNITS`], zero epochs or batch size, a non-positive or
    ///   non-finite learning rate, or invalid L-BFGS options.
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.hidden_units == 0 || self.hidden_units > MAX_HIDDEN_UNITS {
            return Err(AnalysisError::invalid(
                "hidden_units",
                format!("must be between 1 and {MAX_HIDDEN_UNITS}, got {}", self.hidden_units),
            ));
        }
        if self.epochs == 0 {
            return Err(AnalysisError::invalid("epochs", "must be at least 1"));
        }
        if self.batch_size == 0 {
            return Err(AnalysisError::invalid("batch_size", "must be at least 1"));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(AnalysisError::invalid(
                "learning_rate",
                format!("must be finite and positive, got {}", self.learning_rate),
            ));
        }
        if let Solver::Lbfgs(opts) = &self.solver {
            opts.validate().map_err(|e| AnalysisError::invalid("solver", e.to_string()))?;
        }
        Ok(())
    }
}
