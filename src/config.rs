//! Engine-wide defaults for every analysis method.
//!
//! Purpose
//! -------
//! Hold the parameter structs and training options the engine falls back on
//! when a request leaves them out, loadable from JSON and validated as a
//! whole.
//!
//! Invariants & assumptions
//! ------------------------
//! - A config returned by [`EngineConfig::from_json_str`] has passed every
//!   nested `validate`.
//! - Missing JSON fields take their `Default` values; unknown fields are
//!   rejected.
use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, AnalysisResult};
use crate::forecast::{ArimaParams, GarchParams, VarParams};
use crate::indicators::{MacdParams, RsiParams};
use crate::regressor::TrainingOptions;

/// EngineConfig: default parameters per method.
///
/// Fields
/// ------
/// - `rsi`, `macd`, `arima`, `garch`, `var`: method parameters.
/// - `arima_training`, `garch_training`: regressor training presets.
/// - `strict`: escalate any recorded degeneracy into
///   `AnalysisError::DegenerateInput` instead of returning the result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub rsi: RsiParams,
    pub macd: MacdParams,
    pub arima: ArimaParams,
    pub garch: GarchParams,
    pub var: VarParams,
    pub arima_training: TrainingOptions,
    pub garch_training: TrainingOptions,
    pub strict: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rsi: RsiParams::default(),
            macd: MacdParams::default(),
            arima: ArimaParams::default(),
            garch: GarchParams::default(),
            var: VarParams::default(),
            arima_training: TrainingOptions::arima(),
            garch_training: TrainingOptions::garch(),
            strict: false,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config.
    ///
    /// Errors
    /// ------
    /// - `AnalysisError::InvalidParameter { name: "config", .. }` for JSON
    ///   that does not match the schema.
    /// - Any nested validation error.
    pub fn from_json_str(json: &str) -> AnalysisResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| AnalysisError::invalid("config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AnalysisResult<()> {
        self.rsi.validate()?;
        self.macd.validate()?;
        self.arima.validate()?;
        self.garch.validate()?;
        self.var.validate()?;
        self.arima_training.validate()?;
        self.garch_training.validate()
    }
}
