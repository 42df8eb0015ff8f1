//! Request dispatcher: resolve symbols, apply defaults, run one analysis.
//!
//! Purpose
//! -------
//! Give the host a single serializable entry point: an [`AnalysisRequest`]
//! naming symbols and optional parameters goes in, an [`AnalysisOutput`]
//! comes out.
//!
//! Key behaviors
//! -------------
//! - Symbols resolve against the caller's [`StockSet`]; unknown symbols fail
//!   with `AnalysisError::NotFound`.
//! - Parameters left out of a request come from the [`EngineConfig`].
//! - In strict mode any recorded degeneracy becomes
//!   `AnalysisError::DegenerateInput`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every call is independent: the engine holds only its config, and
//!   regressors are trained from scratch inside each forecast.
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::errors::{AnalysisError, AnalysisResult, Degeneracy, Flagged};
use crate::forecast::{
    ArimaParams, GarchForecast, GarchParams, VarForecast, VarParams, forecast_arima,
    forecast_garch, forecast_var,
};
use crate::indicators::{MacdOutput, MacdParams, RsiParams, compute_macd, compute_rsi};
use crate::regressor::TrainingOptions;
use crate::series::{Series, StockSet};
use crate::statistical_tests::{
    CorrelationResult, TestOutcome, chi_square_screen, cointegration_screen, correlation_matrix,
};
use crate::timeline::Timeline;

/// One analysis to run, tagged by `method` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum AnalysisRequest {
    Rsi {
        symbol: String,
        #[serde(default)]
        params: Option<RsiParams>,
    },
    Macd {
        symbol: String,
        #[serde(default)]
        params: Option<MacdParams>,
    },
    Arima {
        symbol: String,
        #[serde(default)]
        params: Option<ArimaParams>,
        #[serde(default)]
        training: Option<TrainingOptions>,
    },
    Garch {
        symbol: String,
        #[serde(default)]
        params: Option<GarchParams>,
        #[serde(default)]
        training: Option<TrainingOptions>,
    },
    Var {
        target: String,
        #[serde(default)]
        features: Vec<String>,
        #[serde(default)]
        params: Option<VarParams>,
    },
    /// Pairwise correlations over every `i < j` pair of `symbols`.
    Correlation { symbols: Vec<String> },
    ChiSquare { a: String, b: String },
    Cointegration { a: String, b: String },
}

impl AnalysisRequest {
    pub fn method(&self) -> &'static str {
        match self {
            AnalysisRequest::Rsi { .. } => "rsi",
            AnalysisRequest::Macd { .. } => "macd",
            AnalysisRequest::Arima { .. } => "arima",
            AnalysisRequest::Garch { .. } => "garch",
            AnalysisRequest::Var { .. } => "var",
            AnalysisRequest::Correlation { .. } => "correlation",
            AnalysisRequest::ChiSquare { .. } => "chi_square",
            AnalysisRequest::Cointegration { .. } => "cointegration",
        }
    }
}

/// Result of one [`AnalysisRequest`], tagged like the request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", content = "result", rename_all = "snake_case")]
pub enum AnalysisOutput {
    Rsi(Timeline),
    Macd(MacdOutput),
    Arima(Timeline),
    Garch(GarchForecast),
    Var(VarForecast),
    Correlation(Vec<CorrelationResult>),
    ChiSquare(TestOutcome),
    Cointegration(TestOutcome),
}

impl AnalysisOutput {
    /// Every degeneracy recorded anywhere in the output, in order.
    pub fn degeneracies(&self) -> Vec<Degeneracy> {
        match self {
            AnalysisOutput::Rsi(t) | AnalysisOutput::Arima(t) => t.degeneracies().to_vec(),
            AnalysisOutput::Macd(_) => Vec::new(),
            AnalysisOutput::Garch(g) => g.degeneracies().to_vec(),
            AnalysisOutput::Var(v) => v.degeneracies().to_vec(),
            AnalysisOutput::Correlation(rs) => {
                let mut all: Vec<Degeneracy> = Vec::new();
                for d in rs.iter().flat_map(|r| r.degeneracies()) {
                    if !all.contains(d) {
                        all.push(*d);
                    }
                }
                all
            }
            AnalysisOutput::ChiSquare(o) | AnalysisOutput::Cointegration(o) => {
                o.degeneracies().to_vec()
            }
        }
    }
}

fn series_of<'a>(stocks: &'a StockSet, symbol: &str) -> AnalysisResult<&'a Series> {
    Ok(&stocks.get(symbol)?.series)
}

/// Stateless dispatcher over an [`EngineConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Errors
    /// ------
    /// - Any validation error of `config`.
    pub fn new(config: EngineConfig) -> AnalysisResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run `request` against `stocks`.
    ///
    /// Errors
    /// ------
    /// - `AnalysisError::NotFound` for an unknown symbol.
    /// - Any error of the dispatched analysis.
    /// - `AnalysisError::DegenerateInput` in strict mode when the result
    ///   recorded a degeneracy.
    pub fn run(
        &self, stocks: &StockSet, request: &AnalysisRequest,
    ) -> AnalysisResult<AnalysisOutput> {
        tracing::debug!(method = request.method(), "running analysis");
        let cfg = &self.config;

        let output = match request {
            AnalysisRequest::Rsi { symbol, params } => {
                let params = params.unwrap_or(cfg.rsi);
                AnalysisOutput::Rsi(compute_rsi(series_of(stocks, symbol)?, &params)?)
            }
            AnalysisRequest::Macd { symbol, params } => {
                let params = params.unwrap_or(cfg.macd);
                AnalysisOutput::Macd(compute_macd(series_of(stocks, symbol)?, &params)?)
            }
            AnalysisRequest::Arima { symbol, params, training } => {
                AnalysisOutput::Arima(forecast_arima(
                    series_of(stocks, symbol)?,
                    &params.unwrap_or(cfg.arima),
                    &training.unwrap_or(cfg.arima_training),
                )?)
            }
            AnalysisRequest::Garch { symbol, params, training } => {
                AnalysisOutput::Garch(forecast_garch(
                    series_of(stocks, symbol)?,
                    &params.unwrap_or(cfg.garch),
                    &training.unwrap_or(cfg.garch_training),
                )?)
            }
            AnalysisRequest::Var { target, features, params } => {
                let features = features
                    .iter()
                    .map(|s| series_of(stocks, s))
                    .collect::<AnalysisResult<Vec<_>>>()?;
                AnalysisOutput::Var(forecast_var(
                    series_of(stocks, target)?,
                    &features,
                    &params.unwrap_or(cfg.var),
                )?)
            }
            AnalysisRequest::Correlation { symbols } => {
                let symbols: Vec<&str> = symbols.iter().map(String::as_str).collect();
                AnalysisOutput::Correlation(correlation_matrix(stocks, &symbols)?)
            }
            AnalysisRequest::ChiSquare { a, b } => {
                let (a, b) = (series_of(stocks, a)?, series_of(stocks, b)?);
                AnalysisOutput::ChiSquare(chi_square_screen(a, b)?)
            }
            AnalysisRequest::Cointegration { a, b } => {
                let (a, b) = (series_of(stocks, a)?, series_of(stocks, b)?);
                AnalysisOutput::Cointegration(cointegration_screen(a, b)?)
            }
        };

        if cfg.strict {
            if let Some(&degeneracy) = output.degeneracies().first() {
                return Err(AnalysisError::DegenerateInput { degeneracy });
            }
        }
        Ok(output)
    }
}
