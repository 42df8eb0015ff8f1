//! GARCH-like forecast: returns and conditional variance from two lag
//! regressors stepped together.
//!
//! Purpose
//! -------
//! Forecast a price path and its volatility from log returns, using one
//! regressor on lagged returns and one on lagged squared returns.
//!
//! Key behaviors
//! -------------
//! - Returns `r_t = ln(p_t / p_{t−1})` and squared returns are normalized
//!   separately; the variance model has a ReLU output so σ̂² ≥ 0.
//! - Forecast prices are rebuilt as `last · exp(cumsum r̂)`.
//! - The volatility timeline shows `|r_t|` as history and `√σ̂²` as forecast.
//!
//! Invariants & assumptions
//! ------------------------
//! - Prices must be strictly positive.
//! - Both timelines carry every degeneracy recorded by either model.
use serde::Serialize;

use crate::errors::{AnalysisError, AnalysisResult, Degeneracy, Flagged};
use crate::forecast::params::GarchParams;
use crate::regressor::{
    FeedForwardRegressor, OutputActivation, Regressor, TrainingOptions, recursive_forecast_pair,
};
use crate::series::{Series, build_lagged_dataset, integrate, log_returns, normalize_flagged};
use crate::timeline::Timeline;

/// Price path and volatility path of one GARCH-like forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GarchForecast {
    pub price: Timeline,
    pub volatility: Timeline,
}

impl Flagged for GarchForecast {
    fn degeneracies(&self) -> &[Degeneracy] {
        &self.price.degeneracies
    }
}

/// Forecast `params.steps` prices and volatilities of `series`.
///
/// Errors
/// ------
/// - `AnalysisError::InvalidParameter` for invalid params or options.
/// - `AnalysisError::InsufficientData` if fewer than `lag + 2` prices are
///   given (one is lost to the returns).
/// - `AnalysisError::MalformedInput` for a non-positive price.
/// - `AnalysisError::Optimization` if the L-BFGS solver fails.
pub fn forecast_garch(
    series: &Series, params: &GarchParams, training: &TrainingOptions,
) -> AnalysisResult<GarchForecast> {
    params.validate()?;
    let lag = params.lag();
    let required = lag.saturating_add(2);
    if series.len() < required {
        return Err(AnalysisError::InsufficientData { required, actual: series.len() });
    }
    tracing::debug!(n = series.len(), p = params.p, q = params.q, "GARCH forecast");

    let prices = series.values();
    let returns = log_returns(&prices)?;
    let squared: Vec<f64> = returns.iter().map(|r| r * r).collect();

    let mut flags = Vec::new();
    let norm_r = normalize_flagged(&returns, &mut flags)?;
    let norm_sq = normalize_flagged(&squared, &mut flags)?;

    let mut mean_model = FeedForwardRegressor::new(lag, OutputActivation::Linear, training)?;
    mean_model.fit(&build_lagged_dataset(&norm_r.values, lag)?)?;
    let mut var_model = FeedForwardRegressor::new(lag, OutputActivation::Relu, training)?;
    var_model.fit(&build_lagged_dataset(&norm_sq.values, lag)?)?;

    let (r_scaled, var_scaled) = recursive_forecast_pair(
        &mean_model,
        &norm_r.values,
        &var_model,
        &norm_sq.values,
        params.steps,
    )?;
    let r_hat = norm_r.denormalize(&r_scaled);
    let vol_hat: Vec<f64> =
        norm_sq.denormalize(&var_scaled).into_iter().map(|v| v.max(0.0).sqrt()).collect();

    let last = prices[prices.len() - 1];
    let price_path: Vec<f64> = integrate(&r_hat, last.ln()).into_iter().map(f64::exp).collect();

    let dates = series.dates();
    let abs_returns: Vec<f64> = returns.iter().map(|r| r.abs()).collect();
    let volatility = Timeline::merge_values(&dates[1..], &abs_returns, &vol_hat, flags.clone())?;
    let price = Timeline::merge(series, &price_path, flags)?;
    Ok(GarchForecast { price, volatility })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use rand::{SeedableRng, rngs::StdRng};
    use rand_distr::{Distribution, Normal};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Timeline shapes for price and volatility.
    // - Non-negative, finite volatility and positive prices.
    // - Rejection of short and non-positive inputs.
    // -------------------------------------------------------------------------

    fn random_walk_prices(n: usize, seed: u64) -> Series {
        let mut rng = StdRng::seed_from_u64(seed);
        let shocks = Normal::new(0.0, 0.01).expect("valid sigma");
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).expect("valid");
        let mut price = 50.0;
        let mut dates = Vec::with_capacity(n);
        let mut values = Vec::with_capacity(n);
        for i in 0..n {
            dates.push(start + Duration::days(i as i64));
            values.push(price);
            price *= f64::exp(shocks.sample(&mut rng));
        }
        Series::from_parts(&dates, &values).expect("valid series")
    }

    #[test]
    // Purpose
    // -------
    // Verify both timelines have the expected shapes and sane values.
    //
    // Given
    // -----
    // - 120 log-normal random-walk prices, p = q = 1, 10 steps, 20 epochs.
    //
    // Expect
    // ------
    // - Price timeline: 130 rows, 10 positive finite predictions.
    // - Volatility timeline: 129 rows (history starts one date later),
    //   10 non-negative finite predictions.
    fn garch_forecast_shapes_and_ranges() {
        // Arrange
        let series = random_walk_prices(120, 4);
        let params = GarchParams::new(1, 1, 10).expect("valid");
        let training = TrainingOptions::garch().with_seed(8).with_epochs(20);

        // Act
        let out = forecast_garch(&series, &params, &training).expect("forecast succeeds");

        // Assert
        assert_eq!(out.price.len(), 130);
        assert_eq!(out.volatility.len(), 129);
        let prices = out.price.predictions();
        let vols = out.volatility.predictions();
        assert_eq!((prices.len(), vols.len()), (10, 10));
        assert!(prices.iter().all(|p| p.is_finite() && *p > 0.0));
        assert!(vols.iter().all(|v| v.is_finite() && *v >= 0.0));
        assert_eq!(out.volatility.rows[0].date, series.points()[1].date);
    }

    #[test]
    // Purpose
    // -------
    // Ensure short series and non-positive prices are rejected.
    fn garch_rejects_short_and_non_positive_input() {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).expect("valid");
        let dates: Vec<NaiveDate> = (0..6).map(|i| start + Duration::days(i)).collect();
        let bad = Series::from_parts(&dates, &[1.0, 2.0, 0.0, 2.0, 3.0, 4.0]).expect("finite");
        let training = TrainingOptions::garch().with_seed(0).with_epochs(1);

        let short = forecast_garch(&random_walk_prices(2, 1), &GarchParams::default(), &training);

        assert_eq!(short, Err(AnalysisError::InsufficientData { required: 3, actual: 2 }));
        assert!(matches!(
            forecast_garch(&bad, &GarchParams::default(), &training),
            Err(AnalysisError::MalformedInput { index: 2, .. })
        ));
    }
}
