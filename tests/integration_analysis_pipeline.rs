//! Integration tests for the analysis engine's public surface.
//!
//! Purpose
//! -------
//! - Validate the end-to-end scenarios a dashboard host relies on: indicator
//!   rows, pairwise screens, forecasts merged onto trading-day timelines, and
//!   the JSON request dispatcher.
//! - Use realistic inputs (business-day calendars, random walks, parsed CSV)
//!   rather than only hand-sized toy series.
//!
//! Coverage
//! --------
//! - `indicators`: RSI worked example, MACD length/histogram identity, CSV
//!   ingestion feeding a pairwise analysis.
//! - `statistical_tests`: correlation under rescaling and sign flip; screen
//!   sanity on independent and co-moving inputs.
//! - `forecast`: VAR increasing-integers scenario, seeded ARIMA/GARCH smoke
//!   runs on a Monday–Friday calendar.
//! - `series`: normalization round trip and lagged-dataset layout.
//! - `engine`: JSON request → JSON response.
//!
//! Exclusions
//! ----------
//! - Gradient checks, optimizer internals and epsilon-substitution details;
//!   those are covered by unit tests next to the code.
//! - Forecast accuracy; the forecasters are heuristics and only shape and
//!   finiteness are asserted here.
use approx::assert_relative_eq;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use quant_engine::{
    engine::{AnalysisOutput, AnalysisRequest, Engine},
    forecast::{ArimaParams, GarchParams, VarParams, forecast_arima, forecast_garch, forecast_var},
    indicators::{MacdParams, RsiParams, compute_macd, compute_rsi, parse_custom_indicator_csv},
    regressor::TrainingOptions,
    series::{Series, Stock, StockSet, build_lagged_dataset, denormalize, normalize},
    statistical_tests::{chi_square_screen, cointegration_screen, correlate},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Normal, StandardNormal};

/// Purpose
/// -------
/// Produce `n` consecutive Monday–Friday dates starting at or after
/// `start`.
fn business_days(start: NaiveDate, n: usize) -> Vec<NaiveDate> {
    let mut out = Vec::with_capacity(n);
    let mut d = start;
    while out.len() < n {
        if !matches!(d.weekday(), Weekday::Sat | Weekday::Sun) {
            out.push(d);
        }
        d += Duration::days(1);
    }
    out
}

/// Purpose
/// -------
/// Build a business-day [`Series`] from `values`, starting Monday
/// 2024-01-01.
///
/// Invariants
/// ----------
/// - Panics on non-finite values; inputs are test fixtures.
fn series(values: &[f64]) -> Series {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    Series::from_parts(&business_days(start, values.len()), values).expect("valid series")
}

/// Purpose
/// -------
/// Gaussian random walk of length `n` starting at 100 with unit steps.
fn random_walk(rng: &mut StdRng, n: usize) -> Vec<f64> {
    let mut level = 100.0;
    (0..n)
        .map(|_| {
            level += rng.sample::<f64, _>(StandardNormal);
            level
        })
        .collect()
}

#[test]
// Purpose
// -------
// Verify the RSI worked example end to end.
//
// Given
// -----
// - [100, 101, 99, 102, 105, 103, 107, 110, 108, 112], period 3.
//
// Expect
// ------
// - 7 rows; the first RSI strictly inside (0, 100); all within [0, 100];
//   first row dated on the 4th input date.
fn rsi_worked_example_produces_seven_rows() {
    // Arrange
    let prices = [100.0, 101.0, 99.0, 102.0, 105.0, 103.0, 107.0, 110.0, 108.0, 112.0];
    let s = series(&prices);

    // Act
    let tl = compute_rsi(&s, &RsiParams::new(3).expect("valid period")).expect("long enough");

    // Assert
    assert_eq!(tl.len(), 7);
    let values = tl.values();
    assert!(values[0] > 0.0 && values[0] < 100.0);
    assert!(values.iter().all(|v| (0.0..=100.0).contains(v)));
    assert_eq!(tl.rows[0].date, s.points()[3].date);
    assert_relative_eq!(values[0], 200.0 / 3.0, epsilon = 1e-9);
}

#[test]
// Purpose
// -------
// Verify MACD length and the histogram identity on a random walk.
fn macd_histogram_matches_line_difference() {
    let mut rng = StdRng::seed_from_u64(3);
    let s = series(&random_walk(&mut rng, 120));
    let params = MacdParams::default();

    let out = compute_macd(&s, &params).expect("long enough");

    assert_eq!(out.len(), 120 - params.slow - params.signal + 1);
    for ((m, sig), h) in out.macd_line.iter().zip(&out.signal_line).zip(&out.histogram) {
        let diff = m.value.expect("macd value") - sig.value.expect("signal value");
        assert_relative_eq!(h.value.expect("histogram value"), diff, epsilon = 5.1e-5);
    }
}

#[test]
// Purpose
// -------
// Verify correlation is invariant to positive scale and flips with sign.
//
// Given
// -----
// - A 60-point random walk A, B = 2·A, C = −A.
//
// Expect
// ------
// - corr(A, B) ≈ 1, corr(A, C) ≈ −1, corr(A, A) ≈ 1.
fn correlation_tracks_scale_and_sign() {
    // Arrange
    let mut rng = StdRng::seed_from_u64(21);
    let a = random_walk(&mut rng, 60);
    let b: Vec<f64> = a.iter().map(|v| 2.0 * v).collect();
    let c: Vec<f64> = a.iter().map(|v| -v).collect();
    let (sa, sb, sc) = (
        Stock::new("A", "Alpha", series(&a)),
        Stock::new("B", "Beta", series(&b)),
        Stock::new("C", "Gamma", series(&c)),
    );

    // Act
    let ab = correlate(&sa, &sb).expect("full overlap");
    let ac = correlate(&sa, &sc).expect("full overlap");
    let aa = correlate(&sa, &sa).expect("full overlap");

    // Assert
    assert_relative_eq!(ab.coefficient, 1.0, epsilon = 1e-9);
    assert_relative_eq!(ac.coefficient, -1.0, epsilon = 1e-9);
    assert_relative_eq!(aa.coefficient, 1.0, epsilon = 1e-9);
    assert_eq!(ab.dates.len(), 60);
}

#[test]
// Purpose
// -------
// Sanity-check the screens against false positives and on co-moving input.
//
// Given
// -----
// - 10 pairs of independent white-noise series (length 250) for the
//   chi-square screen and 10 pairs of independent random walks for the
//   cointegration screen.
// - 10 pairs `B = A + N(0, 0.5)` built on random walks.
//
// Expect
// ------
// - Mean p-values on independent inputs above 0.1.
// - Most co-moving pairs flagged significant by the cointegration screen.
fn screens_separate_independent_and_co_moving_inputs() {
    // Arrange
    let mut rng = StdRng::seed_from_u64(77);
    let noise = Normal::new(0.0, 0.5).expect("valid sd");
    let mut chi_p = Vec::new();
    let mut coint_p = Vec::new();
    let mut co_moving_hits = 0;

    // Act
    for _ in 0..10 {
        let wa: Vec<f64> = (0..250).map(|_| rng.sample::<f64, _>(StandardNormal)).collect();
        let wb: Vec<f64> = (0..250).map(|_| rng.sample::<f64, _>(StandardNormal)).collect();
        chi_p.push(chi_square_screen(&series(&wa), &series(&wb)).expect("overlap").p_value);

        let ra = random_walk(&mut rng, 250);
        let rb = random_walk(&mut rng, 250);
        coint_p.push(cointegration_screen(&series(&ra), &series(&rb)).expect("overlap").p_value);

        let b: Vec<f64> = ra.iter().map(|v| v + rng.sample(noise)).collect();
        let out = cointegration_screen(&series(&ra), &series(&b)).expect("overlap");
        co_moving_hits += usize::from(out.significant);
    }

    // Assert
    let mean = |v: &[f64]| v.iter().sum::<f64>() / v.len() as f64;
    assert!(mean(&chi_p) > 0.1, "chi-square mean p = {}", mean(&chi_p));
    assert!(mean(&coint_p) > 0.1, "cointegration mean p = {}", mean(&coint_p));
    assert!(co_moving_hits >= 8, "{co_moving_hits} of 10 co-moving pairs significant");
}

#[test]
// Purpose
// -------
// Verify the VAR increasing-integers scenario on both scales.
//
// Given
// -----
// - Target 1..=10, no features, lag 1, 3 steps.
//
// Expect
// ------
// - The last real row carries prediction == value (anchor); the next 3
//   rows carry finite predictions only.
fn var_increasing_integers_anchor_and_forecast() {
    // Arrange
    let values: Vec<f64> = (1..=10).map(f64::from).collect();
    let target = series(&values);

    // Act
    let out = forecast_var(&target, &[], &VarParams::new(1, 3).expect("valid params"))
        .expect("long enough");

    // Assert
    for tl in [&out.raw, &out.normalized] {
        assert_eq!(tl.len(), 13);
        let anchor = tl.rows[9];
        assert_eq!(anchor.prediction, anchor.value);
        assert!(tl.rows[10..].iter().all(|r| r.value.is_none()));
        assert!(tl.rows[10..].iter().all(|r| r.prediction.is_some_and(f64::is_finite)));
    }
    assert_relative_eq!(out.raw.rows[10].prediction.expect("forecast"), 11.0, epsilon = 1e-9);
}

#[test]
// Purpose
// -------
// Seeded ARIMA smoke run: forecast rows land on weekdays only and stay
// finite.
fn arima_forecast_on_business_days_skips_weekends() {
    let mut rng = StdRng::seed_from_u64(12);
    let s = series(&random_walk(&mut rng, 90));
    let params = ArimaParams { steps: 12, ..ArimaParams::default() };
    let training = TrainingOptions::arima().with_seed(12).with_epochs(10);

    let tl = forecast_arima(&s, &params, &training).expect("forecast succeeds");

    let future = &tl.rows[90..];
    assert_eq!(future.len(), 12);
    assert!(future.iter().all(|r| !matches!(r.date.weekday(), Weekday::Sat | Weekday::Sun)));
    assert!(future.iter().all(|r| r.prediction.is_some_and(f64::is_finite)));
    assert!(tl.rows.windows(2).all(|w| w[0].date < w[1].date));
}

#[test]
// Purpose
// -------
// Seeded GARCH smoke run: positive prices and non-negative volatility.
fn garch_forecast_yields_positive_prices_and_volatility() {
    let mut rng = StdRng::seed_from_u64(5);
    let prices: Vec<f64> = random_walk(&mut rng, 100).iter().map(|v| v + 50.0).collect();
    let s = series(&prices);
    let training = TrainingOptions::garch().with_seed(5).with_epochs(15);

    let out = forecast_garch(&s, &GarchParams::new(2, 1, 8).expect("valid"), &training)
        .expect("forecast succeeds");

    assert!(out.price.predictions().iter().all(|p| *p > 0.0 && p.is_finite()));
    assert!(out.volatility.predictions().iter().all(|v| *v >= 0.0 && v.is_finite()));
    assert_eq!(out.price.predictions().len(), 8);
}

#[test]
// Purpose
// -------
// Verify the normalization round trip and the lagged-dataset layout on the
// same series.
fn normalization_round_trip_and_lagged_layout() {
    let mut rng = StdRng::seed_from_u64(9);
    let x = random_walk(&mut rng, 50);

    let norm = normalize(&x).expect("non-empty");
    let back = denormalize(&norm.values, norm.min, norm.max);
    let ds = build_lagged_dataset(&x, 4).expect("long enough");

    for (a, b) in x.iter().zip(&back) {
        assert_relative_eq!(*a, *b, max_relative = 1e-12);
    }
    assert!(norm.values.iter().all(|v| (0.0..=1.0).contains(v)));
    assert_eq!(ds.features.dim(), (46, 4));
    for i in 0..ds.rows() {
        assert_eq!(ds.features.row(i).to_vec(), x[i..i + 4].to_vec());
        assert_eq!(ds.targets[i], x[i + 4]);
    }
}

#[test]
// Purpose
// -------
// Verify a parsed custom indicator can be correlated with a loaded stock.
//
// Given
// -----
// - A CSV with a header, 40 business-day rows and one non-numeric row.
//
// Expect
// ------
// - 40 parsed points in file order; correlation with the source stock is 1.
fn custom_indicator_joins_pairwise_analysis() {
    // Arrange
    let mut rng = StdRng::seed_from_u64(31);
    let values = random_walk(&mut rng, 40);
    let stock = Stock::new("ACME", "Acme Corp", series(&values));
    let mut csv = String::from("Date,Value\n");
    for (p, v) in stock.series.points().iter().zip(&values) {
        csv.push_str(&format!("{},{}\n", p.date.format("%Y-%m-%d"), v * 3.0 + 1.0));
    }
    csv.push_str("2024-12-31,n/a\n");

    // Act
    let points = parse_custom_indicator_csv(&csv).expect("well-formed csv");
    let custom = Stock::custom("ACME x3", points).expect("valid points");
    let corr = correlate(&stock, &custom).expect("full overlap");

    // Assert
    assert_eq!(custom.series.len(), 40);
    assert_relative_eq!(corr.coefficient, 1.0, epsilon = 1e-9);
}

#[test]
// Purpose
// -------
// Verify a JSON request runs through the engine and serializes back.
fn engine_runs_json_request() {
    let mut rng = StdRng::seed_from_u64(4);
    let stocks = StockSet::new(vec![
        Stock::new("AAA", "Aaa", series(&random_walk(&mut rng, 60))),
        Stock::new("BBB", "Bbb", series(&random_walk(&mut rng, 60))),
    ]);
    let request: AnalysisRequest = serde_json::from_str(
        r#"{"method": "var", "target": "AAA", "features": ["BBB"], "params": {"lag": 2, "steps": 4}}"#,
    )
    .expect("valid request");

    let out = Engine::default().run(&stocks, &request).expect("VAR succeeds");
    let json = serde_json::to_value(&out).expect("serializable");

    assert!(matches!(out, AnalysisOutput::Var(_)));
    assert_eq!(json["method"], "var");
    assert_eq!(json["result"]["raw"]["rows"].as_array().map(Vec::len), Some(64));
}
