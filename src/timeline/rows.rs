//! Result rows and the ordered timeline handed back to the host.
//!
//! Purpose
//! -------
//! Represent analysis output as one ascending-by-date sequence of rows, each
//! carrying an observed `value`, a model `prediction`, or (only for the VAR
//! continuity anchor) both.
//!
//! Key behaviors
//! -------------
//! - [`Timeline::merge`] concatenates history rows (value only) with forecast
//!   rows (prediction only) placed on future trading dates.
//! - [`Timeline::merge_anchored`] additionally copies the last observed value
//!   into the last history row's `prediction`, so a chart of predictions
//!   starts exactly where the actual line ends.
//!
//! Invariants & assumptions
//! ------------------------
//! - Rows are strictly ascending by date.
//! - Forecast-horizon rows carry exactly one of `value`/`prediction`; the
//!   anchor row is the only row with both.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, AnalysisResult, Degeneracy, Flagged};
use crate::series::Series;
use crate::timeline::calendar::future_trading_dates;

/// One point of an analysis timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub date: NaiveDate,
    pub value: Option<f64>,
    pub prediction: Option<f64>,
}

impl ResultRow {
    /// Observed (or indicator) value, no prediction.
    pub fn history(date: NaiveDate, value: f64) -> Self {
        Self { date, value: Some(value), prediction: None }
    }

    /// Model prediction, no observed value.
    pub fn forecast(date: NaiveDate, prediction: f64) -> Self {
        Self { date, value: None, prediction: Some(prediction) }
    }

    /// Continuity anchor: the observed value repeated as the prediction.
    pub fn anchor(date: NaiveDate, value: f64) -> Self {
        Self { date, value: Some(value), prediction: Some(value) }
    }
}

/// Ordered rows plus the degeneracies met while producing them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Timeline {
    pub rows: Vec<ResultRow>,
    pub degeneracies: Vec<Degeneracy>,
}

impl Flagged for Timeline {
    fn degeneracies(&self) -> &[Degeneracy] {
        &self.degeneracies
    }
}

impl Timeline {
    pub fn new(rows: Vec<ResultRow>, degeneracies: Vec<Degeneracy>) -> Self {
        Self { rows, degeneracies }
    }

    /// Rows with `value` only, one per history point.
    pub fn from_history(dates: &[NaiveDate], values: &[f64]) -> Self {
        let rows = dates.iter().zip(values).map(|(&d, &v)| ResultRow::history(d, v)).collect();
        Self { rows, degeneracies: Vec::new() }
    }

    /// Merge `history` with `forecast` values placed on future trading dates.
    ///
    /// Errors
    /// ------
    /// - `AnalysisError::InsufficientData` if `forecast` is empty.
    pub fn merge(
        history: &Series, forecast: &[f64], degeneracies: Vec<Degeneracy>,
    ) -> AnalysisResult<Self> {
        Self::merge_values(&history.dates(), &history.values(), forecast, degeneracies)
    }

    /// [`Timeline::merge`] over raw date/value columns, for histories that are
    /// derived (returns, volatility, rescaled prices) rather than a [`Series`].
    pub fn merge_values(
        dates: &[NaiveDate], values: &[f64], forecast: &[f64], degeneracies: Vec<Degeneracy>,
    ) -> AnalysisResult<Self> {
        if forecast.is_empty() {
            return Err(AnalysisError::InsufficientData { required: 1, actual: 0 });
        }
        let future = future_trading_dates(dates, forecast.len())?;
        let mut timeline = Self::from_history(dates, values);
        timeline
            .rows
            .extend(future.into_iter().zip(forecast).map(|(d, &p)| ResultRow::forecast(d, p)));
        timeline.degeneracies = degeneracies;
        Ok(timeline)
    }

    /// Like [`Timeline::merge_values`], but the last history row also carries
    /// its own value as `prediction` (VAR continuity anchor).
    pub fn merge_anchored(
        dates: &[NaiveDate], values: &[f64], forecast: &[f64], degeneracies: Vec<Degeneracy>,
    ) -> AnalysisResult<Self> {
        let mut timeline = Self::merge_values(dates, values, forecast, degeneracies)?;
        let anchor = &mut timeline.rows[values.len() - 1];
        anchor.prediction = anchor.value;
        Ok(timeline)
    }

    /// Rows carrying a prediction, in order.
    pub fn predictions(&self) -> Vec<f64> {
        self.rows.iter().filter_map(|r| r.prediction).collect()
    }

    /// Rows carrying an observed value, in order.
    pub fn values(&self) -> Vec<f64> {
        self.rows.iter().filter_map(|r| r.value).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekdays(n: usize) -> Vec<NaiveDate> {
        // 2024-01-01 is a Monday.
        let mut out = Vec::new();
        let mut d = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid");
        while out.len() < n {
            if chrono::Datelike::weekday(&d).number_from_monday() <= 5 {
                out.push(d);
            }
            d = d.succ_opt().expect("in range");
        }
        out
    }

    #[test]
    // Purpose
    // -------
    // Verify merged rows: history rows carry only values, forecast rows only
    // predictions, and dates strictly increase across the seam.
    fn merge_appends_forecast_rows_after_history() {
        // Arrange
        let dates = weekdays(10);
        let values: Vec<f64> = (0..10).map(|i| i as f64).collect();

        // Act
        let tl = Timeline::merge_values(&dates, &values, &[10.0, 11.0, 12.0], Vec::new())
            .expect("non-empty forecast");

        // Assert
        assert_eq!(tl.len(), 13);
        assert!(tl.rows[..10].iter().all(|r| r.value.is_some() && r.prediction.is_none()));
        assert!(tl.rows[10..].iter().all(|r| r.value.is_none() && r.prediction.is_some()));
        assert!(tl.rows.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(tl.predictions(), vec![10.0, 11.0, 12.0]);
    }

    #[test]
    // Purpose
    // -------
    // Verify the anchored merge sets the last history row's prediction to
    // its own value and leaves every other history row untouched.
    fn merge_anchored_sets_continuity_anchor() {
        let dates = weekdays(5);
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];

        let tl = Timeline::merge_anchored(&dates, &values, &[6.0, 7.0], Vec::new())
            .expect("non-empty forecast");

        assert_eq!(tl.rows[4], ResultRow::anchor(dates[4], 5.0));
        assert!(tl.rows[..4].iter().all(|r| r.prediction.is_none()));
        assert_eq!(tl.predictions(), vec![5.0, 6.0, 7.0]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure an empty forecast is rejected instead of producing a
    // history-only timeline.
    fn merge_rejects_empty_forecast() {
        let dates = weekdays(3);

        let out = Timeline::merge_values(&dates, &[1.0, 2.0, 3.0], &[], Vec::new());

        assert!(matches!(out, Err(AnalysisError::InsufficientData { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Verify absent fields serialize as JSON null.
    fn result_row_serializes_absent_fields_as_null() {
        let row = ResultRow::forecast(NaiveDate::from_ymd_opt(2024, 5, 6).expect("valid"), 1.5);

        let json = serde_json::to_string(&row).expect("serializable");

        assert_eq!(json, r#"{"date":"2024-05-06","value":null,"prediction":1.5}"#);
    }
}
