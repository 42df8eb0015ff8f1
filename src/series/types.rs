//! Price-series containers: validated series, stocks, and symbol sets.
//!
//! Purpose
//! -------
//! Provide small, validated containers for date-indexed price series so the
//! analysis modules can assume ordered, duplicate-free, finite data without
//! re-checking it on every call.
//!
//! Key behaviors
//! -------------
//! - [`Series::new`] enforces non-emptiness, strictly increasing dates, and
//!   finite values in a single pass.
//! - [`Stock`] pairs a series with its symbol and display name; custom
//!   indicators parsed from CSV become stocks via [`Stock::custom`].
//! - [`StockSet::get`] resolves symbols and reports unknown ones as
//!   `AnalysisError::NotFound`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Dates are strictly increasing; gaps (non-trading days) are permitted and
//!   never imputed.
//! - Values are finite. Positivity is not enforced here because custom
//!   indicators may be negative; methods that need positive prices (log
//!   returns) check it themselves.
//! - The engine borrows series read-only and never mutates them.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, AnalysisResult};

/// One observation of a series: a calendar date and a closing value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// `Series`: validated, ascending, duplicate-free sequence of price points.
///
/// Fields
/// ------
/// - `points`: `Vec<PricePoint>`
///   Observations ordered by strictly increasing date, all values finite.
///
/// Invariants
/// ----------
/// - `points.len() > 0`.
/// - `points[i].date < points[i + 1].date` for all `i`.
/// - Every `close` is finite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    points: Vec<PricePoint>,
}

impl Series {
    /// Construct a validated [`Series`].
    ///
    /// Errors
    /// ------
    /// - `AnalysisError::InsufficientData` when `points` is empty.
    /// - `AnalysisError::MalformedInput { index, .. }` for the first point
    ///   whose value is non-finite or whose date does not strictly follow its
    ///   predecessor.
    pub fn new(points: Vec<PricePoint>) -> AnalysisResult<Self> {
        if points.is_empty() {
            return Err(AnalysisError::InsufficientData { required: 1, actual: 0 });
        }
        for (index, point) in points.iter().enumerate() {
            if !point.close.is_finite() {
                return Err(AnalysisError::malformed(
                    index,
                    format!("value {} is not a finite number", point.close),
                ));
            }
            if index > 0 && point.date <= points[index - 1].date {
                return Err(AnalysisError::malformed(
                    index,
                    format!(
                        "date {} does not strictly follow {}",
                        point.date,
                        points[index - 1].date
                    ),
                ));
            }
        }
        Ok(Self { points })
    }

    /// Build a series from parallel date/value slices.
    ///
    /// Errors
    /// ------
    /// - `AnalysisError::InvalidParameter` if the slices differ in length.
    /// - Any error from [`Series::new`].
    pub fn from_parts(dates: &[NaiveDate], values: &[f64]) -> AnalysisResult<Self> {
        if dates.len() != values.len() {
            return Err(AnalysisError::invalid(
                "values",
                format!("{} dates but {} values", dates.len(), values.len()),
            ));
        }
        let points =
            dates.iter().zip(values).map(|(&date, &close)| PricePoint { date, close }).collect();
        Series::new(points)
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Most recent observation.
    pub fn last(&self) -> PricePoint {
        self.points[self.points.len() - 1]
    }

    /// The most recent `n` observations (the whole series if shorter).
    pub fn tail(&self, n: usize) -> Series {
        let start = self.points.len().saturating_sub(n.max(1));
        Series { points: self.points[start..].to_vec() }
    }
}

/// A named series: ticker symbol, display name and prices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stock {
    pub symbol: String,
    pub name: String,
    pub series: Series,
}

impl Stock {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, series: Series) -> Self {
        Self { symbol: symbol.into(), name: name.into(), series }
    }

    /// Wrap a user-supplied indicator so it can join pairwise analyses.
    ///
    /// The symbol is the indicator name; points must satisfy the [`Series`]
    /// invariants.
    pub fn custom(name: impl Into<String>, points: Vec<PricePoint>) -> AnalysisResult<Self> {
        let name = name.into();
        Ok(Self { symbol: name.clone(), name, series: Series::new(points)? })
    }
}

/// The set of stocks the host currently has loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StockSet {
    stocks: Vec<Stock>,
}

impl StockSet {
    pub fn new(stocks: Vec<Stock>) -> Self {
        Self { stocks }
    }

    /// Add a stock, replacing any existing entry with the same symbol.
    pub fn insert(&mut self, stock: Stock) {
        match self.stocks.iter_mut().find(|s| s.symbol == stock.symbol) {
            Some(slot) => *slot = stock,
            None => self.stocks.push(stock),
        }
    }

    /// Resolve a symbol.
    ///
    /// Errors
    /// ------
    /// - `AnalysisError::NotFound` if no stock carries `symbol`.
    pub fn get(&self, symbol: &str) -> AnalysisResult<&Stock> {
        self.stocks
            .iter()
            .find(|s| s.symbol == symbol)
            .ok_or_else(|| AnalysisError::NotFound { symbol: symbol.to_string() })
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.stocks.iter().map(|s| s.symbol.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }
}
