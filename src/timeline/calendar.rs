//! Future trading-date generation from the observed history pattern.
//!
//! Purpose
//! -------
//! Place forecast rows on dates that look like the input's own trading
//! calendar, so a 5-day-per-week history is never extended onto weekends and
//! a weekly history keeps its weekly cadence.
//!
//! Key behaviors
//! -------------
//! - Inspect the last [`CALENDAR_TAIL`] history dates: collect the weekdays
//!   present and the modal gap (in days) between consecutive observations.
//! - Starting from the last history date, step forward by the modal gap and
//!   keep a candidate only when its weekday was observed, until `steps` dates
//!   are produced.
//!
//! Invariants & assumptions
//! ------------------------
//! - Generated dates are strictly after the last history date and strictly
//!   increasing.
//! - Ties between equally frequent gaps resolve to the smaller gap.
//! - The loop always terminates: the last date's weekday is in the observed
//!   set, and stepping by any gap revisits every weekday reachable from it
//!   (7 is prime, so a gap that is not a multiple of 7 cycles through all
//!   weekdays; a multiple of 7 keeps the last date's weekday).
use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::errors::{AnalysisError, AnalysisResult};

/// Number of trailing history dates inspected for the trading pattern.
pub const CALENDAR_TAIL: usize = 20;

/// Weekday set and modal step observed in a history tail.
#[derive(Debug, Clone, PartialEq)]
pub struct TradingPattern {
    pub weekdays: HashSet<Weekday>,
    pub gap_days: i64,
}

impl TradingPattern {
    /// Derive the pattern from the last [`CALENDAR_TAIL`] dates.
    ///
    /// A single-date history yields a gap of one day and only that date's
    /// weekday.
    ///
    /// Errors
    /// ------
    /// - `AnalysisError::InsufficientData` if `dates` is empty.
    pub fn observe(dates: &[NaiveDate]) -> AnalysisResult<Self> {
        if dates.is_empty() {
            return Err(AnalysisError::InsufficientData { required: 1, actual: 0 });
        }
        let tail = &dates[dates.len().saturating_sub(CALENDAR_TAIL)..];
        let weekdays = tail.iter().map(|d| d.weekday()).collect();

        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        for w in tail.windows(2) {
            *counts.entry((w[1] - w[0]).num_days()).or_default() += 1;
        }
        // BTreeMap iterates gaps ascending, so `max_by_key` keeping the first
        // maximum would pick the largest; fold keeps the smallest on ties.
        let gap_days = counts
            .iter()
            .fold(None, |best: Option<(i64, usize)>, (&gap, &count)| match best {
                Some((_, c)) if c >= count => best,
                _ => Some((gap, count)),
            })
            .map_or(1, |(gap, _)| gap.max(1));

        Ok(Self { weekdays, gap_days })
    }

    /// Generate `steps` dates after `last` following this pattern.
    pub fn extend(&self, last: NaiveDate, steps: usize) -> Vec<NaiveDate> {
        let mut out = Vec::with_capacity(steps);
        let mut candidate = last;
        while out.len() < steps {
            candidate += Duration::days(self.gap_days);
            if self.weekdays.contains(&candidate.weekday()) {
                out.push(candidate);
            }
        }
        out
    }
}

/// `steps` future dates continuing the trading pattern of `history`.
///
/// Errors
/// ------
/// - `AnalysisError::InsufficientData` if `history` is empty.
pub fn future_trading_dates(history: &[NaiveDate], steps: usize) -> AnalysisResult<Vec<NaiveDate>> {
    let pattern = TradingPattern::observe(history)?;
    Ok(pattern.extend(history[history.len() - 1], steps))
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Business-day histories never produce Saturday/Sunday dates.
    // - Weekly histories keep their weekday and 7-day cadence.
    // - Modal-gap tie-breaking and the single-date fallback.
    // -------------------------------------------------------------------------

    fn business_days(start: NaiveDate, n: usize) -> Vec<NaiveDate> {
        let mut out = Vec::new();
        let mut d = start;
        while out.len() < n {
            if !matches!(d.weekday(), Weekday::Sat | Weekday::Sun) {
                out.push(d);
            }
            d = d.succ_opt().expect("in range");
        }
        out
    }

    #[test]
    // Purpose
    // -------
    // Verify that a Monday–Friday history is extended on weekdays only.
    //
    // Given
    // -----
    // - 40 business days starting Monday 2024-01-01.
    //
    // Expect
    // ------
    // - 15 future dates, none on Saturday or Sunday, strictly increasing and
    //   after the last history date.
    fn business_day_history_skips_weekends() {
        // Arrange
        let history = business_days(NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid"), 40);

        // Act
        let future = future_trading_dates(&history, 15).expect("non-empty history");

        // Assert
        assert_eq!(future.len(), 15);
        assert!(future.iter().all(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun)));
        assert!(future[0] > *history.last().expect("non-empty"));
        assert!(future.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    // Purpose
    // -------
    // Verify weekly data continues on the same weekday every 7 days.
    fn weekly_history_keeps_cadence() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 5).expect("valid"); // Friday
        let history: Vec<NaiveDate> = (0..12).map(|k| start + Duration::days(7 * k)).collect();

        let future = future_trading_dates(&history, 3).expect("non-empty history");

        let last = *history.last().expect("non-empty");
        assert_eq!(
            future,
            vec![last + Duration::days(7), last + Duration::days(14), last + Duration::days(21)]
        );
    }

    #[test]
    // Purpose
    // -------
    // Ensure equally frequent gaps resolve to the smaller one.
    fn modal_gap_ties_prefer_smaller_gap() {
        let d0 = NaiveDate::from_ymd_opt(2024, 2, 5).expect("valid"); // Monday
        let history = vec![d0, d0 + Duration::days(1), d0 + Duration::days(3)];

        let pattern = TradingPattern::observe(&history).expect("non-empty history");

        assert_eq!(pattern.gap_days, 1);
    }

    #[test]
    // Purpose
    // -------
    // Verify the single-date fallback and the empty-history error.
    fn single_date_history_repeats_its_weekday() {
        let d0 = NaiveDate::from_ymd_opt(2024, 2, 7).expect("valid"); // Wednesday

        let future = future_trading_dates(&[d0], 2).expect("non-empty history");

        assert_eq!(future, vec![d0 + Duration::days(7), d0 + Duration::days(14)]);
        assert!(future_trading_dates(&[], 2).is_err());
    }
}
