//! statistical_tests::validation: shared input guards for pairwise methods.
//!
//! Purpose
//! -------
//! Centralize the date alignment and minimum-overlap check that every
//! pairwise method (correlation, chi-square screen, cointegration screen)
//! performs before touching the data.
//!
//! Key behaviors
//! -------------
//! - Inner-join two series on their dates via [`align`].
//! - Reject joins with fewer than [`MIN_OVERLAP`] common dates as
//!   `AnalysisError::InsufficientOverlap`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are validated [`Series`], so values are finite and dates are
//!   strictly increasing; only the overlap length needs checking here.
//!
//! Downstream usage
//! ----------------
//! - Call [`aligned_pair`] at the top of each pairwise routine and work on
//!   the returned [`Aligned`] columns only.

use crate::errors::{AnalysisError, AnalysisResult};
use crate::series::{Aligned, Series, align};

/// Minimum number of common dates for any pairwise method.
pub const MIN_OVERLAP: usize = 30;

/// Check that an aligned pair is long enough for a pairwise method.
///
/// Errors
/// ------
/// - `AnalysisError::InsufficientOverlap` when `aligned.len() < MIN_OVERLAP`.
pub fn validate_overlap(aligned: &Aligned) -> AnalysisResult<()> {
    if aligned.len() < MIN_OVERLAP {
        return Err(AnalysisError::InsufficientOverlap {
            required: MIN_OVERLAP,
            actual: aligned.len(),
        });
    }
    Ok(())
}

/// Align `a` and `b` on their common dates and enforce [`MIN_OVERLAP`].
///
/// Errors
/// ------
/// - `AnalysisError::InsufficientOverlap` when fewer than [`MIN_OVERLAP`]
///   dates are shared.
pub fn aligned_pair(a: &Series, b: &Series) -> AnalysisResult<Aligned> {
    let aligned = align(a, b);
    validate_overlap(&aligned)?;
    tracing::trace!(overlap = aligned.len(), "aligned pair");
    Ok(aligned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The success path at exactly MIN_OVERLAP common dates.
    // - The InsufficientOverlap branch for partially overlapping series.
    // -------------------------------------------------------------------------

    fn daily(start_offset: i64, n: usize) -> Series {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid");
        let dates: Vec<NaiveDate> =
            (0..n).map(|i| start + Duration::days(start_offset + i as i64)).collect();
        let values: Vec<f64> = (0..n).map(|i| i as f64).collect();
        Series::from_parts(&dates, &values).expect("valid series")
    }

    #[test]
    // Purpose
    // -------
    // Verify that exactly MIN_OVERLAP shared dates pass.
    //
    // Given
    // -----
    // - Two 40-day series offset by 10 days (30 shared dates).
    //
    // Expect
    // ------
    // - `aligned_pair` returns 30 aligned rows.
    fn aligned_pair_accepts_minimum_overlap() {
        // Arrange
        let a = daily(0, 40);
        let b = daily(10, 40);

        // Act
        let aligned = aligned_pair(&a, &b).expect("30 shared dates");

        // Assert
        assert_eq!(aligned.len(), MIN_OVERLAP);
    }

    #[test]
    // Purpose
    // -------
    // Ensure an overlap of 29 is rejected with both counts reported.
    fn aligned_pair_rejects_short_overlap() {
        let a = daily(0, 40);
        let b = daily(11, 40);

        let out = aligned_pair(&a, &b);

        assert_eq!(out, Err(AnalysisError::InsufficientOverlap { required: 30, actual: 29 }));
    }
}
