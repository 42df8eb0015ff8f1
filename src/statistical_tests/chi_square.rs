//! Chi-square independence screen on categorized daily changes.
//!
//! Purpose
//! -------
//! Screen two series for dependence between their daily moves: each aligned
//! one-step change is classed as decrease, flat or increase, and the joint
//! 3×3 contingency table is tested against independence of its marginals.
//!
//! Key behaviors
//! -------------
//! - Categories compare changes at the *same* time index in both series; no
//!   lag is applied, so this is a co-movement screen rather than a test of
//!   predictive (Granger) causality.
//! - The statistic sums `(obs − exp)² / exp` over cells with nonzero expected
//!   count; the p-value is the upper tail of a χ² distribution with
//!   `(3 − 1)(3 − 1) = 4` degrees of freedom.
//!
//! Invariants & assumptions
//! ------------------------
//! - At least 30 aligned dates (29 changes) are required.
//! - `statistic ≥ 0`, `p_value ∈ [0, 1]`, `significant = p_value < 0.05`.
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::errors::{AnalysisError, AnalysisResult};
use crate::series::Series;
use crate::statistical_tests::outcome::TestOutcome;
use crate::statistical_tests::validation::aligned_pair;

/// Number of change categories (decrease, flat, increase).
pub const CATEGORIES: usize = 3;

/// Degrees of freedom of the contingency test.
pub const DEGREES_OF_FREEDOM: f64 = ((CATEGORIES - 1) * (CATEGORIES - 1)) as f64;

/// 3×3 table of joint change categories; rows index the first series.
pub type ContingencyTable = [[f64; CATEGORIES]; CATEGORIES];

#[inline]
fn category(change: f64) -> usize {
    if change < 0.0 {
        0
    } else if change == 0.0 {
        1
    } else {
        2
    }
}

/// Count joint categories of the one-step changes of two aligned columns.
pub fn contingency_table(a: &[f64], b: &[f64]) -> ContingencyTable {
    let mut table = [[0.0; CATEGORIES]; CATEGORIES];
    for (wa, wb) in a.windows(2).zip(b.windows(2)) {
        table[category(wa[1] - wa[0])][category(wb[1] - wb[0])] += 1.0;
    }
    table
}

/// Pearson χ² statistic of `table` against its marginal-product expectation.
pub fn chi_square_statistic(table: &ContingencyTable) -> f64 {
    let total: f64 = table.iter().flatten().sum();
    if total == 0.0 {
        return 0.0;
    }
    let row_sums: Vec<f64> = table.iter().map(|r| r.iter().sum()).collect();
    let col_sums: Vec<f64> =
        (0..CATEGORIES).map(|j| table.iter().map(|r| r[j]).sum()).collect();

    let mut stat = 0.0;
    for (i, row) in table.iter().enumerate() {
        for (j, &observed) in row.iter().enumerate() {
            let expected = row_sums[i] * col_sums[j] / total;
            if expected > 0.0 {
                stat += (observed - expected).powi(2) / expected;
            }
        }
    }
    stat
}

/// Screen `a` and `b` for dependence between same-day moves.
///
/// Errors
/// ------
/// - `AnalysisError::InsufficientOverlap` if fewer than 30 dates are shared.
pub fn chi_square_screen(a: &Series, b: &Series) -> AnalysisResult<TestOutcome> {
    let aligned = aligned_pair(a, b)?;
    let table = contingency_table(&aligned.a, &aligned.b);
    let statistic = chi_square_statistic(&table);
    let dist = ChiSquared::new(DEGREES_OF_FREEDOM)
        .map_err(|err| AnalysisError::invalid("degrees_of_freedom", err.to_string()))?;
    let p_value = 1.0 - dist.cdf(statistic);
    tracing::debug!(statistic, p_value, overlap = aligned.len(), "chi-square screen");
    Ok(TestOutcome::new(statistic, p_value, Vec::new()))
}
