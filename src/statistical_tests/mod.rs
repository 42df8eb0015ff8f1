//! statistical_tests: pairwise correlation and dependence screens.
//!
//! Purpose
//! -------
//! Collect the pairwise routines that compare two date-indexed series:
//! Pearson correlation, a chi-square independence screen on categorized
//! daily moves, and a residual-based cointegration screen, together with
//! their shared alignment guard and result type.
//!
//! Key behaviors
//! -------------
//! - Every routine inner-joins its inputs on dates and requires at least
//!   [`MIN_OVERLAP`] common points via [`aligned_pair`].
//! - [`correlate`] returns a [`CorrelationResult`] holding the aligned columns
//!   as well as the coefficient; [`correlation_matrix`] covers every pair of a
//!   symbol selection.
//! - [`chi_square_screen`] and [`cointegration_screen`] return a
//!   [`TestOutcome`] (`statistic`, `p_value`, `significant`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Results are deterministic functions of the two aligned columns.
//! - Zero denominators are replaced by epsilons and recorded as
//!   [`Degeneracy`](crate::errors::Degeneracy) flags in the result; callers
//!   wanting hard failures use [`Flagged::strict`](crate::errors::Flagged::strict).
//!
//! Conventions
//! -----------
//! - The screens are heuristics. The chi-square screen compares same-day
//!   moves (no lag), and the cointegration p-value is `exp(−0.5 · stat)`.
//!   Both are kept exactly as defined because downstream significance calls
//!   depend on them.
//!
//! Testing notes
//! -------------
//! - Unit tests cover hand-checkable statistics, edge cases (constant and
//!   identical series), and seeded Monte Carlo sanity checks against false
//!   positives on independent inputs.

pub mod chi_square;
pub mod cointegration;
pub mod correlation;
pub mod outcome;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::chi_square::{ContingencyTable, chi_square_screen, contingency_table};
pub use self::cointegration::{cointegration_screen, heuristic_p_value};
pub use self::correlation::{CorrelationResult, correlate, correlation_matrix, pearson};
pub use self::outcome::{SIGNIFICANCE_LEVEL, TestOutcome, VARIANCE_EPSILON};
pub use self::validation::{MIN_OVERLAP, aligned_pair, validate_overlap};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::correlation::{CorrelationResult, correlate};
    pub use super::outcome::TestOutcome;
    pub use super::{chi_square_screen, cointegration_screen};
}
