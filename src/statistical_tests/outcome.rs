//! Shared result type for the pairwise screens.
use serde::{Deserialize, Serialize};

use crate::errors::{Degeneracy, Flagged};

/// p-values below this level are reported as significant.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Denominator substituted for a zero sum of squares in the screens.
pub const VARIANCE_EPSILON: f64 = 1e-12;

/// TestOutcome: statistic, p-value and significance call of one screen.
///
/// Fields
/// ------
/// - `statistic`: non-negative test statistic.
/// - `p_value`: in `[0, 1]`.
/// - `significant`: `p_value < SIGNIFICANCE_LEVEL`.
/// - `degeneracies`: epsilon substitutions made while computing the statistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
    pub statistic: f64,
    pub p_value: f64,
    pub significant: bool,
    #[serde(default)]
    pub degeneracies: Vec<Degeneracy>,
}

impl TestOutcome {
    /// Build an outcome, clamping `p_value` into `[0, 1]` and deriving the
    /// significance call from it.
    pub fn new(statistic: f64, p_value: f64, degeneracies: Vec<Degeneracy>) -> Self {
        let p_value = p_value.clamp(0.0, 1.0);
        Self { statistic, p_value, significant: p_value < SIGNIFICANCE_LEVEL, degeneracies }
    }
}

impl Flagged for TestOutcome {
    fn degeneracies(&self) -> &[Degeneracy] {
        &self.degeneracies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify the significance threshold is strict and p is clamped.
    fn outcome_derives_significance_and_clamps_p() {
        let at_level = TestOutcome::new(1.0, SIGNIFICANCE_LEVEL, Vec::new());
        let below = TestOutcome::new(9.0, 0.01, Vec::new());
        let overshoot = TestOutcome::new(0.0, 1.0 + 1e-15, Vec::new());

        assert!(!at_level.significant);
        assert!(below.significant);
        assert_eq!(overshoot.p_value, 1.0);
    }
}
