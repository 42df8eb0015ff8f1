//! Adapter that exposes a user [`Objective`] as an `argmin` problem.
//!
//! The cost is passed through unchanged (we minimize directly); the
//! objective's analytic gradient is checked for length and finiteness before
//! it reaches the solver.
use crate::optimization::{
    errors::OptError,
    minimizer::{
        traits::Objective,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};

/// Bridges an [`Objective`] to `argmin`'s `CostFunction` and `Gradient`.
#[derive(Debug, Clone)]
pub struct ArgminAdapter<'a, F: Objective> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: Objective> ArgminAdapter<'a, F> {
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }
}

impl<F: Objective> CostFunction for ArgminAdapter<'_, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate `c(θ)`, rejecting non-finite values.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.cost(theta, self.data)?;
        if !output.is_finite() {
            return Err(OptError::NonFiniteCost { value: output }.into());
        }
        Ok(output)
    }
}

impl<F: Objective> Gradient for ArgminAdapter<'_, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Analytic gradient, rejected when its length or values are invalid.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let g = self.f.gradient(theta, self.data)?;
        validate_grad(&g, theta.len())?;
        Ok(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Cost pass-through and non-finite rejection.
    // - Gradient pass-through and rejection of malformed gradients.
    // -------------------------------------------------------------------------

    /// c(θ) = Σ (θ_i − target_i)²; `truncate` drops the last gradient entry.
    struct Quadratic {
        truncate: bool,
    }

    impl Objective for Quadratic {
        type Data = Vec<f64>;

        fn cost(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost> {
            Ok(theta.iter().zip(data).map(|(t, d)| (t - d).powi(2)).sum())
        }

        fn check(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<()> {
            Ok(())
        }

        fn gradient(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
            let keep = if self.truncate { theta.len() - 1 } else { theta.len() };
            Ok(theta.iter().zip(data).take(keep).map(|(t, d)| 2.0 * (t - d)).collect())
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify a well-formed gradient is passed through and a short one is
    // rejected before reaching the solver.
    //
    // Given
    // -----
    // - c(θ) = (θ0 − 1)² + (θ1 + 2)² at θ = (3, 0).
    //
    // Expect
    // ------
    // - (4, 4) from the full gradient; an error for the truncated one.
    fn gradient_is_passed_through_and_length_checked() {
        // Arrange
        let data = vec![1.0, -2.0];
        let theta = array![3.0, 0.0];
        let full = Quadratic { truncate: false };
        let short = Quadratic { truncate: true };

        // Act
        let g = ArgminAdapter::new(&full, &data).gradient(&theta).expect("gradient");
        let bad = ArgminAdapter::new(&short, &data).gradient(&theta);

        // Assert
        assert_eq!(g, array![4.0, 4.0]);
        assert!(bad.is_err());
    }

    #[test]
    // Purpose
    // -------
    // Ensure the cost is passed through unsigned.
    fn cost_is_passed_through() {
        let data = vec![0.0];
        let f = Quadratic { truncate: false };

        let c = ArgminAdapter::new(&f, &data).cost(&array![2.0]).expect("finite cost");

        assert_eq!(c, 4.0);
    }
}
