//! Full-batch L-BFGS training through the optimization backend.
use ndarray::Array1;

use crate::errors::AnalysisResult;
use crate::optimization::errors::{OptError, OptResult};
use crate::optimization::minimizer::{Cost, Grad, LbfgsOptions, Objective, Theta, minimize};
use crate::regressor::network::Shape;
use crate::series::LaggedDataset;

/// Mean squared error of a [`Shape`] network, as an [`Objective`].
#[derive(Debug, Clone, Copy)]
pub struct MseObjective {
    pub shape: Shape,
}

impl Objective for MseObjective {
    type Data = LaggedDataset;

    fn cost(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost> {
        Ok(self.shape.mse_and_gradient(theta, &data.features, &data.targets).0)
    }

    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        let expected = self.shape.param_count();
        if theta.len() != expected {
            return Err(OptError::ThetaLengthMismatch { expected, actual: theta.len() });
        }
        if data.lag() != self.shape.lag {
            return Err(OptError::InvalidObjectiveData {
                reason: format!("expected {} lag columns, got {}", self.shape.lag, data.lag()),
            });
        }
        if data.rows() == 0 {
            return Err(OptError::InvalidObjectiveData { reason: "no training rows".into() });
        }
        Ok(())
    }

    fn gradient(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        Ok(self.shape.mse_and_gradient(theta, &data.features, &data.targets).1)
    }
}

/// Fit with L-BFGS, capping iterations at `epochs`.
///
/// Errors
/// ------
/// - `AnalysisError::Optimization` for any backend failure.
pub(crate) fn train_lbfgs(
    shape: &Shape, theta0: Array1<f64>, data: &LaggedDataset, epochs: usize, opts: &LbfgsOptions,
) -> AnalysisResult<Array1<f64>> {
    let objective = MseObjective { shape: *shape };
    let outcome = minimize(&objective, theta0, data, &opts.with_max_iter(epochs))?;
    tracing::debug!(
        cost = outcome.cost,
        iterations = outcome.iterations,
        converged = outcome.converged,
        "regressor fitted with L-BFGS"
    );
    Ok(outcome.theta_hat)
}
