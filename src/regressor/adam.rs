//! Mini-batch Adam over shuffled lag windows.
use ndarray::{Array1, Array2, Axis};
use rand::{Rng, seq::SliceRandom};

use crate::regressor::network::Shape;
use crate::series::LaggedDataset;

const BETA1: f64 = 0.9;
const BETA2: f64 = 0.999;
const ADAM_EPSILON: f64 = 1e-7;

/// First and second moment estimates for one parameter vector.
#[derive(Debug, Clone)]
struct Moments {
    m: Array1<f64>,
    v: Array1<f64>,
    step: i32,
}

impl Moments {
    fn new(dim: usize) -> Self {
        Self { m: Array1::zeros(dim), v: Array1::zeros(dim), step: 0 }
    }

    /// Apply one bias-corrected Adam update to `theta` in place.
    fn update(&mut self, theta: &mut Array1<f64>, grad: &Array1<f64>, learning_rate: f64) {
        self.step += 1;
        self.m.zip_mut_with(grad, |m, g| *m = BETA1 * *m + (1.0 - BETA1) * g);
        self.v.zip_mut_with(grad, |v, g| *v = BETA2 * *v + (1.0 - BETA2) * g * g);
        let c1 = 1.0 - BETA1.powi(self.step);
        let c2 = 1.0 - BETA2.powi(self.step);
        for ((t, m), v) in theta.iter_mut().zip(&self.m).zip(&self.v) {
            *t -= learning_rate * (m / c1) / ((v / c2).sqrt() + ADAM_EPSILON);
        }
    }
}

/// Train `theta` for `epochs` passes of `batch_size` rows each.
///
/// Rows are reshuffled with `rng` at the start of every epoch; the last
/// batch of an epoch holds the remainder. The epoch loss (full-data MSE
/// after the epoch) is logged at `trace` level.
pub(crate) fn train_adam<R: Rng>(
    shape: &Shape, mut theta: Array1<f64>, data: &LaggedDataset, epochs: usize,
    batch_size: usize, learning_rate: f64, rng: &mut R,
) -> Array1<f64> {
    let mut moments = Moments::new(theta.len());
    let mut order: Vec<usize> = (0..data.rows()).collect();

    for epoch in 0..epochs {
        order.shuffle(rng);
        for batch in order.chunks(batch_size) {
            let x: Array2<f64> = data.features.select(Axis(0), batch);
            let y: Array1<f64> = data.targets.select(Axis(0), batch);
            let (_, grad) = shape.mse_and_gradient(&theta, &x, &y);
            moments.update(&mut theta, &grad, learning_rate);
        }
        if tracing::enabled!(tracing::Level::TRACE) {
            let (loss, _) = shape.mse_and_gradient(&theta, &data.features, &data.targets);
            tracing::trace!(epoch, loss, "adam epoch");
        }
    }
    theta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regressor::network::OutputActivation;
    use crate::series::build_lagged_dataset;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    // Purpose
    // -------
    // Verify Adam reduces the training loss on a smooth lag-2 signal.
    //
    // Given
    // -----
    // - A normalized sine wave, lag 2, 8 hidden units, 200 epochs.
    //
    // Expect
    // ------
    // - Final MSE below a quarter of the initial MSE.
    fn adam_reduces_training_loss() {
        // Arrange
        let values: Vec<f64> = (0..80).map(|i| 0.5 + 0.4 * (i as f64 * 0.3).sin()).collect();
        let data = build_lagged_dataset(&values, 2).expect("long enough");
        let shape = Shape { lag: 2, hidden: 8, output: OutputActivation::Linear };
        let mut rng = StdRng::seed_from_u64(11);
        let theta0 = shape.init(&mut rng).pack();
        let (loss0, _) = shape.mse_and_gradient(&theta0, &data.features, &data.targets);

        // Act
        let theta = train_adam(&shape, theta0, &data, 200, 16, 1e-2, &mut rng);

        // Assert
        let (loss, _) = shape.mse_and_gradient(&theta, &data.features, &data.targets);
        assert!(loss < 0.25 * loss0, "loss {loss} vs initial {loss0}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure the first Adam step moves each parameter by about the learning
    // rate against the gradient sign.
    fn first_step_is_learning_rate_sized() {
        let mut moments = Moments::new(2);
        let mut theta = Array1::from(vec![1.0, -1.0]);

        moments.update(&mut theta, &Array1::from(vec![0.3, -5.0]), 0.1);

        approx::assert_relative_eq!(theta[0], 0.9, epsilon = 1e-5);
        approx::assert_relative_eq!(theta[1], -0.9, epsilon = 1e-5);
    }
}
