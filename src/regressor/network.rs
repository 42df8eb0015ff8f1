//! One-hidden-layer feed-forward network with analytic gradients.
//!
//! Purpose
//! -------
//! Hold the weights of a `lag → hidden (ReLU) → 1` network, evaluate it on a
//! batch of lag windows, and compute the mean-squared-error gradient with
//! respect to a flat parameter vector.
//!
//! Key behaviors
//! -------------
//! - Parameters are exchanged with trainers as one flat [`Array1`] in the
//!   order `w1` (row-major, `hidden × lag`), `b1`, `w2`, `b2`.
//! - [`OutputActivation::Relu`] clamps predictions at zero (variance model);
//!   [`OutputActivation::Linear`] leaves them unbounded.
//!
//! Invariants & assumptions
//! ------------------------
//! - Weights use Glorot-uniform initialization from the supplied RNG; hidden
//!   biases start at zero.
//! - `features` passed to any method have exactly `lag` columns.
use ndarray::{Array1, Array2, Axis, s};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Activation applied to the single output unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputActivation {
    Linear,
    Relu,
}

impl OutputActivation {
    #[inline]
    fn apply(self, x: f64) -> f64 {
        match self {
            OutputActivation::Linear => x,
            OutputActivation::Relu => x.max(0.0),
        }
    }

    #[inline]
    fn derivative(self, x: f64) -> f64 {
        match self {
            OutputActivation::Linear => 1.0,
            OutputActivation::Relu => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// Network shape: input width, hidden width, output activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub lag: usize,
    pub hidden: usize,
    pub output: OutputActivation,
}

impl Shape {
    /// Length of the flat parameter vector.
    pub fn param_count(&self) -> usize {
        self.hidden * self.lag + 2 * self.hidden + 1
    }

    /// Glorot-uniform weights, zero hidden biases.
    pub fn init<R: Rng>(&self, rng: &mut R) -> Layers {
        let limit1 = (6.0 / (self.lag + self.hidden) as f64).sqrt();
        let limit2 = (6.0 / (self.hidden + 1) as f64).sqrt();
        let w1 = Array2::from_shape_fn((self.hidden, self.lag), |_| {
            rng.random_range(-limit1..limit1)
        });
        let w2 = Array1::from_shape_fn(self.hidden, |_| rng.random_range(-limit2..limit2));
        // ReLU output starts in its active region.
        let b2 = match self.output {
            OutputActivation::Linear => 0.0,
            OutputActivation::Relu => 0.5,
        };
        Layers { w1, b1: Array1::zeros(self.hidden), w2, b2 }
    }

    /// Unpack a flat parameter vector.
    ///
    /// `theta` must have [`Shape::param_count`] elements.
    pub fn unpack(&self, theta: &Array1<f64>) -> Layers {
        let (h, k) = (self.hidden, self.lag);
        let w1 = Array2::from_shape_fn((h, k), |(j, i)| theta[j * k + i]);
        let b1 = theta.slice(s![h * k..h * k + h]).to_owned();
        let w2 = theta.slice(s![h * k + h..h * k + 2 * h]).to_owned();
        Layers { w1, b1, w2, b2: theta[h * k + 2 * h] }
    }

    /// Network output for every row of `features`.
    pub fn forward(&self, layers: &Layers, features: &Array2<f64>) -> Array1<f64> {
        let (_, _, out) = self.activations(layers, features);
        out.mapv(|o| self.output.apply(o))
    }

    /// Hidden pre-activations, hidden activations, output pre-activation.
    fn activations(
        &self, layers: &Layers, features: &Array2<f64>,
    ) -> (Array2<f64>, Array2<f64>, Array1<f64>) {
        let z = features.dot(&layers.w1.t()) + &layers.b1;
        let a = z.mapv(|v| v.max(0.0));
        let out = a.dot(&layers.w2) + layers.b2;
        (z, a, out)
    }

    /// Mean squared error of `theta` on `(features, targets)` and its
    /// gradient in flat-parameter order.
    pub fn mse_and_gradient(
        &self, theta: &Array1<f64>, features: &Array2<f64>, targets: &Array1<f64>,
    ) -> (f64, Array1<f64>) {
        let layers = self.unpack(theta);
        let n = targets.len().max(1) as f64;
        let (z, a, out) = self.activations(&layers, features);
        let pred = out.mapv(|o| self.output.apply(o));
        let resid = &pred - targets;
        let loss = resid.mapv(|r| r * r).sum() / n;

        // dL/d(out) per row.
        let d_out: Array1<f64> = resid
            .iter()
            .zip(out.iter())
            .map(|(r, o)| 2.0 * r / n * self.output.derivative(*o))
            .collect();
        let g_w2 = a.t().dot(&d_out);
        let g_b2 = d_out.sum();

        let mut d_z = d_out.view().insert_axis(Axis(1)).dot(&layers.w2.view().insert_axis(Axis(0)));
        d_z.zip_mut_with(&z, |d, zv| {
            if *zv <= 0.0 {
                *d = 0.0;
            }
        });
        let g_w1 = d_z.t().dot(features);
        let g_b1 = d_z.sum_axis(Axis(0));

        let mut grad = Array1::zeros(self.param_count());
        let (h, k) = (self.hidden, self.lag);
        grad.slice_mut(s![..h * k]).assign(&Array1::from_iter(g_w1.iter().copied()));
        grad.slice_mut(s![h * k..h * k + h]).assign(&g_b1);
        grad.slice_mut(s![h * k + h..h * k + 2 * h]).assign(&g_w2);
        grad[h * k + 2 * h] = g_b2;
        (loss, grad)
    }
}

/// Structured network weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Layers {
    /// `hidden × lag` input weights.
    pub w1: Array2<f64>,
    pub b1: Array1<f64>,
    pub w2: Array1<f64>,
    pub b2: f64,
}

impl Layers {
    /// Flatten in the order `w1` (row-major), `b1`, `w2`, `b2`.
    pub fn pack(&self) -> Array1<f64> {
        self.w1
            .iter()
            .chain(self.b1.iter())
            .chain(self.w2.iter())
            .chain(std::iter::once(&self.b2))
            .copied()
            .collect()
    }
}
