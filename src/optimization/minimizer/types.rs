//! Type aliases shared by the L-BFGS minimizer.
//!
//! Parameters and gradients are `ndarray::Array1<f64>` so they plug directly
//! into `argmin`'s ndarray math backend; the solver aliases fix the line
//! search and float types once.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::Array1;
use std::collections::HashMap;

/// Flat parameter vector.
pub type Theta = Array1<f64>;

/// Gradient of the cost with respect to [`Theta`].
pub type Grad = Array1<f64>;

/// Scalar cost (mean squared error for the regressors).
pub type Cost = f64;

/// Function-evaluation counters reported by `argmin`.
pub type FnEvalMap = HashMap<String, u64>;

/// L-BFGS history length used when none is configured.
pub const DEFAULT_LBFGS_MEM: usize = 7;

pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
