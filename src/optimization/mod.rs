//! optimization: L-BFGS backend and its error surface.
//!
//! Purpose
//! -------
//! Provide the full-batch L-BFGS training path for the lag regressors: an
//! `argmin`-backed minimizer of user-defined costs plus a single error/result
//! surface. Callers implement a cost, choose tolerances, and obtain fitted
//! parameters and diagnostics without touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - Expose [`minimize`](minimizer::minimize) over the [`Objective`](minimizer::Objective)
//!   trait, with configurable line search and stopping criteria.
//! - Normalize configuration issues, numerical failures, and backend solver
//!   errors into [`OptError`](errors::OptError) with alias `OptResult<T>`.
//!
//! Conventions
//! -----------
//! - Solvers minimize the cost directly; there is no sign convention to
//!   remember.
//! - Parameters and gradients use `ndarray` aliases (`Theta`, `Grad`).
//! - Progress is reported with `tracing` at `debug` level; the library never
//!   installs a subscriber.

pub mod errors;
pub mod minimizer;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::minimizer::prelude::*;
}
