//! minimizer: L-BFGS minimization of user-defined least-squares costs.
//!
//! Purpose
//! -------
//! Wrap `argmin`'s L-BFGS solver behind a small trait, [`Objective`], so a
//! model only supplies a cost and its analytic gradient and receives a
//! validated [`OptimOutcome`].
//!
//! Key behaviors
//! -------------
//! - [`minimize`] validates options, runs [`Objective::check`], builds the
//!   solver for the configured [`LineSearcher`], and executes it.
//! - Gradients are checked for length and finiteness on every evaluation.
//! - Backend failures surface as [`OptError`](crate::optimization::errors::OptError).
//!
//! Invariants & assumptions
//! ------------------------
//! - Parameters live in an unconstrained flat vector ([`Theta`]).
//! - A returned outcome always has finite parameters and cost.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::minimize;
pub use self::traits::{LbfgsOptions, LineSearcher, Objective, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

pub mod prelude {
    pub use super::api::minimize;
    pub use super::traits::{LbfgsOptions, LineSearcher, Objective, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
