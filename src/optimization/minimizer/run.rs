//! Execution helper that runs an `argmin` solver on an [`Objective`] and
//! returns a crate-friendly [`OptimOutcome`].
use crate::optimization::{
    errors::OptResult,
    minimizer::{
        adapter::ArgminAdapter,
        traits::{LbfgsOptions, Objective, OptimOutcome},
        types::{Grad, Theta},
    },
};
use argmin::core::{CostFunction, Executor, State};

/// Run `solver` from `theta0` on `problem`.
///
/// Logs the initial and final cost at `debug` level.
///
/// Errors
/// ------
/// - Any `argmin` runtime error (line-search failures, errors raised by the
///   objective), converted through `From<argmin::core::Error>`.
/// - Validation errors from [`OptimOutcome::new`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &LbfgsOptions, problem: ArgminAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: Objective,
    S: argmin::core::Solver<
            ArgminAdapter<'a, F>,
            argmin::core::IterState<Theta, Grad, (), (), (), f64>,
        > + Send
        + 'static,
{
    let cost0 = problem.cost(&theta0)?;
    tracing::debug!(cost0, dim = theta0.len(), "starting L-BFGS");

    let mut optimizer = Executor::new(problem, solver).configure(|state| state.param(theta0));
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    let outcome = OptimOutcome::new(
        result.take_best_param(),
        result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
    )?;
    tracing::debug!(
        cost = outcome.cost,
        iterations = outcome.iterations,
        status = %outcome.status,
        "L-BFGS finished"
    );
    Ok(outcome)
}
