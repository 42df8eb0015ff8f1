//! High-level entry point: minimize an [`Objective`] with L-BFGS.
use crate::optimization::{
    errors::OptResult,
    minimizer::{
        adapter::ArgminAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LbfgsOptions, LineSearcher, Objective, OptimOutcome},
        types::Theta,
    },
};

/// Minimize `f` from `theta0` with the line search chosen in `opts`.
///
/// Calls [`Objective::check`] once before building the solver.
///
/// Errors
/// ------
/// - Option validation errors, objective check failures, and solver errors,
///   all as `OptError`.
pub fn minimize<F: Objective>(
    f: &F, theta0: Theta, data: &F::Data, opts: &LbfgsOptions,
) -> OptResult<OptimOutcome> {
    opts.validate()?;
    f.check(&theta0, data)?;
    let problem = ArgminAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}
