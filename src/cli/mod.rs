//! Command-line front ends: the k estimate report and the detection-rate evaluation.

pub mod args;
pub mod evaluate;
pub mod report;

pub use args::Args;
pub use evaluate::{run_evaluation, EvaluateArgs};
pub use report::{CheckOutcome, Report};

use crate::params::{k_bound, meets_bound, security_bits, EstimateError, KParams};

/// Evaluate the bound for the resolved arguments.
pub fn run(args: &Args) -> Result<Report, EstimateError> {
    let params = args.k_params();
    let bound = k_bound(&params)?;
    let check = args.check.map(|k| check_k(k, &params)).transpose()?;
    Ok(Report {
        params,
        bound,
        check,
    })
}

fn check_k(k: u64, params: &KParams) -> Result<CheckOutcome, EstimateError> {
    Ok(CheckOutcome {
        k,
        satisfied: meets_bound(k, params)?,
        security_bits: security_bits(k, params.n, params.p)?,
    })
}
