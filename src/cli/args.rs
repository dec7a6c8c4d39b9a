use clap::Parser;

use crate::expr::parse_float_or_expr;
use crate::params::{KParams, DEFAULT_N, DEFAULT_P, DEFAULT_SEC_EXPR};

#[derive(Parser, Debug, Clone)]
#[command(name = "k_estimate")]
#[command(version, about = "Estimate minimal k for PRC watermark detection")]
pub struct Args {
    /// Number of parity-check sets
    #[arg(long, default_value_t = DEFAULT_N, allow_negative_numbers = true)]
    pub n: f64,

    /// Noise rate
    #[arg(long, default_value_t = DEFAULT_P, allow_negative_numbers = true)]
    pub p: f64,

    /// Security parameter. Can be a float or a numeric expression such as 2**-80
    #[arg(
        long,
        default_value = DEFAULT_SEC_EXPR,
        value_parser = parse_float_or_expr,
        allow_hyphen_values = true
    )]
    pub sec: f64,

    /// Also check whether a given k meets the bound, and the security it achieves
    #[arg(long, value_name = "K")]
    pub check: Option<u64>,

    /// Log intermediate values to stderr
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    pub fn k_params(&self) -> KParams {
        KParams::new(self.n, self.p, self.sec)
    }
}
