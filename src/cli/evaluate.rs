use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::params::DetectorConfig;
use crate::watermark::{evaluate, DetectionRates, PrcWatermarker, WatermarkError};

/// Parity sets sampled by default; the full deployment uses 10^6.
pub const DEFAULT_EVAL_SETS: usize = 10_000;

#[derive(Parser, Debug, Clone)]
#[command(name = "prc_evaluate")]
#[command(version, about = "Measure PRC watermark detection rates under bit-flip noise")]
pub struct EvaluateArgs {
    /// Codeword length
    #[arg(long, default_value_t = 500)]
    pub l: usize,

    /// Number of parity-check sets
    #[arg(long, default_value_t = DEFAULT_EVAL_SETS)]
    pub n: usize,

    /// Checks per set
    #[arg(long, default_value_t = 1367)]
    pub k: u64,

    /// Detection threshold
    #[arg(long, default_value_t = 1010)]
    pub t: u64,

    /// Bit-flip probability applied to watermarked codewords
    #[arg(long, default_value_t = 0.1)]
    pub p: f64,

    /// Watermarked codewords and random strings to test
    #[arg(long, default_value_t = 100)]
    pub trials: usize,

    /// RNG seed; drawn from the OS when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log progress to stderr
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl EvaluateArgs {
    pub fn config(&self) -> DetectorConfig {
        DetectorConfig {
            l: self.l,
            n: self.n,
            k: self.k,
            t: self.t,
            p: self.p,
        }
    }
}

/// Generate a watermarker from the arguments and measure its detection rates.
pub fn run_evaluation(args: &EvaluateArgs) -> Result<DetectionRates, WatermarkError> {
    let mut rng = match args.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };
    let cfg = args.config();
    tracing::info!(l = cfg.l, n = cfg.n, k = cfg.k, t = cfg.t, "generating parity sets");
    let wm = PrcWatermarker::generate(&cfg, &mut rng)?;
    evaluate(&wm, args.trials, cfg.p, &mut rng)
}
