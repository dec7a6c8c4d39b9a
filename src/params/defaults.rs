/// Default number of parity-check sets.
pub const DEFAULT_N: f64 = 1_000_000.0;

/// Default per-bit noise (flip) rate.
pub const DEFAULT_P: f64 = 0.1;

/// Default security parameter, as written on the command line.
pub const DEFAULT_SEC_EXPR: &str = "2**-80";

/// Default security exponent: sec = 2^-80.
pub const DEFAULT_SEC_BITS: i32 = 80;

/// Default security parameter value (2^-80).
pub fn default_sec() -> f64 {
    2f64.powi(-DEFAULT_SEC_BITS)
}

/// Inputs to the k inequality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KParams {
    /// Number of parity-check sets
    pub n: f64,
    /// Noise rate
    pub p: f64,
    /// Security parameter (target failure probability)
    pub sec: f64,
}

impl KParams {
    pub fn new(n: f64, p: f64, sec: f64) -> Self {
        Self { n, p, sec }
    }
}

impl Default for KParams {
    fn default() -> Self {
        Self {
            n: DEFAULT_N,
            p: DEFAULT_P,
            sec: default_sec(),
        }
    }
}

/// Reference PRC watermark detector deployment.
/// k here was picked to clear the bound for the default n, p and sec.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    /// Codeword length
    pub l: usize,
    /// Number of parity-check sets
    pub n: usize,
    /// Checks per set
    pub k: u64,
    /// Detection threshold
    pub t: u64,
    /// Flip probability
    pub p: f64,
}

impl DetectorConfig {
    /// Inputs to the k inequality for this deployment at security 2^-`bits`.
    pub fn k_params(&self, bits: i32) -> KParams {
        KParams::new(self.n as f64, self.p, 2f64.powi(-bits))
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            l: 500,
            n: 1_000_000,
            k: 1367,
            t: 1010,
            p: 0.1,
        }
    }
}
