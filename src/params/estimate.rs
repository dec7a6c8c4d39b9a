use std::f64::consts::LN_2;

use super::defaults::KParams;

/// Human-readable form of the inequality evaluated by [`k_bound`].
pub const FORMULA: &str = "k >= 8 * ln(2*n/sec) / (1 - 2*p)^4";

/// ceil(rhs) must stay below this to fit in a u64 (2^64).
const K_LIMIT: f64 = u64::MAX as f64;

/// Intermediate quantities of one evaluation of the k inequality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KBound {
    /// 8 * ln(2n / sec)
    pub numerator: f64,
    /// (1 - 2p)^4
    pub denominator: f64,
    /// numerator / denominator
    pub rhs: f64,
    /// ceil(rhs)
    pub k: u64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimateError {
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
    #[error("math domain error: ln(2*n/sec) is undefined for n = {n}, sec = {sec}")]
    Domain { n: f64, sec: f64 },
    #[error("math domain error: ln(2*n) is undefined for n = {n}")]
    NonPositiveCount { n: f64 },
    #[error("degenerate denominator: (1 - 2*p)^4 is zero for p = {p}")]
    DegenerateDenominator { p: f64 },
    #[error("bound {rhs} is not positive; 2*n/sec must exceed 1")]
    NonPositiveBound { rhs: f64 },
    #[error("bound {rhs} is too large to round to an integer k")]
    Overflow { rhs: f64 },
}

fn ensure_finite(name: &'static str, value: f64) -> Result<(), EstimateError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EstimateError::NonFinite { name, value })
    }
}

/// Evaluate `k >= 8 * ln(2n/sec) / (1 - 2p)^4` and round the right-hand side up.
///
/// `p` is not range-checked: values outside `[0, 0.5)` are evaluated as given
/// (with a warning), since the even power keeps the denominator non-negative.
pub fn k_bound(params: &KParams) -> Result<KBound, EstimateError> {
    let KParams { n, p, sec } = *params;
    ensure_finite("n", n)?;
    ensure_finite("p", p)?;
    ensure_finite("sec", sec)?;

    if !(0.0..0.5).contains(&p) {
        tracing::warn!(p, "noise rate outside [0, 0.5); bound is not meaningful");
    }

    let ratio = 2.0 * n / sec;
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(EstimateError::Domain { n, sec });
    }

    let numerator = 8.0 * ratio.ln();
    let denominator = (1.0 - 2.0 * p).powi(4);
    if denominator == 0.0 {
        return Err(EstimateError::DegenerateDenominator { p });
    }

    let rhs = numerator / denominator;
    if !rhs.is_finite() || rhs.ceil() >= K_LIMIT {
        return Err(EstimateError::Overflow { rhs });
    }
    if rhs <= 0.0 {
        return Err(EstimateError::NonPositiveBound { rhs });
    }

    let k = rhs.ceil() as u64;
    tracing::debug!(n, p, sec, numerator, denominator, rhs, k, "evaluated k bound");

    Ok(KBound {
        numerator,
        denominator,
        rhs,
        k,
    })
}

/// Smallest integer k satisfying the inequality for `(n, p, sec)`.
pub fn estimate_k(n: f64, p: f64, sec: f64) -> Result<u64, EstimateError> {
    k_bound(&KParams::new(n, p, sec)).map(|b| b.k)
}

/// Whether a given `k` satisfies the inequality for `params`.
pub fn meets_bound(k: u64, params: &KParams) -> Result<bool, EstimateError> {
    let bound = k_bound(params)?;
    Ok(k as f64 >= bound.rhs)
}

/// Security level, in bits, that `k` checks per set achieve for `n` sets at noise rate `p`.
///
/// This is the `λ` for which `k` exactly meets the bound with `sec = 2^-λ`,
/// i.e. `λ = (k * (1 - 2p)^4 / 8 - ln(2n)) / ln 2`. It can be negative when
/// `k` is too small to give any guarantee.
pub fn security_bits(k: u64, n: f64, p: f64) -> Result<f64, EstimateError> {
    ensure_finite("n", n)?;
    ensure_finite("p", p)?;
    if n <= 0.0 {
        return Err(EstimateError::NonPositiveCount { n });
    }
    let denominator = (1.0 - 2.0 * p).powi(4);
    if denominator == 0.0 {
        return Err(EstimateError::DegenerateDenominator { p });
    }
    let ln_inv_sec = k as f64 * denominator / 8.0 - (2.0 * n).ln();
    Ok(ln_inv_sec / LN_2)
}
