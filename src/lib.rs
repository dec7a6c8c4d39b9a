//! # kestimate
//!
//! Parameter estimation for PRC (pseudorandom code) watermark detection.
//! Computes the smallest number of checks per parity-check set `k` with
//!
//! ```text
//! k >= 8 * ln(2*n/sec) / (1 - 2*p)^4
//! ```
//!
//! for `n` parity-check sets, noise rate `p` and security parameter `sec`.
//!
//! ## Modules
//!
//! - [`params`] - Defaults and the k inequality
//! - [`expr`] - Sandboxed numeric expressions for values like `2**-80`
//! - [`cli`] - Argument resolution and the printed report
//! - [`watermark`] - Parity-set watermarker, detection and its evaluation

pub mod cli;
pub mod expr;
pub mod params;
pub mod watermark;

pub use params::{estimate_k, k_bound, meets_bound, security_bits, EstimateError, KBound, KParams};
pub use watermark::{Codeword, DetectionRates, PrcWatermarker, WatermarkError};
