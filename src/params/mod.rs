pub mod defaults;
pub mod estimate;

pub use defaults::{default_sec, DetectorConfig, KParams, DEFAULT_N, DEFAULT_P, DEFAULT_SEC_EXPR};
pub use estimate::{estimate_k, k_bound, meets_bound, security_bits, EstimateError, KBound, FORMULA};
