//! PRC watermarking over binary codewords.
//!
//! A watermarker holds `n` secret parity-check sets, each `k` pairs of
//! codeword positions. Encoding solves one set's XOR constraints over GF(2);
//! detection flags a codeword when some set has at least `t` pairs agreeing.

pub mod evaluate;
pub mod gf2;
pub mod parity;
pub mod watermarker;

pub use evaluate::{evaluate, flip_bits, random_codeword, DetectionRates};
pub use gf2::{BitRow, Gf2Solution, Gf2System};
pub use parity::{pair_index, xor_table, Pair, MAX_CODEWORD_LEN};
pub use watermarker::{Codeword, PrcWatermarker, WatermarkError};
