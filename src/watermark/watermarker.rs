use rand::Rng;
use rayon::prelude::*;

use super::gf2::Gf2System;
use super::parity::{count_ones, pair_index, random_parity_set, xor_table, Pair, MAX_CODEWORD_LEN};
use crate::params::DetectorConfig;

/// Parity-set counts at or above this are scanned in parallel.
const PARALLEL_THRESHOLD: usize = 1 << 12;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WatermarkError {
    #[error("codeword length {l} must be in 2..={max}")]
    InvalidLength { l: usize, max: usize },
    #[error("{name} must be at least 1")]
    Zero { name: &'static str },
    #[error("{name} = {value} does not fit in usize")]
    TooLarge { name: &'static str, value: u64 },
    #[error("parity set {set} has invalid pair ({a}, {b}) for length {l}")]
    InvalidPair { set: usize, a: u16, b: u16, l: usize },
    #[error("parity set {set} out of range for {n} sets")]
    SetOutOfRange { set: usize, n: usize },
    #[error("codeword has length {got}, expected {expected}")]
    CodewordLength { got: usize, expected: usize },
    #[error("codeword bit {pos} is {value}, expected 0 or 1")]
    NonBinary { pos: usize, value: u8 },
    #[error("flip probability {p} must be in [0, 1]")]
    InvalidProbability { p: f64 },
}

/// One watermarked codeword and how it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codeword {
    /// 0/1 bits, one per position
    pub bits: Vec<u8>,
    /// Index of the parity set the codeword was solved against
    pub set: usize,
    /// Target XOR of every pair in that set
    pub id: bool,
    /// Whether every pair in the set actually XORs to `id`
    pub consistent: bool,
}

/// PRC watermarker: `n` secret parity sets of `k` position pairs each.
///
/// A codeword is watermarked when, for some set, at least `t` of its pairs
/// agree on the same XOR value.
#[derive(Debug, Clone)]
pub struct PrcWatermarker {
    l: usize,
    t: usize,
    sets: Vec<Vec<Pair>>,
}

fn to_usize(name: &'static str, value: u64) -> Result<usize, WatermarkError> {
    usize::try_from(value).map_err(|_| WatermarkError::TooLarge { name, value })
}

fn check_length(l: usize) -> Result<(), WatermarkError> {
    if (2..=MAX_CODEWORD_LEN).contains(&l) {
        Ok(())
    } else {
        Err(WatermarkError::InvalidLength {
            l,
            max: MAX_CODEWORD_LEN,
        })
    }
}

impl PrcWatermarker {
    /// Sample `cfg.n` random parity sets of `cfg.k` pairs over `cfg.l` positions.
    pub fn generate<R: Rng>(cfg: &DetectorConfig, rng: &mut R) -> Result<Self, WatermarkError> {
        check_length(cfg.l)?;
        let k = to_usize("k", cfg.k)?;
        let t = to_usize("t", cfg.t)?;
        if cfg.n == 0 {
            return Err(WatermarkError::Zero { name: "n" });
        }
        if k == 0 {
            return Err(WatermarkError::Zero { name: "k" });
        }
        if t == 0 {
            return Err(WatermarkError::Zero { name: "t" });
        }

        let sets = (0..cfg.n)
            .map(|_| random_parity_set(cfg.l, k, rng))
            .collect();
        tracing::debug!(l = cfg.l, n = cfg.n, k, t, "generated parity sets");

        Ok(Self { l: cfg.l, t, sets })
    }

    /// Build from explicit parity sets (sets may differ in size).
    pub fn from_parity_sets(
        l: usize,
        t: usize,
        sets: Vec<Vec<Pair>>,
    ) -> Result<Self, WatermarkError> {
        check_length(l)?;
        if sets.is_empty() {
            return Err(WatermarkError::Zero { name: "n" });
        }
        if t == 0 {
            return Err(WatermarkError::Zero { name: "t" });
        }
        for (i, set) in sets.iter().enumerate() {
            if let Some(&(a, b)) = set
                .iter()
                .find(|&&(a, b)| a == b || a as usize >= l || b as usize >= l)
            {
                return Err(WatermarkError::InvalidPair { set: i, a, b, l });
            }
        }
        Ok(Self { l, t, sets })
    }

    pub fn codeword_len(&self) -> usize {
        self.l
    }

    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    pub fn threshold(&self) -> usize {
        self.t
    }

    pub fn parity_sets(&self) -> &[Vec<Pair>] {
        &self.sets
    }

    /// Watermark against a uniformly chosen set and id bit.
    pub fn encode<R: Rng>(&self, rng: &mut R) -> Codeword {
        let set = rng.gen_range(0..self.sets.len());
        let id = rng.gen_bool(0.5);
        self.solve_set(set, id, rng)
    }

    /// Watermark against parity set `set` so that each pair XORs to `id`.
    ///
    /// Free positions are random. When the pairs contain an odd cycle and
    /// `id` is 1 the system has no solution; the codeword then satisfies a
    /// maximal independent subset of the pairs and `consistent` is false.
    pub fn encode_with<R: Rng>(
        &self,
        set: usize,
        id: bool,
        rng: &mut R,
    ) -> Result<Codeword, WatermarkError> {
        if set >= self.sets.len() {
            return Err(WatermarkError::SetOutOfRange {
                set,
                n: self.sets.len(),
            });
        }
        Ok(self.solve_set(set, id, rng))
    }

    fn solve_set<R: Rng>(&self, set: usize, id: bool, rng: &mut R) -> Codeword {
        let pairs = &self.sets[set];
        let mut system = Gf2System::with_capacity(self.l, pairs.len());
        for &(a, b) in pairs {
            system.push_row(&[a as usize, b as usize], id);
        }
        let solution = system.solve(rng);
        if !solution.consistent {
            tracing::warn!(set, id, rank = solution.rank, "parity system is inconsistent");
        }
        Codeword {
            bits: solution.x,
            set,
            id,
            consistent: solution.consistent,
        }
    }

    fn check_codeword(&self, bits: &[u8]) -> Result<(), WatermarkError> {
        if bits.len() != self.l {
            return Err(WatermarkError::CodewordLength {
                got: bits.len(),
                expected: self.l,
            });
        }
        if let Some((pos, &value)) = bits.iter().enumerate().find(|(_, &v)| v > 1) {
            return Err(WatermarkError::NonBinary { pos, value });
        }
        Ok(())
    }

    fn flagged(&self, checks: usize, ones: usize) -> bool {
        ones >= self.t || checks - ones >= self.t
    }

    fn any_set_flagged<F>(&self, ones: F) -> bool
    where
        F: Fn(&[Pair]) -> usize + Sync,
    {
        if self.sets.len() >= PARALLEL_THRESHOLD {
            self.sets
                .par_iter()
                .any(|set| self.flagged(set.len(), ones(set.as_slice())))
        } else {
            self.sets.iter().any(|set| self.flagged(set.len(), ones(set.as_slice())))
        }
    }

    /// Whether any parity set has at least `t` pairs with equal XOR, computed pair by pair.
    pub fn detect(&self, bits: &[u8]) -> Result<bool, WatermarkError> {
        self.check_codeword(bits)?;
        Ok(self.any_set_flagged(|set| count_ones(set, bits)))
    }

    /// Same verdict as [`detect`](Self::detect), reading pair XORs from a
    /// table of all `l(l-1)/2` pairs built once per codeword.
    pub fn detect_precomputed(&self, bits: &[u8]) -> Result<bool, WatermarkError> {
        self.check_codeword(bits)?;
        let table = xor_table(bits);
        let l = self.l;
        Ok(self.any_set_flagged(|set| {
            set.iter()
                .map(|&(a, b)| usize::from(table[pair_index(l, a as usize, b as usize)]))
                .sum()
        }))
    }
}
