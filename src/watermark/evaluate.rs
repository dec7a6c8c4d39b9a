use std::fmt;

use rand::Rng;

use super::watermarker::{PrcWatermarker, WatermarkError};

/// Detection counts over a batch of trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionRates {
    pub trials: usize,
    /// Noised watermarked codewords that were detected
    pub modified_detected: usize,
    /// Uniformly random strings that were (falsely) detected
    pub random_detected: usize,
    /// Watermarked codewords whose parity system was solvable
    pub consistent: usize,
}

impl DetectionRates {
    pub fn modified_rate(&self) -> f64 {
        rate(self.modified_detected, self.trials)
    }

    pub fn random_rate(&self) -> f64 {
        rate(self.random_detected, self.trials)
    }
}

fn rate(hits: usize, trials: usize) -> f64 {
    if trials == 0 {
        0.0
    } else {
        hits as f64 / trials as f64
    }
}

impl fmt::Display for DetectionRates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Modified codewords detected: {}/{} ({:.4})",
            self.modified_detected,
            self.trials,
            self.modified_rate()
        )?;
        writeln!(
            f,
            "Random strings detected: {}/{} ({:.4})",
            self.random_detected,
            self.trials,
            self.random_rate()
        )?;
        write!(f, "Consistent encodings: {}/{}", self.consistent, self.trials)
    }
}

/// Flip each bit independently with probability `p`.
pub fn flip_bits<R: Rng>(bits: &mut [u8], p: f64, rng: &mut R) -> Result<(), WatermarkError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(WatermarkError::InvalidProbability { p });
    }
    for b in bits.iter_mut() {
        if rng.gen_bool(p) {
            *b ^= 1;
        }
    }
    Ok(())
}

/// Uniformly random 0/1 string of length `l`.
pub fn random_codeword<R: Rng>(l: usize, rng: &mut R) -> Vec<u8> {
    (0..l).map(|_| rng.gen_range(0..=1)).collect()
}

/// Encode `trials` codewords, flip each bit with probability `p`, and count
/// how many are still detected; count false detections on as many random strings.
pub fn evaluate<R: Rng>(
    wm: &PrcWatermarker,
    trials: usize,
    p: f64,
    rng: &mut R,
) -> Result<DetectionRates, WatermarkError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(WatermarkError::InvalidProbability { p });
    }

    let mut rates = DetectionRates {
        trials,
        modified_detected: 0,
        random_detected: 0,
        consistent: 0,
    };

    for _ in 0..trials {
        let mut cw = wm.encode(rng);
        if cw.consistent {
            rates.consistent += 1;
        }
        flip_bits(&mut cw.bits, p, rng)?;
        if wm.detect(&cw.bits)? {
            rates.modified_detected += 1;
        }
    }

    for _ in 0..trials {
        let bits = random_codeword(wm.codeword_len(), rng);
        if wm.detect(&bits)? {
            rates.random_detected += 1;
        }
    }

    tracing::info!(
        trials,
        p,
        modified = rates.modified_detected,
        random = rates.random_detected,
        consistent = rates.consistent,
        "evaluation finished"
    );
    Ok(rates)
}
