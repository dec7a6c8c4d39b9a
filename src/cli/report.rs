use std::fmt;

use crate::params::{KBound, KParams, FORMULA};

/// Result of checking a caller-supplied k against the bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckOutcome {
    pub k: u64,
    pub satisfied: bool,
    /// Security, in bits, that `k` achieves for the same n and p
    pub security_bits: f64,
}

/// Everything printed for one invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    pub params: KParams,
    pub bound: KBound,
    pub check: Option<CheckOutcome>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Estimated minimal k: {}", self.bound.k)?;
        writeln!(f, "Parameters used:")?;
        writeln!(f, "  n   = {:?}", self.params.n)?;
        writeln!(f, "  p   = {:?}", self.params.p)?;
        writeln!(f, "  sec = {:?}", self.params.sec)?;
        writeln!(f, "Formula: {FORMULA}")?;
        if let Some(check) = &self.check {
            let verdict = if check.satisfied {
                "satisfies"
            } else {
                "does NOT satisfy"
            };
            writeln!(
                f,
                "Check: k = {} {verdict} the bound ({:.2} bits of security)",
                check.k, check.security_bits
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::k_bound;

    fn default_report(check: Option<CheckOutcome>) -> Report {
        let params = KParams::default();
        Report {
            params,
            bound: k_bound(&params).unwrap(),
            check,
        }
    }

    #[test]
    fn test_report_layout() {
        let text = default_report(None).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Estimated minimal k: 1367",
                "Parameters used:",
                "  n   = 1000000.0",
                "  p   = 0.1",
                "  sec = 8.271806125530277e-25",
                "Formula: k >= 8 * ln(2*n/sec) / (1 - 2*p)^4",
            ]
        );
    }

    #[test]
    fn test_report_check_line() {
        let ok = default_report(Some(CheckOutcome {
            k: 1367,
            satisfied: true,
            security_bits: 80.04323442051074,
        }));
        assert!(ok
            .to_string()
            .ends_with("Check: k = 1367 satisfies the bound (80.04 bits of security)\n"));

        let short = default_report(Some(CheckOutcome {
            k: 1000,
            satisfied: false,
            security_bits: 38.5,
        }));
        assert!(short.to_string().contains("k = 1000 does NOT satisfy the bound"));
    }
}
