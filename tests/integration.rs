use std::process::Command;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use kestimate::cli::{run, Args};
use kestimate::expr::parse_float_or_expr;
use kestimate::params::{k_bound, security_bits, DetectorConfig, EstimateError, KParams};
use kestimate::watermark::{flip_bits, random_codeword, PrcWatermarker};

fn k_estimate() -> Command {
    Command::new(env!("CARGO_BIN_EXE_k_estimate"))
}

/// Resolve arguments, evaluate, and render the report in-process.
#[test]
fn test_pipeline_defaults() {
    let args = Args::try_parse_from(["k_estimate"]).unwrap();
    let report = run(&args).unwrap();
    let text = report.to_string();

    assert!(text.starts_with("Estimated minimal k: 1367\n"));
    assert!(text.contains("  n   = 1000000.0\n"));
    assert!(text.contains("  p   = 0.1\n"));
    assert!(text.contains("  sec = 8.271806125530277e-25\n"));
    assert!(text.ends_with("Formula: k >= 8 * ln(2*n/sec) / (1 - 2*p)^4\n"));
}

#[test]
fn test_expression_and_literal_sec_agree() {
    let from_expr = Args::try_parse_from(["k_estimate", "--sec", "2**-80"]).unwrap();
    let from_literal =
        Args::try_parse_from(["k_estimate", "--sec", "8.271806125530277e-25"]).unwrap();
    assert_eq!(run(&from_expr).unwrap(), run(&from_literal).unwrap());
}

/// Randomized ceiling property over the meaningful input range.
#[test]
fn test_ceiling_property_random() {
    let mut rng = ChaCha20Rng::seed_from_u64(42);

    for _ in 0..1000 {
        let n = 10f64.powf(rng.gen_range(0.0..9.0));
        let p = rng.gen_range(0.0..0.45);
        let sec = 2f64.powf(-rng.gen_range(1.0..256.0));
        let params = KParams::new(n, p, sec);

        let bound = k_bound(&params).unwrap();
        let rhs = 8.0 * (2.0 * n / sec).ln() / (1.0 - 2.0 * p).powi(4);
        assert_eq!(bound.rhs, rhs);
        assert!(bound.k >= 1);
        assert!(bound.k as f64 >= rhs, "k={} rhs={rhs}", bound.k);
        assert!((bound.k as f64) - 1.0 < rhs, "k={} rhs={rhs}", bound.k);
        assert_eq!(k_bound(&params).unwrap(), bound);
    }
}

/// The estimated k always achieves the requested security, and k - 1 never does.
#[test]
fn test_estimate_achieves_requested_security_random() {
    let mut rng = ChaCha20Rng::seed_from_u64(42);

    for _ in 0..200 {
        let n = 10f64.powf(rng.gen_range(2.0..8.0));
        let p = rng.gen_range(0.0..0.4);
        let bits = rng.gen_range(40..200);
        let params = KParams::new(n, p, 2f64.powi(-bits));

        let bound = k_bound(&params).unwrap();
        // skip draws whose rhs sits within float noise of an integer
        let frac = bound.rhs.fract();
        if !(1e-6..1.0 - 1e-6).contains(&frac) {
            continue;
        }
        let achieved = security_bits(bound.k, n, p).unwrap();
        let below = security_bits(bound.k - 1, n, p).unwrap();
        assert!(achieved >= bits as f64 - 1e-9, "achieved {achieved} < {bits}");
        assert!(below < bits as f64, "k-1 achieved {below} >= {bits}");
    }
}

#[test]
fn test_reference_deployment_clears_default_bound() {
    let cfg = DetectorConfig::default();
    let args = Args::try_parse_from([
        "k_estimate".to_string(),
        "--n".to_string(),
        cfg.n.to_string(),
        "--p".to_string(),
        cfg.p.to_string(),
        "--check".to_string(),
        cfg.k.to_string(),
    ])
    .unwrap();
    let report = run(&args).unwrap();
    let check = report.check.unwrap();
    assert!(check.satisfied);
    assert!(report.bound.k <= cfg.k);
}

#[test]
fn test_sec_zero_errors_in_pipeline() {
    let sec = parse_float_or_expr("0").unwrap();
    let args = Args::try_parse_from(["k_estimate", "--sec", "0"]).unwrap();
    assert_eq!(args.sec, sec);
    assert!(matches!(run(&args).unwrap_err(), EstimateError::Domain { .. }));
}

#[test]
fn test_noise_near_half_still_yields_k() {
    let args = Args::try_parse_from(["k_estimate", "--p", "0.4999"]).unwrap();
    let report = run(&args).unwrap();
    assert!(report.bound.k > 1u64 << 53);
    assert!(report.bound.k as f64 >= report.bound.rhs);
}

#[test]
fn test_check_with_negative_count_reports_count() {
    let args = Args::try_parse_from([
        "k_estimate", "--n", "-1e6", "--sec", "-1e-24", "--check", "100",
    ])
    .unwrap();
    let err = run(&args).unwrap_err();
    assert_eq!(err, EstimateError::NonPositiveCount { n: -1e6 });
    assert!(!err.to_string().contains("sec = 1"));
}

#[test]
fn test_binary_default_output() {
    let output = k_estimate().output().expect("failed to run k_estimate");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Estimated minimal k: 1367");
    assert_eq!(lines[1], "Parameters used:");
    assert_eq!(lines[5], "Formula: k >= 8 * ln(2*n/sec) / (1 - 2*p)^4");
}

#[test]
fn test_binary_custom_inputs() {
    let output = k_estimate()
        .args(["--n", "1e6", "--p", "0.1", "--sec", "0.001", "--check", "500"])
        .output()
        .expect("failed to run k_estimate");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Estimated minimal k: 419\n"));
    assert!(stdout.contains("  sec = 0.001\n"));
    assert!(stdout.contains("Check: k = 500 satisfies the bound"));
}

#[test]
fn test_binary_domain_error_exits_nonzero() {
    let output = k_estimate()
        .args(["--sec", "0"])
        .output()
        .expect("failed to run k_estimate");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("math domain error"), "stderr: {stderr}");
}

#[test]
fn test_binary_degenerate_noise_exits_nonzero() {
    let output = k_estimate()
        .args(["--p", "0.5"])
        .output()
        .expect("failed to run k_estimate");
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("degenerate denominator"), "stderr: {stderr}");
}

#[test]
fn test_binary_rejects_code_in_sec() {
    let output = k_estimate()
        .args(["--sec", "__import__('os').system('true')"])
        .output()
        .expect("failed to run k_estimate");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("--sec"), "stderr: {stderr}");
}

fn prc_evaluate() -> Command {
    Command::new(env!("CARGO_BIN_EXE_prc_evaluate"))
}

/// Watermarked codewords at the reference l, k, t survive the reference noise;
/// random strings never trip the threshold.
#[test]
fn test_watermark_detection_reference_sizes() {
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let cfg = DetectorConfig {
        n: 32,
        ..DetectorConfig::default()
    };
    let wm = PrcWatermarker::generate(&cfg, &mut rng).unwrap();

    for set in 0..4 {
        let mut cw = wm.encode_with(set, false, &mut rng).unwrap();
        assert!(wm.detect(&cw.bits).unwrap());
        flip_bits(&mut cw.bits, cfg.p, &mut rng).unwrap();
        assert!(wm.detect(&cw.bits).unwrap());
        assert!(wm.detect_precomputed(&cw.bits).unwrap());
    }

    for _ in 0..8 {
        let bits = random_codeword(cfg.l, &mut rng);
        assert!(!wm.detect(&bits).unwrap());
        assert!(!wm.detect_precomputed(&bits).unwrap());
    }
}

#[test]
fn test_prc_evaluate_binary_seeded() {
    let output = prc_evaluate()
        .args(["--l", "100", "--n", "20", "--k", "300", "--t", "250", "--p", "0.05"])
        .args(["--trials", "5", "--seed", "42"])
        .output()
        .expect("failed to run prc_evaluate");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Modified codewords detected: "));
    assert_eq!(lines[1], "Random strings detected: 0/5 (0.0000)");
    assert!(lines[2].starts_with("Consistent encodings: "));
}

#[test]
fn test_prc_evaluate_rejects_long_codewords() {
    let output = prc_evaluate()
        .args(["--l", "1000", "--n", "1", "--seed", "1"])
        .output()
        .expect("failed to run prc_evaluate");
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("codeword length 1000"), "stderr: {stderr}");
}
