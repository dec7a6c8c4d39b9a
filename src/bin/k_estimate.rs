use anyhow::Context;
use clap::Parser;
use tracing::Level;

use kestimate::cli::{run, Args};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // stdout carries only the report
    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let report = run(&args).context("failed to estimate k")?;
    print!("{report}");

    Ok(())
}
