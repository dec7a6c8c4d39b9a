use anyhow::Context;
use clap::Parser;
use tracing::Level;

use kestimate::cli::{run_evaluation, EvaluateArgs};

fn main() -> anyhow::Result<()> {
    let args = EvaluateArgs::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let rates = run_evaluation(&args).context("failed to evaluate detection rates")?;
    println!("{rates}");

    Ok(())
}
