//! CLI entry point for pipe tiling and the territory contest

use clap::Parser;
use pipetiles::io::cli::{Cli, Runner};
use tracing_subscriber::EnvFilter;

fn main() -> pipetiles::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut runner = Runner::new(cli);
    runner.run()?;
    Ok(())
}
