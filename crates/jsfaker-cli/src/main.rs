//! # jsfaker CLI Entry Point
//!
//! Parses arguments, initializes tracing, and runs fixture generation.

use clap::Parser;

/// Generate fake JSON fixtures from a tree of JSON Schema files.
///
/// Walks SCHEMA_DIR recursively, generates one example instance per
/// schema file, and writes the mirrored tree under OUT_DIR. Files that
/// fail to generate are reported and skipped.
#[derive(Parser, Debug)]
#[command(name = "jsfaker", version, about)]
struct Cli {
    #[command(flatten)]
    generate: jsfaker_cli::generate::GenerateArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let summary = jsfaker_cli::generate::run(&cli.generate)?;
    if summary.failed > 0 {
        anyhow::bail!("{} schema file(s) failed to generate", summary.failed);
    }
    Ok(())
}
