//! CLI tool to generate projection test fixtures.
//!
//! Projects a grid of longitude/latitude samples and writes the results as
//! a Go table that the projection tests compare against.
//!
//! Usage:
//!   cargo run --bin generate-testdata -- epsg3857_test.go
//!   cargo run --bin generate-testdata -- --preset legacy-epsg3857 > epsg3857.go
//!   cargo run --bin generate-testdata -- --config config/epsg27700.yaml epsg27700_test.go

use anyhow::Result;
use clap::Parser;
use fixture_gen::cli::{self, Args};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Logs go to stderr so stdout carries only the generated table
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    cli::run(&args)?;
    Ok(())
}
