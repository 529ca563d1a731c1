//! Command-line interface for the `generate-testdata` binary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::config::{AxisOrder, GeneratorConfig, InputRendering, Preset};
use crate::generator::FixtureGenerator;
use crate::sink::{OutputSink, OutputTarget};

#[derive(Parser, Debug)]
#[command(name = "generate-testdata")]
#[command(about = "Generate projection test fixture tables as Go source")]
pub struct Args {
    /// Output file (created or overwritten); writes to stdout when omitted
    pub output: Option<PathBuf>,

    /// Built-in configuration to start from
    #[arg(long, value_enum, default_value = "epsg3857")]
    pub preset: Preset,

    /// YAML generator config; replaces the preset
    #[arg(long, env = "FIXTURE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Target CRS, e.g. EPSG:3857 or a +proj= string
    #[arg(long)]
    pub target: Option<String>,

    /// Source CRS; must be geographic
    #[arg(long)]
    pub source: Option<String>,

    /// Argument order used when calling the transform
    #[arg(long, value_enum)]
    pub axis_order: Option<AxisOrder>,

    /// How input coordinates are written into records
    #[arg(long, value_enum)]
    pub input_rendering: Option<InputRendering>,

    /// Keep the sign on values that round to zero (`-0.000000`)
    #[arg(long)]
    pub signed_zero: bool,

    /// Log level
    #[arg(long, env = "FIXTURE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Resolve the effective generator config.
    pub fn generator_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => self.preset.config(),
        };

        if let Some(target) = &self.target {
            config.target = target.clone();
        }
        if let Some(source) = &self.source {
            config.source = source.clone();
        }
        if let Some(axis_order) = self.axis_order {
            config.axis_order = axis_order;
        }
        if let Some(rendering) = self.input_rendering {
            config.input_rendering = rendering;
        }
        if self.signed_zero {
            config.table.signed_zero = true;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Generate one table as described by `args`. Returns the number of records
/// written.
pub fn run(args: &Args) -> Result<usize> {
    let config = args.generator_config()?;
    let target = OutputTarget::from_path(args.output.clone());

    let directive = target.path().and_then(|path| config.generate_directive(path));
    let generator = FixtureGenerator::from_config(&config)
        .context("Failed to set up projection")?
        .with_directive(directive);

    info!(
        target = %config.target,
        samples = generator.grid().len(),
        output = ?target,
        "Generating fixture table"
    );

    let mut sink = OutputSink::open(target.clone())
        .with_context(|| format!("Failed to open output {:?}", target))?;
    let count = generator
        .write_table(&mut sink)
        .context("Fixture generation aborted")?;
    sink.finish().context("Failed to flush output")?;

    info!(records = count, "Fixture table written");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["generate-testdata"]).unwrap();
        assert_eq!(args.output, None);
        assert_eq!(args.preset, Preset::Epsg3857);
        assert_eq!(args.generator_config().unwrap(), Preset::Epsg3857.config());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "generate-testdata",
            "out.go",
            "--preset",
            "legacy-epsg3857",
            "--target",
            "EPSG:900913",
            "--axis-order",
            "lon-lat",
            "--input-rendering",
            "radians",
            "--signed-zero",
        ])
        .unwrap();
        assert_eq!(args.output, Some(PathBuf::from("out.go")));

        let config = args.generator_config().unwrap();
        assert_eq!(config.target, "EPSG:900913");
        assert_eq!(config.axis_order, AxisOrder::LonLat);
        assert_eq!(config.input_rendering, InputRendering::Radians);
        assert!(config.table.signed_zero);
        assert_eq!(config.grid, Preset::LegacyEpsg3857.config().grid);
    }

    #[test]
    fn test_rejects_extra_positional() {
        assert!(Args::try_parse_from(["generate-testdata", "a.go", "b.go"]).is_err());
        assert!(Args::try_parse_from(["generate-testdata", "--preset", "nope"]).is_err());
    }
}
