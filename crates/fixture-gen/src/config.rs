//! Generator configuration.
//!
//! A run is fully described by a [`GeneratorConfig`]. Configs come from a
//! built-in [`Preset`] or from a YAML file such as `config/epsg27700.yaml`.

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{FixtureError, FixtureResult};
use crate::grid::{AxisRange, SampleGrid};

/// Order of the two geographic values, either as passed to the transform or
/// as written into a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AxisOrder {
    /// Longitude first
    LonLat,
    /// Latitude first
    LatLon,
}

impl AxisOrder {
    /// Arrange a (lon, lat) pair in this order.
    pub fn arrange<T>(self, lon: T, lat: T) -> (T, T) {
        match self {
            AxisOrder::LonLat => (lon, lat),
            AxisOrder::LatLon => (lat, lon),
        }
    }
}

/// How the integer degree inputs are written into a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum InputRendering {
    /// Plain integer degrees: `lon: -170`
    Degrees,
    /// Degrees wrapped in a conversion call: `lon: radians(-170)`
    Radians,
}

/// Names used in the generated Go source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStyle {
    #[serde(default = "default_package")]
    pub package: String,
    pub name: String,
    #[serde(default = "default_lon_field")]
    pub lon_field: String,
    #[serde(default = "default_lat_field")]
    pub lat_field: String,
    #[serde(default = "default_easting_field")]
    pub easting_field: String,
    #[serde(default = "default_northing_field")]
    pub northing_field: String,
    #[serde(default = "default_field_type")]
    pub field_type: String,
    /// Function wrapping inputs when rendering radians
    #[serde(default = "default_radians_marker")]
    pub radians_marker: String,
    /// Command for the `//go:generate` line written at the top of output
    /// files. `{output}` is replaced with the output file name.
    #[serde(default)]
    pub generate_command: Option<String>,
    /// Write `-0.000000` for negative values that round to zero, as C's
    /// `%f` does. Off by default: such values are written unsigned.
    #[serde(default)]
    pub signed_zero: bool,
}

fn default_package() -> String {
    "proj".to_string()
}

fn default_lon_field() -> String {
    "lon".to_string()
}

fn default_lat_field() -> String {
    "lat".to_string()
}

fn default_easting_field() -> String {
    "e".to_string()
}

fn default_northing_field() -> String {
    "n".to_string()
}

fn default_field_type() -> String {
    "float64".to_string()
}

fn default_radians_marker() -> String {
    "radians".to_string()
}

fn default_source() -> String {
    "EPSG:4326".to_string()
}

fn default_axis_order() -> AxisOrder {
    AxisOrder::LonLat
}

fn default_field_order() -> AxisOrder {
    AxisOrder::LonLat
}

fn default_input_rendering() -> InputRendering {
    InputRendering::Degrees
}

impl TableStyle {
    pub fn new(name: &str) -> Self {
        Self {
            package: default_package(),
            name: name.to_string(),
            lon_field: default_lon_field(),
            lat_field: default_lat_field(),
            easting_field: default_easting_field(),
            northing_field: default_northing_field(),
            field_type: default_field_type(),
            radians_marker: default_radians_marker(),
            generate_command: None,
            signed_zero: false,
        }
    }

    fn validate(&self) -> FixtureResult<()> {
        let identifiers = [
            ("package", &self.package),
            ("name", &self.name),
            ("lon_field", &self.lon_field),
            ("lat_field", &self.lat_field),
            ("easting_field", &self.easting_field),
            ("northing_field", &self.northing_field),
            ("field_type", &self.field_type),
            ("radians_marker", &self.radians_marker),
        ];
        for (key, value) in identifiers {
            if !is_identifier(value) {
                return Err(FixtureError::Config(format!(
                    "table.{} must be an identifier, got '{}'",
                    key, value
                )));
            }
        }

        let fields = [
            &self.lon_field,
            &self.lat_field,
            &self.easting_field,
            &self.northing_field,
        ];
        for (i, field) in fields.iter().enumerate() {
            if fields[i + 1..].contains(field) {
                return Err(FixtureError::Config(format!(
                    "duplicate field name '{}'",
                    field
                )));
            }
        }
        Ok(())
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Complete description of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Target CRS identifier, e.g. "EPSG:3857"
    pub target: String,
    /// Source CRS identifier; must be geographic
    #[serde(default = "default_source")]
    pub source: String,
    pub grid: SampleGrid,
    /// Argument order used when calling the transform
    #[serde(default = "default_axis_order")]
    pub axis_order: AxisOrder,
    /// Which input field is written first in each record
    #[serde(default = "default_field_order")]
    pub field_order: AxisOrder,
    #[serde(default = "default_input_rendering")]
    pub input_rendering: InputRendering,
    pub table: TableStyle,
}

impl GeneratorConfig {
    pub fn from_yaml_str(yaml: &str) -> FixtureResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file.
    pub fn load(path: &Path) -> FixtureResult<Self> {
        debug!(path = %path.display(), "Loading generator config");
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        info!(
            path = %path.display(),
            target = %config.target,
            samples = config.grid.len(),
            "Loaded generator config"
        );
        Ok(config)
    }

    pub fn validate(&self) -> FixtureResult<()> {
        self.grid.validate()?;
        self.table.validate()?;
        if self.target.trim().is_empty() {
            return Err(FixtureError::Config("target CRS is empty".to_string()));
        }
        Ok(())
    }

    /// Expand the `//go:generate` command for an output file, if the table
    /// carries one.
    pub fn generate_directive(&self, output: &Path) -> Option<String> {
        let command = self.table.generate_command.as_ref()?;
        let file_name = output
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| output.display().to_string());
        Some(command.replace("{output}", &file_name))
    }
}

/// Built-in configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Web Mercator fixtures with radian inputs, for writing to a file
    #[value(name = "epsg3857")]
    Epsg3857,
    /// The pyproj-era table: degree inputs, transform called as
    /// (lat, lon)
    #[value(name = "legacy-epsg3857")]
    LegacyEpsg3857,
}

impl Preset {
    pub fn config(self) -> GeneratorConfig {
        match self {
            Preset::Epsg3857 => GeneratorConfig {
                target: "EPSG:3857".to_string(),
                source: default_source(),
                grid: SampleGrid::new(AxisRange::new(-180, 180, 30), AxisRange::new(-80, 90, 30)),
                axis_order: AxisOrder::LonLat,
                field_order: AxisOrder::LatLon,
                input_rendering: InputRendering::Radians,
                table: TableStyle {
                    generate_command: Some(
                        "generate-testdata --preset epsg3857 {output}".to_string(),
                    ),
                    ..TableStyle::new("epsg3857TestData")
                },
            },
            Preset::LegacyEpsg3857 => GeneratorConfig {
                target: "EPSG:3857".to_string(),
                source: default_source(),
                grid: SampleGrid::new(AxisRange::new(-170, 180, 10), AxisRange::new(-80, 90, 10)),
                axis_order: AxisOrder::LatLon,
                field_order: AxisOrder::LonLat,
                input_rendering: InputRendering::Degrees,
                table: TableStyle::new("epsg3857TestData"),
            },
        }
    }
}
