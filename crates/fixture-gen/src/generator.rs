//! Fixture table generation.
//!
//! Walks a [`SampleGrid`], projects every sample through a
//! [`ForwardTransform`] and streams one rendered record per sample. The
//! first failing sample aborts the run; lines already written stay written.

use std::io::Write;

use projection::{ForwardTransform, Transformation};
use tracing::{debug, info};

use crate::config::{AxisOrder, GeneratorConfig};
use crate::error::{FixtureError, FixtureResult};
use crate::grid::{SampleGrid, SamplePoint};
use crate::record::FixtureRecord;
use crate::render::TableRenderer;

/// Generates one fixture table.
#[derive(Debug, Clone)]
pub struct FixtureGenerator<T> {
    transform: T,
    grid: SampleGrid,
    axis_order: AxisOrder,
    renderer: TableRenderer,
}

impl FixtureGenerator<Transformation> {
    /// Build a generator backed by the projection engine.
    ///
    /// Both CRS identifiers are resolved here, so configuration errors
    /// surface before any output is written.
    pub fn from_config(config: &GeneratorConfig) -> FixtureResult<Self> {
        config.validate()?;
        let transform = Transformation::from_identifiers(&config.source, &config.target)?;
        info!(
            source = %transform.source(),
            target = %transform.target(),
            axis_order = ?config.axis_order,
            "Resolved transformation"
        );
        Ok(Self::new(transform, config.grid, config.axis_order, renderer_for(config)))
    }
}

/// A renderer for the config's table style, without a directive.
pub fn renderer_for(config: &GeneratorConfig) -> TableRenderer {
    TableRenderer::new(
        config.table.clone(),
        config.field_order,
        config.input_rendering,
    )
}

impl<T: ForwardTransform> FixtureGenerator<T> {
    pub fn new(transform: T, grid: SampleGrid, axis_order: AxisOrder, renderer: TableRenderer) -> Self {
        Self {
            transform,
            grid,
            axis_order,
            renderer,
        }
    }

    pub fn with_directive(mut self, command: Option<String>) -> Self {
        self.renderer = self.renderer.with_directive(command);
        self
    }

    pub fn transform(&self) -> &T {
        &self.transform
    }

    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    /// Project one sample, passing its coordinates in the configured order.
    pub fn project(&self, sample: SamplePoint) -> FixtureResult<FixtureRecord> {
        let (a, b) = self
            .axis_order
            .arrange(f64::from(sample.lon), f64::from(sample.lat));
        let (easting, northing) =
            self.transform
                .forward(a, b)
                .map_err(|source| FixtureError::Sample {
                    lon: sample.lon,
                    lat: sample.lat,
                    source,
                })?;
        Ok(FixtureRecord::new(sample, easting, northing))
    }

    /// All records in grid order, computed lazily.
    pub fn records(&self) -> impl Iterator<Item = FixtureResult<FixtureRecord>> + '_ {
        self.grid.iter().map(move |sample| self.project(sample))
    }

    /// Write the complete table and return the number of records written.
    pub fn write_table<W: Write>(&self, out: &mut W) -> FixtureResult<usize> {
        out.write_all(self.renderer.header().as_bytes())?;

        let mut count = 0;
        for record in self.records() {
            let record = record?;
            out.write_all(self.renderer.record_line(&record).as_bytes())?;
            count += 1;
        }
        debug!(records = count, "Wrote record lines");

        out.write_all(self.renderer.footer().as_bytes())?;
        Ok(count)
    }
}
