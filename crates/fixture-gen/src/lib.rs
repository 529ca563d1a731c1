//! Projection test fixture generator.
//!
//! Produces Go source declaring a table of `{lon, lat, e, n}` records: a
//! geographic sample grid and the projected easting/northing for each
//! sample, ready to be committed next to the tests that consume it.

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod record;
pub mod render;
pub mod sink;

pub use config::{AxisOrder, GeneratorConfig, InputRendering, Preset, TableStyle};
pub use error::{FixtureError, FixtureResult};
pub use generator::FixtureGenerator;
pub use grid::{AxisRange, SampleGrid, SamplePoint};
pub use record::FixtureRecord;
pub use render::TableRenderer;
pub use sink::{OutputSink, OutputTarget};
