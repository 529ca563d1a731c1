//! Fixture records.

use crate::grid::SamplePoint;

/// One fixture: a geographic input and the expected projected output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixtureRecord {
    pub lon: i32,
    pub lat: i32,
    pub easting: f64,
    pub northing: f64,
}

impl FixtureRecord {
    pub fn new(sample: SamplePoint, easting: f64, northing: f64) -> Self {
        Self {
            lon: sample.lon,
            lat: sample.lat,
            easting,
            northing,
        }
    }
}
