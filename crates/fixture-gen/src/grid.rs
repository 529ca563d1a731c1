//! Sample grids over longitude and latitude.

use serde::{Deserialize, Serialize};

use crate::error::{FixtureError, FixtureResult};

/// A half-open, ascending range of whole degrees: `start`, `start + step`, ...
/// up to but excluding `stop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisRange {
    pub start: i32,
    pub stop: i32,
    pub step: i32,
}

impl AxisRange {
    pub fn new(start: i32, stop: i32, step: i32) -> Self {
        Self { start, stop, step }
    }

    pub fn validate(&self, axis: &str) -> FixtureResult<()> {
        if self.step <= 0 {
            return Err(FixtureError::InvalidGrid(format!(
                "{} step must be positive, got {}",
                axis, self.step
            )));
        }
        if self.start >= self.stop {
            return Err(FixtureError::InvalidGrid(format!(
                "{} range is empty: start {} >= stop {}",
                axis, self.start, self.stop
            )));
        }
        Ok(())
    }

    /// Number of values in the range.
    pub fn len(&self) -> usize {
        if self.step <= 0 || self.start >= self.stop {
            return 0;
        }
        let span = i64::from(self.stop) - i64::from(self.start);
        ((span + i64::from(self.step) - 1) / i64::from(self.step)) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn values(&self) -> impl Iterator<Item = i32> + Clone {
        let (start, step) = (self.start, self.step);
        (0..self.len()).map(move |i| start + i as i32 * step)
    }

    /// Last value the range yields, if any.
    pub fn last(&self) -> Option<i32> {
        self.len()
            .checked_sub(1)
            .map(|i| self.start + i as i32 * self.step)
    }
}

/// One geographic sample, in whole degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplePoint {
    pub lon: i32,
    pub lat: i32,
}

/// A regular grid of sample points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleGrid {
    pub longitude: AxisRange,
    pub latitude: AxisRange,
}

impl SampleGrid {
    pub fn new(longitude: AxisRange, latitude: AxisRange) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    pub fn validate(&self) -> FixtureResult<()> {
        self.longitude.validate("longitude")?;
        self.latitude.validate("latitude")
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.longitude.len() * self.latitude.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate samples longitude-major: every latitude for the first
    /// longitude, then every latitude for the next, both ascending.
    pub fn iter(&self) -> impl Iterator<Item = SamplePoint> + '_ {
        let latitudes = self.latitude.values();
        self.longitude.values().flat_map(move |lon| {
            latitudes
                .clone()
                .map(move |lat| SamplePoint { lon, lat })
        })
    }
}
