//! Transformations between coordinate reference systems.

use tracing::trace;

use crate::crs::{Crs, Projection};
use crate::error::{ProjectionError, ProjectionResult};

/// A point in a CRS's native axis order and units.
///
/// Geographic CRSs use `x` = longitude and `y` = latitude, in degrees.
/// Projected CRSs use `x` = easting and `y` = northing, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Something that maps a pair of input coordinates to a pair of output
/// coordinates in the forward direction.
///
/// Implemented by [`Transformation`] and by plain closures, so callers can
/// substitute a stub engine in tests.
pub trait ForwardTransform {
    fn forward(&self, a: f64, b: f64) -> ProjectionResult<(f64, f64)>;
}

impl<F> ForwardTransform for F
where
    F: Fn(f64, f64) -> ProjectionResult<(f64, f64)>,
{
    fn forward(&self, a: f64, b: f64) -> ProjectionResult<(f64, f64)> {
        self(a, b)
    }
}

/// A forward transformation from a geographic source CRS to a target CRS.
#[derive(Debug, Clone)]
pub struct Transformation {
    source: Crs,
    target: Crs,
}

impl Transformation {
    /// Build a transformation. The source must be geographic.
    pub fn new(source: Crs, target: Crs) -> ProjectionResult<Self> {
        if !source.is_geographic() {
            return Err(ProjectionError::UnsupportedTransformation {
                source_crs: source.to_string(),
                target_crs: target.to_string(),
            });
        }
        Ok(Self { source, target })
    }

    /// Parse both identifiers and build a transformation.
    pub fn from_identifiers(source: &str, target: &str) -> ProjectionResult<Self> {
        Self::new(Crs::parse(source)?, Crs::parse(target)?)
    }

    pub fn source(&self) -> &Crs {
        &self.source
    }

    pub fn target(&self) -> &Crs {
        &self.target
    }

    /// Transform a geographic (lon, lat) coordinate into the target CRS.
    pub fn forward_coord(&self, coord: Coord) -> ProjectionResult<Coord> {
        let Coord { x: lon, y: lat } = coord;
        if !lon.is_finite() || !lat.is_finite() || lat.abs() > 90.0 || lon.abs() > 360.0 {
            return Err(self.out_of_domain(coord));
        }
        let lon = wrap_longitude(lon);

        let projected = match self.target.projection() {
            Projection::Geographic => Some((lon, lat)),
            Projection::Mercator(merc) => merc.forward(lon.to_radians(), lat.to_radians()),
            Projection::TransverseMercator(tm) => tm.forward(lat.to_radians(), lon.to_radians()),
        };

        match projected {
            Some((x, y)) => {
                trace!(lon, lat, x, y, target = %self.target, "forward");
                Ok(Coord::new(x, y))
            }
            None => Err(self.out_of_domain(coord)),
        }
    }

    fn out_of_domain(&self, coord: Coord) -> ProjectionError {
        ProjectionError::OutOfDomain {
            crs: self.target.to_string(),
            x: coord.x,
            y: coord.y,
        }
    }
}

/// Bring a longitude beyond +/-180 degrees back into [-180, 180).
fn wrap_longitude(lon: f64) -> f64 {
    if lon.abs() > 180.0 {
        (lon + 180.0).rem_euclid(360.0) - 180.0
    } else {
        lon
    }
}

impl ForwardTransform for Transformation {
    /// `a` is longitude and `b` latitude, in degrees.
    fn forward(&self, a: f64, b: f64) -> ProjectionResult<(f64, f64)> {
        let c = self.forward_coord(Coord::new(a, b))?;
        Ok((c.x, c.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_3857() -> Transformation {
        Transformation::from_identifiers("EPSG:4326", "EPSG:3857").unwrap()
    }

    #[test]
    fn test_origin_maps_to_zero() {
        let (e, n) = to_3857().forward(0.0, 0.0).unwrap();
        assert_eq!(format!("{:.6} {:.6}", e, n), "0.000000 0.000000");
    }

    #[test]
    fn test_web_mercator_reference() {
        let c = to_3857().forward_coord(Coord::new(50.0, 10.0)).unwrap();
        assert!((c.x - 5_565_974.539_664).abs() < 1e-4);
        assert!((c.y - 1_118_889.974_858).abs() < 1e-3);
    }

    #[test]
    fn test_identity_for_geographic_target() {
        let t = Transformation::from_identifiers("EPSG:4326", "+proj=longlat").unwrap();
        assert_eq!(t.forward(-12.5, 33.0).unwrap(), (-12.5, 33.0));
    }

    #[test]
    fn test_projected_source_rejected() {
        let err = Transformation::from_identifiers("EPSG:3857", "EPSG:4326").unwrap_err();
        assert!(matches!(err, ProjectionError::UnsupportedTransformation { .. }));
    }

    #[test]
    fn test_domain_errors() {
        let t = to_3857();
        for (lon, lat) in [(0.0, 90.0), (0.0, -120.0), (400.0, 0.0), (f64::NAN, 0.0)] {
            let err = t.forward(lon, lat).unwrap_err();
            assert!(err.is_domain_error(), "({}, {}) gave {:?}", lon, lat, err);
        }
    }

    #[test]
    fn test_longitude_wrapped() {
        let t = to_3857();
        let (e, _) = t.forward(200.0, 0.0).unwrap();
        assert!((e - -17_811_118.526_924).abs() < 1e-5, "easting {}", e);
        assert_eq!(t.forward(-190.0, 10.0).unwrap(), t.forward(170.0, 10.0).unwrap());
        assert_eq!(t.forward(360.0, 10.0).unwrap(), t.forward(0.0, 10.0).unwrap());

        // +/-180 are kept as given
        let (east, _) = t.forward(180.0, 0.0).unwrap();
        let (west, _) = t.forward(-180.0, 0.0).unwrap();
        assert!(east > 0.0 && west < 0.0);

        let geo = Transformation::from_identifiers("EPSG:4326", "EPSG:4326").unwrap();
        assert_eq!(geo.forward(270.0, 5.0).unwrap(), (-90.0, 5.0));
    }

    #[test]
    fn test_closure_transform() {
        let stub = |a: f64, b: f64| -> ProjectionResult<(f64, f64)> { Ok((a * 2.0, b * 3.0)) };
        assert_eq!(stub.forward(1.0, 1.0).unwrap(), (2.0, 3.0));
    }
}
