//! Normal aspect Mercator projection.
//!
//! On a sphere this is the projection behind EPSG:3857 ("Web Mercator"):
//! geographic coordinates on the WGS84 datum are projected as if they lay on a
//! sphere whose radius is the WGS84 semi-major axis. With a non-zero
//! eccentricity it is the ellipsoidal Mercator of EPSG:3395 ("World Mercator").

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::ellipsoid::Ellipsoid;

/// Web Mercator sphere radius (meters)
pub const WEB_MERCATOR_RADIUS: f64 = 6_378_137.0;

/// Convergence tolerance on latitude in `reverse` (radians)
const LAT_TOLERANCE: f64 = 1e-12;

const MAX_ITERATIONS: usize = 15;

/// Mercator projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mercator {
    /// Semi-major axis, or sphere radius (meters)
    pub a: f64,
    /// First eccentricity, zero on a sphere
    pub e: f64,
    /// Scale factor on the equator
    pub k0: f64,
    /// Central meridian in radians
    pub lon0: f64,
    /// False easting (meters)
    pub false_easting: f64,
    /// False northing (meters)
    pub false_northing: f64,
}

impl Mercator {
    pub fn spherical(radius: f64) -> Self {
        Self {
            a: radius,
            e: 0.0,
            k0: 1.0,
            lon0: 0.0,
            false_easting: 0.0,
            false_northing: 0.0,
        }
    }

    pub fn ellipsoidal(ellipsoid: &Ellipsoid) -> Self {
        Self {
            e: ellipsoid.eccentricity(),
            ..Self::spherical(ellipsoid.a)
        }
    }

    /// EPSG:3857 / EPSG:900913.
    pub fn web_mercator() -> Self {
        Self::spherical(WEB_MERCATOR_RADIUS)
    }

    /// EPSG:3395.
    pub fn world_mercator() -> Self {
        Self::ellipsoidal(&Ellipsoid::wgs84())
    }

    /// Set the scale factor so the parallel `lat_ts` (radians) is true to scale.
    pub fn with_true_scale_latitude(mut self, lat_ts: f64) -> Self {
        let (sin_ts, cos_ts) = lat_ts.sin_cos();
        self.k0 = cos_ts / (1.0 - self.e * self.e * sin_ts * sin_ts).sqrt();
        self
    }

    pub fn is_spherical(&self) -> bool {
        self.e == 0.0
    }

    /// Project longitude and latitude (radians) to easting and northing.
    ///
    /// Returns `None` at or beyond the poles, where the northing diverges.
    pub fn forward(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        if !lon.is_finite() || !lat.is_finite() || lat.abs() >= FRAC_PI_2 {
            return None;
        }
        let scale = self.k0 * self.a;
        let mut psi = (FRAC_PI_4 + lat / 2.0).tan().ln();
        if !self.is_spherical() {
            psi -= self.e * (self.e * lat.sin()).atanh();
        }

        let easting = self.false_easting + scale * (lon - self.lon0);
        let northing = self.false_northing + scale * psi;
        if easting.is_finite() && northing.is_finite() {
            Some((easting, northing))
        } else {
            None
        }
    }

    /// Unproject easting and northing to longitude and latitude (radians).
    pub fn reverse(&self, easting: f64, northing: f64) -> (f64, f64) {
        let scale = self.k0 * self.a;
        let lon = (easting - self.false_easting) / scale + self.lon0;
        let t = (-(northing - self.false_northing) / scale).exp();

        let mut lat = FRAC_PI_2 - 2.0 * t.atan();
        if self.is_spherical() {
            return (lon, lat);
        }
        let half_e = self.e / 2.0;
        for _ in 0..MAX_ITERATIONS {
            let es = self.e * lat.sin();
            let next = FRAC_PI_2 - 2.0 * (t * ((1.0 - es) / (1.0 + es)).powf(half_e)).atan();
            let done = (next - lat).abs() < LAT_TOLERANCE;
            lat = next;
            if done {
                break;
            }
        }
        (lon, lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin() {
        let sm = Mercator::web_mercator();
        let (e, n) = sm.forward(0.0, 0.0).unwrap();
        assert!(e.abs() < 1e-9);
        assert!(n.abs() < 1e-9);
    }

    #[test]
    fn test_known_points() {
        let sm = Mercator::web_mercator();
        let cases = [
            (50.0_f64, 10.0_f64, 5_565_974.539_664, 1_118_889.974_858),
            (-111.0429, 45.677, -12_361_239.084_208, 5_728_738.469_095),
        ];

        for (lon, lat, e, n) in cases {
            let (got_e, got_n) = sm.forward(lon.to_radians(), lat.to_radians()).unwrap();
            assert!((got_e - e).abs() < 1e-4, "easting {} vs {}", got_e, e);
            assert!((got_n - n).abs() < 1e-3, "northing {} vs {}", got_n, n);

            let (back_lon, back_lat) = sm.reverse(e, n);
            assert!((back_lon - lon.to_radians()).abs() < 1e-10);
            assert!((back_lat - lat.to_radians()).abs() < 1e-10);
        }
    }

    #[test]
    fn test_world_mercator() {
        let wm = Mercator::world_mercator();
        assert!(!wm.is_spherical());
        let cases = [
            (10.0_f64, 45.0_f64, 1_113_194.907_933, 5_591_295.918_553),
            (-111.0429, 45.677, -12_361_239.084_208, 5_698_157.069_445),
        ];

        for (lon, lat, e, n) in cases {
            let (got_e, got_n) = wm.forward(lon.to_radians(), lat.to_radians()).unwrap();
            assert!((got_e - e).abs() < 1e-5, "easting {} vs {}", got_e, e);
            assert!((got_n - n).abs() < 1e-5, "northing {} vs {}", got_n, n);

            let (back_lon, back_lat) = wm.reverse(got_e, got_n);
            assert!((back_lon - lon.to_radians()).abs() < 1e-10);
            assert!((back_lat - lat.to_radians()).abs() < 1e-10);
        }
    }

    #[test]
    fn test_true_scale_latitude() {
        let wm = Mercator::world_mercator().with_true_scale_latitude(30.0_f64.to_radians());
        assert!((wm.k0 - 0.866_751_002_572_199).abs() < 1e-12, "k0 = {}", wm.k0);
        let (e, n) = wm.forward(10.0_f64.to_radians(), 45.0_f64.to_radians()).unwrap();
        assert!((e - 964_862.802_509).abs() < 1e-5);
        assert!((n - 4_846_261.343_084).abs() < 1e-5);
    }

    #[test]
    fn test_poles_rejected() {
        let sm = Mercator::web_mercator();
        assert!(sm.forward(0.0, FRAC_PI_2).is_none());
        assert!(sm.forward(0.0, -100.0_f64.to_radians()).is_none());
        assert!(sm.forward(f64::NAN, 0.0).is_none());
        assert!(Mercator::world_mercator().forward(0.0, -FRAC_PI_2).is_none());
    }
}
