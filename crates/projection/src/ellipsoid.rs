//! Reference ellipsoids.

use crate::error::{ProjectionError, ProjectionResult};

/// An ellipsoid of revolution given by its semi-major and semi-minor axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    pub name: &'static str,
    /// Semi-major axis (meters)
    pub a: f64,
    /// Semi-minor axis (meters)
    pub b: f64,
    /// First eccentricity squared
    pub e2: f64,
    /// Third flattening, (a - b) / (a + b)
    pub n: f64,
}

impl Ellipsoid {
    pub fn new(name: &'static str, a: f64, b: f64) -> Self {
        Self {
            name,
            a,
            b,
            e2: (a * a - b * b) / (a * a),
            n: (a - b) / (a + b),
        }
    }

    /// Look up an ellipsoid by its PROJ `+ellps=` name.
    pub fn by_name(name: &str) -> ProjectionResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "airy" => Ok(Self::airy_1830()),
            "mod_airy" => Ok(Self::airy_1830_modified()),
            "intl" | "hayford" => Ok(Self::international_1924()),
            "grs80" => Ok(Self::grs80()),
            "wgs84" => Ok(Self::wgs84()),
            _ => Err(ProjectionError::UnknownEllipsoid(name.to_string())),
        }
    }

    /// Build an ellipsoid from explicit axes, as given by `+a=` and `+b=`.
    pub fn from_axes(a: f64, b: f64) -> ProjectionResult<Self> {
        if !(a.is_finite() && b.is_finite()) || a <= 0.0 || b <= 0.0 || b > a {
            return Err(ProjectionError::invalid(
                "a/b",
                format!("need 0 < b <= a, got a={}, b={}", a, b),
            ));
        }
        Ok(Self::new("custom", a, b))
    }

    /// Build an ellipsoid from its semi-major axis and inverse flattening,
    /// the way EPSG defines most of them.
    pub fn from_inverse_flattening(name: &'static str, a: f64, rf: f64) -> Self {
        Self::new(name, a, a * (1.0 - 1.0 / rf))
    }

    /// First eccentricity.
    pub fn eccentricity(&self) -> f64 {
        self.e2.sqrt()
    }

    /// EPSG:7001
    pub fn airy_1830() -> Self {
        Self::from_inverse_flattening("Airy1830", 6_377_563.396, 299.324_964_6)
    }

    /// EPSG:7002
    pub fn airy_1830_modified() -> Self {
        Self::from_inverse_flattening("Airy1830Modified", 6_377_340.189, 299.324_964_6)
    }

    pub fn international_1924() -> Self {
        Self::from_inverse_flattening("International1924", 6_378_388.0, 297.0)
    }

    pub fn grs80() -> Self {
        Self::from_inverse_flattening("GRS80", 6_378_137.0, 298.257_222_101)
    }

    pub fn wgs84() -> Self {
        Self::from_inverse_flattening("WGS84", 6_378_137.0, 298.257_223_563)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_constants() {
        let e = Ellipsoid::airy_1830();
        assert!((e.b - 6_356_256.909_237).abs() < 1e-6, "b = {}", e.b);
        assert!((e.e2 - 0.006_670_539_999_985).abs() < 1e-12, "e2 = {}", e.e2);
        assert!((e.n - 0.001_673_220_310_322).abs() < 1e-12, "n = {}", e.n);

        let w = Ellipsoid::wgs84();
        assert!((w.eccentricity() - 0.081_819_190_842_62).abs() < 1e-12);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(Ellipsoid::by_name("WGS84").unwrap(), Ellipsoid::wgs84());
        assert_eq!(Ellipsoid::by_name("airy").unwrap(), Ellipsoid::airy_1830());
        assert!(Ellipsoid::by_name("bessel-ish").is_err());
    }

    #[test]
    fn test_from_axes_rejects_inverted() {
        assert!(Ellipsoid::from_axes(6_356_752.0, 6_378_137.0).is_err());
        assert!(Ellipsoid::from_axes(6_378_137.0, 6_378_137.0).is_ok());
    }
}
