//! Transverse Mercator projection.
//!
//! Uses Krüger's series in the third flattening n, carried to n^6 as given by
//! Karney ("Transverse Mercator with an accuracy of a few nanometers", 2011).
//! PROJ's default `tmerc` algorithm is the same series. Truncation error is a
//! few nanometres within 3900 km of the central meridian, so `forward` rejects
//! points more than [`MAX_MERIDIAN_OFFSET_DEG`] away from it.
//!
//! Projection parameters:
//! - Scale factor on the central meridian (f0)
//! - True origin: lat0, lon0
//! - False origin: e0 (false easting), n0 (false northing)
//! - Ellipsoid

use std::f64::consts::{FRAC_PI_2, PI};

use crate::ellipsoid::Ellipsoid;

/// Largest longitude offset from the central meridian `forward` accepts (degrees)
pub const MAX_MERIDIAN_OFFSET_DEG: f64 = 35.0;

/// Relative tolerance when solving for latitude in `reverse`
const TAU_TOLERANCE: f64 = 1e-12;

const MAX_ITERATIONS: usize = 10;

/// Transverse Mercator projection parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TransverseMercator {
    /// Scale factor on the central meridian
    pub f0: f64,
    /// Latitude of true origin in radians
    pub lat0: f64,
    /// Longitude of true origin (central meridian) in radians
    pub lon0: f64,
    /// False easting (meters)
    pub e0: f64,
    /// False northing (meters)
    pub n0: f64,
    pub ellipsoid: Ellipsoid,
}

impl TransverseMercator {
    /// Create a projection from parameters given in degrees.
    pub fn new(f0: f64, lat0_deg: f64, lon0_deg: f64, e0: f64, n0: f64, ellipsoid: Ellipsoid) -> Self {
        Self {
            f0,
            lat0: lat0_deg.to_radians(),
            lon0: lon0_deg.to_radians(),
            e0,
            n0,
            ellipsoid,
        }
    }

    /// OSGB 1936 / British National Grid (EPSG:27700).
    pub fn british_national_grid() -> Self {
        Self::new(0.999_601_271_7, 49.0, -2.0, 400_000.0, -100_000.0, Ellipsoid::airy_1830())
    }

    /// TM75 / Irish Grid (EPSG:29903).
    pub fn irish_grid() -> Self {
        Self::new(1.000_035, 53.5, -8.0, 200_000.0, 250_000.0, Ellipsoid::airy_1830_modified())
    }

    /// WGS 84 / UTM zone 1-60, north or south hemisphere.
    pub fn utm(zone: u8, south: bool) -> Self {
        let lon0 = 6.0 * f64::from(zone) - 183.0;
        let n0 = if south { 10_000_000.0 } else { 0.0 };
        Self::new(0.9996, 0.0, lon0, 500_000.0, n0, Ellipsoid::wgs84())
    }

    /// Scaled meridian distance from the equator to the true origin, in
    /// units of the rectifying radius.
    fn origin_arc(&self, series: &KrugerSeries) -> f64 {
        let xi0 = conformal_tau(self.lat0.tan(), self.ellipsoid.eccentricity()).atan();
        series.project(xi0, 0.0).0
    }

    /// Project latitude and longitude (radians) to easting and northing.
    ///
    /// Returns `None` for latitudes beyond the poles and for points more
    /// than [`MAX_MERIDIAN_OFFSET_DEG`] from the central meridian.
    pub fn forward(&self, lat: f64, lon: f64) -> Option<(f64, f64)> {
        if !lat.is_finite() || !lon.is_finite() || lat.abs() > FRAC_PI_2 {
            return None;
        }
        let dlon = normalize_longitude(lon - self.lon0);
        if dlon.abs() > MAX_MERIDIAN_OFFSET_DEG.to_radians() {
            return None;
        }

        let series = KrugerSeries::new(self.ellipsoid.n);
        let tau_p = conformal_tau(lat.tan(), self.ellipsoid.eccentricity());
        let (sin_dlon, cos_dlon) = dlon.sin_cos();
        let xi = tau_p.atan2(cos_dlon);
        let eta = (sin_dlon / tau_p.hypot(cos_dlon)).asinh();

        let (x, y) = series.project(xi, eta);
        let scale = self.f0 * series.rectifying_radius(self.ellipsoid.a);
        let easting = self.e0 + scale * y;
        let northing = self.n0 + scale * (x - self.origin_arc(&series));

        if easting.is_finite() && northing.is_finite() {
            Some((easting, northing))
        } else {
            None
        }
    }

    /// Unproject easting and northing to latitude and longitude (radians).
    pub fn reverse(&self, easting: f64, northing: f64) -> (f64, f64) {
        let series = KrugerSeries::new(self.ellipsoid.n);
        let scale = self.f0 * series.rectifying_radius(self.ellipsoid.a);
        let xi = (northing - self.n0) / scale + self.origin_arc(&series);
        let eta = (easting - self.e0) / scale;

        let (xi_p, eta_p) = series.unproject(xi, eta);
        let (sin_xi, cos_xi) = xi_p.sin_cos();
        let sinh_eta = eta_p.sinh();
        let tau_p = sin_xi / sinh_eta.hypot(cos_xi);

        let tau = geodetic_tau(tau_p, &self.ellipsoid);
        (tau.atan(), self.lon0 + sinh_eta.atan2(cos_xi))
    }
}

/// Krüger series coefficients for one ellipsoid.
struct KrugerSeries {
    n: f64,
    alpha: [f64; 6],
    beta: [f64; 6],
}

impl KrugerSeries {
    fn new(n: f64) -> Self {
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let n5 = n4 * n;
        let n6 = n5 * n;

        let alpha = [
            n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0 + 41.0 * n4 / 180.0 - 127.0 * n5 / 288.0
                + 7891.0 * n6 / 37800.0,
            13.0 * n2 / 48.0 - 3.0 * n3 / 5.0 + 557.0 * n4 / 1440.0 + 281.0 * n5 / 630.0
                - 1_983_433.0 * n6 / 1_935_360.0,
            61.0 * n3 / 240.0 - 103.0 * n4 / 140.0 + 15061.0 * n5 / 26880.0
                + 167_603.0 * n6 / 181_440.0,
            49561.0 * n4 / 161_280.0 - 179.0 * n5 / 168.0 + 6_601_661.0 * n6 / 7_257_600.0,
            34729.0 * n5 / 80640.0 - 3_418_889.0 * n6 / 1_995_840.0,
            212_378_941.0 * n6 / 319_334_400.0,
        ];
        let beta = [
            n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0 - n4 / 360.0 - 81.0 * n5 / 512.0
                + 96199.0 * n6 / 604_800.0,
            n2 / 48.0 + n3 / 15.0 - 437.0 * n4 / 1440.0 + 46.0 * n5 / 105.0
                - 1_118_711.0 * n6 / 3_870_720.0,
            17.0 * n3 / 480.0 - 37.0 * n4 / 840.0 - 209.0 * n5 / 4480.0 + 5569.0 * n6 / 90720.0,
            4397.0 * n4 / 161_280.0 - 11.0 * n5 / 504.0 - 830_251.0 * n6 / 7_257_600.0,
            4583.0 * n5 / 161_280.0 - 108_847.0 * n6 / 3_991_680.0,
            20_648_693.0 * n6 / 638_668_800.0,
        ];
        Self { n, alpha, beta }
    }

    /// Radius of the sphere with the same meridian length as the ellipsoid.
    fn rectifying_radius(&self, a: f64) -> f64 {
        let n2 = self.n * self.n;
        a / (1.0 + self.n) * (1.0 + n2 / 4.0 + n2 * n2 / 64.0 + n2 * n2 * n2 / 256.0)
    }

    /// Spherical transverse Mercator (xi', eta') to the ellipsoidal plane (xi, eta).
    fn project(&self, xi: f64, eta: f64) -> (f64, f64) {
        let mut x = xi;
        let mut y = eta;
        for (j, alpha) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            x += alpha * (k * xi).sin() * (k * eta).cosh();
            y += alpha * (k * xi).cos() * (k * eta).sinh();
        }
        (x, y)
    }

    fn unproject(&self, xi: f64, eta: f64) -> (f64, f64) {
        let mut x = xi;
        let mut y = eta;
        for (j, beta) in self.beta.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            x -= beta * (k * xi).sin() * (k * eta).cosh();
            y -= beta * (k * xi).cos() * (k * eta).sinh();
        }
        (x, y)
    }
}

/// Tangent of the conformal latitude from the tangent of the geodetic one.
fn conformal_tau(tau: f64, e: f64) -> f64 {
    let sigma = (e * (e * tau / tau.hypot(1.0)).atanh()).sinh();
    tau * sigma.hypot(1.0) - sigma * tau.hypot(1.0)
}

/// Inverse of [`conformal_tau`], by Newton's method.
fn geodetic_tau(tau_p: f64, ellipsoid: &Ellipsoid) -> f64 {
    let e = ellipsoid.eccentricity();
    let one_minus_e2 = 1.0 - ellipsoid.e2;
    let mut tau = tau_p;
    for _ in 0..MAX_ITERATIONS {
        let tau_i = conformal_tau(tau, e);
        let step = (tau_p - tau_i) / tau_i.hypot(1.0) * (1.0 + one_minus_e2 * tau * tau)
            / (one_minus_e2 * tau.hypot(1.0));
        tau += step;
        if step.abs() <= TAU_TOLERANCE * tau.abs().max(1.0) {
            break;
        }
    }
    tau
}

/// Wrap a longitude difference into [-pi, pi).
fn normalize_longitude(dlon: f64) -> f64 {
    (dlon + PI).rem_euclid(2.0 * PI) - PI
}
