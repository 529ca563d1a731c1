//! Coordinate Reference System registry and parsing.
//!
//! A [`Crs`] is built from an identifier string. Two forms are accepted:
//! - registered codes: "EPSG:3857", "epsg:27700", "EPSG:32631"
//! - PROJ-style parameter strings: "+proj=tmerc +lat_0=49 +lon_0=-2 +k=0.9996012717 ..."

use std::collections::BTreeMap;
use std::fmt;

use crate::ellipsoid::Ellipsoid;
use crate::error::{ProjectionError, ProjectionResult};
use crate::mercator::Mercator;
use crate::transverse_mercator::TransverseMercator;
use crate::utm;

/// How a CRS maps geographic coordinates onto its own axes.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// Longitude/latitude in degrees
    Geographic,
    Mercator(Mercator),
    TransverseMercator(TransverseMercator),
}

/// A coordinate reference system.
#[derive(Debug, Clone, PartialEq)]
pub struct Crs {
    identifier: String,
    epsg: Option<u32>,
    projection: Projection,
}

impl Crs {
    /// Parse a CRS identifier.
    ///
    /// Accepts formats like:
    /// - "EPSG:4326"
    /// - "epsg:3857"
    /// - "+proj=utm +zone=31 +south"
    pub fn parse(identifier: &str) -> ProjectionResult<Self> {
        let trimmed = identifier.trim();
        if trimmed.starts_with('+') {
            return Self::from_proj_string(trimmed);
        }

        let upper = trimmed.to_uppercase();
        let code = upper
            .strip_prefix("EPSG:")
            .and_then(|c| c.parse::<u32>().ok())
            .ok_or_else(|| ProjectionError::UnknownCrs(identifier.to_string()))?;
        Self::from_epsg(code)
    }

    /// Look up a registered EPSG code.
    pub fn from_epsg(code: u32) -> ProjectionResult<Self> {
        let projection = match code {
            4326 => Projection::Geographic,
            3395 => Projection::Mercator(Mercator::world_mercator()),
            3857 | 900913 => Projection::Mercator(Mercator::web_mercator()),
            27700 => Projection::TransverseMercator(TransverseMercator::british_national_grid()),
            29903 => Projection::TransverseMercator(TransverseMercator::irish_grid()),
            32601..=32660 => Projection::TransverseMercator(TransverseMercator::utm((code - 32600) as u8, false)),
            32701..=32760 => Projection::TransverseMercator(TransverseMercator::utm((code - 32700) as u8, true)),
            _ => return Err(ProjectionError::UnknownCrs(format!("EPSG:{}", code))),
        };

        Ok(Self {
            identifier: format!("EPSG:{}", code),
            epsg: Some(code),
            projection,
        })
    }

    /// WGS 84 geographic coordinates (EPSG:4326).
    pub fn wgs84() -> Self {
        Self {
            identifier: "EPSG:4326".to_string(),
            epsg: Some(4326),
            projection: Projection::Geographic,
        }
    }

    /// WGS 84 / UTM for an explicit zone.
    pub fn utm(zone: u8, south: bool) -> ProjectionResult<Self> {
        if !(1..=60).contains(&zone) {
            return Err(ProjectionError::invalid("zone", format!("{} is not in 1..=60", zone)));
        }
        let base = if south { 32700 } else { 32600 };
        Self::from_epsg(base + u32::from(zone))
    }

    /// The WGS 84 / UTM CRS whose zone contains the point.
    pub fn utm_for(lon: f64, lat: f64) -> Option<Self> {
        let zone = utm::zone(lon, lat)?;
        Self::utm(zone, lat < 0.0).ok()
    }

    /// Parse a PROJ-style "+key=value" parameter string.
    pub fn from_proj_string(definition: &str) -> ProjectionResult<Self> {
        let params = ProjParams::parse(definition)?;
        let name = params
            .get("proj")
            .ok_or_else(|| ProjectionError::UnknownCrs(definition.to_string()))?;

        let projection = match name {
            "longlat" | "latlong" | "lonlat" | "latlon" => {
                params.check(&[])?;
                Projection::Geographic
            }
            "merc" => {
                params.check(&["lon_0", "x_0", "y_0", "k", "k_0", "lat_ts"])?;
                let mut merc = Mercator::ellipsoidal(&params.ellipsoid()?);
                let scale = params.scale_factor()?;
                if let Some(lat_ts) = params.float("lat_ts")? {
                    if lat_ts.abs() >= 90.0 {
                        return Err(ProjectionError::invalid("lat_ts", format!("{} is not in (-90, 90)", lat_ts)));
                    }
                    merc = merc.with_true_scale_latitude(lat_ts.to_radians());
                    // +k alongside +lat_ts must agree with it
                    if scale.is_some_and(|k| (k - merc.k0).abs() > 1e-12) {
                        return Err(ProjectionError::invalid("k", "conflicts with +lat_ts"));
                    }
                } else if let Some(k) = scale {
                    merc.k0 = k;
                }
                merc.lon0 = params.float("lon_0")?.unwrap_or(0.0).to_radians();
                merc.false_easting = params.float("x_0")?.unwrap_or(0.0);
                merc.false_northing = params.float("y_0")?.unwrap_or(0.0);
                Projection::Mercator(merc)
            }
            "webmerc" => {
                params.check(&["lon_0", "x_0", "y_0"])?;
                let mut merc = Mercator::spherical(params.ellipsoid()?.a);
                merc.lon0 = params.float("lon_0")?.unwrap_or(0.0).to_radians();
                merc.false_easting = params.float("x_0")?.unwrap_or(0.0);
                merc.false_northing = params.float("y_0")?.unwrap_or(0.0);
                Projection::Mercator(merc)
            }
            "tmerc" => {
                params.check(&["lat_0", "lon_0", "k", "k_0", "x_0", "y_0"])?;
                Projection::TransverseMercator(TransverseMercator::new(
                    params.scale_factor()?.unwrap_or(1.0),
                    params.float("lat_0")?.unwrap_or(0.0),
                    params.float("lon_0")?.unwrap_or(0.0),
                    params.float("x_0")?.unwrap_or(0.0),
                    params.float("y_0")?.unwrap_or(0.0),
                    params.ellipsoid()?,
                ))
            }
            "utm" => {
                params.check(&["zone", "south"])?;
                let zone = params
                    .float("zone")?
                    .ok_or_else(|| ProjectionError::invalid("zone", "required for +proj=utm"))?;
                if zone.fract() != 0.0 || !(1.0..=60.0).contains(&zone) {
                    return Err(ProjectionError::invalid("zone", format!("{} is not in 1..=60", zone)));
                }
                let mut tm = TransverseMercator::utm(zone as u8, params.flag("south"));
                tm.ellipsoid = params.ellipsoid()?;
                Projection::TransverseMercator(tm)
            }
            other => {
                return Err(ProjectionError::invalid("proj", format!("unsupported projection '{}'", other)))
            }
        };

        Ok(Self {
            identifier: definition.split_whitespace().collect::<Vec<_>>().join(" "),
            epsg: None,
            projection,
        })
    }

    /// EPSG code, if this CRS came from the registry.
    pub fn epsg(&self) -> Option<u32> {
        self.epsg
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Check if this is a geographic (lon/lat) CRS.
    pub fn is_geographic(&self) -> bool {
        matches!(self.projection, Projection::Geographic)
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier)
    }
}

impl std::str::FromStr for Crs {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Keys any `+proj=` string may carry. Their values are checked in
/// [`ProjParams::check`].
const COMMON_KEYS: &[&str] = &[
    "proj", "ellps", "datum", "a", "b", "R", "units", "no_defs", "wktext", "type", "nadgrids", "towgs84",
];

/// Parsed "+key=value" tokens.
struct ProjParams<'a> {
    values: BTreeMap<&'a str, Option<&'a str>>,
}

impl<'a> ProjParams<'a> {
    fn parse(definition: &'a str) -> ProjectionResult<Self> {
        let mut values = BTreeMap::new();
        for token in definition.split_whitespace() {
            let token = token
                .strip_prefix('+')
                .ok_or_else(|| ProjectionError::invalid(token, "expected '+key' or '+key=value'"))?;
            match token.split_once('=') {
                Some((key, value)) => values.insert(key, Some(value)),
                None => values.insert(token, None),
            };
        }
        Ok(Self { values })
    }

    /// Reject keys this engine would otherwise ignore, and values of common
    /// keys that would change the result.
    fn check(&self, allowed: &[&str]) -> ProjectionResult<()> {
        for key in self.values.keys() {
            if !COMMON_KEYS.contains(key) && !allowed.contains(key) {
                return Err(ProjectionError::invalid(key, "unsupported parameter"));
            }
        }
        self.expect_value("datum", &["WGS84"])?;
        self.expect_value("units", &["m"])?;
        self.expect_value("nadgrids", &["@null"])?;
        self.expect_value("type", &["crs"])?;

        if let Some(raw) = self.values.get("towgs84") {
            let zero_shift = raw
                .unwrap_or("")
                .split(',')
                .all(|v| v.trim().parse::<f64>().map_or(false, |v| v == 0.0));
            if !zero_shift {
                return Err(ProjectionError::invalid("towgs84", "datum shifts are not supported"));
            }
        }
        Ok(())
    }

    fn expect_value(&self, key: &str, accepted: &[&str]) -> ProjectionResult<()> {
        match self.values.get(key) {
            None => Ok(()),
            Some(Some(value)) if accepted.iter().any(|a| value.eq_ignore_ascii_case(a)) => Ok(()),
            Some(value) => Err(ProjectionError::invalid(
                key,
                format!("unsupported value '{}'", value.unwrap_or("")),
            )),
        }
    }

    fn get(&self, key: &str) -> Option<&'a str> {
        self.values.get(key).copied().flatten()
    }

    fn flag(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn float(&self, key: &str) -> ProjectionResult<Option<f64>> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Some(v)),
                _ => Err(ProjectionError::invalid(key, format!("'{}' is not a number", raw))),
            },
        }
    }

    /// `+k_0`, or its older spelling `+k`.
    fn scale_factor(&self) -> ProjectionResult<Option<f64>> {
        let scale = match self.float("k_0")? {
            Some(k) => Some(k),
            None => self.float("k")?,
        };
        match scale {
            Some(k) if k <= 0.0 => Err(ProjectionError::invalid("k", "scale factor must be positive")),
            _ => Ok(scale),
        }
    }

    /// `+R` gives a sphere, then `+ellps`, then `+a`/`+b` (a sphere when `+b`
    /// is absent). Defaults to WGS84, as `+datum=WGS84` implies.
    fn ellipsoid(&self) -> ProjectionResult<Ellipsoid> {
        if let Some(radius) = self.float("R")? {
            return Ellipsoid::from_axes(radius, radius);
        }
        if let Some(name) = self.get("ellps") {
            return Ellipsoid::by_name(name);
        }
        match (self.float("a")?, self.float("b")?) {
            (Some(a), Some(b)) => Ellipsoid::from_axes(a, b),
            (Some(a), None) => Ellipsoid::from_axes(a, a),
            (None, Some(_)) => Err(ProjectionError::invalid("b", "given without +a")),
            (None, None) => Ok(Ellipsoid::wgs84()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_epsg() {
        assert!(Crs::parse("EPSG:4326").unwrap().is_geographic());
        assert_eq!(Crs::parse("epsg:3857").unwrap().epsg(), Some(3857));
        assert_eq!(Crs::parse(" EPSG:900913 ").unwrap().to_string(), "EPSG:900913");
        assert!(matches!(
            Crs::parse("EPSG:27700").unwrap().projection(),
            Projection::TransverseMercator(_)
        ));
    }

    #[test]
    fn test_unknown_crs() {
        assert!(matches!(Crs::parse("EPSG:99999"), Err(ProjectionError::UnknownCrs(_))));
        assert!(matches!(Crs::parse("EPSG:abc"), Err(ProjectionError::UnknownCrs(_))));
        assert!(matches!(Crs::parse("mercator"), Err(ProjectionError::UnknownCrs(_))));
        assert!(Crs::parse("EPSG:32661").is_err());
    }

    #[test]
    fn test_utm_codes() {
        let north = Crs::parse("EPSG:32631").unwrap();
        let south = Crs::parse("EPSG:32731").unwrap();
        match (north.projection(), south.projection()) {
            (Projection::TransverseMercator(n), Projection::TransverseMercator(s)) => {
                assert!((n.lon0 - 3.0_f64.to_radians()).abs() < 1e-12);
                assert_eq!(n.n0, 0.0);
                assert_eq!(s.n0, 10_000_000.0);
            }
            other => panic!("expected transverse mercator, got {:?}", other),
        }
        assert_eq!(Crs::utm_for(2.35, 48.85).unwrap().epsg(), Some(32631));
        assert_eq!(Crs::utm_for(151.2, -33.9).unwrap().epsg(), Some(32756));
        assert!(Crs::utm_for(0.0, 85.0).is_none());
    }

    #[test]
    fn test_proj_strings() {
        let geo = Crs::parse("+proj=longlat +datum=WGS84 +no_defs").unwrap();
        assert!(geo.is_geographic());
        assert_eq!(geo.epsg(), None);

        let merc = Crs::parse("+proj=merc +R=6378137").unwrap();
        assert_eq!(merc.projection(), Crs::parse("EPSG:3857").unwrap().projection());

        let bng = Crs::parse(
            "+proj=tmerc +lat_0=49 +lon_0=-2 +k=0.9996012717 +x_0=400000 +y_0=-100000 +ellps=airy",
        )
        .unwrap();
        assert_eq!(bng.projection(), Crs::parse("EPSG:27700").unwrap().projection());

        let utm = Crs::parse("+proj=utm +zone=31 +south").unwrap();
        assert_eq!(utm.projection(), Crs::parse("EPSG:32731").unwrap().projection());
    }

    #[test]
    fn test_bad_proj_strings() {
        assert!(Crs::parse("+proj=lcc +lat_1=33").is_err());
        assert!(Crs::parse("+proj=utm").is_err());
        assert!(Crs::parse("+proj=utm +zone=61").is_err());
        assert!(Crs::parse("+proj=tmerc +ellps=potato").is_err());
        assert!(Crs::parse("+proj=merc +R=abc").is_err());
        assert!(Crs::parse("+proj=merc R=1").is_err());
        assert!(Crs::parse("+datum=WGS84").is_err());
    }

    fn mercator(identifier: &str) -> Mercator {
        match Crs::parse(identifier).unwrap().projection() {
            Projection::Mercator(merc) => *merc,
            other => panic!("expected mercator, got {:?}", other),
        }
    }

    #[test]
    fn test_mercator_sphere_or_ellipsoid() {
        let web = Mercator::web_mercator();
        assert_eq!(mercator("+proj=webmerc +datum=WGS84"), web);
        assert_eq!(mercator("+proj=merc +a=6378137"), web);
        assert_eq!(
            mercator("+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +nadgrids=@null +wktext +no_defs"),
            web
        );

        let world = Mercator::world_mercator();
        assert_eq!(mercator("+proj=merc +ellps=WGS84"), world);
        assert_eq!(mercator("+proj=merc +datum=WGS84 +units=m +no_defs"), world);
        assert_eq!(mercator("+proj=merc +a=6378137 +b=6356752.314245179"), world);
        assert_eq!(Crs::parse("EPSG:3395").unwrap().projection(), &Projection::Mercator(world));
    }

    #[test]
    fn test_mercator_scale() {
        assert_eq!(mercator("+proj=merc +ellps=WGS84 +k_0=0.9").k0, 0.9);
        let ts = mercator("+proj=merc +ellps=WGS84 +lat_ts=30");
        assert!((ts.k0 - 0.866_751_002_572_199).abs() < 1e-12);
        assert!(Crs::parse("+proj=merc +lat_ts=30 +k=1").is_err());
        assert_eq!(mercator("+proj=merc +lat_ts=0 +k=1 +ellps=WGS84"), Mercator::world_mercator());
        assert!(Crs::parse("+proj=merc +lat_ts=90").is_err());
        assert!(Crs::parse("+proj=merc +k=0").is_err());
    }

    #[test]
    fn test_unsupported_parameters_rejected() {
        let cases = [
            "+proj=merc +datum=NAD27",
            "+proj=merc +units=ft",
            "+proj=merc +lat_0=10",
            "+proj=webmerc +k=0.5",
            "+proj=tmerc +lat_1=33",
            "+proj=utm +zone=31 +towgs84=446.448,-125.157,542.06",
            "+proj=longlat +nadgrids=ntv2_0.gsb",
            "+proj=longlat +pm=paris",
        ];
        for definition in cases {
            let err = Crs::parse(definition).unwrap_err();
            assert!(
                matches!(err, ProjectionError::InvalidParameter { .. }),
                "{} gave {:?}",
                definition,
                err
            );
        }
        assert!(Crs::parse("+proj=utm +zone=31 +towgs84=0,0,0").is_ok());
    }
}
