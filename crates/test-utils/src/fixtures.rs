//! Reference projection values.
//!
//! Published or independently computed (lon, lat) -> (easting, northing)
//! pairs used to check numeric fidelity of generated tables.

/// A known forward projection result.
#[derive(Debug, Clone, Copy)]
pub struct ReferencePoint {
    pub crs: &'static str,
    pub lon: f64,
    pub lat: f64,
    pub easting: f64,
    pub northing: f64,
}

/// 52°39'27.2531"N 1°43'4.5177"E, the Ordnance Survey worked example.
pub const OS_EXAMPLE_LAT: f64 = 52.0 + 39.0 / 60.0 + 27.2531 / 3600.0;
pub const OS_EXAMPLE_LON: f64 = 1.0 + 43.0 / 60.0 + 4.5177 / 3600.0;

pub const REFERENCE_POINTS: &[ReferencePoint] = &[
    ReferencePoint {
        crs: "EPSG:3857",
        lon: 0.0,
        lat: 0.0,
        easting: 0.0,
        northing: 0.0,
    },
    ReferencePoint {
        crs: "EPSG:3857",
        lon: 50.0,
        lat: 10.0,
        easting: 5_565_974.539_664,
        northing: 1_118_889.974_858,
    },
    ReferencePoint {
        crs: "EPSG:3857",
        lon: -111.0429,
        lat: 45.677,
        easting: -12_361_239.084_208,
        northing: 5_728_738.469_095,
    },
    ReferencePoint {
        crs: "EPSG:3857",
        lon: OS_EXAMPLE_LON,
        lat: OS_EXAMPLE_LAT,
        easting: 191_238.155_879_440_98,
        northing: 6_919_907.180_756_924,
    },
    ReferencePoint {
        crs: "EPSG:27700",
        lon: OS_EXAMPLE_LON,
        lat: OS_EXAMPLE_LAT,
        easting: 651_409.903,
        northing: 313_177.270,
    },
    ReferencePoint {
        crs: "EPSG:3395",
        lon: 10.0,
        lat: 45.0,
        easting: 1_113_194.907_933,
        northing: 5_591_295.918_553,
    },
    ReferencePoint {
        crs: "EPSG:32631",
        lon: 9.0,
        lat: 45.0,
        easting: 972_891.791_269,
        northing: 5_000_491.005_461,
    },
    ReferencePoint {
        crs: "EPSG:32633",
        lon: 13.4,
        lat: 52.5,
        easting: 391_390.731_340,
        northing: 5_817_855.240_817,
    },
    ReferencePoint {
        crs: "EPSG:32734",
        lon: 18.4241,
        lat: -33.9249,
        easting: 261_881.598_524,
        northing: 6_243_182.354_518,
    },
];
