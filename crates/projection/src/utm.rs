//! UTM zone lookup.

/// UTM zone number (1-60) containing the point, or `None` outside the
/// latitude band UTM is defined for (80°S to 84°N).
///
/// Honors the Norway (32V) and Svalbard (31X-37X) exceptions.
pub fn zone(lon: f64, lat: f64) -> Option<u8> {
    if !lon.is_finite() || !(-80.0..84.0).contains(&lat) {
        return None;
    }
    if (56.0..64.0).contains(&lat) && (3.0..12.0).contains(&lon) {
        return Some(32);
    }
    if (72.0..84.0).contains(&lat) && (0.0..42.0).contains(&lon) {
        return Some(match lon {
            l if l < 9.0 => 31,
            l if l < 21.0 => 33,
            l if l < 33.0 => 35,
            _ => 37,
        });
    }
    let lon = (lon + 180.0).rem_euclid(360.0);
    Some((lon / 6.0) as u8 % 60 + 1)
}
