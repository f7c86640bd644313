use crate::models::Location;

/// Mean earth radius used for distance estimates
const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// Below this resultant length the unit vectors are considered to cancel out
const DEGENERATE_RESULTANT: f64 = 1e-9;

/// Initial great-circle bearing from `from` to `to`.
/// Degrees in [-180, 180], 0 = north, clockwise.
pub fn bearing(from: &Location, to: &Location) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let dlon = (to.longitude - from.longitude).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    y.atan2(x).to_degrees()
}

/// Convert a bearing (or any angle) to an azimuth in [0, 360)
pub fn bearing_to_azimuth(bearing: f64) -> f64 {
    let azimuth = bearing.rem_euclid(360.0);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if azimuth >= 360.0 {
        0.0
    } else {
        azimuth
    }
}

/// Circular mean of a set of angles in degrees, in [-180, 180].
///
/// When the angles cancel out (e.g. two peers in opposite directions) the
/// first angle is returned.
pub fn average_angles(angles: &[f64]) -> Option<f64> {
    let first = *angles.first()?;
    let (sin_sum, cos_sum) = angles.iter().fold((0.0_f64, 0.0_f64), |(s, c), a| {
        let r = a.to_radians();
        (s + r.sin(), c + r.cos())
    });
    if sin_sum.hypot(cos_sum) < DEGENERATE_RESULTANT {
        return Some(first);
    }
    Some(sin_sum.atan2(cos_sum).to_degrees())
}

/// Haversine distance in meters
pub fn distance_meters(from: &Location, to: &Location) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (to.longitude - from.longitude).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_METERS * c
}
