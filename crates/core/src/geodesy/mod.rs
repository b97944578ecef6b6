//! Spherical geodesy on a mean-radius Earth.
//!
//! Forward problem (destination from origin, bearing and distance), plus the
//! inverse helpers used to check projected geometry. Degrees at the
//! boundary, radians inside.

pub mod arrow;

pub use arrow::{build_arrow, head_length, shaft_length, ArrowGeometry};

use crate::core_types::{Degrees, GeoPoint, Kilometers, Radians};

/// Mean Earth radius (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Wrap a longitude into (-180, 180].
pub fn normalize_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 540.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        180.0
    } else {
        wrapped
    }
}

/// Point reached by travelling `distance` from `origin` along the great
/// circle with initial `bearing` (clockwise from true north).
pub fn destination_point(origin: GeoPoint, bearing: Degrees, distance: Kilometers) -> GeoPoint {
    let lat1 = origin.lat.to_radians();
    let lon1 = origin.lon.to_radians();
    let theta = bearing.to_radians();
    let delta = *distance / EARTH_RADIUS_KM;

    let sin_lat2 = lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos();
    let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();
    let lon2 = lon1
        + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

    GeoPoint::new(lat2.to_degrees(), normalize_longitude(lon2.to_degrees()))
}

/// Great-circle distance between two points (haversine).
pub fn distance_between(a: GeoPoint, b: GeoPoint) -> Kilometers {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    Kilometers::new(EARTH_RADIUS_KM * c)
}

/// Initial great-circle bearing from `a` to `b`, in [0, 360).
pub fn bearing_between(a: GeoPoint, b: GeoPoint) -> Degrees {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
    Radians::new(y.atan2(x)).to_degrees().normalized()
}
