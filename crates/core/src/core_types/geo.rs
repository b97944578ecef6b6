//! Geographic coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the Earth's surface in decimal degrees.
///
/// Latitude is in [-90, 90] and longitude in [-180, 180]. Points produced by
/// the geodesic projector always carry a longitude in (-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Create a new point from latitude and longitude in degrees
    #[inline]
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Create a point, rejecting non-finite or out-of-range coordinates
    #[must_use]
    pub fn checked(lat: f64, lon: f64) -> Option<Self> {
        if lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon)
        {
            Some(Self { lat, lon })
        } else {
            None
        }
    }

    /// `[lat, lon]` pair in the order map widgets expect for polylines
    #[inline]
    #[must_use]
    pub fn lat_lon(self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_rejects_out_of_range() {
        assert!(GeoPoint::checked(45.0, -75.0).is_some());
        assert!(GeoPoint::checked(91.0, 0.0).is_none());
        assert!(GeoPoint::checked(0.0, -180.5).is_none());
        assert!(GeoPoint::checked(f64::NAN, 0.0).is_none());
    }
}
