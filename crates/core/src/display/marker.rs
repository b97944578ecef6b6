//! Area-to-radius scaling for province markers.
//!
//! Radius grows with the square root of the area so that marker *area* is
//! roughly proportional to burned area.

use crate::config::MarkerStyle;
use crate::core_types::{Hectares, Pixels};

/// Marker radius for `area` relative to the largest area on the map.
///
/// Falls back to the minimum radius when `max_area` is not positive or
/// either value is non-finite. Non-decreasing in `area`.
pub fn marker_radius(area: Hectares, max_area: Hectares, style: &MarkerStyle) -> Pixels {
    let (area, max_area) = (*area, *max_area);
    if !area.is_finite() || !max_area.is_finite() || max_area <= 0.0 {
        return Pixels::new(style.min_radius_px);
    }
    let t = (area / max_area).max(0.0).sqrt().min(1.0);
    Pixels::new(style.min_radius_px + t * style.radius_range_px)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn radius(area: f64, max: f64) -> f64 {
        *marker_radius(Hectares::new(area), Hectares::new(max), &MarkerStyle::default())
    }

    #[test]
    fn test_bounds() {
        assert_eq!(radius(0.0, 100.0), 6.0);
        assert_eq!(radius(100.0, 100.0), 22.0);
        assert_eq!(radius(25.0, 100.0), 14.0);
        assert_eq!(radius(400.0, 100.0), 22.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(radius(10.0, 0.0), 6.0);
        assert_eq!(radius(0.0, 0.0), 6.0);
        assert_eq!(radius(f64::NAN, 10.0), 6.0);
        assert_eq!(radius(10.0, f64::INFINITY), 6.0);
        assert_eq!(radius(-5.0, 10.0), 6.0);
    }

    #[test]
    fn test_monotonic() {
        let max = 1000.0;
        let mut last = radius(0.0, max);
        for step in 1..=200 {
            let r = radius(f64::from(step) * 5.0, max);
            assert!(r >= last, "radius decreased at step {step}");
            last = r;
        }
        assert_eq!(last, 22.0);
    }
}
