//! Wind-arrow geometry for the map overlay.
//!
//! The shaft starts at the chosen origin and runs along the predicted
//! heading; its length grows with wind speed within fixed bounds. Two barbs
//! swing back from the tip to form the arrowhead.

use serde::{Deserialize, Serialize};

use super::destination_point;
use crate::config::ArrowStyle;
use crate::core_types::{Degrees, GeoPoint, KilometersPerHour, Kilometers};
use crate::spread::{HeadingResult, WindInput};

/// Four-point arrow: shaft from `start` to `end`, head through the barbs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowGeometry {
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub left_barb: GeoPoint,
    pub right_barb: GeoPoint,
}

impl ArrowGeometry {
    /// Shaft polyline, origin to tip
    pub fn shaft(&self) -> [GeoPoint; 2] {
        [self.start, self.end]
    }

    /// Arrowhead polyline, left barb through the tip to the right barb
    pub fn head(&self) -> [GeoPoint; 3] {
        [self.left_barb, self.end, self.right_barb]
    }

    /// Both polylines as `[lat, lon]` sequences, ready for a map widget
    pub fn polylines(&self) -> Vec<Vec<[f64; 2]>> {
        vec![
            self.shaft().iter().map(|p| p.lat_lon()).collect(),
            self.head().iter().map(|p| p.lat_lon()).collect(),
        ]
    }
}

/// Shaft length for a wind speed, clamped to the style's bounds
pub fn shaft_length(wind_speed: KilometersPerHour, style: &ArrowStyle) -> Kilometers {
    let raw = *wind_speed * style.shaft_km_per_kmh;
    Kilometers::new(raw.max(style.min_shaft_km).min(style.max_shaft_km))
}

/// Arrowhead length for a given shaft
pub fn head_length(shaft: Kilometers, style: &ArrowStyle) -> Kilometers {
    Kilometers::new((*shaft * style.head_ratio).max(style.min_head_km))
}

/// Build the arrow for a heading anchored at `origin`.
pub fn build_arrow(
    origin: GeoPoint,
    heading: Degrees,
    wind_speed: KilometersPerHour,
    style: &ArrowStyle,
) -> ArrowGeometry {
    let shaft = shaft_length(wind_speed, style);
    let head = head_length(shaft, style);
    let end = destination_point(origin, heading, shaft);
    let barb = Degrees::new(style.barb_angle_deg);

    ArrowGeometry {
        start: origin,
        end,
        left_barb: destination_point(end, (heading - barb).normalized(), head),
        right_barb: destination_point(end, (heading + barb).normalized(), head),
    }
}

/// Arrow for a prediction, sized by the input's wind speed
pub fn arrow_for_prediction(
    origin: GeoPoint,
    prediction: &HeadingResult,
    input: &WindInput,
    style: &ArrowStyle,
) -> ArrowGeometry {
    build_arrow(origin, prediction.heading, input.speed, style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesy::{bearing_between, distance_between};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_shaft_length_clamps() {
        let style = ArrowStyle::default();
        assert_eq!(shaft_length(KilometersPerHour::new(0.0), &style), Kilometers::new(5.0));
        assert_eq!(shaft_length(KilometersPerHour::new(2.0), &style), Kilometers::new(5.0));
        assert_abs_diff_eq!(*shaft_length(KilometersPerHour::new(20.0), &style), 16.0, epsilon = 1e-12);
        assert_eq!(shaft_length(KilometersPerHour::new(100.0), &style), Kilometers::new(25.0));
    }

    #[test]
    fn test_head_length_floor() {
        let style = ArrowStyle::default();
        assert_eq!(head_length(Kilometers::new(5.0), &style), Kilometers::new(2.0));
        assert_abs_diff_eq!(*head_length(Kilometers::new(20.0), &style), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_arrow_points_along_heading() {
        let style = ArrowStyle::default();
        let origin = GeoPoint::new(49.25, -123.1);
        let arrow = build_arrow(origin, Degrees::new(60.0), KilometersPerHour::new(20.0), &style);

        assert_eq!(arrow.start, origin);
        assert_abs_diff_eq!(*distance_between(origin, arrow.end), 16.0, epsilon = 1e-6);
        assert_abs_diff_eq!(*bearing_between(origin, arrow.end), 60.0, epsilon = 1e-6);

        let head = head_length(Kilometers::new(16.0), &style);
        assert_abs_diff_eq!(*distance_between(arrow.end, arrow.left_barb), *head, epsilon = 1e-6);
        assert_abs_diff_eq!(*distance_between(arrow.end, arrow.right_barb), *head, epsilon = 1e-6);
        assert_abs_diff_eq!(*bearing_between(arrow.end, arrow.right_barb), 215.0, epsilon = 1e-6);
        assert_abs_diff_eq!(*bearing_between(arrow.end, arrow.left_barb), 265.0, epsilon = 1e-6);
    }

    #[test]
    fn test_polylines_layout() {
        let arrow = build_arrow(
            GeoPoint::new(0.0, 0.0),
            Degrees::new(0.0),
            KilometersPerHour::new(10.0),
            &ArrowStyle::default(),
        );
        let lines = arrow.polylines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 2);
        assert_eq!(lines[1].len(), 3);
        assert_eq!(lines[0][1], lines[1][1]);
        assert_eq!(lines[0][0], [0.0, 0.0]);
    }
}
