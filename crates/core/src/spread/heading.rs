//! Predicted spread heading from wind, fuel and slope.
//!
//! A deliberately simple estimator: the fire is assumed to run with the
//! mid-flame wind, nudged toward upslope. No rate of spread or perimeter is
//! computed.
//!
//! # Angle convention
//!
//! Directions are compass degrees, but the vector sum treats them as plain
//! angles (`u = cos θ`, `v = sin θ`) and converts back with `atan2(v, u)`.
//! Because both directions go through the same mapping, the result lands
//! back in compass degrees unchanged.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::fuel::FuelEnvironment;
use crate::config::PipelineConfig;
use crate::core_types::{Degrees, KilometersPerHour, Percent, Radians, Vec2};

/// 16-point compass rose, clockwise from north
pub const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Terrain slope at the ignition point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlopeInput {
    /// Grade in percent (rise over run × 100)
    pub percent: Percent,
    /// Upslope direction the terrain rises toward
    pub dir_to: Degrees,
}

/// Wind, fuel and optional slope at the ignition point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindInput {
    /// Open wind speed
    pub speed: KilometersPerHour,
    /// Direction the wind blows FROM, in [0, 360)
    pub dir_from: Degrees,
    pub fuel: FuelEnvironment,
    pub slope: Option<SlopeInput>,
}

impl WindInput {
    /// Flat-ground wind input; the direction is wrapped into [0, 360)
    pub fn new(speed: KilometersPerHour, dir_from: Degrees, fuel: FuelEnvironment) -> Self {
        Self {
            speed,
            dir_from: dir_from.normalized(),
            fuel,
            slope: None,
        }
    }

    /// Add a slope; the direction is wrapped into [0, 360)
    pub fn with_slope(mut self, percent: Percent, dir_to: Degrees) -> Self {
        self.slope = Some(SlopeInput {
            percent,
            dir_to: dir_to.normalized(),
        });
        self
    }

    /// Build an input from loosely filled form values.
    ///
    /// Returns `None` when the speed or direction is missing, non-finite or
    /// the speed is negative: there is nothing to predict. The slope is kept
    /// only when both of its fields are present and finite.
    pub fn from_parts(
        speed_kmh: Option<f64>,
        dir_from_deg: Option<f64>,
        fuel: FuelEnvironment,
        slope_pct: Option<f64>,
        slope_dir_to_deg: Option<f64>,
    ) -> Option<Self> {
        let speed = speed_kmh.filter(|s| s.is_finite() && *s >= 0.0)?;
        let dir = dir_from_deg.filter(|d| d.is_finite())?;
        let input = Self::new(KilometersPerHour::new(speed), Degrees::new(dir), fuel);
        match (slope_pct, slope_dir_to_deg) {
            (Some(pct), Some(dir_to)) if pct.is_finite() && dir_to.is_finite() => {
                Some(input.with_slope(Percent::new(pct), Degrees::new(dir_to)))
            }
            _ => Some(input),
        }
    }

    /// Direction the wind blows TOWARD
    pub fn heading_to(&self) -> Degrees {
        (self.dir_from + Degrees::new(180.0)).normalized()
    }
}

/// Predicted spread direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeadingResult {
    /// Heading in [0, 360)
    pub heading: Degrees,
    /// 16-point compass label
    pub compass: &'static str,
}

/// Nearest 16-point compass label for a heading
pub fn compass_label(heading: Degrees) -> &'static str {
    let sector = (heading.normalized().value() / 22.5).round() as usize % 16;
    COMPASS_POINTS[sector]
}

#[inline]
fn unit(angle: Radians) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Combined mid-flame wind and slope-push vector.
///
/// The wind term has magnitude `WAF × speed (m/s)` along the heading-to
/// direction; the slope term has magnitude `slope_push_per_percent × grade`
/// along the upslope direction.
pub fn spread_vector(input: &WindInput, slope_push_per_percent: f64) -> Vec2 {
    let waf = input.fuel.wind_adjustment_factor();
    let mid_flame = input.speed.to_mps() * waf;
    let mut vector = unit(input.heading_to().to_radians()) * *mid_flame;

    if let Some(slope) = input.slope {
        let push = slope_push_per_percent * *slope.percent;
        vector += unit(slope.dir_to.to_radians()) * push;
    }
    vector
}

/// Predict the spread heading with the default slope constant.
pub fn predict_heading(input: &WindInput) -> HeadingResult {
    predict_heading_with(input, &PipelineConfig::default())
}

/// Predict the spread heading using the configured slope constant.
pub fn predict_heading_with(input: &WindInput, config: &PipelineConfig) -> HeadingResult {
    let vector = spread_vector(input, config.slope_push_per_percent);
    let heading = Radians::new(vector.y.atan2(vector.x)).to_degrees().normalized();
    let compass = compass_label(heading);
    debug!(
        "Heading for {} from {} over {}: u={:.4} v={:.4} -> {} ({})",
        input.speed, input.dir_from, input.fuel, vector.x, vector.y, heading, compass
    );
    HeadingResult { heading, compass }
}
