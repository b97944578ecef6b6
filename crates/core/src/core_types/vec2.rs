//! Vector type alias for planar wind and slope vectors.

use nalgebra::Vector2;

/// 2D vector type for horizontal wind and slope-push components.
///
/// Components are `(u, v)` in the angle convention used by the heading
/// predictor: `u = cos(angle)`, `v = sin(angle)`.
pub type Vec2 = Vector2<f64>;
