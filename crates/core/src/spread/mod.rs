//! Spread heading estimation from wind, fuel and slope.

pub mod fuel;
pub mod heading;

pub use fuel::{wind_adjustment_factor, FuelEnvironment};
pub use heading::{
    compass_label, predict_heading, predict_heading_with, spread_vector, HeadingResult,
    SlopeInput, WindInput, COMPASS_POINTS,
};
