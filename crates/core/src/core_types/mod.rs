//! Core types and utilities

pub mod geo;
pub mod region;
pub mod units;
pub mod vec2;

pub use geo::GeoPoint;
pub use region::{RegionCode, UnknownRegion};
pub use units::*;
pub use vec2::Vec2;
