//! Display-side derivations for the map consumer.

pub mod features;
pub mod marker;

pub use features::{province_features, to_geojson, ProvinceFeature};
pub use marker::marker_radius;
