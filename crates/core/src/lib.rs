//! Burned-Area Map Core Library
//!
//! Computation behind a wildfire map of Canada: historical burned-area
//! totals per province and territory, and a quick spread-heading estimate
//! from wind, fuel and slope at a chosen point.
//!
//! ## Pipelines
//!
//! - **Burned area**: delimited text → [`ingest`] (column aliases, region
//!   name resolution, numeric coercion) → [`aggregate`] → [`display`]
//!   (marker radii and map features)
//! - **Spread heading**: [`spread::WindInput`] → [`spread`] (mid-flame wind
//!   plus slope vector) → [`geodesy`] (arrow geometry on the sphere)
//!
//! Every function is pure: no global mutable state, no I/O except
//! [`config::PipelineConfig::load`]. Network collaborators (geocoder, wind
//! service) plug in through [`lookup::PlaceLookup`] and
//! [`weather::PowerTransport`].

// Core types and utilities
pub mod core_types;

pub mod aggregate;
pub mod config;
pub mod display;
pub mod geodesy;
pub mod ingest;
pub mod lookup;
pub mod pipeline;
pub mod spread;
pub mod weather;

// Re-export core types
pub use core_types::{
    Degrees, GeoPoint, Hectares, Kilometers, KilometersPerHour, MetersPerSecond, Percent, Pixels,
    RegionCode,
};

pub use aggregate::{aggregate, aggregate_years, Aggregate, ProvinceTotal};
pub use config::{ArrowStyle, ConfigError, MarkerStyle, PipelineConfig};
pub use display::{marker_radius, province_features, ProvinceFeature};
pub use geodesy::{build_arrow, destination_point, ArrowGeometry, EARTH_RADIUS_KM};
pub use ingest::{coerce_number, parse_records, parse_table, resolve_region, ParsedTable, Record};
pub use lookup::{resolve_origin, CentroidGazetteer, LookupError, Place, PlaceLookup};
pub use pipeline::{burned_area_map, predict_at, BurnedAreaMap, WindPrediction};
pub use spread::{predict_heading, predict_heading_with, FuelEnvironment, HeadingResult, WindInput};
pub use weather::{WindObservation, WindSourceError};
