//! End-to-end passes: table text to map markers, wind input to arrow.
//!
//! Each pass owns its inputs and outputs; running one twice on the same
//! input gives the same answer.

use serde::Serialize;

use crate::aggregate::{aggregate, Aggregate};
use crate::config::PipelineConfig;
use crate::core_types::GeoPoint;
use crate::display::{province_features, ProvinceFeature};
use crate::geodesy::arrow::{arrow_for_prediction, ArrowGeometry};
use crate::ingest::parse_table;
use crate::spread::{predict_heading_with, HeadingResult, WindInput};

/// Totals and markers for one burned-area table
#[derive(Debug, Clone, Serialize)]
pub struct BurnedAreaMap {
    pub aggregate: Aggregate,
    pub features: Vec<ProvinceFeature>,
}

/// Parse, aggregate and scale a delimited burned-area table.
pub fn burned_area_map(text: &str, config: &PipelineConfig) -> BurnedAreaMap {
    let table = parse_table(text);
    let aggregate = aggregate(&table.records);
    let features = province_features(&aggregate, &config.marker);
    BurnedAreaMap {
        aggregate,
        features,
    }
}

/// Heading and arrow for a wind input anchored at an origin
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WindPrediction {
    pub origin: GeoPoint,
    pub input: WindInput,
    pub heading: HeadingResult,
    pub arrow: ArrowGeometry,
}

/// Predict the heading and build its arrow.
///
/// `None` input (no speed or direction entered) yields no prediction.
pub fn predict_at(
    origin: GeoPoint,
    input: Option<WindInput>,
    config: &PipelineConfig,
) -> Option<WindPrediction> {
    let input = input?;
    let heading = predict_heading_with(&input, config);
    let arrow = arrow_for_prediction(origin, &heading, &input, &config.arrow);
    Some(WindPrediction {
        origin,
        input,
        heading,
        arrow,
    })
}
