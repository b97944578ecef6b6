//! Point features for the province map layer.

use serde::Serialize;
use serde_json::{json, Value};

use super::marker::marker_radius;
use crate::aggregate::Aggregate;
use crate::config::MarkerStyle;
use crate::core_types::{GeoPoint, Hectares, Pixels, RegionCode};

/// One province marker: where it goes, what it says and how big it is
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProvinceFeature {
    pub code: RegionCode,
    pub name: &'static str,
    pub centroid: GeoPoint,
    pub total_ha: Hectares,
    pub radius_px: Pixels,
}

/// Markers for every jurisdiction with a total, ordered by code.
///
/// Radii are scaled against the largest total in the aggregate.
pub fn province_features(aggregate: &Aggregate, style: &MarkerStyle) -> Vec<ProvinceFeature> {
    let max = aggregate.max_total();
    aggregate
        .province_totals()
        .into_iter()
        .map(|total| ProvinceFeature {
            code: total.code,
            name: total.code.name(),
            centroid: total.code.centroid(),
            total_ha: total.total_ha,
            radius_px: marker_radius(total.total_ha, max, style),
        })
        .collect()
}

/// GeoJSON `FeatureCollection` of point markers (coordinates are `[lon, lat]`).
pub fn to_geojson(features: &[ProvinceFeature]) -> Value {
    let features: Vec<Value> = features
        .iter()
        .map(|f| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [f.centroid.lon, f.centroid.lat],
                },
                "properties": {
                    "code": f.code,
                    "name": f.name,
                    "total_ha": f.total_ha,
                    "radius_px": f.radius_px,
                },
            })
        })
        .collect();
    json!({ "type": "FeatureCollection", "features": features })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::ingest::parse_records;

    #[test]
    fn test_features_scale_against_largest_total() {
        let records = parse_records("province,area_ha\nAB,400\nBC,100\nXX,1000\n");
        let agg = aggregate(&records);
        let features = province_features(&agg, &MarkerStyle::default());

        assert_eq!(features.len(), 2);
        assert_eq!(features[0].code, RegionCode::Alberta);
        assert_eq!(features[0].radius_px, Pixels::new(22.0));
        assert_eq!(features[1].code, RegionCode::BritishColumbia);
        assert_eq!(features[1].radius_px, Pixels::new(14.0));
        assert_eq!(features[1].centroid, RegionCode::BritishColumbia.centroid());
    }

    #[test]
    fn test_geojson_shape() {
        let records = parse_records("province,area_ha\nYukon,5\n");
        let features = province_features(&aggregate(&records), &MarkerStyle::default());
        let geojson = to_geojson(&features);

        assert_eq!(geojson["type"], "FeatureCollection");
        let feature = &geojson["features"][0];
        assert_eq!(feature["properties"]["code"], "YT");
        assert_eq!(feature["properties"]["total_ha"], 5.0);
        assert_eq!(feature["geometry"]["coordinates"][0], -135.0);
    }
}
