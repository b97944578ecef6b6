//! NASA POWER wind-rose point observations.
//!
//! The POWER application API reports hourly 10 m wind speed (`WS10M`, m/s)
//! and direction (`WD10M`, degrees FROM) keyed by `YYYYMMDD:HH` UTC
//! timestamps. This module builds the request, decodes the response and
//! turns an observation into a [`WindInput`]. The HTTP round trip is left to
//! a [`PowerTransport`] supplied by the caller.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::core_types::{Degrees, GeoPoint, MetersPerSecond};
use crate::spread::{FuelEnvironment, WindInput};

/// Wind-rose point endpoint
pub const POWER_WINDROSE_URL: &str = "https://power.larc.nasa.gov/api/application/windrose/point";

/// POWER fill value for missing data
const POWER_FILL_VALUE: f64 = -999.0;

/// One hourly wind reading
#[derive(Debug, Clone, PartialEq)]
pub struct WindObservation {
    pub timestamp: String,
    pub speed: MetersPerSecond,
    pub dir_from: Degrees,
}

impl WindObservation {
    /// Convert to heading-predictor input for the given fuel (flat ground)
    pub fn to_wind_input(&self, fuel: FuelEnvironment) -> WindInput {
        WindInput::new(self.speed.to_kmh(), self.dir_from, fuel)
    }
}

/// Hourly timestamp key used by POWER, e.g. `20240715:18`
pub fn power_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d:%H").to_string()
}

/// Request URL for a single hour at a point
pub fn power_request_url(point: GeoPoint, timestamp: &str) -> String {
    format!(
        "{POWER_WINDROSE_URL}?longitude={}&latitude={}&start={timestamp}&end={timestamp}&format=JSON",
        point.lon, point.lat
    )
}

fn parameter<'a>(root: &'a Value, name: &str) -> Option<&'a Value> {
    root.get(name)
        .or_else(|| root.pointer(&format!("/properties/parameter/{name}")))
}

fn reading(root: &Value, name: &str, timestamp: &str) -> Option<f64> {
    parameter(root, name)?
        .get(timestamp)?
        .as_f64()
        .filter(|v| v.is_finite() && *v != POWER_FILL_VALUE)
}

/// Decode a POWER response for one timestamp.
///
/// Accepts the parameters either at the top level or under
/// `properties.parameter`. Returns `Ok(None)` when either reading is absent
/// or a fill value.
///
/// # Errors
/// Returns `WindSourceError::ParseFailed` if the body is not JSON and
/// `WindSourceError::InvalidValue` for negative speeds.
pub fn parse_power_response(
    body: &str,
    timestamp: &str,
) -> Result<Option<WindObservation>, WindSourceError> {
    let root: Value =
        serde_json::from_str(body).map_err(|e| WindSourceError::ParseFailed(e.to_string()))?;

    let (Some(speed), Some(dir)) = (
        reading(&root, "WS10M", timestamp),
        reading(&root, "WD10M", timestamp),
    ) else {
        debug!("No POWER wind reading for {timestamp}");
        return Ok(None);
    };
    if speed < 0.0 {
        return Err(WindSourceError::InvalidValue(format!(
            "negative wind speed {speed} at {timestamp}"
        )));
    }

    Ok(Some(WindObservation {
        timestamp: timestamp.to_string(),
        speed: MetersPerSecond::new(speed),
        dir_from: Degrees::new(dir).normalized(),
    }))
}

/// HTTP GET performed on behalf of the wind source
pub trait PowerTransport {
    /// Fetch the body at `url`
    ///
    /// # Errors
    /// Any transport or status failure, as `WindSourceError::Transport`
    fn get(&self, url: &str) -> Result<String, WindSourceError>;
}

/// Fetch and decode the current-hour observation at `point`.
///
/// Failures are returned to the caller once; nothing is retried.
pub fn fetch_wind<T: PowerTransport + ?Sized>(
    transport: &T,
    point: GeoPoint,
    at: DateTime<Utc>,
) -> Result<Option<WindObservation>, WindSourceError> {
    let timestamp = power_timestamp(at);
    let url = power_request_url(point, &timestamp);
    debug!("Requesting POWER wind data: {url}");
    let body = transport.get(&url).inspect_err(|e| {
        warn!("POWER request failed for {point}: {e}");
    })?;
    parse_power_response(&body, &timestamp)
}

/// Errors from the wind observation source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindSourceError {
    /// Network or HTTP status failure
    Transport(String),
    /// Response body is not valid JSON
    ParseFailed(String),
    /// Response carried an impossible value
    InvalidValue(String),
}

impl std::fmt::Display for WindSourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindSourceError::Transport(msg) => write!(f, "Error fetching wind data: {msg}"),
            WindSourceError::ParseFailed(msg) => write!(f, "Failed to parse wind data: {msg}"),
            WindSourceError::InvalidValue(msg) => write!(f, "Invalid wind data: {msg}"),
        }
    }
}

impl std::error::Error for WindSourceError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct Canned(Result<String, WindSourceError>);

    impl PowerTransport for Canned {
        fn get(&self, _url: &str) -> Result<String, WindSourceError> {
            self.0.clone()
        }
    }

    #[test]
    fn test_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2024, 7, 5, 9, 30, 0).unwrap();
        assert_eq!(power_timestamp(at), "20240705:09");
    }

    #[test]
    fn test_request_url() {
        let url = power_request_url(GeoPoint::new(33.64, -84.43), "20240705:09");
        assert_eq!(
            url,
            "https://power.larc.nasa.gov/api/application/windrose/point?longitude=-84.43&latitude=33.64&start=20240705:09&end=20240705:09&format=JSON"
        );
    }

    #[test]
    fn test_parse_top_level_parameters() {
        let body = r#"{"WS10M": {"20240705:09": 5.0}, "WD10M": {"20240705:09": 270.0}}"#;
        let obs = parse_power_response(body, "20240705:09").unwrap().unwrap();
        assert_eq!(obs.speed, MetersPerSecond::new(5.0));
        assert_eq!(obs.dir_from, Degrees::new(270.0));

        let input = obs.to_wind_input(FuelEnvironment::Forest);
        assert!((*input.speed - 18.0).abs() < 1e-9);
        assert_eq!(input.fuel, FuelEnvironment::Forest);
    }

    #[test]
    fn test_parse_nested_parameters() {
        let body = r#"{"properties": {"parameter": {
            "WS10M": {"20240705:09": 3.2},
            "WD10M": {"20240705:09": 45}
        }}}"#;
        let obs = parse_power_response(body, "20240705:09").unwrap().unwrap();
        assert_eq!(obs.dir_from, Degrees::new(45.0));
    }

    #[test]
    fn test_missing_or_fill_values() {
        let other_hour = r#"{"WS10M": {"20240705:10": 5.0}, "WD10M": {"20240705:10": 90.0}}"#;
        assert_eq!(parse_power_response(other_hour, "20240705:09").unwrap(), None);

        let fill = r#"{"WS10M": {"20240705:09": -999.0}, "WD10M": {"20240705:09": 90.0}}"#;
        assert_eq!(parse_power_response(fill, "20240705:09").unwrap(), None);

        assert_eq!(parse_power_response("{}", "20240705:09").unwrap(), None);
    }

    #[test]
    fn test_bad_bodies() {
        assert!(matches!(
            parse_power_response("<html>", "x"),
            Err(WindSourceError::ParseFailed(_))
        ));
        let negative = r#"{"WS10M": {"t": -2.0}, "WD10M": {"t": 90.0}}"#;
        assert!(matches!(
            parse_power_response(negative, "t"),
            Err(WindSourceError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_fetch_wind_through_transport() {
        let at = Utc.with_ymd_and_hms(2024, 7, 5, 9, 0, 0).unwrap();
        let ok = Canned(Ok(
            r#"{"WS10M": {"20240705:09": 1.0}, "WD10M": {"20240705:09": 180.0}}"#.to_string(),
        ));
        let obs = fetch_wind(&ok, GeoPoint::new(50.0, -100.0), at).unwrap().unwrap();
        assert_eq!(obs.timestamp, "20240705:09");

        let down = Canned(Err(WindSourceError::Transport("HTTP 503".into())));
        let err = fetch_wind(&down, GeoPoint::new(50.0, -100.0), at).unwrap_err();
        assert_eq!(err.to_string(), "Error fetching wind data: HTTP 503");
    }
}
