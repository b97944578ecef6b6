//! Tunable constants for the heading, arrow and marker pipelines.
//!
//! Defaults reproduce the reference behavior exactly. A JSON file may
//! override any subset of fields; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Wind-arrow sizing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrowStyle {
    /// Shaft length per km/h of wind (km)
    pub shaft_km_per_kmh: f64,
    /// Shortest shaft (km)
    pub min_shaft_km: f64,
    /// Longest shaft (km)
    pub max_shaft_km: f64,
    /// Arrowhead length as a fraction of the shaft
    pub head_ratio: f64,
    /// Shortest arrowhead (km)
    pub min_head_km: f64,
    /// Barb bearing offset from the heading (degrees)
    pub barb_angle_deg: f64,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            shaft_km_per_kmh: 0.8,
            min_shaft_km: 5.0,
            max_shaft_km: 25.0,
            head_ratio: 0.35,
            min_head_km: 2.0,
            barb_angle_deg: 155.0,
        }
    }
}

/// Province marker sizing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    /// Radius for zero or unknown area (px)
    pub min_radius_px: f64,
    /// Extra radius reached at the maximum area (px)
    pub radius_range_px: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            min_radius_px: 6.0,
            radius_range_px: 16.0,
        }
    }
}

/// Complete pipeline configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Slope push magnitude per percent of slope (unitless heuristic)
    pub slope_push_per_percent: f64,
    pub arrow: ArrowStyle,
    pub marker: MarkerStyle,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            slope_push_per_percent: 0.002,
            arrow: ArrowStyle::default(),
            marker: MarkerStyle::default(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a JSON file
    ///
    /// # Errors
    /// Returns error if the file cannot be read, parsed or fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed(e.to_string()))?;
        Self::from_json_str(&contents)
    }

    /// Parse configuration from a JSON string
    ///
    /// # Errors
    /// Returns error if the text is not valid JSON or fails validation
    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(contents)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` naming the first bad field
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("slope_push_per_percent", self.slope_push_per_percent),
            ("arrow.shaft_km_per_kmh", self.arrow.shaft_km_per_kmh),
            ("arrow.min_shaft_km", self.arrow.min_shaft_km),
            ("arrow.max_shaft_km", self.arrow.max_shaft_km),
            ("arrow.head_ratio", self.arrow.head_ratio),
            ("arrow.min_head_km", self.arrow.min_head_km),
            ("arrow.barb_angle_deg", self.arrow.barb_angle_deg),
            ("marker.min_radius_px", self.marker.min_radius_px),
            ("marker.radius_range_px", self.marker.radius_range_px),
        ];
        for (name, value) in finite {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if self.arrow.min_shaft_km > self.arrow.max_shaft_km {
            return Err(ConfigError::Invalid(format!(
                "arrow.min_shaft_km ({}) exceeds arrow.max_shaft_km ({})",
                self.arrow.min_shaft_km, self.arrow.max_shaft_km
            )));
        }
        Ok(())
    }
}

/// Errors that can occur while loading configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read file
    LoadFailed(String),
    /// Failed to parse file contents
    ParseFailed(String),
    /// A value is out of range
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadFailed(msg) => write!(f, "Failed to load config: {msg}"),
            ConfigError::ParseFailed(msg) => write!(f, "Failed to parse config: {msg}"),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.slope_push_per_percent, 0.002);
        assert_eq!(config.arrow.min_shaft_km, 5.0);
        assert_eq!(config.arrow.max_shaft_km, 25.0);
        assert_eq!(config.marker.min_radius_px, 6.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            PipelineConfig::from_json_str(r#"{"arrow": {"max_shaft_km": 40.0}}"#).unwrap();
        assert_eq!(config.arrow.max_shaft_km, 40.0);
        assert_eq!(config.arrow.min_shaft_km, 5.0);
        assert_eq!(config.slope_push_per_percent, 0.002);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = PipelineConfig::from_json_str(r#"{"marker": {"min_radius_px": -1.0}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = PipelineConfig::from_json_str(
            r#"{"arrow": {"min_shaft_km": 30.0, "max_shaft_km": 10.0}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = PipelineConfig::from_json_str("not json").unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = PipelineConfig::load("/nonexistent/burnmap.json").unwrap_err();
        assert!(matches!(err, ConfigError::LoadFailed(_)));
    }
}
