//! Fuel environments and their mid-flame wind adjustment factors.
//!
//! Open (10 m) wind is reduced by the vegetation around the flame. Grass
//! barely shelters the flame front; a forest canopy absorbs most of the
//! wind. The factors are the usual unsheltered/partially/fully sheltered
//! WAF classes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Broad fuel class at the ignition point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelEnvironment {
    #[default]
    Grass,
    Shrub,
    Forest,
}

impl FuelEnvironment {
    /// WAF used when the fuel class is not recognized
    pub const DEFAULT_WAF: f64 = 0.70;

    /// Mid-flame wind adjustment factor
    pub fn wind_adjustment_factor(self) -> f64 {
        match self {
            FuelEnvironment::Grass => 0.70,
            FuelEnvironment::Shrub => 0.50,
            FuelEnvironment::Forest => 0.30,
        }
    }

    /// Lowercase name as used in forms and config files
    pub fn name(self) -> &'static str {
        match self {
            FuelEnvironment::Grass => "grass",
            FuelEnvironment::Shrub => "shrub",
            FuelEnvironment::Forest => "forest",
        }
    }

    /// Parse a fuel name, case-insensitively, accepting a few synonyms
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "grass" | "grassland" | "grasses" => Some(FuelEnvironment::Grass),
            "shrub" | "shrubs" | "shrubland" | "brush" => Some(FuelEnvironment::Shrub),
            "forest" | "timber" | "woodland" => Some(FuelEnvironment::Forest),
            _ => None,
        }
    }

    /// Parse a fuel name, falling back to grass for anything unknown
    pub fn from_name_or_default(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            tracing::debug!("Unknown fuel environment '{name}', using grass WAF");
            FuelEnvironment::default()
        })
    }
}

/// WAF for a free-text fuel name, defaulting to [`FuelEnvironment::DEFAULT_WAF`]
pub fn wind_adjustment_factor(name: &str) -> f64 {
    FuelEnvironment::from_name(name)
        .map_or(FuelEnvironment::DEFAULT_WAF, FuelEnvironment::wind_adjustment_factor)
}

impl FromStr for FuelEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown fuel environment '{s}'"))
    }
}

impl fmt::Display for FuelEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
