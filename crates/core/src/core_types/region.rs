//! Canadian provinces and territories.
//!
//! The closed set of jurisdictions that burned-area totals are reported
//! against. Only these codes take part in aggregation and marker placement.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::geo::GeoPoint;

/// Canonical two-letter province/territory code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RegionCode {
    #[serde(rename = "AB")]
    Alberta,
    #[serde(rename = "BC")]
    BritishColumbia,
    #[serde(rename = "MB")]
    Manitoba,
    #[serde(rename = "NB")]
    NewBrunswick,
    #[serde(rename = "NL")]
    NewfoundlandAndLabrador,
    #[serde(rename = "NS")]
    NovaScotia,
    #[serde(rename = "NT")]
    NorthwestTerritories,
    #[serde(rename = "NU")]
    Nunavut,
    #[serde(rename = "ON")]
    Ontario,
    #[serde(rename = "PE")]
    PrinceEdwardIsland,
    #[serde(rename = "QC")]
    Quebec,
    #[serde(rename = "SK")]
    Saskatchewan,
    #[serde(rename = "YT")]
    Yukon,
}

impl RegionCode {
    /// All 13 jurisdictions in code order
    pub const ALL: [RegionCode; 13] = [
        RegionCode::Alberta,
        RegionCode::BritishColumbia,
        RegionCode::Manitoba,
        RegionCode::NewBrunswick,
        RegionCode::NewfoundlandAndLabrador,
        RegionCode::NovaScotia,
        RegionCode::NorthwestTerritories,
        RegionCode::Nunavut,
        RegionCode::Ontario,
        RegionCode::PrinceEdwardIsland,
        RegionCode::Quebec,
        RegionCode::Saskatchewan,
        RegionCode::Yukon,
    ];

    /// Two-letter code
    pub fn code(self) -> &'static str {
        match self {
            RegionCode::Alberta => "AB",
            RegionCode::BritishColumbia => "BC",
            RegionCode::Manitoba => "MB",
            RegionCode::NewBrunswick => "NB",
            RegionCode::NewfoundlandAndLabrador => "NL",
            RegionCode::NovaScotia => "NS",
            RegionCode::NorthwestTerritories => "NT",
            RegionCode::Nunavut => "NU",
            RegionCode::Ontario => "ON",
            RegionCode::PrinceEdwardIsland => "PE",
            RegionCode::Quebec => "QC",
            RegionCode::Saskatchewan => "SK",
            RegionCode::Yukon => "YT",
        }
    }

    /// English display name
    pub fn name(self) -> &'static str {
        match self {
            RegionCode::Alberta => "Alberta",
            RegionCode::BritishColumbia => "British Columbia",
            RegionCode::Manitoba => "Manitoba",
            RegionCode::NewBrunswick => "New Brunswick",
            RegionCode::NewfoundlandAndLabrador => "Newfoundland and Labrador",
            RegionCode::NovaScotia => "Nova Scotia",
            RegionCode::NorthwestTerritories => "Northwest Territories",
            RegionCode::Nunavut => "Nunavut",
            RegionCode::Ontario => "Ontario",
            RegionCode::PrinceEdwardIsland => "Prince Edward Island",
            RegionCode::Quebec => "Quebec",
            RegionCode::Saskatchewan => "Saskatchewan",
            RegionCode::Yukon => "Yukon",
        }
    }

    /// Fixed marker anchor for the jurisdiction
    pub fn centroid(self) -> GeoPoint {
        match self {
            RegionCode::Alberta => GeoPoint::new(55.0, -115.0),
            RegionCode::BritishColumbia => GeoPoint::new(53.7267, -127.6476),
            RegionCode::Manitoba => GeoPoint::new(53.7609, -98.8139),
            RegionCode::NewBrunswick => GeoPoint::new(46.5653, -66.4619),
            RegionCode::NewfoundlandAndLabrador => GeoPoint::new(53.1355, -57.6604),
            RegionCode::NovaScotia => GeoPoint::new(44.682, -63.7443),
            RegionCode::NorthwestTerritories => GeoPoint::new(64.8255, -124.8457),
            RegionCode::Nunavut => GeoPoint::new(70.2998, -83.1076),
            RegionCode::Ontario => GeoPoint::new(51.2538, -85.3232),
            RegionCode::PrinceEdwardIsland => GeoPoint::new(46.5107, -63.4168),
            RegionCode::Quebec => GeoPoint::new(52.9399, -73.5491),
            RegionCode::Saskatchewan => GeoPoint::new(52.9399, -106.4509),
            RegionCode::Yukon => GeoPoint::new(64.2823, -135.0),
        }
    }

    /// Membership test against the closed code set.
    ///
    /// Matches the exact uppercase code only; free text goes through the
    /// region resolver first.
    pub fn from_code(code: &str) -> Option<RegionCode> {
        RegionCode::ALL.into_iter().find(|r| r.code() == code)
    }
}

impl FromStr for RegionCode {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RegionCode::from_code(s).ok_or_else(|| UnknownRegion(s.to_string()))
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A code outside the 13-jurisdiction set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRegion(pub String);

impl fmt::Display for UnknownRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown region code '{}'", self.0)
    }
}

impl std::error::Error for UnknownRegion {}
