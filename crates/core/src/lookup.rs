//! Place lookup for anchoring the wind arrow.
//!
//! The real geocoder is an external service; [`PlaceLookup`] is the seam it
//! plugs into. [`CentroidGazetteer`] answers from the built-in province
//! centroids so the pipeline works offline.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core_types::GeoPoint;
use crate::ingest::resolve_region_code;

/// A resolved place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub point: GeoPoint,
    pub display_name: String,
}

/// Free-text place search
pub trait PlaceLookup {
    /// Best match for `query`, or `Ok(None)` when nothing matched
    ///
    /// # Errors
    /// Service or network failure, as `LookupError::Service`
    fn lookup(&self, query: &str) -> Result<Option<Place>, LookupError>;
}

/// Resolves province and territory names or codes to their centroids
#[derive(Debug, Clone, Copy, Default)]
pub struct CentroidGazetteer;

impl PlaceLookup for CentroidGazetteer {
    fn lookup(&self, query: &str) -> Result<Option<Place>, LookupError> {
        Ok(resolve_region_code(query).map(|code| Place {
            point: code.centroid(),
            display_name: code.name().to_string(),
        }))
    }
}

/// Parse `"lat, lon"` (comma or whitespace separated) into a point
pub fn parse_coordinates(text: &str) -> Option<GeoPoint> {
    let mut parts = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty());
    let lat = parts.next()?.parse::<f64>().ok()?;
    let lon = parts.next()?.parse::<f64>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    GeoPoint::checked(lat, lon)
}

/// Turn a user query into an origin point.
///
/// Literal coordinates are accepted directly; anything else goes to the
/// lookup service once. Both "no result" and service failures come back as
/// a `LookupError` whose `Display` is suitable for showing to the user.
pub fn resolve_origin<L: PlaceLookup + ?Sized>(
    lookup: &L,
    query: &str,
) -> Result<Place, LookupError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(LookupError::NotFound(String::new()));
    }
    if let Some(point) = parse_coordinates(query) {
        debug!("Using literal coordinates {point}");
        return Ok(Place {
            point,
            display_name: point.to_string(),
        });
    }
    match lookup.lookup(query) {
        Ok(Some(place)) => Ok(place),
        Ok(None) => Err(LookupError::NotFound(query.to_string())),
        Err(e) => {
            warn!("Place lookup failed for '{query}': {e}");
            Err(e)
        }
    }
}

/// Place lookup failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Nothing matched the query
    NotFound(String),
    /// The lookup service could not be reached or answered with an error
    Service(String),
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::NotFound(query) if query.is_empty() => {
                write!(f, "Enter a place name or coordinates")
            }
            LookupError::NotFound(query) => write!(f, "No place found for '{query}'"),
            LookupError::Service(msg) => write!(f, "Place lookup failed: {msg}"),
        }
    }
}

impl std::error::Error for LookupError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::RegionCode;

    struct Offline;

    impl PlaceLookup for Offline {
        fn lookup(&self, _query: &str) -> Result<Option<Place>, LookupError> {
            Err(LookupError::Service("HTTP 500".into()))
        }
    }

    #[test]
    fn test_gazetteer_resolves_provinces() {
        let place = resolve_origin(&CentroidGazetteer, "Nouvelle-Écosse").unwrap();
        assert_eq!(place.point, RegionCode::NovaScotia.centroid());
        assert_eq!(place.display_name, "Nova Scotia");

        let place = resolve_origin(&CentroidGazetteer, "sk").unwrap();
        assert_eq!(place.point, RegionCode::Saskatchewan.centroid());
    }

    #[test]
    fn test_literal_coordinates_skip_lookup() {
        let place = resolve_origin(&Offline, "49.28, -123.12").unwrap();
        assert_eq!(place.point, GeoPoint::new(49.28, -123.12));
        assert_eq!(parse_coordinates("60 -135"), Some(GeoPoint::new(60.0, -135.0)));
        assert_eq!(parse_coordinates("95, 10"), None);
        assert_eq!(parse_coordinates("1, 2, 3"), None);
        assert_eq!(parse_coordinates("Ottawa"), None);
    }

    #[test]
    fn test_failures_are_user_messages() {
        let err = resolve_origin(&CentroidGazetteer, "Springfield").unwrap_err();
        assert_eq!(err, LookupError::NotFound("Springfield".into()));
        assert_eq!(err.to_string(), "No place found for 'Springfield'");

        let err = resolve_origin(&Offline, "Ottawa").unwrap_err();
        assert_eq!(err.to_string(), "Place lookup failed: HTTP 500");

        let err = resolve_origin(&CentroidGazetteer, "  ").unwrap_err();
        assert_eq!(err.to_string(), "Enter a place name or coordinates");
    }
}
