use burnmap_core::spread::COMPASS_POINTS;
use burnmap_core::{
    build_arrow, destination_point, marker_radius, predict_heading, ArrowGeometry, ArrowStyle,
    Degrees, FuelEnvironment, GeoPoint, Hectares, Kilometers, KilometersPerHour, MarkerStyle,
    Percent, WindInput,
};
use std::ffi::CStr;
use std::os::raw::c_char;

use crate::error::{BurnmapErrorCode, DefaultBurnmapError};
use crate::helpers::{clear_last_error, finite, track_error, track_result};

/// Compass labels as C strings, in `COMPASS_POINTS` order.
static COMPASS_CSTRS: [&CStr; 16] = [
    c"N", c"NNE", c"NE", c"ENE", c"E", c"ESE", c"SE", c"SSE", c"S", c"SSW", c"SW", c"WSW", c"W",
    c"WNW", c"NW", c"NNW",
];

/// Fuel environment selector.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurnmapFuel {
    /// Open grassland (WAF 0.7).
    Grass = 0,
    /// Shrubland (WAF 0.5).
    Shrub = 1,
    /// Closed forest canopy (WAF 0.3).
    Forest = 2,
}

impl From<BurnmapFuel> for FuelEnvironment {
    fn from(fuel: BurnmapFuel) -> Self {
        match fuel {
            BurnmapFuel::Grass => FuelEnvironment::Grass,
            BurnmapFuel::Shrub => FuelEnvironment::Shrub,
            BurnmapFuel::Forest => FuelEnvironment::Forest,
        }
    }
}

/// Latitude/longitude pair in decimal degrees.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurnmapGeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl From<GeoPoint> for BurnmapGeoPoint {
    fn from(p: GeoPoint) -> Self {
        Self {
            lat: p.lat,
            lon: p.lon,
        }
    }
}

impl BurnmapGeoPoint {
    fn to_core(self, param_name: &str) -> Result<GeoPoint, DefaultBurnmapError> {
        GeoPoint::checked(self.lat, self.lon).ok_or_else(|| {
            let bad = if (-90.0..=90.0).contains(&self.lat) {
                self.lon
            } else {
                self.lat
            };
            DefaultBurnmapError::invalid_parameter(param_name, bad)
        })
    }
}

/// Wind, fuel and optional slope at the ignition point.
///
/// The slope fields are read only when `has_slope` is true.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurnmapWindInput {
    /// Open wind speed (km/h, >= 0).
    pub speed_kmh: f64,
    /// Direction the wind blows FROM (degrees).
    pub dir_from_deg: f64,
    pub fuel: BurnmapFuel,
    pub has_slope: bool,
    /// Grade in percent.
    pub slope_percent: f64,
    /// Upslope direction (degrees).
    pub slope_dir_to_deg: f64,
}

impl BurnmapWindInput {
    fn to_core(self) -> Result<WindInput, DefaultBurnmapError> {
        let speed = finite(self.speed_kmh, "speed_kmh")?;
        if speed < 0.0 {
            return Err(DefaultBurnmapError::invalid_parameter("speed_kmh", speed));
        }
        let dir = finite(self.dir_from_deg, "dir_from_deg")?;
        let input = WindInput::new(
            KilometersPerHour::new(speed),
            Degrees::new(dir),
            self.fuel.into(),
        );
        if !self.has_slope {
            return Ok(input);
        }
        let percent = finite(self.slope_percent, "slope_percent")?;
        let dir_to = finite(self.slope_dir_to_deg, "slope_dir_to_deg")?;
        Ok(input.with_slope(Percent::new(percent), Degrees::new(dir_to)))
    }
}

/// Predicted spread heading.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurnmapHeading {
    /// Heading in [0, 360).
    pub heading_deg: f64,
    /// 16-point compass label. Static string, **DO NOT FREE**.
    pub compass: *const c_char,
}

/// Wind arrow: shaft `start -> end`, head `left_barb -> end -> right_barb`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurnmapArrow {
    pub start: BurnmapGeoPoint,
    pub end: BurnmapGeoPoint,
    pub left_barb: BurnmapGeoPoint,
    pub right_barb: BurnmapGeoPoint,
}

impl From<ArrowGeometry> for BurnmapArrow {
    fn from(arrow: ArrowGeometry) -> Self {
        Self {
            start: arrow.start.into(),
            end: arrow.end.into(),
            left_barb: arrow.left_barb.into(),
            right_barb: arrow.right_barb.into(),
        }
    }
}

fn compass_cstr(label: &str) -> *const c_char {
    COMPASS_POINTS
        .iter()
        .position(|p| *p == label)
        .map_or(COMPASS_CSTRS[0], |i| COMPASS_CSTRS[i])
        .as_ptr()
}

/// Predict the spread heading for a wind input.
///
/// Returns
/// - `BurnmapErrorCode::Ok` (0) with the result in `out_heading`
/// - `BurnmapErrorCode::NullPointer` if `out_heading` is null
/// - `BurnmapErrorCode::InvalidParameter` for a negative or non-finite speed,
///   or a non-finite direction or slope value
///
/// # Safety
/// `out_heading` must be a valid, non-null pointer to writable memory.
///
/// Example (C)
/// ```c
/// BurnmapWindInput input = { 20.0, 270.0, Forest, false, 0.0, 0.0 };
/// BurnmapHeading heading;
/// if (burnmap_predict_heading(input, &heading) == Ok) {
///     printf("spreads toward %.1f (%s)\n", heading.heading_deg, heading.compass);
/// }
/// ```
#[no_mangle]
pub unsafe extern "C" fn burnmap_predict_heading(
    input: BurnmapWindInput,
    out_heading: *mut BurnmapHeading,
) -> BurnmapErrorCode {
    if out_heading.is_null() {
        return track_error(&DefaultBurnmapError::null_pointer("out_heading"));
    }
    let input = match track_result(input.to_core()) {
        Ok(input) => input,
        Err(code) => return code,
    };
    let result = predict_heading(&input);
    unsafe {
        *out_heading = BurnmapHeading {
            heading_deg: result.heading.value(),
            compass: compass_cstr(result.compass),
        };
    }
    clear_last_error();
    BurnmapErrorCode::Ok
}

/// Point reached from `origin` along `bearing_deg` after `distance_km` on a
/// spherical Earth (R = 6371 km).
///
/// # Safety
/// `out_point` must be a valid, non-null pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn burnmap_destination_point(
    origin: BurnmapGeoPoint,
    bearing_deg: f64,
    distance_km: f64,
    out_point: *mut BurnmapGeoPoint,
) -> BurnmapErrorCode {
    if out_point.is_null() {
        return track_error(&DefaultBurnmapError::null_pointer("out_point"));
    }
    let checked = origin.to_core("origin").and_then(|origin| {
        let bearing = finite(bearing_deg, "bearing_deg")?;
        let distance = finite(distance_km, "distance_km")?;
        Ok(destination_point(
            origin,
            Degrees::new(bearing),
            Kilometers::new(distance),
        ))
    });
    match track_result(checked) {
        Ok(point) => {
            unsafe {
                *out_point = point.into();
            }
            clear_last_error();
            BurnmapErrorCode::Ok
        }
        Err(code) => code,
    }
}

/// Arrow for a heading anchored at `origin`, sized by wind speed with the
/// default style (shaft 0.8 km per km/h within 5..=25 km, barbs at ±155°).
///
/// # Safety
/// `out_arrow` must be a valid, non-null pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn burnmap_arrow_geometry(
    origin: BurnmapGeoPoint,
    heading_deg: f64,
    speed_kmh: f64,
    out_arrow: *mut BurnmapArrow,
) -> BurnmapErrorCode {
    if out_arrow.is_null() {
        return track_error(&DefaultBurnmapError::null_pointer("out_arrow"));
    }
    let checked = origin.to_core("origin").and_then(|origin| {
        let heading = finite(heading_deg, "heading_deg")?;
        let speed = finite(speed_kmh, "speed_kmh")?;
        Ok(build_arrow(
            origin,
            Degrees::new(heading).normalized(),
            KilometersPerHour::new(speed),
            &ArrowStyle::default(),
        ))
    });
    match track_result(checked) {
        Ok(arrow) => {
            unsafe {
                *out_arrow = arrow.into();
            }
            clear_last_error();
            BurnmapErrorCode::Ok
        }
        Err(code) => code,
    }
}

/// Marker radius in pixels for `area_ha` against the largest area on the map.
///
/// Never fails: degenerate inputs give the minimum radius (6 px).
#[no_mangle]
pub extern "C" fn burnmap_marker_radius(area_ha: f64, max_area_ha: f64) -> f64 {
    marker_radius(
        Hectares::new(area_ha),
        Hectares::new(max_area_ha),
        &MarkerStyle::default(),
    )
    .value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{burnmap_get_last_error, burnmap_get_last_error_code};

    fn west_wind() -> BurnmapWindInput {
        BurnmapWindInput {
            speed_kmh: 20.0,
            dir_from_deg: 270.0,
            fuel: BurnmapFuel::Forest,
            has_slope: false,
            slope_percent: f64::NAN,
            slope_dir_to_deg: f64::NAN,
        }
    }

    #[test]
    fn test_predict_heading_writes_result() {
        let mut out = BurnmapHeading {
            heading_deg: -1.0,
            compass: std::ptr::null(),
        };
        let code = unsafe { burnmap_predict_heading(west_wind(), &mut out) };
        assert_eq!(code, BurnmapErrorCode::Ok);
        assert!((out.heading_deg - 90.0).abs() < 1e-9);
        let label = unsafe { CStr::from_ptr(out.compass) };
        assert_eq!(label.to_str().unwrap(), "E");
        assert!(burnmap_get_last_error().is_null());
    }

    #[test]
    fn test_predict_heading_rejects_bad_input() {
        let mut out = BurnmapHeading {
            heading_deg: 0.0,
            compass: std::ptr::null(),
        };
        let input = BurnmapWindInput {
            speed_kmh: -5.0,
            ..west_wind()
        };
        let code = unsafe { burnmap_predict_heading(input, &mut out) };
        assert_eq!(code, BurnmapErrorCode::InvalidParameter);
        assert_eq!(burnmap_get_last_error_code(), BurnmapErrorCode::InvalidParameter);
        let msg = unsafe { CStr::from_ptr(burnmap_get_last_error()) };
        assert!(msg.to_str().unwrap().contains("speed_kmh"));

        let code = unsafe { burnmap_predict_heading(west_wind(), std::ptr::null_mut()) };
        assert_eq!(code, BurnmapErrorCode::NullPointer);
    }

    #[test]
    fn test_slope_fields_read_only_when_flagged() {
        let mut out = BurnmapHeading {
            heading_deg: 0.0,
            compass: std::ptr::null(),
        };
        let input = BurnmapWindInput {
            speed_kmh: 3.6,
            has_slope: true,
            slope_percent: 150.0,
            slope_dir_to_deg: 0.0,
            ..west_wind()
        };
        let code = unsafe { burnmap_predict_heading(input, &mut out) };
        assert_eq!(code, BurnmapErrorCode::Ok);
        assert!((out.heading_deg - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_destination_point_on_equator() {
        let mut out = BurnmapGeoPoint { lat: 0.0, lon: 0.0 };
        let origin = BurnmapGeoPoint { lat: 0.0, lon: 0.0 };
        let code = unsafe { burnmap_destination_point(origin, 90.0, 111.195, &mut out) };
        assert_eq!(code, BurnmapErrorCode::Ok);
        assert!(out.lat.abs() < 1e-6);
        assert!((out.lon - 1.0).abs() < 1e-4);

        let bad = BurnmapGeoPoint { lat: 95.0, lon: 0.0 };
        let code = unsafe { burnmap_destination_point(bad, 90.0, 1.0, &mut out) };
        assert_eq!(code, BurnmapErrorCode::InvalidParameter);
    }

    #[test]
    fn test_arrow_geometry_shares_tip() {
        let zero = BurnmapGeoPoint { lat: 0.0, lon: 0.0 };
        let mut out = BurnmapArrow {
            start: zero,
            end: zero,
            left_barb: zero,
            right_barb: zero,
        };
        let origin = BurnmapGeoPoint {
            lat: 53.9,
            lon: -116.6,
        };
        let code = unsafe { burnmap_arrow_geometry(origin, 0.0, 10.0, &mut out) };
        assert_eq!(code, BurnmapErrorCode::Ok);
        assert_eq!(out.start, origin);
        assert!(out.end.lat > origin.lat);
        assert!(out.left_barb.lat < out.end.lat);
        assert!(out.right_barb.lat < out.end.lat);
        assert!(out.left_barb.lon < out.right_barb.lon);
    }

    #[test]
    fn test_marker_radius_bounds() {
        assert_eq!(burnmap_marker_radius(0.0, 100.0), 6.0);
        assert_eq!(burnmap_marker_radius(100.0, 100.0), 22.0);
        assert_eq!(burnmap_marker_radius(5.0, 0.0), 6.0);
    }
}
