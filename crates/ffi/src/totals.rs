use burnmap_core::{
    burned_area_map, marker_radius, BurnedAreaMap, Hectares, MarkerStyle, PipelineConfig,
    RegionCode,
};
use std::os::raw::c_char;
use std::ptr;

use crate::error::{BurnmapErrorCode, DefaultBurnmapError};
use crate::helpers::{clear_last_error, str_from_ptr, track_error, track_result};

/// Per-province burned-area totals computed from one delimited table.
///
/// Immutable once created, so a handle may be read from several threads at
/// once. Free with `burnmap_totals_free`.
pub struct BurnmapTotals {
    pub(crate) map: BurnedAreaMap,
}

impl BurnmapTotals {
    pub(crate) fn from_text(text: &str) -> Box<Self> {
        Box::new(Self {
            map: burned_area_map(text, &PipelineConfig::default()),
        })
    }

    fn region(code: &str) -> Result<RegionCode, DefaultBurnmapError> {
        RegionCode::from_code(code).ok_or_else(|| DefaultBurnmapError::unknown_region(code))
    }
}

/// Borrow a totals handle, rejecting null.
///
/// # Safety
/// `ptr` must be null or a live pointer from `burnmap_totals_new`.
unsafe fn totals_from_ptr<'a>(
    ptr: *const BurnmapTotals,
) -> Result<&'a BurnmapTotals, DefaultBurnmapError> {
    // SAFETY: the caller guarantees the pointer came from `burnmap_totals_new`.
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultBurnmapError::null_pointer("totals"))
}

/// Parse a delimited burned-area table and sum it per province.
///
/// Unreadable rows are skipped, never reported as errors; an empty or
/// unrecognizable table yields a handle with no totals.
///
/// Returns
/// - `BurnmapErrorCode::Ok` (0) with a new handle in `out_totals`
/// - `BurnmapErrorCode::NullPointer` if `text` or `out_totals` is null
/// - `BurnmapErrorCode::InvalidUtf8` if `text` is not UTF-8
///
/// # Safety
/// - `text` must be a valid null-terminated string.
/// - `out_totals` must be a valid, non-null pointer to writable memory.
/// - The caller owns the returned handle and MUST call `burnmap_totals_free`
///   exactly once.
///
/// Example (C)
/// ```c
/// BurnmapTotals* totals = NULL;
/// if (burnmap_totals_new(csv_text, &totals) != Ok) {
///     fprintf(stderr, "%s\n", burnmap_get_last_error());
///     return;
/// }
/// double ab = 0.0;
/// burnmap_totals_get(totals, "AB", &ab);
/// burnmap_totals_free(totals);
/// ```
#[no_mangle]
pub unsafe extern "C" fn burnmap_totals_new(
    text: *const c_char,
    out_totals: *mut *mut BurnmapTotals,
) -> BurnmapErrorCode {
    if out_totals.is_null() {
        return track_error(&DefaultBurnmapError::null_pointer("out_totals"));
    }
    match track_result(unsafe { str_from_ptr(text, "text") }) {
        Ok(text) => {
            unsafe {
                *out_totals = Box::into_raw(BurnmapTotals::from_text(text));
            }
            clear_last_error();
            BurnmapErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                *out_totals = ptr::null_mut();
            }
            code
        }
    }
}

/// Total burned hectares for a two-letter code (`"AB"`, `"QC"`, ...).
///
/// A valid code with no rows in the table gives 0.
///
/// Returns
/// - `BurnmapErrorCode::Ok` (0) with the total in `out_ha`
/// - `BurnmapErrorCode::NullPointer` if any pointer is null
/// - `BurnmapErrorCode::UnknownRegion` if `code` is not one of the 13 codes
///
/// # Safety
/// - `totals` must be a live handle from `burnmap_totals_new`.
/// - `code` must be a valid null-terminated string.
/// - `out_ha` must be a valid, non-null pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn burnmap_totals_get(
    totals: *const BurnmapTotals,
    code: *const c_char,
    out_ha: *mut f64,
) -> BurnmapErrorCode {
    if out_ha.is_null() {
        return track_error(&DefaultBurnmapError::null_pointer("out_ha"));
    }
    let result = unsafe { totals_from_ptr(totals) }.and_then(|totals| {
        let code = unsafe { str_from_ptr(code, "code") }?;
        let region = BurnmapTotals::region(code)?;
        Ok(totals
            .map
            .aggregate
            .total(region)
            .map_or(0.0, |total| total.value()))
    });
    match track_result(result) {
        Ok(total) => {
            unsafe {
                *out_ha = total;
            }
            clear_last_error();
            BurnmapErrorCode::Ok
        }
        Err(code) => code,
    }
}

/// Marker radius (pixels) for a province, scaled against the largest total.
///
/// A valid code with no rows gets the minimum radius, like a zero total.
///
/// # Safety
/// Same contract as `burnmap_totals_get`, with `out_px` in place of `out_ha`.
#[no_mangle]
pub unsafe extern "C" fn burnmap_totals_marker_radius(
    totals: *const BurnmapTotals,
    code: *const c_char,
    out_px: *mut f64,
) -> BurnmapErrorCode {
    if out_px.is_null() {
        return track_error(&DefaultBurnmapError::null_pointer("out_px"));
    }
    let result = unsafe { totals_from_ptr(totals) }.and_then(|totals| {
        let code = unsafe { str_from_ptr(code, "code") }?;
        let region = BurnmapTotals::region(code)?;
        let aggregate = &totals.map.aggregate;
        let area = aggregate.total(region).unwrap_or(Hectares::ZERO);
        Ok(marker_radius(area, aggregate.max_total(), &MarkerStyle::default()).value())
    });
    match track_result(result) {
        Ok(radius) => {
            unsafe {
                *out_px = radius;
            }
            clear_last_error();
            BurnmapErrorCode::Ok
        }
        Err(code) => code,
    }
}

/// Sum over every included province; 0 for a null handle.
///
/// # Safety
/// `totals` must be null or a live handle from `burnmap_totals_new`.
#[no_mangle]
pub unsafe extern "C" fn burnmap_totals_grand_total(totals: *const BurnmapTotals) -> f64 {
    unsafe { totals.as_ref() }.map_or(0.0, |t| t.map.aggregate.grand_total.value())
}

/// Number of rows that contributed to a total; 0 for a null handle.
///
/// # Safety
/// `totals` must be null or a live handle from `burnmap_totals_new`.
#[no_mangle]
pub unsafe extern "C" fn burnmap_totals_included_rows(totals: *const BurnmapTotals) -> usize {
    unsafe { totals.as_ref() }.map_or(0, |t| t.map.aggregate.included)
}

/// Destroys a handle created by `burnmap_totals_new`. Null is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `burnmap_totals_new` and not freed
///   already.
/// - The caller must not use the pointer again afterwards.
#[no_mangle]
pub unsafe extern "C" fn burnmap_totals_free(totals: *mut BurnmapTotals) {
    if totals.is_null() {
        return;
    }
    // SAFETY: created by `Box::into_raw` in `burnmap_totals_new`.
    unsafe {
        drop(Box::from_raw(totals));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::burnmap_get_last_error_code;
    use std::ffi::CString;

    fn new_totals(text: &str) -> *mut BurnmapTotals {
        let text = CString::new(text).unwrap();
        let mut out = ptr::null_mut();
        let code = unsafe { burnmap_totals_new(text.as_ptr(), &mut out) };
        assert_eq!(code, BurnmapErrorCode::Ok);
        assert!(!out.is_null());
        out
    }

    #[test]
    fn test_totals_lifecycle() {
        let totals = new_totals("province,area_ha\nAlberta,\"1,234\"\nQuébec,100\nAtlantis,5\n");
        let ab = CString::new("AB").unwrap();
        let on = CString::new("ON").unwrap();
        let mut ha = -1.0;

        unsafe {
            assert_eq!(burnmap_totals_get(totals, ab.as_ptr(), &mut ha), BurnmapErrorCode::Ok);
            assert_eq!(ha, 1234.0);
            assert_eq!(burnmap_totals_get(totals, on.as_ptr(), &mut ha), BurnmapErrorCode::Ok);
            assert_eq!(ha, 0.0);
            assert_eq!(burnmap_totals_grand_total(totals), 1334.0);
            assert_eq!(burnmap_totals_included_rows(totals), 2);

            let mut px = 0.0;
            assert_eq!(
                burnmap_totals_marker_radius(totals, ab.as_ptr(), &mut px),
                BurnmapErrorCode::Ok
            );
            assert_eq!(px, 22.0);
            assert_eq!(
                burnmap_totals_marker_radius(totals, on.as_ptr(), &mut px),
                BurnmapErrorCode::Ok
            );
            assert_eq!(px, 6.0);

            burnmap_totals_free(totals);
        }
    }

    #[test]
    fn test_unknown_code_and_nulls() {
        let totals = new_totals("region,area\nBC,10\n");
        let bogus = CString::new("XX").unwrap();
        let mut ha = 0.0;
        unsafe {
            assert_eq!(
                burnmap_totals_get(totals, bogus.as_ptr(), &mut ha),
                BurnmapErrorCode::UnknownRegion
            );
            assert_eq!(burnmap_get_last_error_code(), BurnmapErrorCode::UnknownRegion);
            assert_eq!(
                burnmap_totals_get(ptr::null(), bogus.as_ptr(), &mut ha),
                BurnmapErrorCode::NullPointer
            );
            assert_eq!(
                burnmap_totals_get(totals, bogus.as_ptr(), ptr::null_mut()),
                BurnmapErrorCode::NullPointer
            );
            assert_eq!(burnmap_totals_grand_total(ptr::null()), 0.0);
            burnmap_totals_free(totals);
            burnmap_totals_free(ptr::null_mut());
        }
    }

    #[test]
    fn test_new_rejects_null_text() {
        let mut out = ptr::null_mut();
        let code = unsafe { burnmap_totals_new(ptr::null(), &mut out) };
        assert_eq!(code, BurnmapErrorCode::NullPointer);
        assert!(out.is_null());
    }
}
