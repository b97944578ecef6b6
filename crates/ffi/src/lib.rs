//! C ABI over `burnmap-core`.
//!
//! Every fallible function returns a [`BurnmapErrorCode`] and writes its
//! result through an out-pointer; details of the last failure on the calling
//! thread are available from `burnmap_get_last_error`. The header
//! `BurnmapFFI.h` is generated by `cbindgen` at build time.

mod error;
mod helpers;
mod spread;
mod totals;

pub use error::{burnmap_get_last_error, burnmap_get_last_error_code, BurnmapErrorCode};
pub use spread::{
    burnmap_arrow_geometry, burnmap_destination_point, burnmap_marker_radius,
    burnmap_predict_heading, BurnmapArrow, BurnmapFuel, BurnmapGeoPoint, BurnmapHeading,
    BurnmapWindInput,
};
pub use totals::{
    burnmap_totals_free, burnmap_totals_get, burnmap_totals_grand_total,
    burnmap_totals_included_rows, burnmap_totals_marker_radius, burnmap_totals_new,
    BurnmapTotals,
};
