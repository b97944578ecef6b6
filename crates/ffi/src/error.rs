use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for FFI error types.
///
/// - `code()` - the error code passed across the FFI boundary
/// - `msg()` - the error message for diagnostics
pub(crate) trait BurnmapError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> BurnmapErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `BurnmapError` for common FFI error scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultBurnmapError {
    code: BurnmapErrorCode,
    msg: String,
}

impl DefaultBurnmapError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_totals"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: BurnmapErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for a C string that is not valid UTF-8.
    pub fn invalid_utf8(param_name: &str) -> Self {
        Self {
            code: BurnmapErrorCode::InvalidUtf8,
            msg: format!("Parameter '{param_name}' is not valid UTF-8"),
        }
    }

    /// Create error for a non-finite or out-of-range numeric parameter.
    ///
    /// # Arguments
    /// * `param_name` - The name of the invalid parameter (e.g., `"lat"`, `"speed_kmh"`)
    /// * `value` - The invalid value
    pub fn invalid_parameter(param_name: &str, value: f64) -> Self {
        Self {
            code: BurnmapErrorCode::InvalidParameter,
            msg: format!("Parameter '{param_name}' is out of range, got {value}"),
        }
    }

    /// Create error for a code outside the province/territory set.
    pub fn unknown_region(code: &str) -> Self {
        Self {
            code: BurnmapErrorCode::UnknownRegion,
            msg: format!("'{code}' is not a Canadian province or territory code"),
        }
    }
}

impl BurnmapError for DefaultBurnmapError {
    fn code(&self) -> BurnmapErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by burned-area map functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurnmapErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// A numeric parameter was non-finite or out of range.
    InvalidParameter = 2,

    /// A string parameter was not valid UTF-8.
    InvalidUtf8 = 3,

    /// A region code outside the 13 provinces and territories.
    UnknownRegion = 4,
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// The CString is owned here so the pointer handed out stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, BurnmapErrorCode)> = const { RefCell::new((None, BurnmapErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, BurnmapErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, BurnmapErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if no error has occurred or the last call succeeded.
///
/// # Thread Safety
/// Error messages are stored per-thread, so each thread has its own
/// independent error state.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread that
/// sets or clears the error.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```cpp
/// BurnmapTotals* totals = nullptr;
/// BurnmapErrorCode err = burnmap_totals_new(csv_text, &totals);
/// if (err != BurnmapErrorCode::Ok) {
///     const char* error = burnmap_get_last_error();
///     if (error) {
///         printf("Failed to read burned-area table: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn burnmap_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns `BurnmapErrorCode::Ok` (0) if no error has occurred, otherwise the
/// code from the last failed operation on this thread.
#[no_mangle]
pub extern "C" fn burnmap_get_last_error_code() -> BurnmapErrorCode {
    with_last_error(|(_cstring, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::{clear_last_error, track_error};
    use std::ffi::CStr;

    #[test]
    fn test_last_error_set_and_cleared() {
        let code = track_error(&DefaultBurnmapError::unknown_region("ZZ"));
        assert_eq!(code, BurnmapErrorCode::UnknownRegion);
        assert_eq!(burnmap_get_last_error_code(), BurnmapErrorCode::UnknownRegion);
        let msg = unsafe { CStr::from_ptr(burnmap_get_last_error()) };
        assert!(msg.to_str().unwrap().contains("'ZZ'"));

        clear_last_error();
        assert_eq!(burnmap_get_last_error_code(), BurnmapErrorCode::Ok);
        assert!(burnmap_get_last_error().is_null());
    }
}
