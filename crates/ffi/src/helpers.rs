use crate::error::{with_last_error_mut, BurnmapError, BurnmapErrorCode, DefaultBurnmapError};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Set the thread-local error message and code.
/// Accepts any type implementing `BurnmapError` trait.
pub(crate) fn set_last_error(error: &impl BurnmapError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl BurnmapError) -> BurnmapErrorCode {
    set_last_error(error);
    error.code()
}

/// Record the error of a failed result, passing the code through.
pub(crate) fn track_result<T>(result: Result<T, DefaultBurnmapError>) -> Result<T, BurnmapErrorCode> {
    result.map_err(|e| track_error(&e))
}

/// Clear the thread-local error message and code.
/// Called on successful operations.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = BurnmapErrorCode::Ok;
    });
}

/// Borrow a caller-owned C string as UTF-8.
///
/// # Safety
/// `ptr` must be null or point to a null-terminated string that outlives `'a`.
pub(crate) unsafe fn str_from_ptr<'a>(
    ptr: *const c_char,
    param_name: &str,
) -> Result<&'a str, DefaultBurnmapError> {
    if ptr.is_null() {
        return Err(DefaultBurnmapError::null_pointer(param_name));
    }
    // SAFETY: non-null checked above; the caller guarantees termination and lifetime.
    let cstr = unsafe { CStr::from_ptr(ptr) };
    cstr.to_str()
        .map_err(|_| DefaultBurnmapError::invalid_utf8(param_name))
}

/// Require a finite value.
pub(crate) fn finite(value: f64, param_name: &str) -> Result<f64, DefaultBurnmapError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DefaultBurnmapError::invalid_parameter(param_name, value))
    }
}
