//! FFI (Foreign Function Interface) for C/Python/Node.js
//!
//! C ABI exports for the dynamic library. Buffers are row-major f32.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;
use std::slice;

use crate::distance::{compute_distance, Metric};
use crate::types::PointSet;
use crate::DistanceError;

/// Success
pub const CDIST_OK: i32 = 0;
/// A required pointer argument was null
pub const CDIST_ERR_NULL_POINTER: i32 = -1;
/// The metric name was not valid UTF-8
pub const CDIST_ERR_INVALID_UTF8: i32 = -2;

unsafe fn point_set_from_raw(data: *const f32, rows: usize, dim: usize) -> Result<PointSet, i32> {
    if rows == 0 {
        return Ok(PointSet::empty(dim));
    }
    if data.is_null() {
        return Err(CDIST_ERR_NULL_POINTER);
    }
    let len = match rows.checked_mul(dim) {
        Some(len) => len,
        None => {
            return Err(DistanceError::ShapeMismatch {
                expected: usize::MAX,
                found: 0,
            }
            .code())
        }
    };
    let values = unsafe { slice::from_raw_parts(data, len) };
    PointSet::from_flat(values.to_vec(), rows, dim).map_err(|e| e.code())
}

/// Compute the (n_left, n_right) distance matrix into `out`.
///
/// Returns `CDIST_OK` or a negative error code (see
/// [`cdist_error_message`]). `out` is left untouched on error.
///
/// # Safety
/// - `left` must point to `n_left * dim` floats (may be null if `n_left == 0`)
/// - `right` must point to `n_right * dim` floats (may be null if `n_right == 0`)
/// - `metric` must be a valid C string
/// - `out` must point to writable space for `n_left * n_right` floats
#[no_mangle]
pub unsafe extern "C" fn cdist_compute(
    left: *const f32,
    n_left: usize,
    right: *const f32,
    n_right: usize,
    dim: usize,
    metric: *const c_char,
    out: *mut f32,
) -> i32 {
    if metric.is_null() {
        return CDIST_ERR_NULL_POINTER;
    }
    let c_str = unsafe { CStr::from_ptr(metric) };
    let metric = match c_str.to_str() {
        Ok(s) => s,
        Err(_) => return CDIST_ERR_INVALID_UTF8,
    };
    // Resolve the metric before touching any buffer
    let metric = match metric.parse::<Metric>() {
        Ok(m) => m,
        Err(e) => return e.code(),
    };

    let left = match unsafe { point_set_from_raw(left, n_left, dim) } {
        Ok(p) => p,
        Err(code) => return code,
    };
    let right = match unsafe { point_set_from_raw(right, n_right, dim) } {
        Ok(p) => p,
        Err(code) => return code,
    };

    let matrix = match compute_distance(&left, &right, metric) {
        Ok(m) => m,
        Err(e) => return e.code(),
    };

    let values = matrix.as_slice();
    if !values.is_empty() {
        if out.is_null() {
            return CDIST_ERR_NULL_POINTER;
        }
        unsafe { ptr::copy_nonoverlapping(values.as_ptr(), out, values.len()) };
    }
    CDIST_OK
}

/// Human-readable description of a status code. Free with
/// [`cdist_free_string`].
#[no_mangle]
pub extern "C" fn cdist_error_message(code: i32) -> *mut c_char {
    let message = match code {
        CDIST_OK => "ok",
        CDIST_ERR_NULL_POINTER => "null pointer argument",
        CDIST_ERR_INVALID_UTF8 => "metric name is not valid UTF-8",
        -3 => "unsupported metric",
        -4 => "dimension mismatch",
        -5 => "ragged input rows",
        -6 => "zero-dimensional points",
        -7 => "non-finite input value",
        -8 => "buffer shape mismatch",
        _ => "unknown error",
    };
    match CString::new(message) {
        Ok(c_string) => c_string.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Free a string returned by this library
///
/// # Safety
/// - s must have been returned by `cdist_error_message`
#[no_mangle]
pub unsafe extern "C" fn cdist_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = unsafe { CString::from_raw(s) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(code: i32) -> String {
        let raw = cdist_error_message(code);
        let s = unsafe { CStr::from_ptr(raw) }.to_str().unwrap().to_string();
        unsafe { cdist_free_string(raw) };
        s
    }

    #[test]
    fn test_cdist_compute_euclidean() {
        let left = [1.0f32, 2.0, 3.0, 4.0];
        let right = [10.0f32, 11.0, 12.0, 13.0];
        let metric = CString::new("euclidean").unwrap();
        let mut out = [0.0f32; 4];
        let code = unsafe {
            cdist_compute(left.as_ptr(), 2, right.as_ptr(), 2, 2, metric.as_ptr(), out.as_mut_ptr())
        };
        assert_eq!(code, CDIST_OK);
        assert!((out[0] - 12.72).abs() < 1e-2);
        assert!((out[2] - 9.90).abs() < 1e-2);
    }

    #[test]
    fn test_cdist_compute_unsupported_metric() {
        let left = [1.0f32, 2.0];
        let metric = CString::new("chebyshev").unwrap();
        let mut out = [-1.0f32; 1];
        let code = unsafe {
            cdist_compute(left.as_ptr(), 1, left.as_ptr(), 1, 2, metric.as_ptr(), out.as_mut_ptr())
        };
        assert_eq!(code, -3);
        assert_eq!(out[0], -1.0);
        assert_eq!(message(code), "unsupported metric");
    }

    #[test]
    fn test_cdist_compute_null_pointers() {
        let metric = CString::new("cosine").unwrap();
        let mut out = [0.0f32; 1];
        let code = unsafe {
            cdist_compute(ptr::null(), 1, ptr::null(), 1, 2, metric.as_ptr(), out.as_mut_ptr())
        };
        assert_eq!(code, CDIST_ERR_NULL_POINTER);

        let code = unsafe {
            cdist_compute(ptr::null(), 0, ptr::null(), 0, 2, ptr::null(), out.as_mut_ptr())
        };
        assert_eq!(code, CDIST_ERR_NULL_POINTER);
    }

    #[test]
    fn test_cdist_compute_overflowing_shape() {
        let left = [1.0f32, 2.0];
        let metric = CString::new("euclidean").unwrap();
        let mut out = [0.0f32; 1];
        let code = unsafe {
            cdist_compute(left.as_ptr(), usize::MAX, left.as_ptr(), 1, 2, metric.as_ptr(), out.as_mut_ptr())
        };
        assert_eq!(code, -8);
        assert_eq!(message(code), "buffer shape mismatch");
    }

    #[test]
    fn test_cdist_compute_empty() {
        let right = [1.0f32, 2.0];
        let metric = CString::new("cosine").unwrap();
        let code = unsafe {
            cdist_compute(ptr::null(), 0, right.as_ptr(), 1, 2, metric.as_ptr(), ptr::null_mut())
        };
        assert_eq!(code, CDIST_OK);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(message(CDIST_OK), "ok");
        assert_eq!(message(-4), "dimension mismatch");
        assert_eq!(message(42), "unknown error");
    }
}
