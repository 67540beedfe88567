use crate::error::{with_last_error_mut, FalloutError, FalloutErrorCode};
use crate::run::FalloutRun;
use std::ffi::CString;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl FalloutError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Record an error and return its code.
#[inline]
pub(crate) fn track_error(error: &impl FalloutError) -> FalloutErrorCode {
    set_last_error(error);
    error.code()
}

/// Record the error of a failed result, or clear the last error on success.
pub(crate) fn track_result<T, E: FalloutError>(
    result: Result<T, E>,
) -> Result<T, FalloutErrorCode> {
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(e) => Err(track_error(&e)),
    }
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = FalloutErrorCode::Ok;
    });
}

/// Borrow a run from a caller pointer, `None` if null.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `fallout_run_new`.
pub(crate) unsafe fn run_from_ptr<'a>(ptr: *const FalloutRun) -> Option<&'a FalloutRun> {
    unsafe { ptr.as_ref() }
}
