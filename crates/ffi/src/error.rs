use fallout_core::analytic::UnsupportedReason;
use fallout_core::ConfigError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for errors crossing the FFI boundary.
///
/// `code()` is what the C caller sees as the return value, `msg()` is kept
/// for `fallout_get_last_error`.
pub(crate) trait FalloutError {
    /// Error code returned across the FFI boundary.
    fn code(&self) -> FalloutErrorCode;

    /// Human-readable description.
    fn msg(&self) -> &str;
}

/// Error built from a code and a formatted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultFalloutError {
    code: FalloutErrorCode,
    msg: String,
}

impl DefaultFalloutError {
    /// Null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_run"`, `"run"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: FalloutErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Invalid parameter with a description.
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: FalloutErrorCode::InvalidParameter,
            msg: message,
        }
    }

    /// Scenario the selected model does not handle.
    pub fn unsupported(reason: UnsupportedReason) -> Self {
        Self {
            code: FalloutErrorCode::UnsupportedConfiguration,
            msg: format!("Unsupported configuration: {reason}"),
        }
    }

    /// Query that needs data the run did not produce.
    ///
    /// # Arguments
    /// * `what` - What was asked for (e.g., `"dose-rate grid"`)
    pub fn not_available(what: &str) -> Self {
        Self {
            code: FalloutErrorCode::UnsupportedConfiguration,
            msg: format!("This run has no {what}"),
        }
    }
}

impl From<ConfigError> for DefaultFalloutError {
    fn from(error: ConfigError) -> Self {
        Self::invalid_parameter(error.to_string())
    }
}

impl FalloutError for DefaultFalloutError {
    fn code(&self) -> FalloutErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by fallout functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FalloutErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// A scenario value or query argument is out of range.
    InvalidParameter = 2,

    /// The model cannot evaluate this scenario (air burst, zero yield),
    /// or the run has no data for the query.
    UnsupportedConfiguration = 3,
}

impl From<DefaultFalloutError> for FalloutErrorCode {
    fn from(error: DefaultFalloutError) -> Self {
        error.code
    }
}

thread_local! {
    /// Most recent FFI error on this thread (C string, error code).
    /// The `CString` is owned here so the pointer handed to C stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, FalloutErrorCode)> = const { RefCell::new((None, FalloutErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, FalloutErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, FalloutErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if the last call on this thread succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// FalloutRun* run = NULL;
/// if (fallout_run_new(&scenario, &run) != Ok) {
///     const char* error = fallout_get_last_error();
///     if (error) {
///         printf("Fallout run failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn fallout_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code on this thread.
#[no_mangle]
pub extern "C" fn fallout_get_last_error_code() -> FalloutErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
