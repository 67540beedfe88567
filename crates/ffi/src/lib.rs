//! C interface to the fallout models.
//!
//! A caller fills an [`FfiScenario`], evaluates it with [`fallout_run_new`]
//! (or [`fallout_run_from_json`]) and queries the returned opaque
//! [`FalloutRun`] for grids, contours, casualties and point dose rates.
//! Every fallible call returns a [`FalloutErrorCode`]; the message for the
//! last failure on the calling thread is available from
//! [`fallout_get_last_error`].
//!
//! A `FalloutRun` never changes after creation and can be read from several
//! threads at once. It must be released with [`fallout_run_destroy`].

mod error;
mod helpers;
mod queries;
mod run;

pub use error::{fallout_get_last_error, fallout_get_last_error_code, FalloutErrorCode};
pub use queries::{
    fallout_run_casualties, fallout_run_contour_count, fallout_run_contours,
    fallout_run_dose_rate_at, fallout_run_grid, fallout_run_grid_info, fallout_run_scenario,
    FfiCasualties, FfiContour, FfiGridInfo, FfiGridKind,
};
pub use run::{
    fallout_run_destroy, fallout_run_from_json, fallout_run_new, fallout_scenario_default,
    FalloutRun, FfiBurstHeight, FfiModelKind, FfiScenario,
};
