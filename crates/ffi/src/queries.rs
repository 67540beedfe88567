//! FFI queries against a finished run.
//!
//! Grids are exposed as borrowed row-major `double` arrays (crosswind rows of
//! downwind columns) that stay valid until the run is destroyed.

use fallout_core::analytic::point_dose_rate;
use fallout_core::{DownwindPoint, GridField, TransportResult};
use std::ptr;

use crate::error::{DefaultFalloutError, FalloutErrorCode};
use crate::helpers::{clear_last_error, run_from_ptr, track_error};
use crate::run::{FalloutRun, FfiScenario};

/// Which transport grid to read.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiGridKind {
    /// H+1 dose rate (R/hr)
    DoseRate = 0,
    /// Earliest arrival (hours, `+inf` where nothing landed)
    Arrival = 1,
    /// Dose over the exposure window (rem)
    CumulativeDose = 2,
}

/// Shape of the transport grids.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FfiGridInfo {
    /// Downwind cells
    pub width: u32,
    /// Crosswind cells
    pub height: u32,
    /// Cell edge (km)
    pub resolution_km: f64,
    /// Downwind coordinate of column 0 (km)
    pub min_x_km: f64,
    /// Crosswind coordinate of row 0 (km)
    pub min_y_km: f64,
    /// Wind-from direction rotated into screen space (degrees)
    pub render_angle_deg: f64,
}

/// One isodose contour.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FfiContour {
    /// H+1 dose rate (R/hr)
    pub threshold: f64,
    /// Downwind length (km)
    pub length_km: f64,
    /// Crosswind width (km)
    pub width_km: f64,
}

/// Casualty totals.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FfiCasualties {
    pub fatalities: u64,
    pub injuries: u64,
    /// Area above a casualty-producing dose (km², 0 for the analytic model)
    pub affected_area_km2: f64,
}

fn transport_grids(run: &FalloutRun) -> Result<&TransportResult, FalloutErrorCode> {
    run.transport
        .as_ref()
        .ok_or_else(|| track_error(&DefaultFalloutError::not_available("transport grids")))
}

/// Copy the scenario a run was evaluated with into `out_scenario`.
///
/// # Safety
/// `run` must be null or a live run; `out_scenario` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn fallout_run_scenario(
    run: *const FalloutRun,
    out_scenario: *mut FfiScenario,
) -> FalloutErrorCode {
    let Some(run) = (unsafe { run_from_ptr(run) }) else {
        return track_error(&DefaultFalloutError::null_pointer("run"));
    };
    if out_scenario.is_null() {
        return track_error(&DefaultFalloutError::null_pointer("out_scenario"));
    }
    unsafe {
        *out_scenario = FfiScenario::from(&run.config);
    }
    clear_last_error();
    FalloutErrorCode::Ok
}

/// Shape of the transport grids.
///
/// Returns `UnsupportedConfiguration` for analytic runs.
///
/// # Safety
/// `run` must be null or a live run; `out_info` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn fallout_run_grid_info(
    run: *const FalloutRun,
    out_info: *mut FfiGridInfo,
) -> FalloutErrorCode {
    let Some(run) = (unsafe { run_from_ptr(run) }) else {
        return track_error(&DefaultFalloutError::null_pointer("run"));
    };
    if out_info.is_null() {
        return track_error(&DefaultFalloutError::null_pointer("out_info"));
    }
    let result = match transport_grids(run) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let grid = &result.dose_rate;
    unsafe {
        *out_info = FfiGridInfo {
            width: u32::try_from(grid.width).unwrap_or(u32::MAX),
            height: u32::try_from(grid.height).unwrap_or(u32::MAX),
            resolution_km: grid.resolution_km,
            min_x_km: grid.x_km(0),
            min_y_km: grid.y_km(0),
            render_angle_deg: result.metadata.render_angle_deg,
        };
    }
    clear_last_error();
    FalloutErrorCode::Ok
}

/// Borrow one transport grid as a row-major array of `width * height` values.
///
/// **DO NOT FREE** `*out_data`; it lives as long as the run.
///
/// # Safety
/// `run` must be null or a live run; `out_data` and `out_len` must be null or
/// writable.
#[no_mangle]
pub unsafe extern "C" fn fallout_run_grid(
    run: *const FalloutRun,
    kind: FfiGridKind,
    out_data: *mut *const f64,
    out_len: *mut usize,
) -> FalloutErrorCode {
    let Some(run) = (unsafe { run_from_ptr(run) }) else {
        return track_error(&DefaultFalloutError::null_pointer("run"));
    };
    if out_data.is_null() || out_len.is_null() {
        return track_error(&DefaultFalloutError::null_pointer("out_data/out_len"));
    }
    let result = match transport_grids(run) {
        Ok(r) => r,
        Err(code) => {
            unsafe {
                *out_data = ptr::null();
                *out_len = 0;
            }
            return code;
        }
    };

    let grid: &GridField = match kind {
        FfiGridKind::DoseRate => &result.dose_rate,
        FfiGridKind::Arrival => &result.arrival,
        FfiGridKind::CumulativeDose => &result.cumulative_dose,
    };
    unsafe {
        *out_data = grid.as_slice().as_ptr();
        *out_len = grid.data.len();
    }
    clear_last_error();
    FalloutErrorCode::Ok
}

/// Number of contours the run produced.
///
/// # Safety
/// `run` must be null or a live run; `out_count` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn fallout_run_contour_count(
    run: *const FalloutRun,
    out_count: *mut usize,
) -> FalloutErrorCode {
    let Some(run) = (unsafe { run_from_ptr(run) }) else {
        return track_error(&DefaultFalloutError::null_pointer("run"));
    };
    if out_count.is_null() {
        return track_error(&DefaultFalloutError::null_pointer("out_count"));
    }
    unsafe {
        *out_count = run.assessment.contours.len();
    }
    clear_last_error();
    FalloutErrorCode::Ok
}

/// Copy up to `capacity` contours, lowest threshold first, into `out_contours`.
///
/// `out_written` receives how many were copied.
///
/// # Safety
/// `run` must be null or a live run. `out_contours` must be null or point to
/// at least `capacity` writable `FfiContour`s. `out_written` must be null or
/// writable.
#[no_mangle]
pub unsafe extern "C" fn fallout_run_contours(
    run: *const FalloutRun,
    out_contours: *mut FfiContour,
    capacity: usize,
    out_written: *mut usize,
) -> FalloutErrorCode {
    let Some(run) = (unsafe { run_from_ptr(run) }) else {
        return track_error(&DefaultFalloutError::null_pointer("run"));
    };
    if out_contours.is_null() || out_written.is_null() {
        return track_error(&DefaultFalloutError::null_pointer("out_contours/out_written"));
    }

    let count = run.assessment.contours.len().min(capacity);
    let dest = unsafe { std::slice::from_raw_parts_mut(out_contours, count) };
    for (slot, c) in dest.iter_mut().zip(&run.assessment.contours) {
        *slot = FfiContour {
            threshold: c.threshold,
            length_km: c.length_km,
            width_km: c.width_km,
        };
    }
    unsafe {
        *out_written = count;
    }
    clear_last_error();
    FalloutErrorCode::Ok
}

/// Casualty totals of the run.
///
/// # Safety
/// `run` must be null or a live run; `out_casualties` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn fallout_run_casualties(
    run: *const FalloutRun,
    out_casualties: *mut FfiCasualties,
) -> FalloutErrorCode {
    let Some(run) = (unsafe { run_from_ptr(run) }) else {
        return track_error(&DefaultFalloutError::null_pointer("run"));
    };
    if out_casualties.is_null() {
        return track_error(&DefaultFalloutError::null_pointer("out_casualties"));
    }
    let c = run.assessment.casualties;
    unsafe {
        *out_casualties = FfiCasualties {
            fatalities: c.fatalities,
            injuries: c.injuries,
            affected_area_km2: c.affected_area_km2,
        };
    }
    clear_last_error();
    FalloutErrorCode::Ok
}

/// H+1 dose rate (R/hr) at a downwind-frame point (km).
///
/// Analytic runs evaluate the closed-form field; transport runs read the
/// containing grid cell and report 0 outside the grid.
///
/// # Safety
/// `run` must be null or a live run; `out_rate` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn fallout_run_dose_rate_at(
    run: *const FalloutRun,
    x_km: f64,
    y_km: f64,
    out_rate: *mut f64,
) -> FalloutErrorCode {
    let Some(run) = (unsafe { run_from_ptr(run) }) else {
        return track_error(&DefaultFalloutError::null_pointer("run"));
    };
    if out_rate.is_null() {
        return track_error(&DefaultFalloutError::null_pointer("out_rate"));
    }
    let finite = x_km.is_finite() && y_km.is_finite();
    if !finite {
        return track_error(&DefaultFalloutError::invalid_parameter(format!(
            "Query point must be finite, got ({x_km}, {y_km})"
        )));
    }

    let rate = if let Some(params) = &run.assessment.point_dose {
        let (x_mi, y_mi) = DownwindPoint::new(x_km, y_km).to_miles();
        point_dose_rate(x_mi, y_mi, params)
    } else if let Some(result) = &run.transport {
        result.dose_rate.value_at_km(x_km, y_km).unwrap_or(0.0)
    } else {
        return track_error(&DefaultFalloutError::not_available("dose-rate field"));
    };

    unsafe {
        *out_rate = rate;
    }
    clear_last_error();
    FalloutErrorCode::Ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::{
        fallout_run_destroy, fallout_run_new, fallout_scenario_default, FfiModelKind,
    };

    fn new_run(model: FfiModelKind) -> *mut FalloutRun {
        let scenario = FfiScenario {
            max_distance_km: 30.0,
            particle_bins: 8,
            model,
            ..fallout_scenario_default()
        };
        let mut run: *mut FalloutRun = ptr::null_mut();
        let code = unsafe { fallout_run_new(&scenario, &mut run) };
        assert_eq!(code, FalloutErrorCode::Ok);
        run
    }

    #[test]
    fn test_transport_grid_access() {
        let run = new_run(FfiModelKind::Transport);
        let mut info = FfiGridInfo::default();
        assert_eq!(
            unsafe { fallout_run_grid_info(run, &mut info) },
            FalloutErrorCode::Ok
        );
        assert_eq!(info.width, 60);
        assert_eq!(info.min_x_km, -15.0);

        let mut data: *const f64 = ptr::null();
        let mut len = 0usize;
        let code = unsafe { fallout_run_grid(run, FfiGridKind::DoseRate, &mut data, &mut len) };
        assert_eq!(code, FalloutErrorCode::Ok);
        assert_eq!(len, 3600);
        let values = unsafe { std::slice::from_raw_parts(data, len) };
        assert!(values.iter().all(|&v| v >= 0.0));

        unsafe { fallout_run_destroy(run) };
    }

    #[test]
    fn test_analytic_has_no_grid() {
        let run = new_run(FfiModelKind::Analytic);
        let mut info = FfiGridInfo::default();
        assert_eq!(
            unsafe { fallout_run_grid_info(run, &mut info) },
            FalloutErrorCode::UnsupportedConfiguration
        );

        let mut rate = -1.0;
        let code = unsafe { fallout_run_dose_rate_at(run, 5.0, 0.0, &mut rate) };
        assert_eq!(code, FalloutErrorCode::Ok);
        assert!(rate >= 0.0);

        unsafe { fallout_run_destroy(run) };
    }

    #[test]
    fn test_contours_respect_capacity() {
        let run = new_run(FfiModelKind::Analytic);
        let mut count = 0usize;
        assert_eq!(
            unsafe { fallout_run_contour_count(run, &mut count) },
            FalloutErrorCode::Ok
        );
        assert!(count > 2);

        let mut buf = [FfiContour::default(); 2];
        let mut written = 0usize;
        let code = unsafe { fallout_run_contours(run, buf.as_mut_ptr(), 2, &mut written) };
        assert_eq!(code, FalloutErrorCode::Ok);
        assert_eq!(written, 2);
        assert!(buf[0].threshold < buf[1].threshold);

        unsafe { fallout_run_destroy(run) };
    }

    #[test]
    fn test_null_run() {
        let mut c = FfiCasualties::default();
        assert_eq!(
            unsafe { fallout_run_casualties(ptr::null(), &mut c) },
            FalloutErrorCode::NullPointer
        );
    }
}
