use fallout_core::scenario::TransportModel;
use fallout_core::{
    create_fallout_model, BurstHeight, FalloutAssessment, ModelKind, ScenarioConfig,
    TransportResult,
};
use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr;
use tracing::warn;

use crate::error::{DefaultFalloutError, FalloutErrorCode};
use crate::helpers::{track_error, track_result};

/// Model selection for [`FfiScenario`].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiModelKind {
    /// Particle-transport grid model
    Transport = 0,
    /// Closed-form isodose model
    Analytic = 1,
}

/// Burst height category for [`FfiScenario`].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiBurstHeight {
    Ground = 0,
    Air = 1,
}

/// C-compatible scenario description.
///
/// Start from `fallout_scenario_default()` and override fields.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FfiScenario {
    /// Yield (kt)
    pub yield_kt: f64,
    /// Surface wind speed (km/h)
    pub wind_speed_kph: f64,
    /// Direction the wind blows from (degrees)
    pub wind_direction_deg: f64,
    /// Residential population density (people/km²)
    pub population_density: f64,
    /// Transport grid cell size (km)
    pub resolution_km: f64,
    /// Transport grid half-extent (km); zero or less derives it from the yield
    pub max_distance_km: f64,
    /// Cumulative dose window (hours)
    pub exposure_duration_hr: f64,
    /// Share of the yield from fission (0-1)
    pub fission_fraction: f64,
    /// Particle-size classes for the transport model
    pub particle_bins: u32,
    pub burst: FfiBurstHeight,
    pub model: FfiModelKind,
}

impl From<&ScenarioConfig> for FfiScenario {
    fn from(config: &ScenarioConfig) -> Self {
        Self {
            yield_kt: config.yield_kt,
            wind_speed_kph: config.wind_speed_kph,
            wind_direction_deg: config.wind_direction_deg,
            population_density: config.population_density,
            resolution_km: config.resolution_km,
            max_distance_km: config.max_distance_km.unwrap_or(0.0),
            exposure_duration_hr: config.exposure_duration_hr,
            fission_fraction: config.fission_fraction,
            particle_bins: u32::try_from(config.particle_bins).unwrap_or(u32::MAX),
            burst: match config.burst {
                BurstHeight::Ground => FfiBurstHeight::Ground,
                BurstHeight::Air => FfiBurstHeight::Air,
            },
            model: match config.model {
                ModelKind::Transport => FfiModelKind::Transport,
                ModelKind::Analytic => FfiModelKind::Analytic,
            },
        }
    }
}

impl From<&FfiScenario> for ScenarioConfig {
    fn from(s: &FfiScenario) -> Self {
        Self {
            yield_kt: s.yield_kt,
            wind_speed_kph: s.wind_speed_kph,
            wind_direction_deg: s.wind_direction_deg,
            population_density: s.population_density,
            resolution_km: s.resolution_km,
            max_distance_km: (s.max_distance_km > 0.0).then_some(s.max_distance_km),
            exposure_duration_hr: s.exposure_duration_hr,
            fission_fraction: s.fission_fraction,
            particle_bins: s.particle_bins as usize,
            burst: match s.burst {
                FfiBurstHeight::Ground => BurstHeight::Ground,
                FfiBurstHeight::Air => BurstHeight::Air,
            },
            model: match s.model {
                FfiModelKind::Transport => ModelKind::Transport,
                FfiModelKind::Analytic => ModelKind::Analytic,
            },
            ..ScenarioConfig::default()
        }
    }
}

/// A finished fallout assessment.
///
/// Immutable once created, so a `FalloutRun*` may be queried from any number
/// of threads at once.
pub struct FalloutRun {
    pub(crate) config: ScenarioConfig,
    pub(crate) assessment: FalloutAssessment,
    /// Grids, present for transport runs only
    pub(crate) transport: Option<TransportResult>,
}

impl FalloutRun {
    /// Validate `config` and evaluate it with the model it names.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when validation fails, `UnsupportedConfiguration`
    /// when the model refuses the scenario.
    pub(crate) fn new(config: ScenarioConfig) -> Result<Box<Self>, DefaultFalloutError> {
        config.validate()?;

        let (assessment, transport) = match config.model {
            ModelKind::Transport => {
                let result = TransportModel::default().run(&config);
                (FalloutAssessment::from_transport(&result), Some(result))
            }
            ModelKind::Analytic => (create_fallout_model(config.model).assess(&config), None),
        };

        if let Some(reason) = assessment.unsupported {
            warn!(%reason, model = %assessment.model, "scenario rejected");
            return Err(DefaultFalloutError::unsupported(reason));
        }

        Ok(Box::new(Self {
            config,
            assessment,
            transport,
        }))
    }
}

/// Default scenario: 10 kt ground burst, 24 km/h westerly wind,
/// 25 000 people/km², transport model.
#[no_mangle]
pub extern "C" fn fallout_scenario_default() -> FfiScenario {
    FfiScenario::from(&ScenarioConfig::default())
}

/// Write the run (or null) to `out_run` and record the outcome.
///
/// # Safety
/// `out_run` must be a valid, non-null pointer to writable memory.
unsafe fn publish_run(
    result: Result<Box<FalloutRun>, DefaultFalloutError>,
    out_run: *mut *mut FalloutRun,
) -> FalloutErrorCode {
    match track_result(result) {
        Ok(run) => {
            unsafe {
                *out_run = Box::into_raw(run);
            }
            FalloutErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                // Set to null on error (per documentation contract)
                *out_run = ptr::null_mut();
            }
            code
        }
    }
}

/// Evaluate a scenario and return the finished run via out-parameter.
///
/// Returns
/// - `Ok` (0) with a valid run in `out_run`
/// - `NullPointer` if `scenario` or `out_run` is null
/// - `InvalidParameter` if a scenario value is out of range
/// - `UnsupportedConfiguration` if the selected model cannot evaluate it
///
/// On failure `out_run` is set to null and `fallout_get_last_error()`
/// describes the problem.
///
/// # Safety
///
/// - `scenario` must point to a readable `FfiScenario`.
/// - `out_run` must be a valid, non-null pointer to writable memory.
/// - The caller owns the returned run and MUST call `fallout_run_destroy`
///   exactly once.
///
/// Example (C)
/// ```c
/// FfiScenario scenario = fallout_scenario_default();
/// scenario.yield_kt = 20.0;
/// FalloutRun* run = NULL;
/// if (fallout_run_new(&scenario, &run) == Ok) {
///     // ... query run ...
///     fallout_run_destroy(run);
/// }
/// ```
#[no_mangle]
pub unsafe extern "C" fn fallout_run_new(
    scenario: *const FfiScenario,
    out_run: *mut *mut FalloutRun,
) -> FalloutErrorCode {
    if out_run.is_null() {
        return track_error(&DefaultFalloutError::null_pointer("out_run"));
    }
    let Some(scenario) = (unsafe { scenario.as_ref() }) else {
        unsafe {
            *out_run = ptr::null_mut();
        }
        return track_error(&DefaultFalloutError::null_pointer("scenario"));
    };

    unsafe { publish_run(FalloutRun::new(ScenarioConfig::from(scenario)), out_run) }
}

/// Evaluate a scenario given as a JSON document.
///
/// Missing fields take their defaults. Return codes match
/// [`fallout_run_new`]; malformed JSON is `InvalidParameter`.
///
/// # Safety
///
/// - `json` must be a valid null-terminated C string.
/// - `out_run` must be a valid, non-null pointer to writable memory.
/// - The caller owns the returned run and MUST call `fallout_run_destroy`
///   exactly once.
#[no_mangle]
pub unsafe extern "C" fn fallout_run_from_json(
    json: *const c_char,
    out_run: *mut *mut FalloutRun,
) -> FalloutErrorCode {
    if out_run.is_null() {
        return track_error(&DefaultFalloutError::null_pointer("out_run"));
    }
    if json.is_null() {
        unsafe {
            *out_run = ptr::null_mut();
        }
        return track_error(&DefaultFalloutError::null_pointer("json"));
    }

    let text = unsafe { CStr::from_ptr(json) }.to_string_lossy();
    let result = ScenarioConfig::from_json_str(&text)
        .map_err(DefaultFalloutError::from)
        .and_then(FalloutRun::new);
    unsafe { publish_run(result, out_run) }
}

/// Destroy a run created by `fallout_run_new` or `fallout_run_from_json`.
///
/// A null `run` is a no-op.
///
/// # Safety
/// - The pointer MUST have come from one of the constructors above.
/// - The pointer MUST NOT be used after this call.
#[no_mangle]
pub unsafe extern "C" fn fallout_run_destroy(run: *mut FalloutRun) {
    if run.is_null() {
        return;
    }

    // SAFETY: created by `Box::into_raw` in `publish_run` and not yet freed.
    unsafe {
        drop(Box::from_raw(run));
    }
}
