//! Particle-transport fallout run
//!
//! For every particle bin: loft to the stabilised cloud height, settle through
//! the atmosphere, drift downwind with height-dependent wind, then land as an
//! anisotropic Gaussian on the dose-rate grid. Post-processing integrates the
//! dose over the exposure window, extracts contour extents and estimates
//! casualties.

use super::deposition::{deposit_gaussian, Deposit, K_FACTOR_R_KM2_PER_HR_KT};
use super::drift::{downwind_displacement_km, plume_spread};
use crate::casualties::{CasualtyBreakdown, CasualtyEstimator};
use crate::core_types::{Degrees, Kilotons, KilometersPerHour};
use crate::dose::DoseIntegrator;
use crate::frame::render_angle_deg;
use crate::grid::{
    grid_steps, scan_contours, ArrivalTimeGrid, ContourExtent, CumulativeDoseGrid, DoseRateGrid,
    GridField, MAX_GRID_STEPS, TRANSPORT_CONTOUR_THRESHOLDS,
};
use crate::particles::{
    CloudStabilizationModel, FallTimeIntegrator, ParticleBin, ParticleBinGenerator,
    COARSE_RADIUS_MICRONS, DEFAULT_BIN_COUNT, MAX_BIN_COUNT,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Bins carrying less activity than this are not transported
const NEGLIGIBLE_ACTIVITY: f64 = 1e-6;

/// Release height substituted for coarse bins that were not lofted (m)
const COARSE_FALLBACK_HEIGHT_M: f64 = 100.0;

/// Layer thickness substituted for coarse bins that were not lofted (m)
const COARSE_FALLBACK_THICKNESS_M: f64 = 50.0;

/// Model name reported in run metadata
pub const TRANSPORT_MODEL_NAME: &str = "DELFIC";

/// Grid extent used when the caller gives none: `min(500, 100 + int(8·Y))` km
#[must_use]
pub fn default_max_distance_km(yield_kt: Kilotons) -> f64 {
    let extra = (8.0 * f64::from(yield_kt)).trunc().max(0.0);
    (100.0 + extra).min(500.0)
}

/// What happened to one particle bin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BinOutcome {
    /// Landed on the grid
    Deposited(BinDeposit),
    /// Activity below the transport threshold
    SkippedNegligible,
    /// Fine bin with no loft
    SkippedNoLoft,
    /// Settling produced no fall time
    SkippedNoFall,
}

/// Transport details of a deposited bin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinDeposit {
    /// Release height (m)
    pub cloud_height_m: f64,
    /// Release layer thickness (m)
    pub cloud_thickness_m: f64,
    /// True when the coarse fallback release replaced a zero loft
    pub coarse_fallback: bool,
    /// Time to reach the ground (hours)
    pub fall_time_hr: f64,
    /// Downwind landing offset (km)
    pub downwind_km: f64,
    /// Along-wind spread (km)
    pub sigma_x_km: f64,
    /// Crosswind spread (km)
    pub sigma_y_km: f64,
    /// Grid cells that received activity
    pub cells_touched: usize,
}

/// Per-bin diagnostic record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinTrace {
    /// Bin position in the generated distribution
    pub index: usize,
    /// Bin radius (µm)
    pub radius_microns: f64,
    /// Share of total activity
    pub activity_fraction: f64,
    /// Outcome
    pub outcome: BinOutcome,
}

/// Descriptive data about a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportMetadata {
    /// Model name
    pub model: String,
    /// Yield (kt)
    pub yield_kt: f64,
    /// Surface wind speed (km/h)
    pub wind_speed_kph: f64,
    /// Wind direction as given (meteorological "from", degrees)
    pub wind_from_deg: f64,
    /// Screen rotation of the downwind axis for map overlays (degrees)
    pub render_angle_deg: f64,
    /// Cell edge length (km)
    pub resolution_km: f64,
    /// Grid extent used (km)
    pub max_distance_km: f64,
    /// Cumulative dose window (hours)
    pub exposure_duration_hr: f64,
    /// Number of particle bins generated
    pub particle_bins: usize,
    /// Highest H+1 dose rate on the grid (R/hr)
    pub peak_dose_rate: f64,
    /// One record per generated bin
    pub bins: Vec<BinTrace>,
}

/// Output of a transport run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportResult {
    /// H+1 dose rate (R/hr)
    pub dose_rate: DoseRateGrid,
    /// Earliest arrival (hours, `+∞` where nothing landed)
    pub arrival: ArrivalTimeGrid,
    /// Dose over the exposure window (rem)
    pub cumulative_dose: CumulativeDoseGrid,
    /// Thresholds scanned (R/hr)
    pub contour_thresholds: Vec<f64>,
    /// Extents of the thresholds that were reached
    pub contours: Vec<ContourExtent>,
    /// Casualty estimate
    pub casualties: CasualtyBreakdown,
    /// Run description and per-bin diagnostics
    pub metadata: TransportMetadata,
}

impl TransportResult {
    /// Downwind coordinate of every grid column (km)
    #[must_use]
    pub fn x_coords_km(&self) -> Vec<f64> {
        self.dose_rate.x_coords_km()
    }

    /// Crosswind coordinate of every grid row (km)
    #[must_use]
    pub fn y_coords_km(&self) -> Vec<f64> {
        self.dose_rate.y_coords_km()
    }

    /// Extent for one threshold, if reached
    #[must_use]
    pub fn contour(&self, threshold: f64) -> Option<&ContourExtent> {
        self.contours.iter().find(|c| c.threshold == threshold)
    }
}

/// Particle-transport fallout engine
#[derive(Debug, Clone)]
pub struct PlumeTransportEngine {
    /// Particle-size distribution
    pub bins: ParticleBinGenerator,
    /// Number of particle bins
    pub bin_count: usize,
    /// Settling integrator
    pub settling: FallTimeIntegrator,
    /// Cumulative dose integrator
    pub dose: DoseIntegrator,
    /// Exposure window for the cumulative dose (hours)
    pub exposure_duration_hr: f64,
    /// Casualty estimator
    pub casualties: CasualtyEstimator,
}

impl Default for PlumeTransportEngine {
    fn default() -> Self {
        Self {
            bins: ParticleBinGenerator::default(),
            bin_count: DEFAULT_BIN_COUNT,
            settling: FallTimeIntegrator::default(),
            dose: DoseIntegrator::default(),
            exposure_duration_hr: 24.0,
            casualties: CasualtyEstimator::default(),
        }
    }
}

impl PlumeTransportEngine {
    /// Run one scenario.
    ///
    /// Downwind is always the grid's +x axis; `wind_direction` only feeds the
    /// render angle in the metadata. `max_distance_km` defaults to
    /// [`default_max_distance_km`]. A grid needing more than
    /// [`MAX_GRID_STEPS`] cells per axis is not allocated: the run returns
    /// empty grids and transports no bins. The bin count is capped at
    /// [`MAX_BIN_COUNT`].
    #[must_use]
    pub fn run(
        &self,
        yield_kt: Kilotons,
        wind_speed: KilometersPerHour,
        wind_direction: Degrees,
        population_density: f64,
        resolution_km: f64,
        max_distance_km: Option<f64>,
    ) -> TransportResult {
        let max_distance_km = max_distance_km.unwrap_or_else(|| default_max_distance_km(yield_kt));
        let mut dose_rate = GridField::covering(max_distance_km, resolution_km, 0.0);
        let mut arrival = GridField::covering(max_distance_km, resolution_km, f64::INFINITY);

        info!(
            yield_kt = *yield_kt,
            wind_kph = *wind_speed,
            wind_from_deg = *wind_direction,
            grid = dose_rate.width,
            resolution_km,
            "transport run start"
        );

        let grid_fits = grid_steps(max_distance_km, resolution_km).is_some();
        if !grid_fits {
            warn!(
                max_distance_km,
                resolution_km,
                max_steps = MAX_GRID_STEPS,
                "grid too large, returning an empty run"
            );
        }
        let bin_count = if self.bin_count > MAX_BIN_COUNT {
            warn!(requested = self.bin_count, used = MAX_BIN_COUNT, "bin count capped");
            MAX_BIN_COUNT
        } else {
            self.bin_count
        };

        let bins = if yield_kt.is_positive() && grid_fits {
            self.bins.generate(bin_count, yield_kt)
        } else {
            Vec::new()
        };

        let surface_wind_ms = wind_speed.to_mps().max(0.0);
        let traces: Vec<BinTrace> = bins
            .iter()
            .enumerate()
            .map(|(index, bin)| {
                let outcome = self.transport_bin(
                    bin,
                    yield_kt,
                    surface_wind_ms,
                    &mut dose_rate,
                    &mut arrival,
                );
                BinTrace {
                    index,
                    radius_microns: bin.radius_microns,
                    activity_fraction: bin.activity_fraction,
                    outcome,
                }
            })
            .collect();

        let cumulative_dose =
            self.dose
                .integrate_grid(&dose_rate, &arrival, self.exposure_duration_hr);
        let contours = scan_contours(&dose_rate, &TRANSPORT_CONTOUR_THRESHOLDS);
        let casualties = self
            .casualties
            .estimate(&cumulative_dose, population_density, yield_kt);
        let peak_dose_rate = dose_rate.max_value();

        info!(
            peak_dose_rate,
            contours = contours.len(),
            fatal = casualties.fatal,
            injured = casualties.severe,
            "transport run complete"
        );

        TransportResult {
            metadata: TransportMetadata {
                model: TRANSPORT_MODEL_NAME.to_string(),
                yield_kt: *yield_kt,
                wind_speed_kph: *wind_speed,
                wind_from_deg: *wind_direction,
                render_angle_deg: *render_angle_deg(wind_direction),
                resolution_km,
                max_distance_km,
                exposure_duration_hr: self.exposure_duration_hr,
                particle_bins: bins.len(),
                peak_dose_rate,
                bins: traces,
            },
            dose_rate,
            arrival,
            cumulative_dose,
            contour_thresholds: TRANSPORT_CONTOUR_THRESHOLDS.to_vec(),
            contours,
            casualties,
        }
    }

    fn transport_bin(
        &self,
        bin: &ParticleBin,
        yield_kt: Kilotons,
        surface_wind_ms: f64,
        dose_rate: &mut DoseRateGrid,
        arrival: &mut ArrivalTimeGrid,
    ) -> BinOutcome {
        let radius = bin.radius_microns;
        if bin.activity_fraction < NEGLIGIBLE_ACTIVITY {
            debug!(radius, "bin skipped: negligible activity");
            return BinOutcome::SkippedNegligible;
        }

        let mut cloud = CloudStabilizationModel::compute(yield_kt, radius);
        let coarse_fallback = !cloud.is_lofted();
        if coarse_fallback {
            if radius <= COARSE_RADIUS_MICRONS {
                debug!(radius, "bin skipped: no loft");
                return BinOutcome::SkippedNoLoft;
            }
            cloud.center_height_m = COARSE_FALLBACK_HEIGHT_M;
            cloud.thickness_m = COARSE_FALLBACK_THICKNESS_M;
        }

        let trajectory = self.settling.integrate(cloud.center_height_m, radius);
        if trajectory.is_empty() {
            debug!(radius, "bin skipped: no fall time");
            return BinOutcome::SkippedNoFall;
        }

        let fall_time_hr = trajectory.total_time_hr();
        let downwind_km = downwind_displacement_km(&trajectory, surface_wind_ms, radius);
        let spread = plume_spread(
            fall_time_hr,
            yield_kt,
            downwind_km,
            radius,
            dose_rate.resolution_km,
        );

        let cells_touched = deposit_gaussian(
            dose_rate,
            arrival,
            &Deposit {
                downwind_km,
                spread,
                amplitude: bin.activity_fraction * K_FACTOR_R_KM2_PER_HR_KT * *yield_kt,
                arrival_hr: fall_time_hr,
            },
        );

        debug!(
            radius,
            activity = bin.activity_fraction,
            cloud_height_m = cloud.center_height_m,
            fall_time_hr,
            downwind_km,
            sigma_x_km = spread.sigma_x_km,
            sigma_y_km = spread.sigma_y_km,
            aspect = spread.aspect_ratio(),
            cells_touched,
            "bin deposited"
        );

        BinOutcome::Deposited(BinDeposit {
            cloud_height_m: cloud.center_height_m,
            cloud_thickness_m: cloud.thickness_m,
            coarse_fallback,
            fall_time_hr,
            downwind_km,
            sigma_x_km: spread.sigma_x_km,
            sigma_y_km: spread.sigma_y_km,
            cells_touched,
        })
    }
}
