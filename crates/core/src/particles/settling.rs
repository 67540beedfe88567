//! Settling trajectory of a single particle size through the atmosphere
//!
//! The fall is stepped downward in 100 m slices. In each slice the terminal
//! velocity follows from the dimensionless drag parameter
//!
//! ```text
//! q = 32·ρa·ρp·g·r³ / (3·η²)
//! ```
//!
//! via a quartic (q < 140) or log10 power-law correlation for the particle
//! Reynolds number `ry`, with `v = ry·η / (2·ρa·r)`.

use crate::atmosphere::AtmosphericProfileTable;
use serde::{Deserialize, Serialize};

/// Fused-soil particle density (kg/m³)
pub const PARTICLE_DENSITY_KG_M3: f64 = 2600.0;

/// Gravitational acceleration (m/s²)
const GRAVITY: f64 = 9.81;

/// Vertical slice thickness (m)
const ALTITUDE_STEP_M: f64 = 100.0;

/// Velocities at or below this are treated as stalled (m/s)
const MIN_VELOCITY_MS: f64 = 1e-6;

/// Time charged for a slice the particle cannot settle through (s)
const STALLED_STEP_S: f64 = 86_400.0;

/// Transition between the two drag correlations
const DRAG_REGIME_Q: f64 = 140.0;

/// One checkpoint along a settling path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    /// Altitude above ground (m)
    pub altitude_m: f64,
    /// Time since the particle left its stabilised height (s)
    pub elapsed_s: f64,
}

/// Ordered settling path of one particle bin
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FallTrajectory {
    /// Total time to reach the ground (s)
    pub total_time_s: f64,
    /// Checkpoints from the start altitude down to the ground
    pub points: Vec<TrajectoryPoint>,
}

impl FallTrajectory {
    /// Fall time in hours
    #[must_use]
    pub fn total_time_hr(&self) -> f64 {
        self.total_time_s / 3600.0
    }

    /// Altitude the fall started from (0 for an empty trajectory)
    #[must_use]
    pub fn start_altitude_m(&self) -> f64 {
        self.points.first().map_or(0.0, |p| p.altitude_m)
    }

    /// True when there is nothing to advect
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() || self.total_time_s <= 0.0
    }
}

/// Steps particles down through an atmospheric profile
#[derive(Debug, Clone, Copy, Default)]
pub struct FallTimeIntegrator {
    atmosphere: AtmosphericProfileTable,
}

impl FallTimeIntegrator {
    /// Integrator over the given atmosphere
    #[must_use]
    pub fn new(atmosphere: AtmosphericProfileTable) -> Self {
        Self { atmosphere }
    }

    /// Integrate the fall of a `radius_microns` particle from `start_altitude_m`.
    ///
    /// A start altitude that is not a positive finite number yields an empty
    /// trajectory with zero time.
    #[must_use]
    pub fn integrate(&self, start_altitude_m: f64, radius_microns: f64) -> FallTrajectory {
        if !start_altitude_m.is_finite() || start_altitude_m <= 0.0 {
            return FallTrajectory::default();
        }

        let radius_m = radius_microns * 1e-6;
        let step_count = (start_altitude_m / ALTITUDE_STEP_M).ceil() as usize;
        let mut points = Vec::with_capacity(step_count + 1);

        let mut altitude = start_altitude_m;
        let mut elapsed = 0.0;
        points.push(TrajectoryPoint {
            altitude_m: altitude,
            elapsed_s: elapsed,
        });

        while altitude > 0.0 {
            let step = ALTITUDE_STEP_M.min(altitude);
            let velocity = self.settling_velocity(altitude, radius_m);

            elapsed += if velocity > MIN_VELOCITY_MS {
                step / velocity
            } else {
                STALLED_STEP_S
            };
            altitude -= step;

            points.push(TrajectoryPoint {
                altitude_m: altitude,
                elapsed_s: elapsed,
            });
        }

        FallTrajectory {
            total_time_s: elapsed,
            points,
        }
    }

    /// Terminal velocity (m/s) of a particle of `radius_m` at `altitude_m`
    #[must_use]
    pub fn settling_velocity(&self, altitude_m: f64, radius_m: f64) -> f64 {
        let atm = self.atmosphere.lookup(altitude_m);
        let rho_a = atm.density_kg_m3;
        let eta = atm.viscosity_pa_s;

        let q = 32.0 * rho_a * PARTICLE_DENSITY_KG_M3 * GRAVITY * radius_m.powi(3)
            / (3.0 * eta * eta);
        let ry = settling_coefficient(q);

        if ry > 0.0 && rho_a > 0.0 && radius_m > 0.0 {
            ry * eta / (2.0 * rho_a * radius_m)
        } else {
            MIN_VELOCITY_MS
        }
    }
}

/// Dimensionless settling coefficient as a function of the drag parameter
fn settling_coefficient(q: f64) -> f64 {
    if q < DRAG_REGIME_Q {
        q / 24.0 - 2.3363e-4 * q.powi(2) + 2.0154e-6 * q.powi(3) - 6.9105e-9 * q.powi(4)
    } else {
        let x = q.log10();
        let log_ry = -1.295_36 + 0.986 * x - 0.046_677 * x.powi(2) + 0.001_123_5 * x.powi(3);
        10f64.powf(log_ry)
    }
}
