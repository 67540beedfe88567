//! Downwind advection and plume spread for one particle bin

use crate::core_types::Kilotons;
use crate::particles::{FallTrajectory, COARSE_RADIUS_MICRONS};
use serde::{Deserialize, Serialize};

/// Radius above which along-wind spread is cut hardest (µm)
const VERY_COARSE_RADIUS_MICRONS: f64 = 800.0;

/// Radius above which crosswind spread starts to narrow (µm)
const MEDIUM_RADIUS_MICRONS: f64 = 200.0;

/// Wind strengthening with height: `1 + gain · (z / z_max)^power`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindShear {
    /// Extra wind at the top of the layer, as a multiple of the surface wind
    pub gain: f64,
    /// Profile exponent
    pub power: f64,
}

impl WindShear {
    /// Shear felt by coarse particles, which fall through the low layers quickly
    pub const COARSE: WindShear = WindShear {
        gain: 0.5,
        power: 0.8,
    };

    /// Shear felt by fine particles
    pub const FINE: WindShear = WindShear {
        gain: 2.5,
        power: 0.6,
    };

    /// Profile for a particle radius
    #[must_use]
    pub fn for_radius(radius_microns: f64) -> Self {
        if radius_microns > COARSE_RADIUS_MICRONS {
            Self::COARSE
        } else {
            Self::FINE
        }
    }

    /// Wind multiplier at `altitude_fraction` of the release height
    #[must_use]
    pub fn multiplier(&self, altitude_fraction: f64) -> f64 {
        1.0 + self.gain * altitude_fraction.powf(self.power)
    }
}

/// Downwind distance (km) travelled while settling along `trajectory`.
///
/// Each segment is advected at the surface wind scaled by the shear profile at
/// the segment's mean altitude relative to the release height.
#[must_use]
pub fn downwind_displacement_km(
    trajectory: &FallTrajectory,
    surface_wind_ms: f64,
    radius_microns: f64,
) -> f64 {
    let shear = WindShear::for_radius(radius_microns);
    let max_alt = trajectory.start_altitude_m();

    let metres: f64 = trajectory
        .points
        .windows(2)
        .map(|seg| {
            let mean_alt = 0.5 * (seg[0].altitude_m + seg[1].altitude_m);
            let duration = seg[1].elapsed_s - seg[0].elapsed_s;
            let wind = if max_alt > 0.0 && mean_alt > 0.0 {
                surface_wind_ms * shear.multiplier(mean_alt / max_alt)
            } else {
                surface_wind_ms
            };
            wind * duration
        })
        .sum();

    metres / 1000.0
}

/// Gaussian spread of one deposited bin (km)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlumeSpread {
    /// Along-wind standard deviation (km)
    pub sigma_x_km: f64,
    /// Crosswind standard deviation (km)
    pub sigma_y_km: f64,
}

impl PlumeSpread {
    /// Along-wind to crosswind ratio
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        self.sigma_x_km / self.sigma_y_km.max(1e-6)
    }
}

/// Spread for a bin that fell for `fall_time_hr` and landed `downwind_km`
/// from ground zero, floored at a resolution-scaled minimum so that a bin is
/// never narrower than the grid can represent.
#[must_use]
pub fn plume_spread(
    fall_time_hr: f64,
    yield_kt: Kilotons,
    downwind_km: f64,
    radius_microns: f64,
    resolution_km: f64,
) -> PlumeSpread {
    let y = f64::from(yield_kt).max(0.0);
    let sqrt_t = fall_time_hr.max(0.0).sqrt();

    let mut sigma_x = 7.5 * sqrt_t * y.powf(0.16);
    if fall_time_hr > 2.0 {
        sigma_x *= 1.0 + 0.15 * fall_time_hr.log10();
    }
    if radius_microns > VERY_COARSE_RADIUS_MICRONS {
        sigma_x *= VERY_COARSE_RADIUS_MICRONS / radius_microns;
    } else if radius_microns > COARSE_RADIUS_MICRONS {
        sigma_x *= (COARSE_RADIUS_MICRONS / radius_microns).sqrt();
    }

    let width_scale = if y < 5.0 { 0.5 + y / 10.0 } else { 1.0 };
    let mut sigma_y = 0.35 * sqrt_t * y.powf(0.32) * width_scale;
    if downwind_km > 10.0 {
        sigma_y *= 1.0 + 0.5 * (downwind_km / 10.0).log10();
    } else if downwind_km > 5.0 {
        sigma_y *= 1.0 + 0.35 * (downwind_km / 5.0).log10();
    }
    if radius_microns > COARSE_RADIUS_MICRONS {
        sigma_y *= (COARSE_RADIUS_MICRONS / radius_microns).powf(0.06);
    } else if radius_microns > MEDIUM_RADIUS_MICRONS {
        sigma_y *= (MEDIUM_RADIUS_MICRONS / radius_microns).powf(0.04);
    }

    let (min_x, min_y) = if radius_microns > VERY_COARSE_RADIUS_MICRONS {
        (0.2, 0.3)
    } else if radius_microns > COARSE_RADIUS_MICRONS {
        (0.3, 0.4)
    } else {
        (0.8, 0.5)
    };

    PlumeSpread {
        sigma_x_km: sigma_x.max(min_x * resolution_km),
        sigma_y_km: sigma_y.max(min_y * resolution_km),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::TrajectoryPoint;
    use approx::assert_relative_eq;

    fn straight_fall(start_m: f64, seconds_per_100m: f64) -> FallTrajectory {
        let steps = (start_m / 100.0) as usize;
        let points: Vec<_> = (0..=steps)
            .map(|i| TrajectoryPoint {
                altitude_m: start_m - 100.0 * i as f64,
                elapsed_s: seconds_per_100m * i as f64,
            })
            .collect();
        FallTrajectory {
            total_time_s: seconds_per_100m * steps as f64,
            points,
        }
    }

    #[test]
    fn test_displacement_exceeds_surface_advection() {
        let traj = straight_fall(2000.0, 100.0);
        let surface_only = 10.0 * traj.total_time_s / 1000.0;
        let fine = downwind_displacement_km(&traj, 10.0, 50.0);
        let coarse = downwind_displacement_km(&traj, 10.0, 1000.0);
        assert!(fine > coarse && coarse > surface_only);
        // Shear multiplier is bounded by 1 + gain
        assert!(fine < surface_only * 3.5);
        assert!(coarse < surface_only * 1.5);
    }

    #[test]
    fn test_calm_wind_no_drift() {
        let traj = straight_fall(1000.0, 50.0);
        assert_eq!(downwind_displacement_km(&traj, 0.0, 100.0), 0.0);
        assert_eq!(downwind_displacement_km(&FallTrajectory::default(), 5.0, 100.0), 0.0);
    }

    #[test]
    fn test_spread_base_case() {
        // 1 h fall, 10 kt, short range, fine particle
        let s = plume_spread(1.0, Kilotons::new(10.0), 2.0, 100.0, 0.5);
        assert_relative_eq!(s.sigma_x_km, 7.5 * 10f64.powf(0.16), max_relative = 1e-12);
        assert_relative_eq!(s.sigma_y_km, 0.35 * 10f64.powf(0.32), max_relative = 1e-12);
        assert!(s.aspect_ratio() > 1.0);
    }

    #[test]
    fn test_coarse_particles_tighter() {
        let y = Kilotons::new(10.0);
        let fine = plume_spread(1.0, y, 2.0, 400.0, 0.5);
        let coarse = plume_spread(1.0, y, 2.0, 600.0, 0.5);
        let very_coarse = plume_spread(1.0, y, 2.0, 1600.0, 0.5);
        assert!(fine.sigma_x_km > coarse.sigma_x_km);
        assert!(coarse.sigma_x_km > very_coarse.sigma_x_km);
        assert_relative_eq!(
            very_coarse.sigma_x_km,
            7.5 * 10f64.powf(0.16) * 0.5,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_minimum_spread_floors() {
        let s = plume_spread(0.0, Kilotons::new(10.0), 0.0, 100.0, 0.5);
        assert_eq!(s.sigma_x_km, 0.4);
        assert_eq!(s.sigma_y_km, 0.25);
        let s = plume_spread(0.0, Kilotons::new(10.0), 0.0, 1000.0, 1.0);
        assert_eq!(s.sigma_x_km, 0.2);
        assert_eq!(s.sigma_y_km, 0.3);
    }

    #[test]
    fn test_crosswind_widens_downwind() {
        let y = Kilotons::new(10.0);
        let near = plume_spread(3.0, y, 4.0, 100.0, 0.5);
        let mid = plume_spread(3.0, y, 8.0, 100.0, 0.5);
        let far = plume_spread(3.0, y, 100.0, 100.0, 0.5);
        assert!(near.sigma_y_km < mid.sigma_y_km && mid.sigma_y_km < far.sigma_y_km);
        assert_eq!(near.sigma_x_km, far.sigma_x_km);
    }
}
