//! Power-law decay of fallout dose rate
//!
//! ```text
//! rate(t) = R1 · t^-k
//! dose(ts, te) = R1 / (k - 1) · (ts^-(k-1) - te^-(k-1))
//! ```
//!
//! Way-Wigner uses `k = 1.2`; the WSEG-10 variant uses `k = 1.26`.

use crate::grid::{ArrivalTimeGrid, CumulativeDoseGrid, DoseRateGrid, GridField};
use serde::{Deserialize, Serialize};

/// Decay law for fallout dose rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DecayLaw {
    /// `t^-1.2`
    #[default]
    WayWigner,
    /// `t^-1.26`
    Wseg,
}

impl DecayLaw {
    /// Decay exponent `k`
    #[must_use]
    pub fn exponent(self) -> f64 {
        match self {
            DecayLaw::WayWigner => 1.2,
            DecayLaw::Wseg => 1.26,
        }
    }

    /// Dose rate at `time_hr` after burst given the H+1 rate.
    ///
    /// Zero for non-positive times or rates.
    #[must_use]
    pub fn dose_rate_at(self, dose_rate_h1: f64, time_hr: f64) -> f64 {
        if time_hr <= 0.0 || dose_rate_h1 <= 0.0 {
            return 0.0;
        }
        dose_rate_h1 * time_hr.powf(-self.exponent())
    }

    /// Dose accumulated between `start_hr` and `end_hr`.
    ///
    /// Zero when the window is empty, starts at or before the burst, or the
    /// rate is not positive.
    #[must_use]
    pub fn integrate_window(self, dose_rate_h1: f64, start_hr: f64, end_hr: f64) -> f64 {
        if start_hr >= end_hr || start_hr <= 0.0 || dose_rate_h1 <= 0.0 {
            return 0.0;
        }
        let m = self.exponent() - 1.0;
        dose_rate_h1 / m * (start_hr.powf(-m) - end_hr.powf(-m))
    }
}

/// Converts H+1 dose rates and arrival times into cumulative dose
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoseIntegrator {
    /// Decay law applied over the exposure window
    pub law: DecayLaw,
    /// Earliest exposure start (hours); arrivals before this are clamped up
    pub min_start_hr: f64,
    /// Dose rates below this (R/hr) are treated as no fallout
    pub negligible_rate: f64,
}

impl Default for DoseIntegrator {
    fn default() -> Self {
        Self {
            law: DecayLaw::WayWigner,
            min_start_hr: 0.1,
            negligible_rate: 1e-6,
        }
    }
}

impl DoseIntegrator {
    /// Cumulative dose for a window opening at fallout arrival.
    ///
    /// `t_start = max(0.1, arrival)`, `t_end = t_start + duration`.
    #[must_use]
    pub fn integrate(
        &self,
        dose_rate_h1: f64,
        arrival_time_hr: f64,
        exposure_duration_hr: f64,
    ) -> f64 {
        if !exposure_duration_hr.is_finite() || exposure_duration_hr <= 0.0 {
            return 0.0;
        }
        let t_start = arrival_time_hr.max(self.min_start_hr);
        if !t_start.is_finite() {
            return 0.0;
        }
        self.law
            .integrate_window(dose_rate_h1, t_start, t_start + exposure_duration_hr)
    }

    /// Elementwise [`integrate`](Self::integrate) over a run's grids.
    ///
    /// Cells with a negligible dose rate or with no finite arrival time are
    /// zero in the result.
    #[must_use]
    pub fn integrate_grid(
        &self,
        dose_rate: &DoseRateGrid,
        arrival: &ArrivalTimeGrid,
        exposure_duration_hr: f64,
    ) -> CumulativeDoseGrid {
        let mut total =
            GridField::new(dose_rate.width, dose_rate.height, dose_rate.resolution_km);

        for (ix, iy, rate) in dose_rate.cells() {
            if rate < self.negligible_rate {
                continue;
            }
            let arrival_hr = arrival.get(ix, iy).unwrap_or(f64::INFINITY);
            if !arrival_hr.is_finite() {
                continue;
            }
            total.set(ix, iy, self.integrate(rate, arrival_hr, exposure_duration_hr));
        }

        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_way_wigner_factor() {
        let dose = DoseIntegrator::default().integrate(100.0, 1.0, 24.0);
        let expected = 100.0 * 5.0 * (1.0 - 25f64.powf(-0.2));
        assert_relative_eq!(dose, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_early_arrival_clamped() {
        let integrator = DoseIntegrator::default();
        assert_eq!(
            integrator.integrate(10.0, 0.0, 24.0),
            integrator.integrate(10.0, 0.1, 24.0)
        );
    }

    #[test]
    fn test_later_arrival_lowers_dose() {
        let integrator = DoseIntegrator::default();
        let mut previous = f64::INFINITY;
        for arrival in [0.0, 0.5, 1.0, 2.0, 6.0, 24.0, 100.0] {
            let dose = integrator.integrate(50.0, arrival, 24.0);
            assert!(dose <= previous, "arrival {arrival}: {dose} > {previous}");
            previous = dose;
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        let integrator = DoseIntegrator::default();
        assert_eq!(integrator.integrate(50.0, f64::INFINITY, 24.0), 0.0);
        assert_eq!(integrator.integrate(50.0, 1.0, 0.0), 0.0);
        assert_eq!(integrator.integrate(0.0, 1.0, 24.0), 0.0);
        assert_eq!(integrator.integrate(-3.0, 1.0, 24.0), 0.0);
    }

    #[test]
    fn test_wseg_law() {
        assert_relative_eq!(DecayLaw::Wseg.dose_rate_at(100.0, 1.0), 100.0);
        assert_relative_eq!(
            DecayLaw::Wseg.dose_rate_at(100.0, 7.0),
            100.0 * 7f64.powf(-1.26)
        );
        assert_eq!(DecayLaw::Wseg.dose_rate_at(100.0, 0.0), 0.0);

        let dose = DecayLaw::Wseg.integrate_window(100.0, 1.0, 2.0);
        let expected = 100.0 / 0.26 * (1.0 - 2f64.powf(-0.26));
        assert_relative_eq!(dose, expected, max_relative = 1e-12);
        assert_eq!(DecayLaw::Wseg.integrate_window(100.0, 2.0, 2.0), 0.0);
    }

    #[test]
    fn test_grid_masks_negligible_and_unreached() {
        let mut rate = GridField::new(3, 1, 1.0);
        let mut arrival = GridField::unreached(3, 1, 1.0);
        rate.set(0, 0, 100.0);
        arrival.set(0, 0, 1.0);
        rate.set(1, 0, 1e-9);
        arrival.set(1, 0, 1.0);
        rate.set(2, 0, 100.0); // never arrived

        let total = DoseIntegrator::default().integrate_grid(&rate, &arrival, 24.0);
        assert!(total.get(0, 0).unwrap_or(0.0) > 0.0);
        assert_eq!(total.get(1, 0), Some(0.0));
        assert_eq!(total.get(2, 0), Some(0.0));
    }
}
