//! Analytic isodose model entry point

use super::contours::{scale_contours, AnalyticContour, WindCorrection};
use super::diffusion::DiffusionParameters;
use crate::casualties::{estimate_near_field, NearFieldCalibration, NearFieldCasualties};
use crate::core_types::{Kilotons, KilometersPerHour};
use crate::frame::DownwindPoint;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// Height of burst category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BurstHeight {
    /// Contact or near-surface burst, the only case that produces local fallout
    #[default]
    Ground,
    /// Air burst
    Air,
}

impl fmt::Display for BurstHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BurstHeight::Ground => write!(f, "Ground"),
            BurstHeight::Air => write!(f, "Air"),
        }
    }
}

/// Why the analytic model produced nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnsupportedReason {
    /// Only ground bursts are modelled
    NotGroundBurst(BurstHeight),
    /// Yield was zero, negative or not finite
    NonPositiveYield,
    /// Wind was zero, negative or not finite
    NonPositiveWind,
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedReason::NotGroundBurst(b) => write!(f, "{b} burst is not modelled"),
            UnsupportedReason::NonPositiveYield => write!(f, "yield must be positive"),
            UnsupportedReason::NonPositiveWind => write!(f, "wind speed must be positive"),
        }
    }
}

/// Contours and diffusion parameters for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticResult {
    /// Contours that survived the minimum-size cut, lowest threshold first
    pub contours: Vec<AnalyticContour>,
    /// Parameters for point queries
    pub parameters: DiffusionParameters,
    /// Wind multipliers applied to the reference table
    pub wind_correction: WindCorrection,
}

impl AnalyticResult {
    /// Contour for one threshold, if present
    #[must_use]
    pub fn contour(&self, threshold: f64) -> Option<&AnalyticContour> {
        self.contours.iter().find(|c| c.threshold == threshold)
    }

    /// H+1 dose rate (R/hr) at a downwind-frame point given in km
    #[must_use]
    pub fn dose_rate_at(&self, point: DownwindPoint) -> f64 {
        let (x_mi, y_mi) = point.to_miles();
        self.parameters.point_dose_rate(x_mi, y_mi)
    }
}

/// Outcome of [`AnalyticIsodoseModel::compute`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnalyticOutcome {
    Computed(Box<AnalyticResult>),
    Unsupported(UnsupportedReason),
}

impl AnalyticOutcome {
    /// Computed result, if any
    #[must_use]
    pub fn result(&self) -> Option<&AnalyticResult> {
        match self {
            AnalyticOutcome::Computed(r) => Some(r.as_ref()),
            AnalyticOutcome::Unsupported(_) => None,
        }
    }

    /// Contours, empty when unsupported
    #[must_use]
    pub fn contours(&self) -> &[AnalyticContour] {
        match self.result() {
            Some(r) => &r.contours,
            None => &[],
        }
    }

    #[must_use]
    pub fn is_supported(&self) -> bool {
        matches!(self, AnalyticOutcome::Computed(_))
    }
}

/// WSEG-10 style closed-form fallout model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalyticIsodoseModel {
    /// Share of the yield from fission; values outside 0-1 are replaced by 1
    pub fission_fraction: f64,
    /// Wind shear with height (km/h per km)
    pub shear_kph_per_km: f64,
    /// Near-field coefficients for this model's casualty estimate
    pub calibration: NearFieldCalibration,
}

impl Default for AnalyticIsodoseModel {
    fn default() -> Self {
        Self {
            fission_fraction: 1.0,
            shear_kph_per_km: 0.8,
            calibration: NearFieldCalibration::ANALYTIC,
        }
    }
}

impl AnalyticIsodoseModel {
    /// Contours and diffusion parameters for a burst.
    ///
    /// Returns [`AnalyticOutcome::Unsupported`] for anything but a ground
    /// burst with positive yield and wind.
    #[must_use]
    pub fn compute(
        &self,
        yield_kt: Kilotons,
        wind_speed: KilometersPerHour,
        burst: BurstHeight,
    ) -> AnalyticOutcome {
        info!(
            yield_kt = *yield_kt,
            wind_kph = *wind_speed,
            %burst,
            "analytic run start"
        );

        if burst != BurstHeight::Ground {
            warn!(%burst, "analytic model only handles ground bursts");
            return AnalyticOutcome::Unsupported(UnsupportedReason::NotGroundBurst(burst));
        }
        if !yield_kt.is_positive() {
            return AnalyticOutcome::Unsupported(UnsupportedReason::NonPositiveYield);
        }
        let wind_ok = wind_speed.is_finite() && *wind_speed > 0.0;
        if !wind_ok {
            return AnalyticOutcome::Unsupported(UnsupportedReason::NonPositiveWind);
        }

        let fission_fraction = self.effective_fission_fraction();
        let wind = wind_speed.to_mph();
        let contours = scale_contours(yield_kt, wind);
        let parameters =
            DiffusionParameters::compute(yield_kt, wind, fission_fraction, self.shear_kph_per_km);

        info!(
            contours = contours.len(),
            cloud_height_kft = parameters.hc_kft,
            transport_length_mi = parameters.lo_mi,
            "analytic run complete"
        );

        AnalyticOutcome::Computed(Box::new(AnalyticResult {
            contours,
            parameters,
            wind_correction: WindCorrection::for_wind(wind),
        }))
    }

    /// Near-field casualties under this model's calibration, without variance
    #[must_use]
    pub fn casualties(&self, yield_kt: Kilotons, population_density: f64) -> NearFieldCasualties {
        estimate_near_field(yield_kt, population_density, &self.calibration)
    }

    fn effective_fission_fraction(&self) -> f64 {
        let f = self.fission_fraction;
        if (0.0..=1.0).contains(&f) {
            f
        } else {
            warn!(fission_fraction = f, "fission fraction outside 0-1, using 1.0");
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> AnalyticIsodoseModel {
        AnalyticIsodoseModel::default()
    }

    #[test]
    fn test_air_burst_unsupported() {
        let out = model().compute(
            Kilotons::new(20.0),
            KilometersPerHour::new(24.0),
            BurstHeight::Air,
        );
        assert_eq!(
            out,
            AnalyticOutcome::Unsupported(UnsupportedReason::NotGroundBurst(BurstHeight::Air))
        );
        assert!(out.contours().is_empty());
        assert!(out.result().is_none());
    }

    #[test]
    fn test_invalid_inputs_unsupported() {
        let m = model();
        let ground = BurstHeight::Ground;
        assert_eq!(
            m.compute(Kilotons::new(0.0), KilometersPerHour::new(24.0), ground),
            AnalyticOutcome::Unsupported(UnsupportedReason::NonPositiveYield)
        );
        assert_eq!(
            m.compute(Kilotons::new(10.0), KilometersPerHour::new(0.0), ground),
            AnalyticOutcome::Unsupported(UnsupportedReason::NonPositiveWind)
        );
    }

    #[test]
    fn test_ground_burst_computes() {
        let out = model().compute(
            Kilotons::new(20.0),
            KilometersPerHour::new(24.0),
            BurstHeight::Ground,
        );
        assert!(out.is_supported());
        let result = out.result().expect("computed");
        assert_eq!(result.contours.len(), 8);
        assert!(result.contour(1000.0).is_some());
        assert!(result.dose_rate_at(DownwindPoint::new(15.0, 0.0)) > 0.0);
    }

    #[test]
    fn test_fission_fraction_normalised() {
        let m = AnalyticIsodoseModel {
            fission_fraction: 1.7,
            ..model()
        };
        let out = m.compute(
            Kilotons::new(20.0),
            KilometersPerHour::new(24.0),
            BurstHeight::Ground,
        );
        let p = out.result().expect("computed").parameters;
        assert_eq!(p.fission_fraction, 1.0);

        let half = AnalyticIsodoseModel {
            fission_fraction: 0.5,
            ..model()
        };
        assert_eq!(half.effective_fission_fraction(), 0.5);
    }

    #[test]
    fn test_casualties_use_analytic_calibration() {
        let m = model();
        let y = Kilotons::new(10.0);
        let direct = estimate_near_field(y, 35_000.0, &NearFieldCalibration::ANALYTIC);
        assert_eq!(m.casualties(y, 35_000.0), direct);
        assert!(m.casualties(Kilotons::new(0.0), 35_000.0).zones.is_empty());
    }
}
