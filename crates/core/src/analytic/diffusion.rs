//! WSEG-10 diffusion parameters and point dose rate
//!
//! All lengths are statute miles, heights thousands of feet, times hours and
//! speeds mph, as in the published regressions.

use crate::core_types::{Kilotons, MilesPerHour, KPH_TO_MPH};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, SQRT_2};

/// Specific activity constant: H+1 R/hr·mi² per kt of fission yield
pub const SPECIFIC_ACTIVITY: f64 = 2350.0;

const FEET_PER_MILE: f64 = 5280.0;
const FEET_PER_KM: f64 = 3280.84;

/// Floor on the along-wind variance (mi²)
const MIN_SIGMA_X_SQ: f64 = 16.0;

/// Floor on the initial cloud radius (mi)
const MIN_SIGMA_O: f64 = 2.0;

/// Floor on the profile-shape exponent
const MIN_SHAPE_EXPONENT: f64 = 1.3;

/// Closed-form coefficients for one `(yield, wind)` pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiffusionParameters {
    /// Yield (kt)
    pub yield_kt: f64,
    /// Share of the yield from fission (0-1)
    pub fission_fraction: f64,
    /// Surface wind (mph)
    pub wind_mph: f64,
    /// Stabilised cloud centre height (kft)
    pub hc_kft: f64,
    /// Vertical cloud standard deviation (mi)
    pub sigma_h_mi: f64,
    /// Initial horizontal cloud radius (mi)
    pub sigma_o: f64,
    /// Cloud stabilisation time (hours)
    pub tc_hr: f64,
    /// Transport length `wind · Tc` (mi)
    pub lo_mi: f64,
    /// Along-wind spread (mi)
    pub sigma_x_mi: f64,
    /// Combined diffusion length (mi)
    pub l_mi: f64,
    /// Profile-shape exponent
    pub n: f64,
    /// Crosswind shear (per hour, in mi/kft units)
    pub sc_mi: f64,
    /// Along-wind spread used by the arrival probability term (mi)
    pub sigma_x_adj_mi: f64,
}

impl DiffusionParameters {
    /// Regressions for a positive `yield_kt` and wind.
    ///
    /// `shear_kph_per_km` is the wind shear with height; the classic value is 0.8.
    #[must_use]
    pub fn compute(
        yield_kt: Kilotons,
        wind: MilesPerHour,
        fission_fraction: f64,
        shear_kph_per_km: f64,
    ) -> Self {
        let y = *yield_kt;
        let wind_mph = *wind;
        let log_y = y.log10();
        let ln_y_mt = yield_kt.to_megatons().ln();

        // km/h per km -> mph per kft -> per-mile form used by the crosswind terms
        let sc_mi = shear_kph_per_km * KPH_TO_MPH * (FEET_PER_KM / 1000.0) / FEET_PER_MILE;

        let hc_kft = 50.7
            + 20.4 * log_y
            + 3.50 * log_y.powi(2)
            + 2.40 * log_y.powi(3)
            + 0.60 * log_y.powi(4);
        let sigma_h_mi = 0.125 * hc_kft / FEET_PER_MILE;

        let raw_sigma_o = (0.70 + ln_y_mt / 3.0 - 3.25 / (4.0 + (ln_y_mt + 5.4).powi(2))).exp();
        let ak = 0.90 - 0.40 * log_y + 0.30 * log_y.powi(2) + 0.10 * log_y.powi(3);
        let sigma_o = (raw_sigma_o * ak).max(MIN_SIGMA_O);
        let sigma_o_sq = sigma_o * sigma_o;

        let h = hc_kft / 60.0;
        let tc_hr =
            1.0573203 * (12.0 * h - 2.5 * h * h) * (1.0 - 0.5 * (-(hc_kft / 25.0).powi(2)).exp());

        let lo_mi = wind_mph * tc_hr;
        let lo_sq = lo_mi * lo_mi;

        let sigma_x_sq = (sigma_o_sq * (lo_sq + 8.0 * sigma_o_sq) / (lo_sq + 2.0 * sigma_o_sq))
            .max(MIN_SIGMA_X_SQ);
        let sigma_x_mi = sigma_x_sq.sqrt();
        let l_mi = (lo_sq + 2.0 * sigma_x_sq).sqrt();
        let n = ((lo_sq + sigma_x_sq) / (lo_sq + 0.5 * sigma_x_sq)).max(MIN_SHAPE_EXPONENT);

        let alpha1 = 1.0 / (1.0 + 0.001 * hc_kft * wind_mph / sigma_o);

        Self {
            yield_kt: y,
            fission_fraction,
            wind_mph,
            hc_kft,
            sigma_h_mi,
            sigma_o,
            tc_hr,
            lo_mi,
            sigma_x_mi,
            l_mi,
            n,
            sc_mi,
            sigma_x_adj_mi: sigma_x_mi / alpha1,
        }
    }

    /// H+1 dose rate (R/hr) at `x_mi` downwind and `y_mi` crosswind
    #[must_use]
    pub fn point_dose_rate(&self, x_mi: f64, y_mi: f64) -> f64 {
        point_dose_rate(x_mi, y_mi, self)
    }
}

/// H+1 dose rate (R/hr) at a point in the downwind frame (miles).
///
/// Product of an along-wind marginal (generalised exponential profile gated
/// by the probability that the plume has reached `x`) and a Gaussian crosswind
/// marginal whose variance grows with distance and shear. Any degenerate
/// intermediate (non-positive variance, overflow, NaN) yields zero.
#[must_use]
pub fn point_dose_rate(x_mi: f64, y_mi: f64, p: &DiffusionParameters) -> f64 {
    let l = p.l_mi;
    let l_sq = l * l;
    let shear_height = p.tc_hr * p.sigma_h_mi * p.sc_mi;
    let ahead = x_mi + 2.0 * p.sigma_x_mi;

    let ambient = p.sigma_o * p.sigma_o * (1.0 + 8.0 * ahead.abs() / l);
    let shear_coupling = (2.0 / l_sq) * (p.sigma_x_mi * shear_height).powi(2);
    let shear_position = (1.0 / (l_sq * l_sq)) * (ahead * p.lo_mi * shear_height).powi(2);
    let sigma_y_sq = ambient + shear_coupling + shear_position;
    let usable = sigma_y_sq.is_finite() && sigma_y_sq > 0.0;
    if !usable {
        return 0.0;
    }
    let sigma_y = sigma_y_sq.sqrt();

    let w = (p.lo_mi / l) * (x_mi / p.sigma_x_adj_mi);
    let phi = cumulative_normal(w);

    let g_x = (-(x_mi.abs() / l).powf(p.n)).exp() / (l * libm::tgamma(1.0 + 1.0 / p.n));
    let f_x = p.yield_kt * SPECIFIC_ACTIVITY * phi * g_x * p.fission_fraction;
    let along_ok = f_x.is_finite() && f_x > 0.0;
    if !along_ok {
        return 0.0;
    }

    let alpha2_arg = p.wind_mph * (1.0 - phi * (2.0 * x_mi / p.wind_mph));
    let alpha2 = 1.0 / (1.0 + (0.001 * p.hc_kft / p.sigma_o) * alpha2_arg);
    let y_norm = y_mi / (alpha2 * sigma_y);
    let f_y = (-0.5 * y_norm * y_norm).exp() / ((2.0 * PI).sqrt() * sigma_y);

    let rate = f_x * f_y;
    if rate.is_finite() {
        rate
    } else {
        0.0
    }
}

/// Standard normal CDF
fn cumulative_normal(x: f64) -> f64 {
    0.5 * (1.0 + libm::erf(x / SQRT_2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params(yield_kt: f64, wind_kph: f64) -> DiffusionParameters {
        DiffusionParameters::compute(
            Kilotons::new(yield_kt),
            MilesPerHour::new(wind_kph * KPH_TO_MPH),
            1.0,
            0.8,
        )
    }

    #[test]
    fn test_one_kiloton_cloud_height() {
        // log10(1) = 0 leaves the constant term
        let p = params(1.0, 24.0);
        assert_relative_eq!(p.hc_kft, 50.7, max_relative = 1e-12);
        assert_relative_eq!(p.sigma_h_mi, 0.125 * 50.7 / 5280.0, max_relative = 1e-12);
    }

    #[test]
    fn test_floors_hold() {
        for y in [0.1, 1.0, 20.0, 1000.0, 50_000.0] {
            let p = params(y, 24.0);
            assert!(p.sigma_o >= 2.0);
            assert!(p.sigma_x_mi >= 4.0);
            assert!(p.n >= 1.3);
            assert!(p.l_mi > p.lo_mi);
        }
    }

    #[test]
    fn test_shear_conversion() {
        let p = params(10.0, 24.0);
        assert_relative_eq!(
            p.sc_mi,
            0.8 * 0.621371 * 3.28084 / 5280.0,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_transport_length_scales_with_wind() {
        let slow = params(20.0, 12.0);
        let fast = params(20.0, 24.0);
        assert_relative_eq!(fast.lo_mi, 2.0 * slow.lo_mi, max_relative = 1e-12);
        assert_eq!(slow.tc_hr, fast.tc_hr);
    }

    #[test]
    fn test_point_dose_shape() {
        let p = params(20.0, 24.0);
        let on_axis = p.point_dose_rate(10.0, 0.0);
        let off_axis = p.point_dose_rate(10.0, 5.0);
        let upwind = p.point_dose_rate(-10.0, 0.0);
        assert!(on_axis > 0.0);
        assert!(off_axis < on_axis);
        assert!(upwind < on_axis);
        // Symmetric across the plume axis
        assert_relative_eq!(
            p.point_dose_rate(10.0, 3.0),
            p.point_dose_rate(10.0, -3.0),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_point_dose_scales_with_fission_fraction() {
        let full = params(20.0, 24.0);
        let half = DiffusionParameters {
            fission_fraction: 0.5,
            ..full
        };
        assert_relative_eq!(
            half.point_dose_rate(8.0, 1.0),
            0.5 * full.point_dose_rate(8.0, 1.0),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_degenerate_parameters_give_zero() {
        let p = DiffusionParameters {
            sigma_o: 0.0,
            ..params(20.0, 24.0)
        };
        // A zero cloud radius collapses the crosswind compression factor
        assert_eq!(p.point_dose_rate(-2.0 * p.sigma_x_mi, 0.0), 0.0);

        let far = params(20.0, 24.0).point_dose_rate(1.0e6, 0.0);
        assert_eq!(far, 0.0);
    }

    #[test]
    fn test_cumulative_normal() {
        assert_relative_eq!(cumulative_normal(0.0), 0.5, max_relative = 1e-15);
        assert!(cumulative_normal(8.0) > 0.999_999);
        assert!(cumulative_normal(-8.0) < 1e-6);
    }
}
