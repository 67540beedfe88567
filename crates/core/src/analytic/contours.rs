//! Calibrated isodose contour dimensions
//!
//! Each threshold carries a reference length and width at 10 kt. Other yields
//! scale by `(Y / 10)^exponent`, or `sqrt(Y / 10)` where no exponent was
//! calibrated. A linear wind correction relative to 15 mph is then applied.

use crate::core_types::{Kilotons, MilesPerHour};
use serde::{Deserialize, Serialize};

/// Yield the reference table was calibrated at (kt)
pub const REFERENCE_YIELD_KT: f64 = 10.0;

/// Wind speed the reference table was calibrated at (mph)
pub const REFERENCE_WIND_MPH: f64 = 15.0;

const MIN_LENGTH_KM: f64 = 0.1;
const MIN_WIDTH_KM: f64 = 0.01;

/// Peak position as a share of contour length
const MAX_LOCATION_FRACTION: f64 = 0.3;

/// Reference dimensions of one contour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceContour {
    /// H+1 dose rate (R/hr)
    pub threshold: f64,
    /// Length at 10 kt (km)
    pub length_km: f64,
    /// Width at 10 kt (km)
    pub width_km: f64,
    /// Length yield exponent, 0 for square-root scaling
    pub length_exponent: f64,
    /// Width yield exponent, 0 for square-root scaling
    pub width_exponent: f64,
}

const fn reference(
    threshold: f64,
    length_km: f64,
    width_km: f64,
    length_exponent: f64,
    width_exponent: f64,
) -> ReferenceContour {
    ReferenceContour {
        threshold,
        length_km,
        width_km,
        length_exponent,
        width_exponent,
    }
}

/// Reference table, lowest threshold first
pub const REFERENCE_CONTOURS: [ReferenceContour; 8] = [
    reference(1.0, 123.0, 11.8, 0.0, 0.0),
    reference(3.0, 85.0, 8.0, 0.37, 0.72),
    reference(10.0, 62.7, 4.48, 0.36, 0.70),
    reference(30.0, 42.0, 3.0, 0.36, 0.72),
    reference(100.0, 27.0, 1.5, 0.36, 0.70),
    reference(300.0, 21.0, 1.2, 0.37, 0.68),
    reference(1000.0, 4.12, 0.82, 0.54, 0.63),
    reference(3000.0, 5.0, 0.3, 0.40, 0.65),
];

/// Contour thresholds the analytic model reports (R/hr)
pub const ANALYTIC_CONTOUR_THRESHOLDS: [f64; 8] =
    [1.0, 3.0, 10.0, 30.0, 100.0, 300.0, 1000.0, 3000.0];

/// Multipliers applied to reference dimensions for a given wind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindCorrection {
    pub length: f64,
    pub width: f64,
}

impl WindCorrection {
    /// Calm winds stretch contours and narrow them; strong winds do the reverse
    #[must_use]
    pub fn for_wind(wind: MilesPerHour) -> Self {
        let w = *wind;
        if w < REFERENCE_WIND_MPH {
            let deficit = (REFERENCE_WIND_MPH - w) / REFERENCE_WIND_MPH;
            Self {
                length: 1.0 + deficit * 0.2,
                width: 1.0 - deficit * 0.15,
            }
        } else {
            let excess = (w - REFERENCE_WIND_MPH) / REFERENCE_WIND_MPH;
            Self {
                length: 1.0 - excess * 0.15,
                width: 1.0 + excess * 0.1,
            }
        }
    }
}

/// One isodose contour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalyticContour {
    /// H+1 dose rate (R/hr)
    pub threshold: f64,
    /// Downwind length (km, 0.1 km precision)
    pub length_km: f64,
    /// Crosswind width (km, 0.1 km precision)
    pub width_km: f64,
    /// Dose rate at the contour's hot spot (R/hr)
    pub max_dose: f64,
    /// Downwind position of the hot spot (km)
    pub max_location_km: f64,
}

/// Scale the reference table to `yield_kt` and correct for `wind`.
///
/// Contours shorter than 0.1 km or narrower than 0.01 km are dropped.
#[must_use]
pub fn scale_contours(yield_kt: Kilotons, wind: MilesPerHour) -> Vec<AnalyticContour> {
    let ratio = *yield_kt / REFERENCE_YIELD_KT;
    let correction = WindCorrection::for_wind(wind);

    REFERENCE_CONTOURS
        .iter()
        .filter_map(|r| {
            let length = scale(r.length_km, ratio, r.length_exponent) * correction.length;
            let width = scale(r.width_km, ratio, r.width_exponent) * correction.width;
            if length < MIN_LENGTH_KM || width < MIN_WIDTH_KM {
                return None;
            }
            Some(AnalyticContour {
                threshold: r.threshold,
                length_km: round_tenth(length),
                width_km: round_tenth(width),
                max_dose: r.threshold,
                max_location_km: round_tenth(length * MAX_LOCATION_FRACTION),
            })
        })
        .collect()
}

fn scale(base: f64, ratio: f64, exponent: f64) -> f64 {
    if exponent > 0.0 {
        base * ratio.powf(exponent)
    } else {
        base * ratio.sqrt()
    }
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wind_correction_at_reference() {
        let c = WindCorrection::for_wind(MilesPerHour::new(15.0));
        assert_eq!(c.length, 1.0);
        assert_eq!(c.width, 1.0);
    }

    #[test]
    fn test_wind_correction_slopes() {
        let calm = WindCorrection::for_wind(MilesPerHour::new(0.0));
        assert_relative_eq!(calm.length, 1.2);
        assert_relative_eq!(calm.width, 0.85);

        let strong = WindCorrection::for_wind(MilesPerHour::new(30.0));
        assert_relative_eq!(strong.length, 0.85);
        assert_relative_eq!(strong.width, 1.1);
    }

    #[test]
    fn test_reference_yield_reproduces_table() {
        let contours = scale_contours(Kilotons::new(10.0), MilesPerHour::new(15.0));
        assert_eq!(contours.len(), REFERENCE_CONTOURS.len());
        let c = contours
            .iter()
            .find(|c| c.threshold == 10.0)
            .expect("10 R/hr contour");
        assert_eq!(c.length_km, 62.7);
        assert_eq!(c.width_km, 4.5);
        assert_eq!(c.max_dose, 10.0);
        assert_eq!(c.max_location_km, 18.8);
    }

    #[test]
    fn test_square_root_scaling_without_exponent() {
        let contours = scale_contours(Kilotons::new(40.0), MilesPerHour::new(15.0));
        let one = contours.iter().find(|c| c.threshold == 1.0).expect("1 R/hr");
        assert_eq!(one.length_km, 246.0);
        assert_eq!(one.width_km, 23.6);
    }

    #[test]
    fn test_tiny_yield_drops_small_contours() {
        let contours = scale_contours(Kilotons::new(0.0001), MilesPerHour::new(15.0));
        assert!(contours.len() < REFERENCE_CONTOURS.len());
        for c in &contours {
            assert!(c.length_km >= 0.1);
        }
    }

    #[test]
    fn test_thresholds_listed_in_order() {
        let thresholds: Vec<f64> = REFERENCE_CONTOURS.iter().map(|r| r.threshold).collect();
        assert_eq!(thresholds, ANALYTIC_CONTOUR_THRESHOLDS.to_vec());
    }
}
