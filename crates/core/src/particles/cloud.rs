//! Stabilised cloud geometry per particle size
//!
//! Centre height and thickness come from quartic regressions in `ln(yield)`.
//! Particles above 500 µm are assumed to leave the rising cloud early, so their
//! loft is cut exponentially with radius.

use crate::core_types::Kilotons;
use serde::{Deserialize, Serialize};

/// Radius above which a particle counts as coarse local fallout (µm)
pub const COARSE_RADIUS_MICRONS: f64 = 500.0;

/// Lowest centre height a coarse particle is lofted to (m)
const COARSE_FLOOR_M: f64 = 50.0;

// exp(a0 + a1·L + a2·L² + a3·L³ + a4·L⁴), L = ln(yield_kt)
const C1_COEFFS: [f64; 5] = [7.889, 0.3477, 0.001_226, -0.004_227, 0.000_470];
const C2_COEFFS: [f64; 5] = [1.574, -0.011_97, 0.036_36, -0.004_10, 0.000_196_5];
const SPREAD_COEFFS: [f64; 5] = [
    1.7899,
    -0.048_249,
    0.023_024_8,
    -0.002_259_65,
    0.000_101_519,
];
const INTERCEPT_COEFFS: [f64; 5] = [
    7.035_18,
    0.158_914,
    0.083_753_9,
    -0.015_546_4,
    0.000_862_103,
];

/// Vertical extent of the stabilised cloud for one particle class
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CloudGeometry {
    /// Height of the particle class centre above ground (m), never negative
    pub center_height_m: f64,
    /// Vertical thickness of the layer (m), never negative
    pub thickness_m: f64,
}

impl CloudGeometry {
    /// True when the class was lofted at all
    #[must_use]
    pub fn is_lofted(&self) -> bool {
        self.center_height_m > 0.0
    }
}

/// Yield/radius regression for stabilised cloud geometry
#[derive(Debug, Clone, Copy, Default)]
pub struct CloudStabilizationModel;

impl CloudStabilizationModel {
    /// Stabilised geometry for particles of `radius_microns` from a `yield_kt` burst.
    ///
    /// Non-positive yields give zero geometry.
    #[must_use]
    pub fn compute(yield_kt: Kilotons, radius_microns: f64) -> CloudGeometry {
        if !yield_kt.is_positive() {
            return CloudGeometry::default();
        }

        let ln_y = yield_kt.ln();
        let c1 = regression(&C1_COEFFS, ln_y);
        let c2 = regression(&C2_COEFFS, ln_y);

        let mut center = c1 - c2 * radius_microns;
        if radius_microns > COARSE_RADIUS_MICRONS {
            center *= (-0.003 * (radius_microns - COARSE_RADIUS_MICRONS)).exp();
            center = center.max(COARSE_FLOOR_M);
        }

        let spread = regression(&SPREAD_COEFFS, ln_y);
        let intercept = regression(&INTERCEPT_COEFFS, ln_y);

        CloudGeometry {
            center_height_m: center.max(0.0),
            thickness_m: (intercept + 2.0 * radius_microns * spread).max(0.0),
        }
    }
}

/// `exp` of a quartic in `x`
fn regression(coeffs: &[f64; 5], x: f64) -> f64 {
    coeffs
        .iter()
        .rev()
        .fold(0.0, |acc, &c| acc * x + c)
        .exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_kiloton_reduces_to_constant_terms() {
        // ln(1) = 0, so only the leading coefficients remain
        let geom = CloudStabilizationModel::compute(Kilotons::new(1.0), 0.0);
        assert!((geom.center_height_m - 7.889f64.exp()).abs() < 1e-6);
        assert!((geom.thickness_m - 7.035_18f64.exp()).abs() < 1e-6);
    }

    #[test]
    fn test_zero_yield_gives_zero_geometry() {
        for y in [0.0, -5.0, f64::NAN] {
            let geom = CloudStabilizationModel::compute(Kilotons::new(y), 100.0);
            assert_eq!(geom, CloudGeometry::default());
            assert!(!geom.is_lofted());
        }
    }

    #[test]
    fn test_height_falls_with_radius() {
        let y = Kilotons::new(100.0);
        let small = CloudStabilizationModel::compute(y, 20.0);
        let large = CloudStabilizationModel::compute(y, 400.0);
        assert!(small.center_height_m > large.center_height_m);
        assert!(large.thickness_m > small.thickness_m);
    }

    #[test]
    fn test_coarse_particles_floored() {
        // 1500 µm at 1 kt: c1 - c2·r is deeply negative before the cut, then floored
        let c1 = 7.889f64.exp();
        let c2 = 1.574f64.exp();
        let raw = (c1 - c2 * 1500.0) * (-0.003f64 * 1000.0).exp();
        let geom = CloudStabilizationModel::compute(Kilotons::new(1.0), 1500.0);
        assert!((geom.center_height_m - raw.max(50.0)).abs() < 1e-9);
        assert!(geom.center_height_m >= 50.0);
    }

    #[test]
    fn test_fine_particles_clamped_at_zero() {
        // No floor below the coarse threshold: at 0.01 kt, c2·r exceeds c1 by 400 µm
        let geom = CloudStabilizationModel::compute(Kilotons::new(0.01), 400.0);
        assert_eq!(geom.center_height_m, 0.0);
        assert!(geom.thickness_m > 0.0);

        let geom = CloudStabilizationModel::compute(Kilotons::new(1.0), 499.0);
        let expected = 7.889f64.exp() - 1.574f64.exp() * 499.0;
        assert!((geom.center_height_m - expected).abs() < 1e-9);
    }
}
