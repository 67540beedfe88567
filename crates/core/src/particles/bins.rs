//! Discretised particle-size / activity distribution
//!
//! Radii are log-spaced between 10 and 2000 µm. The number density at each
//! radius is the sum of two log-normal modes (a fine condensation mode and a
//! coarse fused-soil mode). Activity is carried partly in the particle volume
//! and partly on its surface:
//!
//! ```text
//! A(r) = f_v · N(r)·r³ + (1 − f_v) · N(r)·r²
//! ```
//!
//! The activities are normalised so the bins sum to one.

use crate::core_types::Kilotons;
use serde::{Deserialize, Serialize};
use std::f64::consts::{LN_2, PI};
use tracing::debug;

/// Number of bins used by the transport engine unless configured otherwise
pub const DEFAULT_BIN_COUNT: usize = 15;

/// Upper bound on the number of bins a run will generate
pub const MAX_BIN_COUNT: usize = 1000;

/// One discretised particle-size class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleBin {
    /// Representative particle radius (µm)
    pub radius_microns: f64,
    /// Share of the total fallout activity carried by this class (0-1)
    pub activity_fraction: f64,
}

/// Bimodal log-normal particle-size distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleBinGenerator {
    /// Smallest radius (µm)
    pub min_radius_microns: f64,
    /// Largest radius (µm)
    pub max_radius_microns: f64,
    /// Fine-mode geometric mean radius (µm)
    pub fine_mean_microns: f64,
    /// Fine-mode log standard deviation
    pub fine_log_spread: f64,
    /// Coarse-mode geometric mean radius (µm)
    pub coarse_mean_microns: f64,
    /// Coarse-mode log standard deviation
    pub coarse_log_spread: f64,
    /// Fine-mode number weight
    pub fine_weight: f64,
    /// Coarse-mode number weight
    pub coarse_weight: f64,
    /// Fraction of activity distributed by volume (rest by surface)
    pub volume_fraction: f64,
}

impl Default for ParticleBinGenerator {
    fn default() -> Self {
        Self {
            min_radius_microns: 10.0,
            max_radius_microns: 2000.0,
            fine_mean_microns: 0.1,
            fine_log_spread: LN_2,
            coarse_mean_microns: 123.0,
            coarse_log_spread: 2.0 * LN_2,
            fine_weight: 0.1,
            coarse_weight: 0.9,
            volume_fraction: 0.68,
        }
    }
}

impl ParticleBinGenerator {
    /// Generate `count` bins ordered by increasing radius.
    ///
    /// The distribution shape is independent of yield; `yield_kt` is only
    /// carried into the diagnostics. Falls back to a uniform distribution if
    /// the total activity degenerates.
    #[must_use]
    pub fn generate(&self, count: usize, yield_kt: Kilotons) -> Vec<ParticleBin> {
        if count == 0 {
            return Vec::new();
        }

        let radii = self.log_spaced_radii(count);
        let activities: Vec<f64> = radii.iter().map(|&r| self.relative_activity(r)).collect();
        let total: f64 = activities.iter().sum();

        let uniform = !total.is_finite() || total <= 0.0;
        if uniform {
            debug!(
                yield_kt = *yield_kt,
                count, "particle activity degenerate, using uniform bins"
            );
        }

        radii
            .into_iter()
            .zip(activities)
            .map(|(radius_microns, activity)| ParticleBin {
                radius_microns,
                activity_fraction: if uniform {
                    1.0 / count as f64
                } else {
                    activity / total
                },
            })
            .collect()
    }

    /// Relative (unnormalised) activity carried by particles of radius `r` µm
    #[must_use]
    pub fn relative_activity(&self, radius_microns: f64) -> f64 {
        let number_density = log_normal(
            radius_microns,
            self.fine_mean_microns,
            self.fine_log_spread,
            self.fine_weight,
        ) + log_normal(
            radius_microns,
            self.coarse_mean_microns,
            self.coarse_log_spread,
            self.coarse_weight,
        );

        let volume_term = number_density * radius_microns.powi(3);
        let surface_term = number_density * radius_microns.powi(2);
        self.volume_fraction * volume_term + (1.0 - self.volume_fraction) * surface_term
    }

    fn log_spaced_radii(&self, count: usize) -> Vec<f64> {
        let lo = self.min_radius_microns.log10();
        let hi = self.max_radius_microns.log10();
        if count == 1 {
            return vec![self.min_radius_microns];
        }
        let step = (hi - lo) / (count - 1) as f64;
        (0..count)
            .map(|i| 10f64.powf(lo + step * i as f64))
            .collect()
    }
}

/// Weighted log-normal number density in ln(r)
fn log_normal(radius: f64, mean: f64, log_spread: f64, weight: f64) -> f64 {
    let z = (radius.ln() - mean.ln()) / log_spread;
    weight / ((2.0 * PI).sqrt() * log_spread) * (-0.5 * z * z).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractions_sum_to_one() {
        let generator = ParticleBinGenerator::default();
        for count in [1, 2, 7, 15, 40] {
            let bins = generator.generate(count, Kilotons::new(10.0));
            assert_eq!(bins.len(), count);
            let total: f64 = bins.iter().map(|b| b.activity_fraction).sum();
            assert!((total - 1.0).abs() < 1e-9, "count {count}: sum {total}");
        }
    }

    #[test]
    fn test_radii_span_and_order() {
        let bins = ParticleBinGenerator::default().generate(15, Kilotons::new(1.0));
        assert!((bins[0].radius_microns - 10.0).abs() < 1e-9);
        assert!((bins[14].radius_microns - 2000.0).abs() < 1e-6);
        assert!(bins.windows(2).all(|w| w[1].radius_microns > w[0].radius_microns));
    }

    #[test]
    fn test_coarse_particles_carry_most_activity() {
        // r³ weighting pushes activity well above the 123 µm coarse mean
        let bins = ParticleBinGenerator::default().generate(15, Kilotons::new(10.0));
        let coarse: f64 = bins
            .iter()
            .filter(|b| b.radius_microns > 100.0)
            .map(|b| b.activity_fraction)
            .sum();
        assert!(coarse > 0.8, "coarse share {coarse}");
    }

    #[test]
    fn test_uniform_fallback() {
        let degenerate = ParticleBinGenerator {
            fine_weight: 0.0,
            coarse_weight: 0.0,
            ..Default::default()
        };
        let bins = degenerate.generate(4, Kilotons::new(10.0));
        assert!(bins.iter().all(|b| (b.activity_fraction - 0.25).abs() < 1e-12));
    }

    #[test]
    fn test_zero_bins() {
        assert!(ParticleBinGenerator::default()
            .generate(0, Kilotons::new(10.0))
            .is_empty());
    }
}
