//! Combined near-field and fallout casualty estimate

use super::far_field::tally_fallout;
use super::near_field::{estimate_near_field, NearFieldCalibration};
use crate::core_types::Kilotons;
use crate::grid::CumulativeDoseGrid;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Deterministic RNG seed for a yield: `int(yield_kt · 1337) mod 2³²`.
///
/// Non-positive and non-finite yields map to seed 0.
#[must_use]
pub fn seed_for_yield(yield_kt: Kilotons) -> u64 {
    let scaled = *yield_kt * 1337.0;
    if scaled.is_finite() && scaled > 0.0 {
        (scaled as u64) % (1u64 << 32)
    } else {
        0
    }
}

/// Multipliers drawn for one estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CasualtyVariance {
    /// Multiplier on baseline fatalities
    pub fatal: f64,
    /// Multiplier on baseline injuries
    pub injured: f64,
}

/// Aggregate casualty estimate for one run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CasualtyBreakdown {
    /// Fatalities
    pub fatal: u64,
    /// Injuries requiring care
    pub severe: u64,
    /// Always zero; injuries are reported as severe
    pub moderate: u64,
    /// Mild fallout sickness
    pub mild: u64,
    /// `fatal + severe`
    pub total: u64,
    /// Area receiving at least 100 rem (km²)
    pub affected_area_km2: f64,
    /// Residential density the estimate used (people/km²)
    pub population_density: f64,
    /// Near-field fatalities before variance
    pub baseline_fatal: f64,
    /// Near-field injuries before variance
    pub baseline_injured: f64,
    /// Fatalities added from extreme fallout exposure
    pub fallout_fatal_addendum: u64,
    /// Injuries added from extreme fallout exposure
    pub fallout_injured_addendum: u64,
    /// Multipliers applied, `None` when nothing was estimated
    pub variance: Option<CasualtyVariance>,
}

impl CasualtyBreakdown {
    /// All-zero breakdown
    #[must_use]
    pub fn zero(population_density: f64) -> Self {
        Self {
            population_density,
            ..Self::default()
        }
    }

    /// True when nobody is affected
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.fatal == 0
            && self.severe == 0
            && self.moderate == 0
            && self.mild == 0
            && self.total == 0
            && self.affected_area_km2 == 0.0
    }
}

/// Near-field baseline plus fallout tallies with reproducible variance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CasualtyEstimator {
    /// Near-field coefficient set
    pub calibration: NearFieldCalibration,
    /// Uniform range for the fatality multiplier
    pub fatal_variance: (f64, f64),
    /// Uniform range for the injury multiplier
    pub injured_variance: (f64, f64),
    /// Share of fallout-only casualties added to the totals
    pub extreme_exposure_fraction: f64,
    /// Share of mild fallout cases reported
    pub mild_reporting_fraction: f64,
}

impl Default for CasualtyEstimator {
    fn default() -> Self {
        Self {
            calibration: NearFieldCalibration::TRANSPORT,
            fatal_variance: (0.88, 1.12),
            injured_variance: (0.85, 1.18),
            extreme_exposure_fraction: 0.05,
            mild_reporting_fraction: 0.2,
        }
    }
}

impl CasualtyEstimator {
    /// Estimate with the generator seeded from the yield
    #[must_use]
    pub fn estimate(
        &self,
        dose: &CumulativeDoseGrid,
        population_density: f64,
        yield_kt: Kilotons,
    ) -> CasualtyBreakdown {
        let mut rng = ChaCha8Rng::seed_from_u64(seed_for_yield(yield_kt));
        self.estimate_with_rng(dose, population_density, yield_kt, &mut rng)
    }

    /// Estimate drawing the variance multipliers from `rng`.
    ///
    /// Non-positive yields give an all-zero breakdown and draw nothing.
    pub fn estimate_with_rng<R: Rng + ?Sized>(
        &self,
        dose: &CumulativeDoseGrid,
        population_density: f64,
        yield_kt: Kilotons,
        rng: &mut R,
    ) -> CasualtyBreakdown {
        if !yield_kt.is_positive() {
            return CasualtyBreakdown::zero(population_density);
        }

        let near = estimate_near_field(yield_kt, population_density, &self.calibration);
        let fallout = tally_fallout(dose, population_density);

        let variance = CasualtyVariance {
            fatal: draw(rng, self.fatal_variance),
            injured: draw(rng, self.injured_variance),
        };

        let fallout_fatal_addendum = (fallout.fatal * self.extreme_exposure_fraction) as u64;
        let fallout_injured_addendum =
            ((fallout.severe + fallout.moderate) * self.extreme_exposure_fraction) as u64;

        let fatal = (near.fatalities * variance.fatal) as u64 + fallout_fatal_addendum;
        let severe = (near.injuries * variance.injured) as u64 + fallout_injured_addendum;

        debug!(
            yield_kt = *yield_kt,
            baseline_fatal = near.fatalities,
            baseline_injured = near.injuries,
            fatal_variance = variance.fatal,
            injured_variance = variance.injured,
            fallout_area_km2 = fallout.affected_area_km2,
            "casualty estimate"
        );

        CasualtyBreakdown {
            fatal,
            severe,
            moderate: 0,
            mild: (fallout.mild * self.mild_reporting_fraction) as u64,
            total: fatal + severe,
            affected_area_km2: fallout.affected_area_km2,
            population_density,
            baseline_fatal: near.fatalities,
            baseline_injured: near.injuries,
            fallout_fatal_addendum,
            fallout_injured_addendum,
            variance: Some(variance),
        }
    }
}

/// Uniform draw from `[lo, hi)`, or `lo` for an empty range
fn draw<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f64, f64)) -> f64 {
    if hi > lo {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}
