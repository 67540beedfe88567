//! Fallout casualties from a cumulative dose grid

use crate::grid::CumulativeDoseGrid;
use serde::{Deserialize, Serialize};

/// Population fractions for cells whose dose falls in one band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoseBand {
    /// Lower bound of the band (rem, inclusive)
    pub min_rem: f64,
    /// Share of the population killed
    pub fatal: f64,
    /// Share severely sick
    pub severe: f64,
    /// Share moderately sick
    pub moderate: f64,
    /// Share mildly sick
    pub mild: f64,
}

impl DoseBand {
    const fn new(min_rem: f64, fatal: f64, severe: f64, moderate: f64, mild: f64) -> Self {
        Self {
            min_rem,
            fatal,
            severe,
            moderate,
            mild,
        }
    }
}

/// Dose bands, highest first. Cells below the last band are unaffected.
pub const FALLOUT_DOSE_BANDS: [DoseBand; 7] = [
    DoseBand::new(900.0, 0.85, 0.15, 0.0, 0.0),
    DoseBand::new(700.0, 0.45, 0.55, 0.0, 0.0),
    DoseBand::new(500.0, 0.15, 0.75, 0.10, 0.0),
    DoseBand::new(350.0, 0.0, 0.30, 0.70, 0.0),
    DoseBand::new(250.0, 0.0, 0.10, 0.90, 0.0),
    DoseBand::new(150.0, 0.0, 0.0, 0.30, 0.70),
    DoseBand::new(100.0, 0.0, 0.0, 0.05, 0.95),
];

/// Band containing `dose_rem`, if any
#[must_use]
pub fn band_for(dose_rem: f64) -> Option<&'static DoseBand> {
    FALLOUT_DOSE_BANDS.iter().find(|b| dose_rem >= b.min_rem)
}

/// Fallout-only casualty tallies (fractional people)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FalloutTally {
    /// Deaths
    pub fatal: f64,
    /// Severe radiation sickness
    pub severe: f64,
    /// Moderate radiation sickness
    pub moderate: f64,
    /// Mild radiation sickness
    pub mild: f64,
    /// Area of cells at or above the lowest band (km²)
    pub affected_area_km2: f64,
}

/// Bucket every cell of `grid` into the dose bands, weighting by the
/// residential population of the cell.
#[must_use]
pub fn tally_fallout(grid: &CumulativeDoseGrid, population_density: f64) -> FalloutTally {
    let cell_area = grid.cell_area_km2();
    let population = population_density.max(0.0) * cell_area;

    grid.as_slice()
        .iter()
        .filter_map(|&dose| band_for(dose))
        .fold(FalloutTally::default(), |mut tally, band| {
            tally.affected_area_km2 += cell_area;
            tally.fatal += population * band.fatal;
            tally.severe += population * band.severe;
            tally.moderate += population * band.moderate;
            tally.mild += population * band.mild;
            tally
        })
}
