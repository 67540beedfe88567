//! Near-field blast, thermal and prompt-radiation casualties
//!
//! Each zone radius follows `coefficient · Y_MT^exponent` (km). Blast zones are
//! nested annuli out to the 1 psi ring; the thermal-only and radiation-only
//! zones cover whatever part of their disc lies beyond the 1 psi ring.

use crate::core_types::Kilotons;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Near-field casualty zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NearFieldZone {
    /// Inside the fireball
    Fireball,
    /// Fireball edge to 20 psi
    Psi20,
    /// 20 psi to 5 psi
    Psi5,
    /// 5 psi to 2 psi
    Psi2,
    /// 2 psi to 1 psi
    Psi1,
    /// Third-degree burn radius beyond the 1 psi ring
    ThermalOnly,
    /// Prompt-radiation radius beyond the 1 psi ring
    RadiationOnly,
}

impl NearFieldZone {
    /// Zones in evaluation order
    pub const ALL: [NearFieldZone; 7] = [
        NearFieldZone::Fireball,
        NearFieldZone::Psi20,
        NearFieldZone::Psi5,
        NearFieldZone::Psi2,
        NearFieldZone::Psi1,
        NearFieldZone::ThermalOnly,
        NearFieldZone::RadiationOnly,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Radius scaling law `coefficient · Y_MT^exponent` (km)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneLaw {
    /// Radius at 1 Mt (km)
    pub coefficient: f64,
    /// Yield exponent
    pub exponent: f64,
}

impl ZoneLaw {
    const fn new(coefficient: f64, exponent: f64) -> Self {
        Self {
            coefficient,
            exponent,
        }
    }
}

/// Share of a zone's population killed and injured
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneFractions {
    /// Fatal fraction
    pub fatal: f64,
    /// Injured fraction
    pub injured: f64,
}

impl ZoneFractions {
    const fn new(fatal: f64, injured: f64) -> Self {
        Self { fatal, injured }
    }
}

/// Tunable near-field coefficient set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearFieldCalibration {
    /// Multiplier on residential density for daytime occupancy
    pub occupancy_factor: f64,
    /// Radius law per zone, indexed like [`NearFieldZone::ALL`]
    pub radius_laws: [ZoneLaw; 7],
    /// Casualty fractions per zone, indexed like [`NearFieldZone::ALL`]
    pub fractions: [ZoneFractions; 7],
}

const BASE_RADIUS_LAWS: [ZoneLaw; 7] = [
    ZoneLaw::new(0.44, 0.4),
    ZoneLaw::new(1.3, 0.33),
    ZoneLaw::new(4.5, 0.33),
    ZoneLaw::new(8.0, 0.33),
    ZoneLaw::new(13.0, 0.33),
    ZoneLaw::new(0.9, 0.41),
    ZoneLaw::new(0.65, 0.19),
];

const BASE_FRACTIONS: [ZoneFractions; 7] = [
    ZoneFractions::new(1.0, 0.0),
    ZoneFractions::new(0.98, 0.02),
    ZoneFractions::new(0.65, 0.30),
    ZoneFractions::new(0.15, 0.60),
    ZoneFractions::new(0.03, 0.45),
    ZoneFractions::new(0.40, 0.55),
    ZoneFractions::new(0.45, 0.40),
];

impl NearFieldCalibration {
    /// Coefficients used by the particle-transport path
    pub const TRANSPORT: NearFieldCalibration = NearFieldCalibration {
        occupancy_factor: 1.5,
        radius_laws: BASE_RADIUS_LAWS,
        fractions: BASE_FRACTIONS,
    };

    /// Coefficients used by the analytic path
    pub const ANALYTIC: NearFieldCalibration = NearFieldCalibration {
        occupancy_factor: 1.5,
        radius_laws: BASE_RADIUS_LAWS,
        fractions: BASE_FRACTIONS,
    };

    /// Radius law for one zone
    #[must_use]
    pub fn law(&self, zone: NearFieldZone) -> ZoneLaw {
        self.radius_laws[zone.index()]
    }

    /// Casualty fractions for one zone
    #[must_use]
    pub fn zone_fractions(&self, zone: NearFieldZone) -> ZoneFractions {
        self.fractions[zone.index()]
    }
}

/// Zone radii for one yield (km)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BlastRadii {
    /// Fireball radius
    pub fireball_km: f64,
    /// 20 psi overpressure
    pub psi_20_km: f64,
    /// 5 psi overpressure
    pub psi_5_km: f64,
    /// 2 psi overpressure
    pub psi_2_km: f64,
    /// 1 psi overpressure
    pub psi_1_km: f64,
    /// Third-degree burns
    pub thermal_km: f64,
    /// Prompt radiation
    pub radiation_km: f64,
}

impl BlastRadii {
    /// Evaluate every radius law at `yield_kt`
    #[must_use]
    pub fn compute(yield_kt: Kilotons, calibration: &NearFieldCalibration) -> Self {
        let y_mt = yield_kt.to_megatons();
        let r = |zone| {
            let law = calibration.law(zone);
            y_mt.scaled(law.coefficient, law.exponent)
        };
        Self {
            fireball_km: r(NearFieldZone::Fireball),
            psi_20_km: r(NearFieldZone::Psi20),
            psi_5_km: r(NearFieldZone::Psi5),
            psi_2_km: r(NearFieldZone::Psi2),
            psi_1_km: r(NearFieldZone::Psi1),
            thermal_km: r(NearFieldZone::ThermalOnly),
            radiation_km: r(NearFieldZone::RadiationOnly),
        }
    }

    /// Ground area of each zone (km²), indexed like [`NearFieldZone::ALL`]
    #[must_use]
    pub fn zone_areas_km2(&self) -> [f64; 7] {
        let disc = |r: f64| PI * r * r;
        let outer_blast = disc(self.psi_1_km);
        [
            disc(self.fireball_km),
            (disc(self.psi_20_km) - disc(self.fireball_km)).max(0.0),
            (disc(self.psi_5_km) - disc(self.psi_20_km)).max(0.0),
            (disc(self.psi_2_km) - disc(self.psi_5_km)).max(0.0),
            (outer_blast - disc(self.psi_2_km)).max(0.0),
            (disc(self.thermal_km) - outer_blast).max(0.0),
            (disc(self.radiation_km) - outer_blast).max(0.0),
        ]
    }
}

/// Casualties in one zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneCasualties {
    pub zone: NearFieldZone,
    /// Ring area (km²)
    pub area_km2: f64,
    /// People living in the ring
    pub population: f64,
    /// Expected deaths
    pub fatalities: f64,
    /// Expected injuries
    pub injuries: f64,
}

/// Near-field casualty totals before any variance
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NearFieldCasualties {
    /// Zone radii
    pub radii: BlastRadii,
    /// Per-zone breakdown (empty for non-positive yields)
    pub zones: Vec<ZoneCasualties>,
    /// Sum of zone fatalities
    pub fatalities: f64,
    /// Sum of zone injuries
    pub injuries: f64,
    /// Population inside all zones
    pub total_affected: f64,
}

impl NearFieldCasualties {
    /// Casualties for one zone, if present
    #[must_use]
    pub fn zone(&self, zone: NearFieldZone) -> Option<&ZoneCasualties> {
        self.zones.iter().find(|z| z.zone == zone)
    }
}

/// Near-field casualties for a burst of `yield_kt` over `population_density`
/// people/km². Non-positive yields give an all-zero result.
#[must_use]
pub fn estimate_near_field(
    yield_kt: Kilotons,
    population_density: f64,
    calibration: &NearFieldCalibration,
) -> NearFieldCasualties {
    if !yield_kt.is_positive() {
        return NearFieldCasualties::default();
    }

    let density = population_density.max(0.0) * calibration.occupancy_factor;
    let radii = BlastRadii::compute(yield_kt, calibration);
    let areas = radii.zone_areas_km2();

    let zones: Vec<ZoneCasualties> = NearFieldZone::ALL
        .iter()
        .zip(areas)
        .map(|(&zone, area_km2)| {
            let population = area_km2 * density;
            let fractions = calibration.zone_fractions(zone);
            ZoneCasualties {
                zone,
                area_km2,
                population,
                fatalities: population * fractions.fatal,
                injuries: population * fractions.injured,
            }
        })
        .collect();

    NearFieldCasualties {
        radii,
        fatalities: zones.iter().map(|z| z.fatalities).sum(),
        injuries: zones.iter().map(|z| z.injuries).sum(),
        total_affected: zones.iter().map(|z| z.population).sum(),
        zones,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_one_megaton_radii_equal_coefficients() {
        let radii = BlastRadii::compute(Kilotons::new(1000.0), &NearFieldCalibration::TRANSPORT);
        assert_relative_eq!(radii.fireball_km, 0.44);
        assert_relative_eq!(radii.psi_5_km, 4.5);
        assert_relative_eq!(radii.psi_1_km, 13.0);
        assert_relative_eq!(radii.radiation_km, 0.65);
    }

    #[test]
    fn test_rings_partition_the_one_psi_disc() {
        let radii = BlastRadii::compute(Kilotons::new(20.0), &NearFieldCalibration::TRANSPORT);
        let areas = radii.zone_areas_km2();
        let blast: f64 = areas[..5].iter().sum();
        assert_relative_eq!(blast, PI * radii.psi_1_km.powi(2), max_relative = 1e-12);
        // Thermal and radiation discs sit inside 1 psi at this yield
        assert_eq!(areas[5], 0.0);
        assert_eq!(areas[6], 0.0);
    }

    #[test]
    fn test_fractions_applied() {
        let result = estimate_near_field(
            Kilotons::new(10.0),
            1000.0,
            &NearFieldCalibration::TRANSPORT,
        );
        let psi5 = result.zone(NearFieldZone::Psi5).expect("zone present");
        assert_relative_eq!(psi5.population, psi5.area_km2 * 1500.0);
        assert_relative_eq!(psi5.fatalities, psi5.population * 0.65);
        assert_relative_eq!(psi5.injuries, psi5.population * 0.30);
        let fireball = result.zone(NearFieldZone::Fireball).expect("zone present");
        assert_eq!(fireball.injuries, 0.0);
        assert!(result.fatalities > 0.0 && result.injuries > 0.0);
        assert!(result.fatalities + result.injuries <= result.total_affected);
    }

    #[test]
    fn test_zero_yield() {
        let result = estimate_near_field(
            Kilotons::new(0.0),
            1000.0,
            &NearFieldCalibration::ANALYTIC,
        );
        assert_eq!(result, NearFieldCasualties::default());
    }
}
