//! Quick-look weapon effects calculator
//!
//! Standalone scaling laws for blast, thermal, prompt radiation, crater,
//! mushroom cloud and EMP, all in `Y_MT` (yield in megatons). This table is
//! independent of the near-field calibrations used by the fallout models.
//! Every function returns `None` for a non-positive yield.

use crate::core_types::{Kilotons, Megatons};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// H+1 dose rate near ground zero (R/hr): `100 · (Y / 15)^0.8`
#[must_use]
pub fn initial_dose_rate(yield_kt: Kilotons) -> f64 {
    if yield_kt.is_positive() {
        100.0 * (*yield_kt / 15.0).powf(0.8)
    } else {
        0.0
    }
}

fn megatons(yield_kt: Kilotons) -> Option<Megatons> {
    if yield_kt.is_positive() {
        Some(yield_kt.to_megatons())
    } else {
        None
    }
}

/// Effect radii (km)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectRadii {
    /// Fireball radius
    pub fireball_km: f64,
    /// Third-degree burns
    pub burns_3rd_degree_km: f64,
    /// 20 psi overpressure
    pub psi_20_km: f64,
    /// 5 psi overpressure
    pub psi_5_km: f64,
    /// 2 psi overpressure
    pub psi_2_km: f64,
    /// 500 rem prompt dose
    pub radiation_500_rem_km: f64,
    /// 100 rem prompt dose
    pub radiation_100_rem_km: f64,
    /// EMP damage radius
    pub emp_km: f64,
}

impl EffectRadii {
    #[must_use]
    pub fn compute(yield_kt: Kilotons) -> Option<Self> {
        let y = megatons(yield_kt)?;
        Some(Self {
            fireball_km: y.scaled(0.09, 0.4),
            burns_3rd_degree_km: y.scaled(0.8, 0.41),
            psi_20_km: y.scaled(0.28, 0.33),
            psi_5_km: y.scaled(0.54, 0.40),
            psi_2_km: y.scaled(0.91, 0.33),
            radiation_500_rem_km: y.scaled(0.65, 0.19),
            radiation_100_rem_km: y.scaled(1.15, 0.19),
            emp_km: y.scaled(2.4, 0.25),
        })
    }
}

/// Crater-forming burst placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CraterBurst {
    #[default]
    Surface,
    Subsurface,
}

/// Apparent crater (m, m³)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CraterDimensions {
    pub diameter_m: f64,
    pub radius_m: f64,
    pub depth_m: f64,
    /// Cone approximation `π/3 · r² · depth`
    pub volume_m3: f64,
}

impl CraterDimensions {
    #[must_use]
    pub fn compute(yield_kt: Kilotons, burst: CraterBurst) -> Option<Self> {
        let y = megatons(yield_kt)?;
        let (diameter_m, depth_m) = match burst {
            CraterBurst::Surface => (y.scaled(140.0, 0.3), y.scaled(24.0, 0.3)),
            CraterBurst::Subsurface => (y.scaled(120.0, 0.25), y.scaled(35.0, 0.3)),
        };
        let radius_m = diameter_m / 2.0;
        Some(Self {
            diameter_m,
            radius_m,
            depth_m,
            volume_m3: PI / 3.0 * radius_m * radius_m * depth_m,
        })
    }
}

/// Population in the 20, 5 and 2 psi rings with simple casualty fractions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlastCasualties {
    /// Inside 20 psi (km²)
    pub severe_zone_km2: f64,
    /// 20 psi to 5 psi (km²)
    pub moderate_zone_km2: f64,
    /// 5 psi to 2 psi (km²)
    pub light_zone_km2: f64,
    pub severe_population: u64,
    pub moderate_population: u64,
    pub light_population: u64,
    pub fatalities: u64,
    pub injuries: u64,
    pub total_affected: u64,
}

const RING_FATAL: [f64; 3] = [0.90, 0.50, 0.05];
const RING_INJURED: [f64; 3] = [0.09, 0.40, 0.25];

impl BlastCasualties {
    #[must_use]
    pub fn estimate(yield_kt: Kilotons, population_density: f64) -> Option<Self> {
        let radii = EffectRadii::compute(yield_kt)?;
        let disc = |r: f64| PI * r * r;
        let areas = [
            disc(radii.psi_20_km),
            (disc(radii.psi_5_km) - disc(radii.psi_20_km)).max(0.0),
            (disc(radii.psi_2_km) - disc(radii.psi_5_km)).max(0.0),
        ];
        let density = population_density.max(0.0);
        let pops = areas.map(|a| (a * density) as u64);

        let weighted = |fractions: &[f64; 3]| -> u64 {
            pops.iter()
                .zip(fractions)
                .map(|(&p, f)| p as f64 * f)
                .sum::<f64>() as u64
        };

        Some(Self {
            severe_zone_km2: areas[0],
            moderate_zone_km2: areas[1],
            light_zone_km2: areas[2],
            severe_population: pops[0],
            moderate_population: pops[1],
            light_population: pops[2],
            fatalities: weighted(&RING_FATAL),
            injuries: weighted(&RING_INJURED),
            total_affected: pops.iter().sum(),
        })
    }
}

/// Stabilised mushroom cloud (km)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MushroomCloud {
    pub height_km: f64,
    pub width_km: f64,
    pub stem_height_km: f64,
}

impl MushroomCloud {
    #[must_use]
    pub fn compute(yield_kt: Kilotons) -> Option<Self> {
        let y = megatons(yield_kt)?;
        let height_km = y.scaled(12.0, 0.2);
        Some(Self {
            height_km,
            width_km: y.scaled(2.0, 0.25),
            stem_height_km: 0.3 * height_km,
        })
    }

    #[must_use]
    pub fn height_m(&self) -> f64 {
        self.height_km * 1000.0
    }
}

/// EMP reach by burst altitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmpRegime {
    /// Below 30 km
    Local,
    /// 30 to 100 km
    Regional,
    /// High-altitude burst
    Continental,
}

impl EmpRegime {
    #[must_use]
    pub fn for_altitude(burst_altitude_km: f64) -> Self {
        if burst_altitude_km < 30.0 {
            EmpRegime::Local
        } else if burst_altitude_km < 100.0 {
            EmpRegime::Regional
        } else {
            EmpRegime::Continental
        }
    }
}

impl fmt::Display for EmpRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmpRegime::Local => write!(f, "Local"),
            EmpRegime::Regional => write!(f, "Regional"),
            EmpRegime::Continental => write!(f, "Continental"),
        }
    }
}

/// Electromagnetic pulse footprint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmpEffects {
    pub regime: EmpRegime,
    pub burst_altitude_km: f64,
    pub affected_radius_km: f64,
    /// Peak field (V/m)
    pub peak_field_strength: f64,
    pub electronics_damage_radius_km: f64,
    pub power_grid_damage_radius_km: f64,
}

impl EmpEffects {
    #[must_use]
    pub fn compute(yield_kt: Kilotons, burst_altitude_km: f64) -> Option<Self> {
        let y = megatons(yield_kt)?;
        let regime = EmpRegime::for_altitude(burst_altitude_km);
        let (affected_radius_km, peak_field_strength) = match regime {
            EmpRegime::Local => (y.scaled(2.4, 0.25), y.scaled(50_000.0, 0.5)),
            EmpRegime::Regional => (y.scaled(50.0, 0.3), y.scaled(25_000.0, 0.4)),
            EmpRegime::Continental => (y.scaled(1000.0, 0.2), y.scaled(10_000.0, 0.3)),
        };
        Some(Self {
            regime,
            burst_altitude_km,
            affected_radius_km,
            peak_field_strength,
            electronics_damage_radius_km: 0.7 * affected_radius_km,
            power_grid_damage_radius_km: 0.9 * affected_radius_km,
        })
    }
}

/// Everything the calculator knows about one burst
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponEffects {
    pub yield_kt: f64,
    pub burst_altitude_km: f64,
    pub population_density: f64,
    pub initial_dose_rate: f64,
    pub radii: EffectRadii,
    pub casualties: BlastCasualties,
    pub mushroom_cloud: MushroomCloud,
    pub emp: EmpEffects,
    /// Only for bursts at zero altitude
    pub crater: Option<CraterDimensions>,
    /// Area inside the 5 psi ring (km²)
    pub total_destruction_area_km2: f64,
}

impl WeaponEffects {
    /// True for a burst at ground level
    #[must_use]
    pub fn is_surface_burst(&self) -> bool {
        self.burst_altitude_km == 0.0
    }

    /// Plain-text report
    #[must_use]
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

/// Every effect for one burst; `None` for a non-positive yield
#[must_use]
pub fn comprehensive_effects(
    yield_kt: Kilotons,
    burst_altitude_km: f64,
    population_density: f64,
) -> Option<WeaponEffects> {
    let radii = EffectRadii::compute(yield_kt)?;
    let crater = if burst_altitude_km == 0.0 {
        CraterDimensions::compute(yield_kt, CraterBurst::Surface)
    } else {
        None
    };
    Some(WeaponEffects {
        yield_kt: *yield_kt,
        burst_altitude_km,
        population_density,
        initial_dose_rate: initial_dose_rate(yield_kt),
        casualties: BlastCasualties::estimate(yield_kt, population_density)?,
        mushroom_cloud: MushroomCloud::compute(yield_kt)?,
        emp: EmpEffects::compute(yield_kt, burst_altitude_km)?,
        crater,
        total_destruction_area_km2: PI * radii.psi_5_km * radii.psi_5_km,
        radii,
    })
}

/// Report text for a burst, or a placeholder when nothing can be computed
#[must_use]
pub fn effects_summary(
    yield_kt: Kilotons,
    burst_altitude_km: f64,
    population_density: f64,
) -> String {
    match comprehensive_effects(yield_kt, burst_altitude_km, population_density) {
        Some(effects) => effects.summary(),
        None => "No effects data available.".to_string(),
    }
}

/// `1234567` -> `1,234,567`
fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl fmt::Display for WeaponEffects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "NUCLEAR WEAPON EFFECTS ANALYSIS")?;
        writeln!(f, "{}", "=".repeat(40))?;
        writeln!(f)?;
        writeln!(f, "Weapon Yield: {} kilotons", thousands(self.yield_kt.round() as u64))?;
        let kind = if self.is_surface_burst() { "Surface" } else { "Airburst" };
        writeln!(f, "Burst Type: {kind}")?;
        if self.burst_altitude_km > 0.0 {
            writeln!(f, "Burst Altitude: {:.1} km", self.burst_altitude_km)?;
        }
        writeln!(
            f,
            "Population Density: {} people/km²",
            thousands(self.population_density.round() as u64)
        )?;
        writeln!(f)?;

        let r = &self.radii;
        writeln!(f, "BLAST EFFECTS:")?;
        writeln!(f, "  Complete destruction (20 psi): {:.2} km radius", r.psi_20_km)?;
        writeln!(f, "  Heavy damage (5 psi): {:.2} km radius", r.psi_5_km)?;
        writeln!(f, "  Moderate damage (2 psi): {:.2} km radius", r.psi_2_km)?;
        writeln!(f)?;
        writeln!(f, "THERMAL EFFECTS:")?;
        writeln!(f, "  3rd degree burns: {:.2} km radius", r.burns_3rd_degree_km)?;
        writeln!(f)?;
        writeln!(f, "PROMPT RADIATION:")?;
        writeln!(f, "  Lethal dose (500 rem): {:.2} km radius", r.radiation_500_rem_km)?;
        writeln!(f, "  Severe effects (100 rem): {:.2} km radius", r.radiation_100_rem_km)?;
        writeln!(f)?;

        let c = &self.casualties;
        writeln!(f, "CASUALTY ESTIMATES:")?;
        writeln!(f, "  Total affected population: {}", thousands(c.total_affected))?;
        writeln!(f, "  Estimated fatalities: {}", thousands(c.fatalities))?;
        writeln!(f, "  Estimated injuries: {}", thousands(c.injuries))?;
        writeln!(f)?;

        writeln!(f, "MUSHROOM CLOUD:")?;
        writeln!(f, "  Maximum height: {:.1} km", self.mushroom_cloud.height_km)?;
        writeln!(f, "  Cloud width: {:.1} km", self.mushroom_cloud.width_km)?;
        writeln!(f)?;

        writeln!(f, "EMP EFFECTS:")?;
        writeln!(f, "  Type: {}", self.emp.regime)?;
        writeln!(f, "  Affected radius: {:.1} km", self.emp.affected_radius_km)?;
        writeln!(
            f,
            "  Electronics damage: {:.1} km",
            self.emp.electronics_damage_radius_km
        )?;
        writeln!(f)?;

        if let Some(crater) = &self.crater {
            writeln!(f, "CRATER:")?;
            writeln!(f, "  Diameter: {:.0} meters", crater.diameter_m)?;
            writeln!(f, "  Depth: {:.0} meters", crater.depth_m)?;
            writeln!(f)?;
        }

        writeln!(
            f,
            "TOTAL DESTRUCTION AREA: {:.1} km²",
            self.total_destruction_area_km2
        )
    }
}
