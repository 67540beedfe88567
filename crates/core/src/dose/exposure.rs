//! Personal exposure for a stay at a fixed location

use super::decay::DecayLaw;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sheltering situation during the stay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Shielding {
    /// No protection
    #[default]
    Outdoors,
    /// Passenger vehicle
    Vehicle,
    /// Office building, upper floors
    OfficeUpperFloors,
    /// Basement of a wood-frame house
    WoodFrameBasement,
    /// Office building, lower floors
    OfficeLowerFloors,
    /// Basement of a brick house
    BrickBasement,
    /// Concrete building, middle floors
    ConcreteMiddleFloors,
    /// Basement of a concrete building
    ConcreteBasement,
}

impl Shielding {
    /// Every option, least to most protective
    pub const ALL: [Shielding; 8] = [
        Shielding::Outdoors,
        Shielding::Vehicle,
        Shielding::OfficeUpperFloors,
        Shielding::WoodFrameBasement,
        Shielding::OfficeLowerFloors,
        Shielding::BrickBasement,
        Shielding::ConcreteMiddleFloors,
        Shielding::ConcreteBasement,
    ];

    /// Fraction of the outdoor dose received
    #[must_use]
    pub fn transmission_factor(self) -> f64 {
        match self {
            Shielding::Outdoors => 1.0,
            Shielding::Vehicle => 0.5,
            Shielding::OfficeUpperFloors => 0.2,
            Shielding::WoodFrameBasement => 0.1,
            Shielding::OfficeLowerFloors => 0.05,
            Shielding::BrickBasement => 0.04,
            Shielding::ConcreteMiddleFloors => 0.01,
            Shielding::ConcreteBasement => 0.005,
        }
    }
}

impl fmt::Display for Shielding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Shielding::Outdoors => "Outdoors (no protection)",
            Shielding::Vehicle => "Passenger vehicle",
            Shielding::OfficeUpperFloors => "Office building (upper floors)",
            Shielding::WoodFrameBasement => "Basement (wood frame house)",
            Shielding::OfficeLowerFloors => "Office building (lower floors)",
            Shielding::BrickBasement => "Basement (brick house)",
            Shielding::ConcreteMiddleFloors => "Concrete building (middle floors)",
            Shielding::ConcreteBasement => "Basement (concrete building)",
        };
        f.write_str(label)
    }
}

/// Expected acute effect of a whole-body dose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HealthEffect {
    /// < 50 rem
    NoImmediateSymptoms,
    /// 50-200 rem
    MildSickness,
    /// 200-400 rem
    ModerateSickness,
    /// 400-600 rem
    SevereSickness,
    /// ≥ 600 rem
    Lethal,
}

impl HealthEffect {
    /// Classify a dose (rem)
    #[must_use]
    pub fn from_dose(dose_rem: f64) -> Self {
        if dose_rem < 50.0 {
            HealthEffect::NoImmediateSymptoms
        } else if dose_rem < 200.0 {
            HealthEffect::MildSickness
        } else if dose_rem < 400.0 {
            HealthEffect::ModerateSickness
        } else if dose_rem < 600.0 {
            HealthEffect::SevereSickness
        } else {
            HealthEffect::Lethal
        }
    }
}

impl fmt::Display for HealthEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HealthEffect::NoImmediateSymptoms => "No immediate symptoms",
            HealthEffect::MildSickness => "Mild radiation sickness possible",
            HealthEffect::ModerateSickness => "Moderate radiation sickness likely",
            HealthEffect::SevereSickness => "Severe radiation sickness",
            HealthEffect::Lethal => "Lethal dose",
        })
    }
}

/// Dose received during one stay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExposureAssessment {
    /// Entry time after burst (hours)
    pub entry_hr: f64,
    /// Exit time after burst (hours)
    pub exit_hr: f64,
    /// Dose without shielding (rem)
    pub unshielded_rem: f64,
    /// Dose after the shielding factor (rem)
    pub shielded_rem: f64,
    /// Shelter used
    pub shielding: Shielding,
    /// Effect classification of the shielded dose
    pub health_effect: HealthEffect,
}

/// Dose for staying `stay_hr` hours from `entry_hr` at a point whose H+1 dose
/// rate is `dose_rate_h1`, using the WSEG decay law.
///
/// Returns `None` unless both times are positive and finite and the dose
/// rate is finite and non-negative.
#[must_use]
pub fn assess_exposure(
    dose_rate_h1: f64,
    entry_hr: f64,
    stay_hr: f64,
    shielding: Shielding,
) -> Option<ExposureAssessment> {
    let valid_window = entry_hr > 0.0 && stay_hr > 0.0;
    let finite = dose_rate_h1.is_finite() && entry_hr.is_finite() && stay_hr.is_finite();
    if !(valid_window && finite) || dose_rate_h1 < 0.0 {
        return None;
    }

    let exit_hr = entry_hr + stay_hr;
    let unshielded_rem = DecayLaw::Wseg.integrate_window(dose_rate_h1, entry_hr, exit_hr);
    let shielded_rem = unshielded_rem * shielding.transmission_factor();
    if !shielded_rem.is_finite() {
        return None;
    }

    Some(ExposureAssessment {
        entry_hr,
        exit_hr,
        unshielded_rem,
        shielded_rem,
        shielding,
        health_effect: HealthEffect::from_dose(shielded_rem),
    })
}
