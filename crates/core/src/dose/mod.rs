//! Decay-law dose integration and personal exposure estimates
//!
//! Fallout dose rates are quoted at H+1 (one hour after detonation) and decay
//! as a power law of time since burst. Integrating that law over a stay window
//! gives the cumulative dose.

mod decay;
mod exposure;

pub use decay::{DecayLaw, DoseIntegrator};
pub use exposure::{assess_exposure, ExposureAssessment, HealthEffect, Shielding};
