//! Closed-form analytic fallout model
//!
//! An independent alternative to the particle-transport engine. Contour
//! dimensions come from a reference table calibrated at 10 kt and 15 mph,
//! scaled by power laws in yield with a linear wind correction. A separate set
//! of WSEG-10 diffusion regressions supports dose-rate queries at arbitrary
//! points in the downwind frame.
//!
//! Only ground bursts with positive yield and wind are modelled; everything
//! else yields [`AnalyticOutcome::Unsupported`].
//!
//! # References
//!
//! - Hanifen, D.W. (1980). "Documentation and Analysis of the WSEG-10 Fallout
//!   Prediction Model", AFIT/GNE/PH/80M-10.
//! - Wellerstein, A. NUKEMAP fallout contour calibration.

mod contours;
mod diffusion;
mod model;

pub use contours::{
    scale_contours, AnalyticContour, ReferenceContour, WindCorrection,
    ANALYTIC_CONTOUR_THRESHOLDS, REFERENCE_CONTOURS, REFERENCE_WIND_MPH, REFERENCE_YIELD_KT,
};
pub use diffusion::{point_dose_rate, DiffusionParameters, SPECIFIC_ACTIVITY};
pub use model::{
    AnalyticIsodoseModel, AnalyticOutcome, AnalyticResult, BurstHeight, UnsupportedReason,
};
