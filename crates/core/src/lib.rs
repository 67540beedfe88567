//! Fallout Dose Modelling Core Library
//!
//! Estimates the spatial dose-rate field and human-casualty impact of a
//! nuclear surface burst from yield, wind and population density.
//!
//! ## Models
//!
//! Two independent fallout models share the dose and casualty primitives:
//! - Particle transport: per-size-class cloud loft, settling through a
//!   standard atmosphere, sheared downwind drift and anisotropic Gaussian
//!   deposition onto a dose-rate grid
//! - Analytic: calibrated isodose contour dimensions and WSEG-10 closed-form
//!   point dose rates
//!
//! Results live in a downwind frame with ground zero at the origin and the
//! plume along +x. Map projection and rendering are left to the caller.

// Core types and utilities
pub mod core_types;
pub mod frame;

// Physical inputs
pub mod atmosphere;
pub mod particles;

// Fallout models
pub mod analytic;
pub mod grid;
pub mod transport;

// Dose and human impact
pub mod casualties;
pub mod dose;
pub mod effects;

// Configuration and model selection
pub mod scenario;

// Re-export core types
pub use core_types::{Degrees, Hours, Kilometers, KilometersPerHour, Kilotons, Megatons};
pub use frame::DownwindPoint;

// Re-export model entry points
pub use analytic::{AnalyticIsodoseModel, AnalyticOutcome, BurstHeight, DiffusionParameters};
pub use casualties::{CasualtyBreakdown, CasualtyEstimator};
pub use dose::{DecayLaw, DoseIntegrator};
pub use grid::{ContourExtent, GridField};
pub use transport::{PlumeTransportEngine, TransportResult};

// Re-export configuration
pub use scenario::{
    assess_batch, create_fallout_model, ConfigError, FalloutAssessment, FalloutModel, ModelKind,
    ScenarioConfig,
};
