//! Scenario configuration and model selection
//!
//! A [`ScenarioConfig`] names its model through [`ModelKind`];
//! [`create_fallout_model`] turns that into a boxed [`FalloutModel`] so callers
//! never branch on which model is available.
//!
//! # Example
//!
//! ```rust,ignore
//! use fallout_core::scenario::{create_fallout_model, ScenarioConfig};
//!
//! let config = ScenarioConfig::from_json_str(r#"{"yield_kt": 20.0}"#)?;
//! let assessment = create_fallout_model(config.model).assess(&config);
//! ```

mod config;
mod provider;

pub use config::{ConfigError, ModelKind, ScenarioConfig};
pub use provider::{
    assess_batch, create_fallout_model, AnalyticModel, CasualtySummary, ContourSummary,
    FalloutAssessment, FalloutModel, TransportModel, ANALYTIC_MODEL_NAME,
};
