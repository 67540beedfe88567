//! Model providers behind a common interface

use super::config::{ModelKind, ScenarioConfig};
use crate::analytic::{
    AnalyticIsodoseModel, AnalyticOutcome, DiffusionParameters, UnsupportedReason,
};
use crate::core_types::{Degrees, Kilotons, KilometersPerHour};
use crate::transport::{PlumeTransportEngine, TransportResult, TRANSPORT_MODEL_NAME};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Model name reported by [`AnalyticModel`]
pub const ANALYTIC_MODEL_NAME: &str = "WSEG-10";

/// Dimensions of one isodose contour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContourSummary {
    /// H+1 dose rate (R/hr)
    pub threshold: f64,
    /// Downwind length (km)
    pub length_km: f64,
    /// Crosswind width (km)
    pub width_km: f64,
}

/// Human impact in a model-independent form
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CasualtySummary {
    pub fatalities: u64,
    pub injuries: u64,
    /// Area receiving a casualty-producing fallout dose (km²), 0 when the
    /// model does not resolve fallout spatially
    pub affected_area_km2: f64,
}

/// Common result of any [`FalloutModel`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FalloutAssessment {
    /// Name of the model that produced the result
    pub model: String,
    /// Contours, lowest threshold first
    pub contours: Vec<ContourSummary>,
    pub casualties: CasualtySummary,
    /// Present when the model supports dose-rate queries at arbitrary points
    pub point_dose: Option<DiffusionParameters>,
    /// Why nothing was computed, if so
    pub unsupported: Option<UnsupportedReason>,
}

impl FalloutAssessment {
    fn empty(model: &str, reason: UnsupportedReason) -> Self {
        Self {
            model: model.to_string(),
            contours: Vec::new(),
            casualties: CasualtySummary::default(),
            point_dose: None,
            unsupported: Some(reason),
        }
    }

    /// Summary of a finished transport run
    #[must_use]
    pub fn from_transport(result: &TransportResult) -> Self {
        Self {
            model: result.metadata.model.clone(),
            contours: result
                .contours
                .iter()
                .map(|c| ContourSummary {
                    threshold: c.threshold,
                    length_km: c.length_km(),
                    width_km: c.width_km(),
                })
                .collect(),
            casualties: CasualtySummary {
                fatalities: result.casualties.fatal,
                injuries: result.casualties.severe,
                affected_area_km2: result.casualties.affected_area_km2,
            },
            point_dose: None,
            unsupported: None,
        }
    }

    /// Contour for one threshold, if present
    #[must_use]
    pub fn contour(&self, threshold: f64) -> Option<&ContourSummary> {
        self.contours.iter().find(|c| c.threshold == threshold)
    }
}

/// A fallout model that can assess a scenario
pub trait FalloutModel: Send + Sync {
    /// Model name used in results and logs
    fn name(&self) -> &'static str;

    /// Evaluate one scenario
    fn assess(&self, config: &ScenarioConfig) -> FalloutAssessment;
}

/// Particle-transport provider
#[derive(Debug, Clone, Default)]
pub struct TransportModel {
    /// Engine template; bin count and exposure window come from the scenario
    pub engine: PlumeTransportEngine,
}

impl TransportModel {
    /// Full grid output for a scenario
    #[must_use]
    pub fn run(&self, config: &ScenarioConfig) -> TransportResult {
        let engine = PlumeTransportEngine {
            bin_count: config.particle_bins,
            exposure_duration_hr: config.exposure_duration_hr,
            ..self.engine.clone()
        };
        engine.run(
            Kilotons::new(config.yield_kt),
            KilometersPerHour::new(config.wind_speed_kph),
            Degrees::new(config.wind_direction_deg),
            config.population_density,
            config.resolution_km,
            config.max_distance_km,
        )
    }
}

impl FalloutModel for TransportModel {
    fn name(&self) -> &'static str {
        TRANSPORT_MODEL_NAME
    }

    fn assess(&self, config: &ScenarioConfig) -> FalloutAssessment {
        if !Kilotons::new(config.yield_kt).is_positive() {
            return FalloutAssessment::empty(self.name(), UnsupportedReason::NonPositiveYield);
        }
        FalloutAssessment::from_transport(&self.run(config))
    }
}

/// Closed-form provider
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticModel {
    /// Model template; fission fraction and shear come from the scenario
    pub model: AnalyticIsodoseModel,
}

impl FalloutModel for AnalyticModel {
    fn name(&self) -> &'static str {
        ANALYTIC_MODEL_NAME
    }

    fn assess(&self, config: &ScenarioConfig) -> FalloutAssessment {
        let model = AnalyticIsodoseModel {
            fission_fraction: config.fission_fraction,
            shear_kph_per_km: config.shear_kph_per_km,
            ..self.model
        };
        let yield_kt = Kilotons::new(config.yield_kt);
        let outcome = model.compute(
            yield_kt,
            KilometersPerHour::new(config.wind_speed_kph),
            config.burst,
        );
        let result = match &outcome {
            AnalyticOutcome::Computed(result) => result,
            AnalyticOutcome::Unsupported(reason) => {
                return FalloutAssessment::empty(self.name(), *reason);
            }
        };

        let near = model.casualties(yield_kt, config.population_density);
        FalloutAssessment {
            model: self.name().to_string(),
            contours: result
                .contours
                .iter()
                .map(|c| ContourSummary {
                    threshold: c.threshold,
                    length_km: c.length_km,
                    width_km: c.width_km,
                })
                .collect(),
            casualties: CasualtySummary {
                fatalities: near.fatalities as u64,
                injuries: near.injuries as u64,
                affected_area_km2: 0.0,
            },
            point_dose: Some(result.parameters),
            unsupported: None,
        }
    }
}

/// Provider for `kind`
pub fn create_fallout_model(kind: ModelKind) -> Box<dyn FalloutModel> {
    let model: Box<dyn FalloutModel> = match kind {
        ModelKind::Transport => Box::new(TransportModel::default()),
        ModelKind::Analytic => Box::new(AnalyticModel::default()),
    };
    info!("Using {} fallout model", model.name());
    model
}

/// Assess independent scenarios in parallel, one provider per scenario.
///
/// Results are in input order. Each scenario runs single-threaded.
#[must_use]
pub fn assess_batch(configs: &[ScenarioConfig]) -> Vec<FalloutAssessment> {
    configs
        .par_iter()
        .map(|config| create_fallout_model(config.model).assess(config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytic::BurstHeight;

    fn scenario(model: ModelKind) -> ScenarioConfig {
        ScenarioConfig {
            yield_kt: 10.0,
            max_distance_km: Some(40.0),
            model,
            ..ScenarioConfig::default()
        }
    }

    #[test]
    fn test_factory_selects_by_kind() {
        assert_eq!(create_fallout_model(ModelKind::Transport).name(), "DELFIC");
        assert_eq!(create_fallout_model(ModelKind::Analytic).name(), "WSEG-10");
    }

    #[test]
    fn test_transport_assessment() {
        let a = create_fallout_model(ModelKind::Transport).assess(&scenario(ModelKind::Transport));
        assert_eq!(a.model, "DELFIC");
        assert!(a.unsupported.is_none());
        assert!(a.point_dose.is_none());
        assert!(a.casualties.fatalities > 0);
    }

    #[test]
    fn test_analytic_assessment() {
        let a = create_fallout_model(ModelKind::Analytic).assess(&scenario(ModelKind::Analytic));
        assert_eq!(a.contours.len(), 8);
        assert!(a.point_dose.is_some());
        assert!(a.contour(1.0).is_some());
    }

    #[test]
    fn test_unsupported_is_explicit() {
        let air = ScenarioConfig {
            burst: BurstHeight::Air,
            ..scenario(ModelKind::Analytic)
        };
        let a = AnalyticModel::default().assess(&air);
        assert_eq!(
            a.unsupported,
            Some(UnsupportedReason::NotGroundBurst(BurstHeight::Air))
        );
        assert!(a.contours.is_empty());

        let zero = ScenarioConfig {
            yield_kt: 0.0,
            ..scenario(ModelKind::Transport)
        };
        let a = TransportModel::default().assess(&zero);
        assert_eq!(a.unsupported, Some(UnsupportedReason::NonPositiveYield));
        assert_eq!(a.casualties, CasualtySummary::default());
    }

    #[test]
    fn test_batch_preserves_order() {
        let configs = vec![
            scenario(ModelKind::Analytic),
            scenario(ModelKind::Transport),
            scenario(ModelKind::Analytic),
        ];
        let results = assess_batch(&configs);
        let names: Vec<&str> = results.iter().map(|r| r.model.as_str()).collect();
        assert_eq!(names, ["WSEG-10", "DELFIC", "WSEG-10"]);
        assert_eq!(results[0], results[2]);
    }
}
