//! Scenario configuration

use crate::analytic::BurstHeight;
use crate::core_types::Kilotons;
use crate::grid::{grid_steps, MAX_GRID_STEPS};
use crate::particles::{DEFAULT_BIN_COUNT, MAX_BIN_COUNT};
use crate::transport::default_max_distance_km;
use serde::{Deserialize, Serialize};

/// Which fallout model evaluates a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModelKind {
    /// Particle-transport grid model
    #[default]
    Transport,
    /// Closed-form isodose model
    Analytic,
}

/// Inputs for one fallout scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Yield (kt)
    pub yield_kt: f64,
    /// Surface wind speed (km/h)
    pub wind_speed_kph: f64,
    /// Direction the wind blows from (degrees)
    pub wind_direction_deg: f64,
    /// Residential population density (people/km²)
    pub population_density: f64,
    /// Transport grid cell size (km)
    pub resolution_km: f64,
    /// Transport grid half-extent (km); derived from the yield when `None`
    pub max_distance_km: Option<f64>,
    /// Burst height category
    pub burst: BurstHeight,
    /// Share of the yield from fission (0-1)
    pub fission_fraction: f64,
    /// Cumulative dose window (hours)
    pub exposure_duration_hr: f64,
    /// Particle-size classes for the transport model
    pub particle_bins: usize,
    /// Model selection
    pub model: ModelKind,
    /// Wind shear with height for the analytic model (km/h per km)
    pub shear_kph_per_km: f64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            yield_kt: 10.0,
            wind_speed_kph: 24.0,
            wind_direction_deg: 270.0,
            population_density: 25_000.0,
            resolution_km: 0.5,
            max_distance_km: None,
            burst: BurstHeight::Ground,
            fission_fraction: 1.0,
            exposure_duration_hr: 24.0,
            particle_bins: DEFAULT_BIN_COUNT,
            model: ModelKind::Transport,
            shear_kph_per_km: 0.8,
        }
    }
}

/// Errors from loading or validating a [`ScenarioConfig`]
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// JSON could not be parsed
    Parse(String),
    /// JSON could not be produced
    Serialize(String),
    InvalidYield(f64),
    InvalidWindSpeed(f64),
    InvalidResolution(f64),
    InvalidDistance(f64),
    InvalidPopulation(f64),
    InvalidDuration(f64),
    InvalidBinCount(usize),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "Failed to parse scenario: {msg}"),
            ConfigError::Serialize(msg) => write!(f, "Failed to serialize scenario: {msg}"),
            ConfigError::InvalidYield(v) => write!(f, "Yield must be positive, got {v} kt"),
            ConfigError::InvalidWindSpeed(v) => {
                write!(f, "Wind speed must be non-negative, got {v} km/h")
            }
            ConfigError::InvalidResolution(v) => {
                write!(
                    f,
                    "Resolution must be positive and give at most {MAX_GRID_STEPS} cells per axis, got {v} km"
                )
            }
            ConfigError::InvalidDistance(v) => {
                write!(f, "Maximum distance must be positive, got {v} km")
            }
            ConfigError::InvalidPopulation(v) => {
                write!(f, "Population density must be positive, got {v} per km²")
            }
            ConfigError::InvalidDuration(v) => {
                write!(f, "Exposure duration must be positive, got {v} h")
            }
            ConfigError::InvalidBinCount(n) => {
                write!(
                    f,
                    "Particle bin count must be between 1 and {MAX_BIN_COUNT}, got {n}"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

impl ScenarioConfig {
    /// Parse and validate a JSON scenario. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed JSON, otherwise whatever
    /// [`ScenarioConfig::validate`] reports.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty-printed JSON
    ///
    /// # Errors
    ///
    /// [`ConfigError::Serialize`] if serialisation fails.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Check that every input is usable by the models.
    ///
    /// Fission fraction and burst height are not checked here; the analytic
    /// model normalises or rejects them itself.
    ///
    /// # Errors
    ///
    /// The first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive(self.yield_kt) {
            return Err(ConfigError::InvalidYield(self.yield_kt));
        }
        let wind_ok = self.wind_speed_kph.is_finite() && self.wind_speed_kph >= 0.0;
        if !wind_ok {
            return Err(ConfigError::InvalidWindSpeed(self.wind_speed_kph));
        }
        if !positive(self.resolution_km) {
            return Err(ConfigError::InvalidResolution(self.resolution_km));
        }
        if let Some(d) = self.max_distance_km {
            if !positive(d) {
                return Err(ConfigError::InvalidDistance(d));
            }
        }
        let extent = self
            .max_distance_km
            .unwrap_or_else(|| default_max_distance_km(Kilotons::new(self.yield_kt)));
        if grid_steps(extent, self.resolution_km).is_none() {
            return Err(ConfigError::InvalidResolution(self.resolution_km));
        }
        if !positive(self.population_density) {
            return Err(ConfigError::InvalidPopulation(self.population_density));
        }
        if !positive(self.exposure_duration_hr) {
            return Err(ConfigError::InvalidDuration(self.exposure_duration_hr));
        }
        if self.particle_bins == 0 || self.particle_bins > MAX_BIN_COUNT {
            return Err(ConfigError::InvalidBinCount(self.particle_bins));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ScenarioConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.resolution_km, 0.5);
        assert_eq!(config.particle_bins, 15);
        assert_eq!(config.model, ModelKind::Transport);
    }

    #[test]
    fn test_validation_errors() {
        let bad_yield = ScenarioConfig {
            yield_kt: 0.0,
            ..ScenarioConfig::default()
        };
        assert_eq!(bad_yield.validate(), Err(ConfigError::InvalidYield(0.0)));

        let bad_wind = ScenarioConfig {
            wind_speed_kph: -1.0,
            ..ScenarioConfig::default()
        };
        assert_eq!(bad_wind.validate(), Err(ConfigError::InvalidWindSpeed(-1.0)));

        let calm = ScenarioConfig {
            wind_speed_kph: 0.0,
            ..ScenarioConfig::default()
        };
        assert!(calm.validate().is_ok());

        let bad_distance = ScenarioConfig {
            max_distance_km: Some(-5.0),
            ..ScenarioConfig::default()
        };
        assert_eq!(
            bad_distance.validate(),
            Err(ConfigError::InvalidDistance(-5.0))
        );
    }

    #[test]
    fn test_grid_and_bin_limits() {
        let tiny_cells = ScenarioConfig {
            resolution_km: 1e-300,
            ..ScenarioConfig::default()
        };
        assert_eq!(
            tiny_cells.validate(),
            Err(ConfigError::InvalidResolution(1e-300))
        );

        // 500 km default extent at 1 m cells
        let fine = ScenarioConfig {
            yield_kt: 100.0,
            resolution_km: 0.001,
            ..ScenarioConfig::default()
        };
        assert_eq!(fine.validate(), Err(ConfigError::InvalidResolution(0.001)));

        let fine_but_small = ScenarioConfig {
            resolution_km: 0.01,
            max_distance_km: Some(20.0),
            ..ScenarioConfig::default()
        };
        assert!(fine_but_small.validate().is_ok());

        let too_many_bins = ScenarioConfig {
            particle_bins: u32::MAX as usize,
            ..ScenarioConfig::default()
        };
        assert_eq!(
            too_many_bins.validate(),
            Err(ConfigError::InvalidBinCount(u32::MAX as usize))
        );

        let most_bins = ScenarioConfig {
            particle_bins: MAX_BIN_COUNT,
            ..ScenarioConfig::default()
        };
        assert!(most_bins.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ScenarioConfig::from_json_str(r#"{"yield_kt": 20.0, "model": "Analytic"}"#)
            .expect("valid scenario");
        assert_eq!(config.yield_kt, 20.0);
        assert_eq!(config.model, ModelKind::Analytic);
        assert_eq!(config.exposure_duration_hr, 24.0);
    }

    #[test]
    fn test_malformed_json() {
        let err = ScenarioConfig::from_json_str("{not json").expect_err("parse error");
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("Failed to parse scenario"));
    }
}
