//! Tabulated standard atmosphere with linear interpolation

use serde::{Deserialize, Serialize};

/// One tabulated altitude sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtmosphericLayer {
    /// Altitude above sea level (km)
    pub altitude_km: f64,
    /// Air temperature (K)
    pub temperature_k: f64,
    /// Static pressure (Pa)
    pub pressure_pa: f64,
    /// Air density (kg/m³)
    pub density_kg_m3: f64,
    /// Dynamic viscosity (Pa·s)
    pub viscosity_pa_s: f64,
}

impl AtmosphericLayer {
    const fn row(
        altitude_km: f64,
        temperature_k: f64,
        pressure_pa: f64,
        density_kg_m3: f64,
        viscosity_pa_s: f64,
    ) -> Self {
        Self {
            altitude_km,
            temperature_k,
            pressure_pa,
            density_kg_m3,
            viscosity_pa_s,
        }
    }
}

/// Interpolated atmospheric properties at an arbitrary altitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtmosphericState {
    /// Air temperature (K)
    pub temperature_k: f64,
    /// Static pressure (Pa)
    pub pressure_pa: f64,
    /// Air density (kg/m³)
    pub density_kg_m3: f64,
    /// Dynamic viscosity (Pa·s)
    pub viscosity_pa_s: f64,
}

impl From<&AtmosphericLayer> for AtmosphericState {
    fn from(layer: &AtmosphericLayer) -> Self {
        Self {
            temperature_k: layer.temperature_k,
            pressure_pa: layer.pressure_pa,
            density_kg_m3: layer.density_kg_m3,
            viscosity_pa_s: layer.viscosity_pa_s,
        }
    }
}

/// U.S. Standard Atmosphere, 0-20 km in 1 km steps.
/// Isothermal above the 11 km tropopause.
pub const STANDARD_ATMOSPHERE: [AtmosphericLayer; 21] = [
    AtmosphericLayer::row(0.0, 288.15, 101325.0, 1.2250, 1.789e-5),
    AtmosphericLayer::row(1.0, 281.65, 89874.6, 1.1116, 1.758e-5),
    AtmosphericLayer::row(2.0, 275.15, 79495.2, 1.0065, 1.726e-5),
    AtmosphericLayer::row(3.0, 268.65, 70108.5, 0.9091, 1.694e-5),
    AtmosphericLayer::row(4.0, 262.15, 61640.2, 0.8191, 1.661e-5),
    AtmosphericLayer::row(5.0, 255.65, 54019.9, 0.7361, 1.628e-5),
    AtmosphericLayer::row(6.0, 249.15, 47181.0, 0.6597, 1.595e-5),
    AtmosphericLayer::row(7.0, 242.65, 41060.6, 0.5895, 1.561e-5),
    AtmosphericLayer::row(8.0, 236.15, 35599.6, 0.5252, 1.527e-5),
    AtmosphericLayer::row(9.0, 229.65, 30742.6, 0.4663, 1.493e-5),
    AtmosphericLayer::row(10.0, 223.15, 26436.3, 0.4127, 1.458e-5),
    AtmosphericLayer::row(11.0, 216.65, 22632.1, 0.3639, 1.422e-5),
    AtmosphericLayer::row(12.0, 216.65, 19330.4, 0.3108, 1.422e-5),
    AtmosphericLayer::row(13.0, 216.65, 16510.4, 0.2655, 1.422e-5),
    AtmosphericLayer::row(14.0, 216.65, 14101.4, 0.2269, 1.422e-5),
    AtmosphericLayer::row(15.0, 216.65, 12044.8, 0.1938, 1.422e-5),
    AtmosphericLayer::row(16.0, 216.65, 10289.1, 0.1656, 1.422e-5),
    AtmosphericLayer::row(17.0, 216.65, 8787.9, 0.1415, 1.422e-5),
    AtmosphericLayer::row(18.0, 216.65, 7500.2, 0.1209, 1.422e-5),
    AtmosphericLayer::row(19.0, 216.65, 6401.1, 0.1032, 1.422e-5),
    AtmosphericLayer::row(20.0, 216.65, 5474.9, 0.0880, 1.422e-5),
];

/// Altitude lookup over a monotonic table of layers.
///
/// Altitudes outside the tabulated range clamp to the nearest boundary row, so
/// `lookup` is total and never fails.
#[derive(Debug, Clone, Copy)]
pub struct AtmosphericProfileTable {
    layers: &'static [AtmosphericLayer],
}

impl Default for AtmosphericProfileTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl AtmosphericProfileTable {
    /// The built-in standard atmosphere
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            layers: &STANDARD_ATMOSPHERE,
        }
    }

    /// Tabulated rows, ordered by altitude
    #[must_use]
    pub fn layers(&self) -> &[AtmosphericLayer] {
        self.layers
    }

    /// Interpolate the atmosphere at `altitude_m` (metres)
    #[must_use]
    pub fn lookup(&self, altitude_m: f64) -> AtmosphericState {
        let altitude_km = altitude_m / 1000.0;
        let first = &self.layers[0];
        let last = &self.layers[self.layers.len() - 1];

        if altitude_km.is_nan() || altitude_km <= first.altitude_km {
            return first.into();
        }
        if altitude_km >= last.altitude_km {
            return last.into();
        }

        let upper_idx = self
            .layers
            .partition_point(|layer| layer.altitude_km <= altitude_km);
        let lower = &self.layers[upper_idx - 1];
        let upper = &self.layers[upper_idx];

        let t = (altitude_km - lower.altitude_km) / (upper.altitude_km - lower.altitude_km);
        let lerp = |a: f64, b: f64| a + (b - a) * t;

        AtmosphericState {
            temperature_k: lerp(lower.temperature_k, upper.temperature_k),
            pressure_pa: lerp(lower.pressure_pa, upper.pressure_pa),
            density_kg_m3: lerp(lower.density_kg_m3, upper.density_kg_m3),
            viscosity_pa_s: lerp(lower.viscosity_pa_s, upper.viscosity_pa_s),
        }
    }
}
