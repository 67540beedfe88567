//! Semantic unit types for type-safe physical quantity handling
//!
//! Newtype wrappers keep kilotons, speeds and distances in the two unit systems
//! the models mix (the transport engine works in km and km/h, the analytic model
//! in statute miles and mph) from being confused with one another.
//!
//! # Design Philosophy
//! - All quantities are `f64`: the regressions raise yields to fractional powers
//!   and sum many small Gaussian contributions
//! - Total ordering via `Ord` (NaN handled as greater than all values)
//! - Explicit conversion methods between related types
//! - Serde support for serialization
//!
//! # Usage
//! ```
//! use fallout_core::core_types::units::{KilometersPerHour, Kilotons};
//!
//! let wind = KilometersPerHour::new(24.0);
//! assert!((*wind.to_mph() - 14.912904).abs() < 1e-6);
//!
//! let y = Kilotons::new(20.0);
//! assert!((*y.to_megatons() - 0.02).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Deref, Mul, Sub};

/// Kilometres per hour to miles per hour
pub const KPH_TO_MPH: f64 = 0.621371;

/// Statute miles to kilometres
pub const MI_TO_KM: f64 = 1.60934;

/// Kilometres per hour to metres per second
pub const KPH_TO_MPS: f64 = 1.0 / 3.6;

// ============================================================================
// SHARED TRAIT BOILERPLATE
// ============================================================================

/// Implements ordering, deref, display and arithmetic with the same unit.
macro_rules! scalar_unit {
    ($name:ident, $suffix:literal, $precision:literal) => {
        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl Deref for $name {
            type Target = f64;
            #[inline]
            fn deref(&self) -> &f64 {
                &self.0
            }
        }

        impl From<$name> for f64 {
            fn from(v: $name) -> f64 {
                v.0
            }
        }

        impl Add for $name {
            type Output = $name;
            fn add(self, rhs: $name) -> $name {
                $name(self.0 + rhs.0)
            }
        }

        impl Sub for $name {
            type Output = $name;
            fn sub(self, rhs: $name) -> $name {
                $name(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $name {
            type Output = $name;
            fn mul(self, rhs: f64) -> $name {
                $name(self.0 * rhs)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!("{:.", $precision, "} ", $suffix), self.0)
            }
        }
    };
}

// ============================================================================
// YIELD
// ============================================================================

/// Explosive yield in kilotons of TNT equivalent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kilotons(f64);

scalar_unit!(Kilotons, "kt", 1);

impl Kilotons {
    /// Create a yield. Non-positive yields are representable: every model
    /// maps them to an explicit empty result.
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Kilotons(value)
    }

    /// Convert to megatons
    #[inline]
    #[must_use]
    pub fn to_megatons(self) -> Megatons {
        Megatons(self.0 / 1000.0)
    }

    /// True when the yield can drive a model (finite and > 0)
    #[inline]
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

/// Explosive yield in megatons, the unit of the near-field radius laws
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Megatons(f64);

scalar_unit!(Megatons, "Mt", 4);

impl Megatons {
    /// Create a new megaton yield
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Megatons(value)
    }

    /// Scaling law `coefficient · Y_MT^exponent`
    #[inline]
    #[must_use]
    pub fn scaled(self, coefficient: f64, exponent: f64) -> f64 {
        coefficient * self.0.powf(exponent)
    }
}

// ============================================================================
// SPEED
// ============================================================================

/// Wind speed in kilometres per hour
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct KilometersPerHour(f64);

scalar_unit!(KilometersPerHour, "km/h", 1);

impl KilometersPerHour {
    /// Create a new `KilometersPerHour` value.
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        KilometersPerHour(value)
    }

    /// Convert to miles per hour
    #[inline]
    #[must_use]
    pub fn to_mph(self) -> MilesPerHour {
        MilesPerHour(self.0 * KPH_TO_MPH)
    }

    /// Convert to metres per second (raw value)
    #[inline]
    #[must_use]
    pub fn to_mps(self) -> f64 {
        self.0 * KPH_TO_MPS
    }
}

/// Wind speed in statute miles per hour
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MilesPerHour(f64);

scalar_unit!(MilesPerHour, "mph", 1);

impl MilesPerHour {
    /// Create a new `MilesPerHour` value.
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        MilesPerHour(value)
    }
}

// ============================================================================
// DISTANCE
// ============================================================================

/// Distance in kilometres
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kilometers(f64);

scalar_unit!(Kilometers, "km", 2);

impl Kilometers {
    /// Create a new Kilometers value. Signed: downwind-frame offsets may be
    /// negative (upwind or left of the plume axis).
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Kilometers(value)
    }

    /// Convert to statute miles
    #[inline]
    #[must_use]
    pub fn to_miles(self) -> Miles {
        Miles(self.0 / MI_TO_KM)
    }
}

/// Distance in statute miles
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Miles(f64);

scalar_unit!(Miles, "mi", 2);

impl Miles {
    /// Create a new Miles value.
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Miles(value)
    }

    /// Convert to kilometres
    #[inline]
    #[must_use]
    pub fn to_kilometers(self) -> Kilometers {
        Kilometers(self.0 * MI_TO_KM)
    }
}

impl From<Kilometers> for Miles {
    fn from(k: Kilometers) -> Miles {
        k.to_miles()
    }
}

impl From<Miles> for Kilometers {
    fn from(m: Miles) -> Kilometers {
        m.to_kilometers()
    }
}

// ============================================================================
// TIME AND ANGLE
// ============================================================================

/// Time after detonation in hours
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Hours(f64);

scalar_unit!(Hours, "h", 2);

impl Hours {
    /// Create a new Hours value.
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Hours(value)
    }

    /// Convert seconds to hours
    #[inline]
    #[must_use]
    pub fn from_seconds(seconds: f64) -> Self {
        Hours(seconds / 3600.0)
    }
}

/// Compass angle in degrees, normalised to [0, 360)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Degrees(f64);

scalar_unit!(Degrees, "°", 1);

impl Degrees {
    /// Create a compass angle, wrapping into [0, 360)
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        Degrees(value.rem_euclid(360.0))
    }

    /// Convert to radians (raw value)
    #[inline]
    #[must_use]
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kph_to_mph() {
        let mph = KilometersPerHour::new(100.0).to_mph();
        assert!((*mph - 62.1371).abs() < 1e-9);
    }

    #[test]
    fn test_km_mile_round_trip() {
        let km = Kilometers::new(16.0934);
        let mi = km.to_miles();
        assert!((*mi - 10.0).abs() < 1e-9);
        assert!((*mi.to_kilometers() - 16.0934).abs() < 1e-9);
    }

    #[test]
    fn test_megaton_scaling() {
        let y = Kilotons::new(1000.0).to_megatons();
        assert_eq!(*y, 1.0);
        assert!((y.scaled(4.5, 0.33) - 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_degrees_wrap() {
        assert!((*Degrees::new(450.0) - 90.0).abs() < 1e-12);
        assert!((*Degrees::new(-90.0) - 270.0).abs() < 1e-12);
    }

    #[test]
    fn test_non_positive_yield() {
        assert!(!Kilotons::new(0.0).is_positive());
        assert!(!Kilotons::new(f64::NAN).is_positive());
        assert!(Kilotons::new(0.5).is_positive());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Kilometers::new(1.5)), "1.50 km");
        assert_eq!(format!("{}", KilometersPerHour::new(24.0)), "24.0 km/h");
    }
}
