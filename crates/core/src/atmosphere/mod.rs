//! Atmospheric structure seen by settling fallout particles.
//!
//! The fall-time integrator only needs air density and dynamic viscosity as a
//! function of altitude. They come from a tabulated standard atmosphere
//! (0-20 km, 1 km steps) with linear interpolation between rows.
//!
//! # References
//!
//! - U.S. Standard Atmosphere (1976), NOAA/NASA/USAF.

mod standard;

pub use standard::{AtmosphericLayer, AtmosphericProfileTable, AtmosphericState, STANDARD_ATMOSPHERE};
