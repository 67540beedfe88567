//! Fallout particle physics: size distribution, cloud loft and settling.
//!
//! The transport engine treats fallout as a set of discrete particle-size
//! classes. Each class is lofted to a yield-dependent stabilised cloud height
//! and then settles through the standard atmosphere at its terminal velocity.
//!
//! # References
//!
//! - Norment, H.G. (1979). "DELFIC: Department of Defense Fallout Prediction
//!   System", DNA 5159F. Cloud-rise regressions and particle-size modes.
//! - McDonald, J.E. (1960). "An aid to computation of terminal fall velocities
//!   of spheres", J. Meteorology 17. Davies-number drag correlations.

mod bins;
mod cloud;
mod settling;

pub use bins::{ParticleBin, ParticleBinGenerator, DEFAULT_BIN_COUNT, MAX_BIN_COUNT};
pub use cloud::{CloudGeometry, CloudStabilizationModel, COARSE_RADIUS_MICRONS};
pub use settling::{FallTimeIntegrator, FallTrajectory, TrajectoryPoint};
