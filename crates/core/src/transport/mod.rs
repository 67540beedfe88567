//! Particle-transport fallout model
//!
//! Ground zero sits at the centre of a square grid whose +x axis points
//! downwind. Every particle bin is lofted, settled and advected, then
//! deposited as an anisotropic Gaussian whose peak scales with the bin's
//! activity and the yield.
//!
//! # References
//!
//! - Norment, H.G. (1979). "DELFIC: Department of Defense Fallout Prediction
//!   System", DNA 5159F.
//! - Glasstone, S. & Dolan, P.J. (1977). "The Effects of Nuclear Weapons",
//!   3rd ed. Ch. IX (dose-rate normalisation).

mod deposition;
mod drift;
mod engine;

pub use deposition::{deposit_gaussian, Deposit, K_FACTOR_R_KM2_PER_HR_KT};
pub use drift::{downwind_displacement_km, plume_spread, PlumeSpread, WindShear};
pub use engine::{
    default_max_distance_km, BinDeposit, BinOutcome, BinTrace, PlumeTransportEngine,
    TransportMetadata, TransportResult, TRANSPORT_MODEL_NAME,
};
