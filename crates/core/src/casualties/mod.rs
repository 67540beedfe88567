//! Human-impact estimates
//!
//! Near-field casualties come from nested blast, thermal and prompt-radiation
//! rings scaled by yield. Far-field casualties come from the cumulative fallout
//! dose grid. The transport engine combines both through [`CasualtyEstimator`],
//! which also applies a reproducible yield-seeded variance to the near-field
//! baseline.
//!
//! The transport and analytic paths each carry their own near-field
//! [`NearFieldCalibration`] so they can be tuned independently.

mod estimator;
mod far_field;
mod near_field;

pub use estimator::{seed_for_yield, CasualtyBreakdown, CasualtyEstimator, CasualtyVariance};
pub use far_field::{band_for, tally_fallout, DoseBand, FalloutTally, FALLOUT_DOSE_BANDS};
pub use near_field::{
    estimate_near_field, BlastRadii, NearFieldCalibration, NearFieldCasualties, NearFieldZone,
    ZoneCasualties, ZoneFractions, ZoneLaw,
};
