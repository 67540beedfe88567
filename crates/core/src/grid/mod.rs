//! Grid abstractions for the transport engine
//!
//! Each run owns its grids exclusively. Deposition goes through the
//! bounds-checked [`GridField::accumulate`] and [`GridField::min_update`]
//! operations; nothing else writes into a grid after construction.

mod contours;
mod field;

pub use contours::{scan_contour, scan_contours, ContourExtent, TRANSPORT_CONTOUR_THRESHOLDS};
pub use field::{
    grid_steps, ArrivalTimeGrid, CumulativeDoseGrid, DoseRateGrid, GridField, MAX_GRID_STEPS,
};
