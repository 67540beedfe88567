//! Threshold bounding boxes over a dose-rate grid
//!
//! A contour is summarised by the index extent of every cell at or above its
//! threshold. Extents are inclusive: a block spanning `h` downwind and `w`
//! crosswind cells measures `h·r` long and `w·r` wide.

use super::field::GridField;
use serde::{Deserialize, Serialize};

/// Dose-rate thresholds (R/hr) reported by the transport engine
pub const TRANSPORT_CONTOUR_THRESHOLDS: [f64; 7] = [1.0, 3.0, 10.0, 30.0, 100.0, 300.0, 1000.0];

/// Bounding box of the cells at or above one threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContourExtent {
    /// Dose-rate threshold (R/hr)
    pub threshold: f64,
    /// Downwind index range relative to ground zero (inclusive)
    pub min_x: isize,
    /// Downwind index range relative to ground zero (inclusive)
    pub max_x: isize,
    /// Crosswind index range relative to ground zero (inclusive)
    pub min_y: isize,
    /// Crosswind index range relative to ground zero (inclusive)
    pub max_y: isize,
    /// Number of cells at or above the threshold
    pub cell_count: usize,
    /// Cell edge length (km)
    pub resolution_km: f64,
}

impl ContourExtent {
    /// Downwind extent (km)
    #[must_use]
    pub fn length_km(&self) -> f64 {
        (self.max_x - self.min_x + 1) as f64 * self.resolution_km
    }

    /// Crosswind extent (km)
    #[must_use]
    pub fn width_km(&self) -> f64 {
        (self.max_y - self.min_y + 1) as f64 * self.resolution_km
    }

    /// Area of the cells inside the contour (km²)
    #[must_use]
    pub fn area_km2(&self) -> f64 {
        self.cell_count as f64 * self.resolution_km * self.resolution_km
    }

    /// `(length_km, width_km)` for an ellipse overlay anchored at ground zero.
    ///
    /// Length is the farthest downwind cell (at least one cell), width the
    /// crosswind spread between outermost cell centres (at least 0.3 cells).
    #[must_use]
    pub fn display_dimensions(&self) -> (f64, f64) {
        let res = self.resolution_km;
        let downwind = if self.max_x > 0 {
            self.max_x as f64 * res
        } else {
            0.0
        };
        let crosswind = (self.max_y - self.min_y) as f64 * res;
        (downwind.max(res), crosswind.max(0.3 * res))
    }
}

/// Scan `grid` for the bounding box of cells `>= threshold`.
///
/// Returns `None` when no cell reaches the threshold.
#[must_use]
pub fn scan_contour(grid: &GridField, threshold: f64) -> Option<ContourExtent> {
    let cx = grid.center_x() as isize;
    let cy = grid.center_y() as isize;
    let mut extent: Option<ContourExtent> = None;

    for (ix, iy, value) in grid.cells() {
        if value < threshold {
            continue;
        }
        let x = ix as isize - cx;
        let y = iy as isize - cy;
        match extent.as_mut() {
            Some(e) => {
                e.min_x = e.min_x.min(x);
                e.max_x = e.max_x.max(x);
                e.min_y = e.min_y.min(y);
                e.max_y = e.max_y.max(y);
                e.cell_count += 1;
            }
            None => {
                extent = Some(ContourExtent {
                    threshold,
                    min_x: x,
                    max_x: x,
                    min_y: y,
                    max_y: y,
                    cell_count: 1,
                    resolution_km: grid.resolution_km,
                });
            }
        }
    }

    extent
}

/// Scan every threshold, keeping only those that are reached
#[must_use]
pub fn scan_contours(grid: &GridField, thresholds: &[f64]) -> Vec<ContourExtent> {
    thresholds
        .iter()
        .filter_map(|&t| scan_contour(grid, t))
        .collect()
}
