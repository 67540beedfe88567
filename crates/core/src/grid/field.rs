//! Dense downwind/crosswind grids owned by a single run
//!
//! Fields are stored as a flat `Vec<f64>` in row-major order (`iy * width + ix`).
//! Column `ix` runs downwind (+x) and row `iy` crosswind (+y); ground zero sits
//! at the centre cell `(width / 2, height / 2)`.

use serde::{Deserialize, Serialize};

/// Largest number of cells along one axis of a covering grid
pub const MAX_GRID_STEPS: usize = 4000;

/// Cells along one axis for `max_distance_km` at `resolution_km`.
///
/// Non-positive or NaN inputs give `Some(0)`; `None` means the grid would
/// exceed [`MAX_GRID_STEPS`].
#[must_use]
pub fn grid_steps(max_distance_km: f64, resolution_km: f64) -> Option<usize> {
    if !(resolution_km > 0.0 && max_distance_km > 0.0) {
        return Some(0);
    }
    let steps = max_distance_km / resolution_km;
    (steps.is_finite() && steps <= MAX_GRID_STEPS as f64).then_some(steps as usize)
}

/// 2-D field over the downwind frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridField {
    /// Field values in row-major order (iy * width + ix)
    pub data: Vec<f64>,
    /// Number of downwind cells
    pub width: usize,
    /// Number of crosswind cells
    pub height: usize,
    /// Cell edge length (km)
    pub resolution_km: f64,
}

/// H+1 dose-rate field (R/hr), accumulated by addition across particle bins
pub type DoseRateGrid = GridField;

/// Earliest fallout arrival per cell (hours), `+∞` where nothing arrived
pub type ArrivalTimeGrid = GridField;

/// Cumulative dose over an exposure window (rem)
pub type CumulativeDoseGrid = GridField;

impl GridField {
    /// Create a new field initialised to zero
    ///
    /// # Arguments
    ///
    /// * `width` - Downwind cells
    /// * `height` - Crosswind cells
    /// * `resolution_km` - Cell edge length
    #[must_use]
    pub fn new(width: usize, height: usize, resolution_km: f64) -> Self {
        Self::with_value(width, height, resolution_km, 0.0)
    }

    /// Create a new field with every cell set to `value`
    ///
    /// A size past `MAX_GRID_STEPS²` cells yields an empty 0×0 field.
    #[must_use]
    pub fn with_value(width: usize, height: usize, resolution_km: f64, value: f64) -> Self {
        let cells = width
            .checked_mul(height)
            .filter(|&n| n <= MAX_GRID_STEPS * MAX_GRID_STEPS);
        let Some(cells) = cells else {
            return Self {
                data: Vec::new(),
                width: 0,
                height: 0,
                resolution_km,
            };
        };
        Self {
            data: vec![value; cells],
            width,
            height,
            resolution_km,
        }
    }

    /// Square field covering `max_distance_km` at `resolution_km` per cell.
    ///
    /// Empty when the extent needs more than [`MAX_GRID_STEPS`] cells per axis.
    #[must_use]
    pub fn covering(max_distance_km: f64, resolution_km: f64, value: f64) -> Self {
        let steps = grid_steps(max_distance_km, resolution_km).unwrap_or(0);
        Self::with_value(steps, steps, resolution_km, value)
    }

    /// An arrival-time field with nothing arrived yet
    #[must_use]
    pub fn unreached(width: usize, height: usize, resolution_km: f64) -> Self {
        Self::with_value(width, height, resolution_km, f64::INFINITY)
    }

    /// True when the field has no cells
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get reference to field data
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Column of ground zero
    #[must_use]
    pub fn center_x(&self) -> usize {
        self.width / 2
    }

    /// Row of ground zero
    #[must_use]
    pub fn center_y(&self) -> usize {
        self.height / 2
    }

    /// Area of one cell (km²)
    #[must_use]
    pub fn cell_area_km2(&self) -> f64 {
        self.resolution_km * self.resolution_km
    }

    /// Downwind distance of column `ix` from ground zero (km)
    #[must_use]
    pub fn x_km(&self, ix: usize) -> f64 {
        (ix as f64 - self.center_x() as f64) * self.resolution_km
    }

    /// Crosswind distance of row `iy` from ground zero (km)
    #[must_use]
    pub fn y_km(&self, iy: usize) -> f64 {
        (iy as f64 - self.center_y() as f64) * self.resolution_km
    }

    /// Downwind coordinate of every column (km)
    #[must_use]
    pub fn x_coords_km(&self) -> Vec<f64> {
        (0..self.width).map(|ix| self.x_km(ix)).collect()
    }

    /// Crosswind coordinate of every row (km)
    #[must_use]
    pub fn y_coords_km(&self) -> Vec<f64> {
        (0..self.height).map(|iy| self.y_km(iy)).collect()
    }

    /// Flat index of a possibly out-of-range cell
    #[inline]
    #[must_use]
    pub fn index(&self, ix: isize, iy: isize) -> Option<usize> {
        let ix = usize::try_from(ix).ok()?;
        let iy = usize::try_from(iy).ok()?;
        if ix < self.width && iy < self.height {
            Some(iy * self.width + ix)
        } else {
            None
        }
    }

    /// Value of the cell containing a downwind-frame point, `None` outside the grid
    #[must_use]
    pub fn value_at_km(&self, x_km: f64, y_km: f64) -> Option<f64> {
        let usable = self.resolution_km > 0.0 && x_km.is_finite() && y_km.is_finite();
        if !usable {
            return None;
        }
        let ix = (x_km / self.resolution_km).round() as isize + self.center_x() as isize;
        let iy = (y_km / self.resolution_km).round() as isize + self.center_y() as isize;
        self.index(ix, iy).map(|i| self.data[i])
    }

    /// Value at a cell, `None` outside the grid
    #[must_use]
    pub fn get(&self, ix: usize, iy: usize) -> Option<f64> {
        if ix < self.width && iy < self.height {
            Some(self.data[iy * self.width + ix])
        } else {
            None
        }
    }

    /// Overwrite a cell; returns false (and does nothing) outside the grid
    pub fn set(&mut self, ix: usize, iy: usize, value: f64) -> bool {
        if ix < self.width && iy < self.height {
            self.data[iy * self.width + ix] = value;
            true
        } else {
            false
        }
    }

    /// Add `value` into a cell; returns false outside the grid
    #[inline]
    pub fn accumulate(&mut self, ix: isize, iy: isize, value: f64) -> bool {
        match self.index(ix, iy) {
            Some(i) => {
                self.data[i] += value;
                true
            }
            None => false,
        }
    }

    /// Lower a cell to `value` if it is smaller; returns false outside the grid
    #[inline]
    pub fn min_update(&mut self, ix: isize, iy: isize, value: f64) -> bool {
        match self.index(ix, iy) {
            Some(i) => {
                self.data[i] = self.data[i].min(value);
                true
            }
            None => false,
        }
    }

    /// Largest finite value, 0 for an empty or all-infinite field
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }

    /// Area (km²) of cells at or above `threshold`
    #[must_use]
    pub fn area_at_or_above(&self, threshold: f64) -> f64 {
        self.data.iter().filter(|&&v| v >= threshold).count() as f64 * self.cell_area_km2()
    }

    /// Iterate `(ix, iy, value)` over every cell
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let width = self.width.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i % width, i / width, v))
    }
}
