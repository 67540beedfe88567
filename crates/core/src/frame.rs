//! Downwind/crosswind frame
//!
//! Every model works in a frame whose +x axis points downwind from ground zero
//! and whose +y axis points to the right of the plume when looking downwind.
//! Wind direction is given in the meteorological "from" convention. Conversion
//! to compass east/north is only needed by consumers that place results on a
//! map.

use crate::core_types::{Degrees, Kilometers};
use nalgebra::{Rotation2, Vector2};
use serde::{Deserialize, Serialize};

/// Compass bearing the plume travels towards
#[must_use]
pub fn plume_bearing_deg(wind_from: Degrees) -> Degrees {
    Degrees::new(*wind_from + 180.0)
}

/// Screen rotation of the downwind axis used by map overlays (`270 − from`)
#[must_use]
pub fn render_angle_deg(wind_from: Degrees) -> Degrees {
    Degrees::new(270.0 - *wind_from)
}

/// A location in the downwind frame (km)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DownwindPoint {
    /// Distance along the plume axis, negative upwind
    pub x_km: f64,
    /// Distance across the plume axis
    pub y_km: f64,
}

impl DownwindPoint {
    #[must_use]
    pub const fn new(x_km: f64, y_km: f64) -> Self {
        Self { x_km, y_km }
    }

    /// Point `distance_km` from ground zero on compass `bearing`
    #[must_use]
    pub fn from_polar(distance_km: f64, bearing: Degrees, wind_from: Degrees) -> Self {
        let offset = Degrees::new(*bearing - *plume_bearing_deg(wind_from)).to_radians();
        Self {
            x_km: distance_km * offset.cos(),
            y_km: distance_km * offset.sin(),
        }
    }

    /// Inverse of [`DownwindPoint::to_east_north`]
    #[must_use]
    pub fn from_east_north(east_km: f64, north_km: f64, wind_from: Degrees) -> Self {
        let v = axis_rotation(wind_from).inverse() * Vector2::new(east_km, north_km);
        Self {
            x_km: v.x,
            y_km: -v.y,
        }
    }

    /// Compass offset from ground zero as `(east, north)` km
    #[must_use]
    pub fn to_east_north(self, wind_from: Degrees) -> (f64, f64) {
        // Crosswind +y is clockwise of the plume axis, so flip it into the
        // counter-clockwise maths frame before rotating.
        let v = axis_rotation(wind_from) * Vector2::new(self.x_km, -self.y_km);
        (v.x, v.y)
    }

    /// Distance from ground zero
    #[must_use]
    pub fn distance(&self) -> Kilometers {
        Kilometers::new(self.x_km.hypot(self.y_km))
    }

    /// Both coordinates in statute miles, the unit of the analytic model
    #[must_use]
    pub fn to_miles(self) -> (f64, f64) {
        (
            *Kilometers::new(self.x_km).to_miles(),
            *Kilometers::new(self.y_km).to_miles(),
        )
    }
}

/// Rotation taking the downwind axis onto east in the maths frame
fn axis_rotation(wind_from: Degrees) -> Rotation2<f64> {
    Rotation2::new((90.0 - *plume_bearing_deg(wind_from)).to_radians())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_bearings() {
        assert_eq!(*plume_bearing_deg(Degrees::new(270.0)), 90.0);
        assert_eq!(*plume_bearing_deg(Degrees::new(0.0)), 180.0);
        assert_eq!(*render_angle_deg(Degrees::new(270.0)), 0.0);
        assert_eq!(*render_angle_deg(Degrees::new(0.0)), 270.0);
        assert_eq!(*render_angle_deg(Degrees::new(300.0)), 330.0);
    }

    #[test]
    fn test_from_polar_along_and_across() {
        // West wind blows the plume east
        let from = Degrees::new(270.0);
        let down = DownwindPoint::from_polar(10.0, Degrees::new(90.0), from);
        assert_abs_diff_eq!(down.x_km, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(down.y_km, 0.0, epsilon = 1e-12);

        let right = DownwindPoint::from_polar(5.0, Degrees::new(180.0), from);
        assert_abs_diff_eq!(right.x_km, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(right.y_km, 5.0, epsilon = 1e-12);

        let up = DownwindPoint::from_polar(3.0, Degrees::new(270.0), from);
        assert_abs_diff_eq!(up.x_km, -3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_east_north_matches_compass() {
        let from = Degrees::new(270.0);
        let (e, n) = DownwindPoint::new(10.0, 0.0).to_east_north(from);
        assert_abs_diff_eq!(e, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(n, 0.0, epsilon = 1e-12);

        // Right of an eastbound plume is south
        let (e, n) = DownwindPoint::new(0.0, 4.0).to_east_north(from);
        assert_abs_diff_eq!(e, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(n, -4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_polar_and_compass_agree() {
        let from = Degrees::new(35.0);
        let bearing = Degrees::new(250.0);
        let p = DownwindPoint::from_polar(7.0, bearing, from);
        let (e, n) = p.to_east_north(from);
        assert_abs_diff_eq!(e, 7.0 * bearing.to_radians().sin(), epsilon = 1e-9);
        assert_abs_diff_eq!(n, 7.0 * bearing.to_radians().cos(), epsilon = 1e-9);

        let back = DownwindPoint::from_east_north(e, n, from);
        assert_abs_diff_eq!(back.x_km, p.x_km, epsilon = 1e-9);
        assert_abs_diff_eq!(back.y_km, p.y_km, epsilon = 1e-9);
        assert_abs_diff_eq!(*p.distance(), 7.0, epsilon = 1e-9);
    }
}
