//! Drift direction derived from the strength gradient.

use plume_core::{CellCoord, StrengthRead};

/// A unit-length 2D direction, or zero where the field is flat.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlowVector {
    /// East component.
    pub x: f64,
    /// North component.
    pub y: f64,
}

impl FlowVector {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Whether both components are zero.
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Normalised central gradient `(east - west, north - south)` of `field`
/// at `coord`.
///
/// Neighbours outside the grid (or past the `i32` range) and cells not yet
/// filled read as zero, so at the edge of a plume the vector points back
/// toward the source. A gradient shorter than `1e-12` yields
/// [`FlowVector::ZERO`].
pub fn flow_direction(field: &impl StrengthRead, coord: CellCoord) -> FlowVector {
    let read = |dx: i32, dy: i32| match (coord.x.checked_add(dx), coord.y.checked_add(dy)) {
        (Some(x), Some(y)) => field.strength(x, y),
        _ => 0.0,
    };
    let gx = read(1, 0) - read(-1, 0);
    let gy = read(0, 1) - read(0, -1);
    let mag = (gx * gx + gy * gy).sqrt();
    if mag < 1e-12 {
        return FlowVector::ZERO;
    }
    FlowVector {
        x: gx / mag,
        y: gy / mag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ramp;

    impl StrengthRead for Ramp {
        fn strength(&self, x: i32, _y: i32) -> f64 {
            x as f64
        }

        fn is_visited(&self, _x: i32, _y: i32) -> bool {
            true
        }
    }

    struct Flat;

    impl StrengthRead for Flat {
        fn strength(&self, _x: i32, _y: i32) -> f64 {
            0.5
        }

        fn is_visited(&self, _x: i32, _y: i32) -> bool {
            true
        }
    }

    #[test]
    fn points_up_the_gradient() {
        let v = flow_direction(&Ramp, CellCoord::new(3, 3));
        assert_eq!(v, FlowVector { x: 1.0, y: 0.0 });
    }

    #[test]
    fn flat_field_has_no_flow() {
        assert!(flow_direction(&Flat, CellCoord::new(0, 0)).is_zero());
    }

    #[test]
    fn extreme_coordinates_read_past_the_edge_as_zero() {
        let v = flow_direction(&Ramp, CellCoord::new(i32::MAX, 0));
        assert_eq!(v, FlowVector { x: -1.0, y: 0.0 });

        let v = flow_direction(&Flat, CellCoord::new(i32::MAX, i32::MIN));
        let h = std::f64::consts::FRAC_1_SQRT_2;
        assert!((v.x + h).abs() < 1e-12, "{v:?}");
        assert!((v.y - h).abs() < 1e-12, "{v:?}");
    }
}
