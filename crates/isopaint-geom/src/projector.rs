//! World-to-screen projection.
//!
//! Both functions are pure: their output depends only on their arguments.

use crate::{CoordsXYZ, Rotation, ScreenCoords};

/// Project a world-space point onto the isometric screen plane.
///
/// The horizontal component is first rotated by `rotation`; the rotated
/// axes then map to screen as `x = y' - x'` and `y = (x' + y') / 2 - z`
/// (the halving is an arithmetic shift, so it floors).
#[inline]
pub const fn project_to_screen(point: CoordsXYZ, rotation: Rotation) -> ScreenCoords {
    let rotated = point.xy().rotate(rotation);
    ScreenCoords::new(rotated.y - rotated.x, ((rotated.x + rotated.y) >> 1) - point.z)
}

/// Rotate a bounding-box size into rotation-0-relative form.
///
/// Sizes are authored as inclusive lengths in the viewer's frame. Before the
/// rotation the horizontal components that end up on the positive side are
/// shortened by one so that the far corner lands on the last covered unit:
///
/// | rotation | adjustment      | then rotate by |
/// |----------|-----------------|----------------|
/// | 0        | `x - 1, y - 1`  | 0              |
/// | 1        | `x - 1`         | 3              |
/// | 2        | none            | 2              |
/// | 3        | `y - 1`         | 1              |
///
/// `z` is never adjusted.
pub const fn rotate_bounds_extent(extent: CoordsXYZ, rotation: Rotation) -> CoordsXYZ {
    match rotation {
        Rotation::R0 => CoordsXYZ::new(extent.x - 1, extent.y - 1, extent.z).rotate(Rotation::R0),
        Rotation::R1 => CoordsXYZ::new(extent.x - 1, extent.y, extent.z).rotate(Rotation::R3),
        Rotation::R2 => extent.rotate(Rotation::R2),
        Rotation::R3 => CoordsXYZ::new(extent.x, extent.y - 1, extent.z).rotate(Rotation::R1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_projects_to_origin() {
        for r in Rotation::ALL {
            assert_eq!(project_to_screen(CoordsXYZ::default(), r), ScreenCoords::new(0, 0));
        }
    }

    #[test]
    fn projection_rotation_zero() {
        // x' = 32, y' = 0 -> (0 - 32, 16 - 0)
        assert_eq!(
            project_to_screen(CoordsXYZ::new(32, 0, 0), Rotation::R0),
            ScreenCoords::new(-32, 16)
        );
        // Height lifts the point straight up.
        assert_eq!(
            project_to_screen(CoordsXYZ::new(32, 32, 8), Rotation::R0),
            ScreenCoords::new(0, 24)
        );
    }

    #[test]
    fn projection_other_rotations() {
        let p = CoordsXYZ::new(32, 0, 0);
        // R1: (0, -32) -> (-32 - 0, -16)
        assert_eq!(project_to_screen(p, Rotation::R1), ScreenCoords::new(-32, -16));
        // R2: (-32, 0) -> (32, -16)
        assert_eq!(project_to_screen(p, Rotation::R2), ScreenCoords::new(32, -16));
        // R3: (0, 32) -> (32, 16)
        assert_eq!(project_to_screen(p, Rotation::R3), ScreenCoords::new(32, 16));
    }

    #[test]
    fn halving_floors_negative_sums() {
        // x' + y' = -1 -> -1 >> 1 == -1
        assert_eq!(
            project_to_screen(CoordsXYZ::new(-1, 0, 0), Rotation::R0),
            ScreenCoords::new(1, -1)
        );
    }

    #[test]
    fn extent_exact_values_per_rotation() {
        let e = CoordsXYZ::new(32, 16, 8);
        assert_eq!(rotate_bounds_extent(e, Rotation::R0), CoordsXYZ::new(31, 15, 8));
        // (31, 16) rotated by 3 -> (-16, 31)
        assert_eq!(rotate_bounds_extent(e, Rotation::R1), CoordsXYZ::new(-16, 31, 8));
        assert_eq!(rotate_bounds_extent(e, Rotation::R2), CoordsXYZ::new(-32, -16, 8));
        // (32, 15) rotated by 1 -> (15, -32)
        assert_eq!(rotate_bounds_extent(e, Rotation::R3), CoordsXYZ::new(15, -32, 8));
    }

    #[test]
    fn extent_inverse_rotation_recovers_adjusted_input() {
        let e = CoordsXYZ::new(20, 10, 4);
        let adjustments = [(1, 1), (1, 0), (0, 0), (0, 1)];
        for (r, (dx, dy)) in Rotation::ALL.into_iter().zip(adjustments) {
            let rotated = rotate_bounds_extent(e, r);
            // rotate(3) is undone by rotate(1) and vice versa, i.e. by r itself.
            let back = rotated.rotate(r);
            assert_eq!(back, CoordsXYZ::new(e.x - dx, e.y - dy, e.z), "{r}");
        }
    }
}
