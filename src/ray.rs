use crate::bounds::BoundingBox;
use crate::error::{Error, Result};

/// First crossing of an oriented ray with the box boundary.
///
/// The ray is `origin + orient * direction * t` for `t >= 0`; `origin` must
/// lie inside or on the box and `direction` must be non-zero. Each of the
/// four boundary lines yields a candidate parameter; the smallest
/// non-negative one wins, ties resolving in the fixed evaluation order
/// xmin, ymin, xmax, ymax. A direction component of exactly zero makes the
/// ray parallel to that axis's boundaries, which are skipped.
///
/// Pure function. A missing crossing means the caller broke the contract
/// and is fatal for the whole reconstruction pass.
pub fn ray_box_crossing(
    origin: [f64; 2],
    direction: [f64; 2],
    orient: f64,
    bounds: &BoundingBox,
) -> Result<[f64; 2]> {
    let walls = [
        (0, bounds.min[0]),
        (1, bounds.min[1]),
        (0, bounds.max[0]),
        (1, bounds.max[1]),
    ];

    let mut min_dist = f64::INFINITY;
    for (axis, wall) in walls {
        if direction[axis] == 0.0 {
            continue;
        }
        let d = (wall - origin[axis]) / direction[axis] * orient;
        if d < 0.0 {
            continue;
        }
        if d < min_dist {
            min_dist = d;
        }
    }

    if !min_dist.is_finite() {
        return Err(Error::RayClipFailure {
            x: origin[0],
            y: origin[1],
            dx: direction[0],
            dy: direction[1],
        });
    }

    Ok([
        origin[0] + orient * direction[0] * min_dist,
        origin[1] + orient * direction[1] * min_dist,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOX: BoundingBox = BoundingBox {
        min: [-1.0, -1.0],
        max: [2.0, 2.0],
    };

    fn on_boundary(p: [f64; 2], b: &BoundingBox) -> bool {
        let eps = 1e-12;
        (p[0] - b.min[0]).abs() < eps
            || (p[0] - b.max[0]).abs() < eps
            || (p[1] - b.min[1]).abs() < eps
            || (p[1] - b.max[1]).abs() < eps
    }

    #[test]
    fn test_axis_aligned_rays() {
        let p = ray_box_crossing([0.0, 0.0], [1.0, 0.0], 1.0, &BOX).unwrap();
        assert_eq!(p, [2.0, 0.0]);

        let p = ray_box_crossing([0.0, 0.0], [1.0, 0.0], -1.0, &BOX).unwrap();
        assert_eq!(p, [-1.0, 0.0]);

        let p = ray_box_crossing([0.5, 0.5], [0.0, 1.0], 1.0, &BOX).unwrap();
        assert_eq!(p, [0.5, 2.0]);
    }

    #[test]
    fn test_diagonal_ray_lands_on_boundary() {
        let inv = std::f64::consts::FRAC_1_SQRT_2;
        let p = ray_box_crossing([0.0, 0.0], [inv, inv], 1.0, &BOX).unwrap();
        assert!(on_boundary(p, &BOX), "{:?} not on boundary", p);
        assert!((p[0] - 2.0).abs() < 1e-12 && (p[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_skewed_ray_exits_nearest_wall() {
        // Steep direction: exits through the top before the right wall.
        let p = ray_box_crossing([0.0, 0.0], [0.1, 0.9], 1.0, &BOX).unwrap();
        assert!((p[1] - 2.0).abs() < 1e-12);
        assert!(p[0] > 0.0 && p[0] < 2.0);
    }

    #[test]
    fn test_origin_on_boundary() {
        let p = ray_box_crossing([2.0, 0.0], [1.0, 0.0], 1.0, &BOX).unwrap();
        assert_eq!(p, [2.0, 0.0]);
    }

    #[test]
    fn test_zero_direction_fails() {
        assert!(matches!(
            ray_box_crossing([0.0, 0.0], [0.0, 0.0], 1.0, &BOX),
            Err(Error::RayClipFailure { .. })
        ));
    }

    #[test]
    fn test_outward_ray_from_outside_fails() {
        assert!(ray_box_crossing([5.0, 0.0], [1.0, 0.0], 1.0, &BOX).is_err());
    }
}
