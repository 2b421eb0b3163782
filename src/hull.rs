use crate::error::{Error, Result};
use crate::polygon::Polygon;

/// Vertices closer than this (per axis) are treated as one point before
/// hulling, so coincident circumcenters and clipped points cannot fake a
/// degenerate hull.
const MERGE_EPS: f64 = 1e-9;

/// Order a region's vertex set into a counter-clockwise convex polygon.
///
/// Voronoi cells are convex, so ordering reduces to the convex hull of the
/// region's points (Andrew's monotone chain). Near-duplicate vertices are
/// merged first; fewer than 3 distinct points, or a collinear set, is a
/// reconstruction failure reported for this seed only.
pub fn order_region(indices: &[usize], vertices: &[f64], seed: usize) -> Result<Polygon> {
    let mut distinct: Vec<[f64; 2]> = Vec::with_capacity(indices.len());
    for &i in indices {
        let p = [vertices[i * 2], vertices[i * 2 + 1]];
        let dup = distinct
            .iter()
            .any(|q| (q[0] - p[0]).abs() <= MERGE_EPS && (q[1] - p[1]).abs() <= MERGE_EPS);
        if !dup {
            distinct.push(p);
        }
    }

    if distinct.len() < 3 {
        return Err(Error::DegenerateRegion {
            seed,
            distinct: distinct.len(),
        });
    }

    // Sort points lexicographically
    distinct.sort_by(|a, b| {
        a[0].partial_cmp(&b[0])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a[1].partial_cmp(&b[1]).unwrap_or(std::cmp::Ordering::Equal))
    });

    // Build lower hull
    let mut lower: Vec<[f64; 2]> = Vec::new();
    for &p in &distinct {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }

    // Build upper hull
    let mut upper: Vec<[f64; 2]> = Vec::new();
    for &p in distinct.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }

    // Remove last point of each half because it's repeated
    lower.pop();
    upper.pop();
    lower.extend(upper);

    if lower.len() < 3 {
        return Err(Error::DegenerateRegion {
            seed,
            distinct: lower.len(),
        });
    }

    Ok(Polygon::from_vertices(&lower))
}

fn cross(o: [f64; 2], a: [f64; 2], b: [f64; 2]) -> f64 {
    (a[0] - o[0]) * (b[1] - o[1]) - (a[1] - o[1]) * (b[0] - o[0])
}
