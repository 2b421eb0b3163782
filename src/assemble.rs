use crate::bounds::BoundingBox;
use crate::diagram::{RidgeVertex, VoronoiDiagram};
use crate::extend::ExtendedRidges;
use crate::kdtree::KdTree;
use log::debug;

/// Close every open region and hand each box corner to a region.
///
/// Open regions (those carrying [`RidgeVertex::Unbounded`]) collect the
/// clipped far vertex of every incident originally-unbounded ridge in
/// place of the sentinel. Afterwards each of the four box corners becomes
/// a new vertex appended to the region of the seed nearest to it, so the
/// corners of the box are covered by exactly one cell each.
///
/// Returns the per-region vertex index sets; order carries no meaning yet.
/// A region may still end up with fewer than 3 vertices here; that
/// surfaces as a degenerate-region error at ordering time, never silently.
pub fn close_regions(
    diagram: &VoronoiDiagram,
    extended: &mut ExtendedRidges,
    bounds: &BoundingBox,
) -> Vec<Vec<usize>> {
    // Inverse of the seed -> region mapping.
    let mut region_seed = vec![usize::MAX; diagram.regions.len()];
    for (seed, &region) in diagram.point_region.iter().enumerate() {
        region_seed[region] = seed;
    }

    let mut closed: Vec<Vec<usize>> = Vec::with_capacity(diagram.regions.len());
    for (r, region) in diagram.regions.iter().enumerate() {
        let mut indices: Vec<usize> = region.iter().filter_map(|v| v.finite()).collect();

        if region.contains(&RidgeVertex::Unbounded) && region_seed[r] != usize::MAX {
            let seed = region_seed[r];
            // Every originally-unbounded ridge incident to this seed
            // contributed one clipped vertex; its index sits in the slot
            // the sentinel occupied.
            for (j, ridge) in diagram.ridges.iter().enumerate() {
                if ridge.seeds[0] != seed && ridge.seeds[1] != seed {
                    continue;
                }
                let Some(slot) = ridge.vertices.iter().position(|v| v.is_unbounded()) else {
                    continue;
                };
                indices.push(extended.ridge_vertices[j][slot]);
            }
        }

        closed.push(indices);
    }

    let mut tree = KdTree::new();
    tree.build(&diagram.points);
    for corner in bounds.corners() {
        let Some((seed, _)) = tree.nearest(corner, &diagram.points) else {
            break;
        };
        let k = extended.push_vertex(corner[0], corner[1]);
        closed[diagram.point_region[seed]].push(k);
        debug!("corner ({}, {}) assigned to seed {}", corner[0], corner[1], seed);
    }

    closed
}
