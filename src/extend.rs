use crate::bounds::BoundingBox;
use crate::diagram::VoronoiDiagram;
use crate::error::{Error, Result};
use crate::ray::ray_box_crossing;
use log::debug;

/// Sentinel-free ridge table layered over the raw diagram: the vertex
/// table copied and extended with one clipped far point per unbounded
/// ridge. Original diagram tables are untouched; vertex indices already
/// assigned stay stable, later stages only append.
#[derive(Clone, Debug)]
pub struct ExtendedRidges {
    /// Augmented vertex coordinates `[x, y, x, y, ...]`.
    pub vertices: Vec<f64>,
    /// Per-ridge vertex index pairs, slot order preserved from the diagram.
    pub ridge_vertices: Vec<[usize; 2]>,
}

impl ExtendedRidges {
    /// Append a vertex, returning its index.
    pub fn push_vertex(&mut self, x: f64, y: f64) -> usize {
        let k = self.vertices.len() / 2;
        self.vertices.push(x);
        self.vertices.push(y);
        k
    }
}

/// Replace every unbounded ridge endpoint with a finite vertex on the box
/// boundary.
///
/// The replacement ray starts at the ridge's finite vertex and runs along
/// the perpendicular of the tangent between the ridge's two generator
/// seeds; of the two perpendiculars, the one pointing away from the seed
/// centroid (positive dot product with midpoint - centroid) is outward.
pub fn extend_ridges(diagram: &VoronoiDiagram, bounds: &BoundingBox) -> Result<ExtendedRidges> {
    let center = diagram.centroid();
    let mut out = ExtendedRidges {
        vertices: diagram.vertices.clone(),
        ridge_vertices: Vec::with_capacity(diagram.ridges.len()),
    };
    let mut extended = 0usize;

    for ridge in &diagram.ridges {
        let ends = [ridge.vertices[0].finite(), ridge.vertices[1].finite()];
        if let (Some(a), Some(b)) = (ends[0], ends[1]) {
            out.ridge_vertices.push([a, b]);
            continue;
        }

        let p = diagram.seed(ridge.seeds[0]);
        let q = diagram.seed(ridge.seeds[1]);
        let Some(anchor) = ends[0].or(ends[1]) else {
            // No finite endpoint to anchor the ray on: not a valid ridge of
            // a planar diagram.
            return Err(Error::RayClipFailure {
                x: 0.5 * (p[0] + q[0]),
                y: 0.5 * (p[1] + q[1]),
                dx: 0.0,
                dy: 0.0,
            });
        };

        let mut tx = q[0] - p[0];
        let mut ty = q[1] - p[1];
        let len = (tx * tx + ty * ty).sqrt();
        tx /= len;
        ty /= len;
        let normal = [-ty, tx];

        let midpoint = [0.5 * (p[0] + q[0]), 0.5 * (p[1] + q[1])];
        let dot = (midpoint[0] - center[0]) * normal[0] + (midpoint[1] - center[1]) * normal[1];
        let orient = if dot >= 0.0 { 1.0 } else { -1.0 };

        let origin = diagram.vertex(anchor);
        let far = ray_box_crossing(origin, normal, orient, bounds)?;
        let k = out.push_vertex(far[0], far[1]);
        extended += 1;

        // The clipped vertex takes the slot the sentinel occupied.
        if ends[0].is_none() {
            out.ridge_vertices.push([k, anchor]);
        } else {
            out.ridge_vertices.push([anchor, k]);
        }
    }

    debug!(
        "extended {} unbounded ridges, vertex table {} -> {}",
        extended,
        diagram.vertices.len() / 2,
        out.vertices.len() / 2
    );
    Ok(out)
}
