use crate::bounds::BoundingBox;
use crate::error::{Error, Result};

/// Distance classification tolerance for half-plane clipping.
const CLIP_EPS: f64 = 1e-9;

/// Minimum absolute area for a clip output ring to survive.
const AREA_EPS: f64 = 1e-12;

/// A simple closed polygon stored as a flat `[x, y, x, y, ...]` ring
/// without a repeated closing point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    points: Vec<f64>,
}

impl Polygon {
    /// Create a polygon from a flat coordinate ring. An explicitly closed
    /// ring (last point repeating the first) is normalised by dropping the
    /// repeated endpoint.
    pub fn new(mut points: Vec<f64>) -> Self {
        let n = points.len() / 2;
        if n >= 2
            && (points[0] - points[(n - 1) * 2]).abs() <= CLIP_EPS
            && (points[1] - points[(n - 1) * 2 + 1]).abs() <= CLIP_EPS
        {
            points.truncate((n - 1) * 2);
        }
        Polygon { points }
    }

    pub fn from_vertices(vertices: &[[f64; 2]]) -> Self {
        let mut points = Vec::with_capacity(vertices.len() * 2);
        for v in vertices {
            points.push(v[0]);
            points.push(v[1]);
        }
        Polygon::new(points)
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn vertex(&self, i: usize) -> [f64; 2] {
        [self.points[i * 2], self.points[i * 2 + 1]]
    }

    pub fn signed_area(&self) -> f64 {
        let n = self.len();
        if n < 3 {
            return 0.0;
        }
        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            let xi = self.points[i * 2];
            let yi = self.points[i * 2 + 1];
            let xj = self.points[j * 2];
            let yj = self.points[j * 2 + 1];
            area += xi * yj - xj * yi;
        }
        area * 0.5
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn centroid(&self) -> [f64; 2] {
        let n = self.len();
        if n < 3 {
            return [0.0, 0.0];
        }

        let mut cx = 0.0;
        let mut cy = 0.0;
        let mut area = 0.0;

        for i in 0..n {
            let j = (i + 1) % n;
            let xi = self.points[i * 2];
            let yi = self.points[i * 2 + 1];
            let xj = self.points[j * 2];
            let yj = self.points[j * 2 + 1];

            let cross = xi * yj - xj * yi;
            area += cross;
            cx += (xi + xj) * cross;
            cy += (yi + yj) * cross;
        }

        if area.abs() < 1e-9 {
            return [0.0, 0.0];
        }

        let factor = 1.0 / (3.0 * area);
        [cx * factor, cy * factor]
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.points)
    }

    /// Ray-casting point-in-polygon test. Points on an edge may land on
    /// either side.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let n = self.len();
        let mut inside = false;
        let mut j = n.wrapping_sub(1);
        for i in 0..n {
            let xi = self.points[i * 2];
            let yi = self.points[i * 2 + 1];
            let xj = self.points[j * 2];
            let yj = self.points[j * 2 + 1];
            if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// The same ring wound counter-clockwise.
    pub fn to_ccw(mut self) -> Self {
        if self.signed_area() < 0.0 {
            let n = self.len();
            let mut reversed = Vec::with_capacity(n * 2);
            for i in (0..n).rev() {
                reversed.push(self.points[i * 2]);
                reversed.push(self.points[i * 2 + 1]);
            }
            self.points = reversed;
        }
        self
    }

    /// Check this polygon is a usable boundary ring: at least 3 vertices,
    /// no zero-length edges, no self-intersection.
    pub fn validate_ring(&self) -> Result<()> {
        let n = self.len();
        if n < 3 {
            return Err(Error::MalformedBoundary("fewer than 3 vertices"));
        }
        for i in 0..n {
            let j = (i + 1) % n;
            let a = self.vertex(i);
            let b = self.vertex(j);
            if (a[0] - b[0]).abs() <= CLIP_EPS && (a[1] - b[1]).abs() <= CLIP_EPS {
                return Err(Error::MalformedBoundary("zero-length edge"));
            }
        }
        for i in 0..n {
            for j in i + 1..n {
                // Adjacent edges share an endpoint, not an intersection.
                if j == i + 1 || (i == 0 && j == n - 1) {
                    continue;
                }
                let a = self.vertex(i);
                let b = self.vertex((i + 1) % n);
                let c = self.vertex(j);
                let d = self.vertex((j + 1) % n);
                if segments_intersect(a, b, c, d) {
                    return Err(Error::MalformedBoundary("self-intersecting ring"));
                }
            }
        }
        Ok(())
    }
}

/// Intersect a convex cell polygon with an arbitrary simple boundary
/// polygon.
///
/// The boundary ring is clipped successively against the half-plane of
/// every cell edge. Each half-plane step reconnects the surviving chains
/// through the sorted crossings on the clip line, so a concave boundary
/// can split the result into several disjoint rings. Output rings are
/// counter-clockwise and free of self-intersections; an empty result means
/// the cell lies entirely outside the boundary and is not an error.
pub fn clip_cell_to_boundary(cell: &Polygon, boundary: &Polygon) -> Result<Vec<Polygon>> {
    boundary.validate_ring()?;
    Ok(clip_validated(cell, &boundary.clone().to_ccw()))
}

/// Clipping core; `subject` must already be a validated CCW ring. Lets the
/// tessellation validate an expensive boundary once for all cells.
pub(crate) fn clip_validated(cell: &Polygon, subject: &Polygon) -> Vec<Polygon> {
    if cell.len() < 3 {
        return Vec::new();
    }

    let cell = cell.clone().to_ccw();

    let mut pieces: Vec<Vec<[f64; 2]>> =
        vec![(0..subject.len()).map(|i| subject.vertex(i)).collect()];

    for i in 0..cell.len() {
        let a = cell.vertex(i);
        let b = cell.vertex((i + 1) % cell.len());
        let mut survivors = Vec::new();
        for ring in pieces {
            survivors.extend(halfplane_split(&ring, a, b));
        }
        pieces = survivors;
        if pieces.is_empty() {
            break;
        }
    }

    pieces
        .into_iter()
        .filter(|ring| ring.len() >= 3)
        .map(|ring| Polygon::from_vertices(&ring).to_ccw())
        .filter(|p| p.area() > AREA_EPS)
        .collect()
}

/// Clip one ring against the half-plane left of the directed line a -> b,
/// splitting it into disjoint rings where the line cuts it apart.
fn halfplane_split(ring: &[[f64; 2]], a: [f64; 2], b: [f64; 2]) -> Vec<Vec<[f64; 2]>> {
    let n = ring.len();
    let line = [b[0] - a[0], b[1] - a[1]];
    let dist =
        |p: [f64; 2]| -> f64 { line[0] * (p[1] - a[1]) - line[1] * (p[0] - a[0]) };

    let dists: Vec<f64> = ring.iter().map(|&p| dist(p)).collect();
    // On-line vertices count as inside so touching cells keep shared edges.
    let inside: Vec<bool> = dists.iter().map(|&d| d >= -CLIP_EPS).collect();

    if inside.iter().all(|&k| k) {
        return vec![ring.to_vec()];
    }
    let Some(start) = inside.iter().position(|&k| !k) else {
        return vec![ring.to_vec()];
    };

    // Walk the ring from an outside vertex, collecting chains of inside
    // vertices bracketed by an entry and an exit crossing.
    let mut chains: Vec<Vec<[f64; 2]>> = Vec::new();
    let mut entries: Vec<(f64, usize)> = Vec::new(); // (t along line, chain)
    let mut exits: Vec<(f64, usize)> = Vec::new();
    let mut current: Option<Vec<[f64; 2]>> = None;
    let along = |p: [f64; 2]| (p[0] - a[0]) * line[0] + (p[1] - a[1]) * line[1];

    for k in 0..n {
        let i = (start + k) % n;
        let j = (start + k + 1) % n;

        if inside[i] {
            if let Some(chain) = current.as_mut() {
                chain.push(ring[i]);
            }
        }
        if inside[i] != inside[j] {
            let t = dists[i] / (dists[i] - dists[j]);
            let c = [
                ring[i][0] + t * (ring[j][0] - ring[i][0]),
                ring[i][1] + t * (ring[j][1] - ring[i][1]),
            ];
            if inside[j] {
                // Entering: open a chain at the crossing. The walk starts
                // outside, so chains open and close strictly alternating
                // and this chain closes as chains[chains.len()].
                entries.push((along(c), chains.len()));
                current = Some(vec![c]);
            } else if let Some(mut chain) = current.take() {
                // Leaving: close the chain at the crossing.
                chain.push(c);
                exits.push((along(c), chains.len()));
                chains.push(chain);
            }
        }
    }

    if chains.is_empty() {
        return Vec::new();
    }
    if chains.len() == 1 {
        let ring = chains.pop().expect("checked non-empty");
        return if ring.len() >= 3 { vec![ring] } else { Vec::new() };
    }

    stitch_chains(chains, entries, exits)
}

/// Reconnect clipped chains into rings. The crossings along the clip line,
/// sorted by position, pair up into intervals interior to the subject
/// polygon; each interval bridges the exit of one chain to the entry of
/// another.
fn stitch_chains(
    chains: Vec<Vec<[f64; 2]>>,
    entries: Vec<(f64, usize)>,
    exits: Vec<(f64, usize)>,
) -> Vec<Vec<[f64; 2]>> {
    #[derive(Clone, Copy)]
    struct Crossing {
        t: f64,
        chain: usize,
        is_entry: bool,
    }

    let mut crossings: Vec<Crossing> = entries
        .iter()
        .map(|&(t, chain)| Crossing { t, chain, is_entry: true })
        .chain(exits.iter().map(|&(t, chain)| Crossing { t, chain, is_entry: false }))
        .collect();
    crossings.sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal));

    // exit of chain x -> entry of chain next[x]
    let mut next = vec![usize::MAX; chains.len()];
    for pair in crossings.chunks_exact(2) {
        let (from, to) = if pair[0].is_entry {
            (pair[1].chain, pair[0].chain)
        } else {
            (pair[0].chain, pair[1].chain)
        };
        next[from] = to;
    }

    let mut rings = Vec::new();
    let mut visited = vec![false; chains.len()];
    for first in 0..chains.len() {
        if visited[first] {
            continue;
        }
        let mut ring = Vec::new();
        let mut c = first;
        loop {
            visited[c] = true;
            ring.extend_from_slice(&chains[c]);
            c = next[c];
            if c == usize::MAX || c == first {
                break;
            }
            if visited[c] {
                break;
            }
        }
        if ring.len() >= 3 {
            rings.push(ring);
        }
    }
    rings
}

fn orientation(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

/// Proper intersection test for segments ab and cd.
fn segments_intersect(a: [f64; 2], b: [f64; 2], c: [f64; 2], d: [f64; 2]) -> bool {
    let d1 = orientation(c, d, a);
    let d2 = orientation(c, d, b);
    let d3 = orientation(a, b, c);
    let d4 = orientation(a, b, d);
    (d1 * d2 < 0.0) && (d3 * d4 < 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
        Polygon::new(vec![x0, y0, x1, y0, x1, y1, x0, y1])
    }

    #[test]
    fn test_area_centroid() {
        let p = square(0.0, 0.0, 2.0, 1.0);
        assert!((p.area() - 2.0).abs() < 1e-12);
        let c = p.centroid();
        assert!((c[0] - 1.0).abs() < 1e-12 && (c[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_closed_ring_normalised() {
        let p = Polygon::new(vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0]);
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn test_contains() {
        let p = square(0.0, 0.0, 1.0, 1.0);
        assert!(p.contains(0.5, 0.5));
        assert!(!p.contains(1.5, 0.5));
    }

    #[test]
    fn test_clip_fully_inside_is_identity() {
        let cell = square(0.25, 0.25, 0.75, 0.75);
        let boundary = square(0.0, 0.0, 1.0, 1.0);
        let out = clip_cell_to_boundary(&cell, &boundary).unwrap();
        assert_eq!(out.len(), 1);
        assert!((out[0].area() - cell.area()).abs() < 1e-12);
        let c = out[0].centroid();
        assert!((c[0] - 0.5).abs() < 1e-12 && (c[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_clip_disjoint_is_empty() {
        let cell = square(2.0, 2.0, 3.0, 3.0);
        let boundary = square(0.0, 0.0, 1.0, 1.0);
        let out = clip_cell_to_boundary(&cell, &boundary).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_clip_partial_overlap() {
        let cell = square(0.5, 0.0, 1.5, 1.0);
        let boundary = square(0.0, 0.0, 1.0, 1.0);
        let out = clip_cell_to_boundary(&cell, &boundary).unwrap();
        assert_eq!(out.len(), 1);
        assert!((out[0].area() - 0.5).abs() < 1e-9);
        assert!(out[0].signed_area() > 0.0);
    }

    #[test]
    fn test_concave_boundary_splits_cell() {
        // U-shaped boundary: two vertical arms joined along the bottom.
        let boundary = Polygon::new(vec![
            0.0, 0.0, 6.0, 0.0, 6.0, 4.0, 5.0, 4.0, 5.0, 0.5, 1.0, 0.5, 1.0, 4.0, 0.0, 4.0,
        ]);
        boundary.validate_ring().unwrap();
        // A horizontal slab crossing both arms above the bottom bridge.
        let cell = square(0.0, 2.0, 6.0, 3.0);

        let out = clip_cell_to_boundary(&cell, &boundary).unwrap();
        assert_eq!(out.len(), 2, "slab across a U must split in two");
        let total: f64 = out.iter().map(|p| p.area()).sum();
        assert!((total - 2.0).abs() < 1e-9, "two 1x1 arm pieces, got {}", total);
        for p in &out {
            assert!(p.signed_area() > 0.0);
            p.validate_ring().unwrap();
        }
    }

    #[test]
    fn test_malformed_boundary_rejected() {
        let bowtie = Polygon::new(vec![0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 1.0]);
        let cell = square(0.0, 0.0, 1.0, 1.0);
        assert!(matches!(
            clip_cell_to_boundary(&cell, &bowtie),
            Err(Error::MalformedBoundary(_))
        ));

        let degenerate = Polygon::new(vec![0.0, 0.0, 1.0, 0.0]);
        assert!(clip_cell_to_boundary(&cell, &degenerate).is_err());
    }

    #[test]
    fn test_clip_preserves_winding() {
        // Clockwise boundary input still yields CCW output.
        let boundary = Polygon::new(vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0]);
        let cell = square(0.25, 0.25, 2.0, 2.0);
        let out = clip_cell_to_boundary(&cell, &boundary).unwrap();
        assert_eq!(out.len(), 1);
        assert!(out[0].signed_area() > 0.0);
    }
}
