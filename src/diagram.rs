use delaunator::{EMPTY, Point, triangulate};
use log::debug;

/// One endpoint slot of a ridge. The raw diagram marks "extends to
/// infinity" with a tagged variant instead of a -1 sentinel index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RidgeVertex {
    /// Index into the diagram's vertex table.
    Finite(usize),
    /// The ridge continues to infinity in this direction.
    Unbounded,
}

impl RidgeVertex {
    pub fn is_unbounded(&self) -> bool {
        matches!(self, RidgeVertex::Unbounded)
    }

    pub fn finite(&self) -> Option<usize> {
        match self {
            RidgeVertex::Finite(i) => Some(*i),
            RidgeVertex::Unbounded => None,
        }
    }
}

/// An edge of the Voronoi diagram: the pair of vertices it spans and the
/// pair of seeds it separates.
#[derive(Clone, Debug)]
pub struct Ridge {
    pub vertices: [RidgeVertex; 2],
    pub seeds: [usize; 2],
}

impl Ridge {
    pub fn is_unbounded(&self) -> bool {
        self.vertices[0].is_unbounded() || self.vertices[1].is_unbounded()
    }
}

/// Raw Voronoi diagram topology, the input to the reconstruction pipeline.
///
/// Coordinates are flat `[x, y, x, y, ...]` arrays. `regions[r]` is the
/// unordered vertex set of region `r`; `point_region[s]` maps seed `s` to
/// its region. A region containing [`RidgeVertex::Unbounded`] is open and
/// must be closed by the pipeline before use.
///
/// The tables can come from [`VoronoiDiagram::from_seeds`] or be built by
/// hand; the pipeline never mutates them in place.
#[derive(Clone, Debug)]
pub struct VoronoiDiagram {
    /// Seed coordinates.
    pub points: Vec<f64>,
    /// Finite Voronoi vertex coordinates.
    pub vertices: Vec<f64>,
    /// Ridge table.
    pub ridges: Vec<Ridge>,
    /// Seed index -> region index.
    pub point_region: Vec<usize>,
    /// Unordered vertex sets per region.
    pub regions: Vec<Vec<RidgeVertex>>,
}

impl VoronoiDiagram {
    pub fn new(
        points: Vec<f64>,
        vertices: Vec<f64>,
        ridges: Vec<Ridge>,
        point_region: Vec<usize>,
        regions: Vec<Vec<RidgeVertex>>,
    ) -> Self {
        Self {
            points,
            vertices,
            ridges,
            point_region,
            regions,
        }
    }

    /// Compute the diagram topology for a flat array of seed coordinates.
    ///
    /// Voronoi vertices are the circumcenters of the Delaunay triangles;
    /// every Delaunay edge contributes one ridge, with hull edges leaving
    /// one endpoint [`RidgeVertex::Unbounded`]. Fewer than 3 non-collinear
    /// seeds yield a triangle-free topology: a single seed still
    /// reconstructs to the full box, other degenerate inputs surface as
    /// degenerate regions downstream.
    pub fn from_seeds(points: Vec<f64>) -> Self {
        let count = points.len() / 2;
        let sites: Vec<Point> = points
            .chunks_exact(2)
            .map(|p| Point { x: p[0], y: p[1] })
            .collect();
        let tri = triangulate(&sites);
        let num_triangles = tri.triangles.len() / 3;
        debug!("triangulated {} seeds into {} triangles", count, num_triangles);

        let mut vertices = Vec::with_capacity(num_triangles * 2);
        for t in 0..num_triangles {
            let c = circumcenter(
                &sites[tri.triangles[3 * t]],
                &sites[tri.triangles[3 * t + 1]],
                &sites[tri.triangles[3 * t + 2]],
            );
            vertices.push(c[0]);
            vertices.push(c[1]);
        }

        // One ridge per Delaunay edge. Interior edges appear as two paired
        // halfedges; keep the lower-indexed one.
        let mut ridges = Vec::new();
        let mut regions: Vec<Vec<RidgeVertex>> = vec![Vec::new(); count];
        for e in 0..tri.triangles.len() {
            let opposite = tri.halfedges[e];
            if opposite != EMPTY && opposite < e {
                continue;
            }
            let seeds = [tri.triangles[e], tri.triangles[next_halfedge(e)]];
            let far = if opposite == EMPTY {
                RidgeVertex::Unbounded
            } else {
                RidgeVertex::Finite(opposite / 3)
            };
            ridges.push(Ridge {
                vertices: [RidgeVertex::Finite(e / 3), far],
                seeds,
            });
            if opposite == EMPTY {
                // Both endpoints of a hull edge own an open region.
                for s in seeds {
                    if !regions[s].contains(&RidgeVertex::Unbounded) {
                        regions[s].push(RidgeVertex::Unbounded);
                    }
                }
            }
        }

        // Each seed's region collects the circumcenters of its incident
        // triangles; ordering happens later in the pipeline.
        for t in 0..num_triangles {
            for k in 0..3 {
                regions[tri.triangles[3 * t + k]].push(RidgeVertex::Finite(t));
            }
        }

        let point_region = (0..count).collect();
        Self {
            points,
            vertices,
            ridges,
            point_region,
            regions,
        }
    }

    pub fn count_seeds(&self) -> usize {
        self.points.len() / 2
    }

    pub fn seed(&self, i: usize) -> [f64; 2] {
        [self.points[i * 2], self.points[i * 2 + 1]]
    }

    pub fn vertex(&self, i: usize) -> [f64; 2] {
        [self.vertices[i * 2], self.vertices[i * 2 + 1]]
    }

    /// Mean of all seed coordinates, the orientation reference for ridge
    /// extension.
    pub fn centroid(&self) -> [f64; 2] {
        let count = self.count_seeds();
        if count == 0 {
            return [0.0, 0.0];
        }
        let mut cx = 0.0;
        let mut cy = 0.0;
        for p in self.points.chunks_exact(2) {
            cx += p[0];
            cy += p[1];
        }
        [cx / count as f64, cy / count as f64]
    }
}

fn next_halfedge(e: usize) -> usize {
    if e % 3 == 2 { e - 2 } else { e + 1 }
}

fn circumcenter(a: &Point, b: &Point, c: &Point) -> [f64; 2] {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let ex = c.x - a.x;
    let ey = c.y - a.y;
    let bl = dx * dx + dy * dy;
    let cl = ex * ex + ey * ey;
    let d = 0.5 / (dx * ey - dy * ex);
    [a.x + (ey * bl - dy * cl) * d, a.y + (dx * cl - ex * bl) * d]
}
