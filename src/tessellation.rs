use crate::assemble::close_regions;
use crate::bounds::BoundingBox;
use crate::diagram::VoronoiDiagram;
use crate::error::{Error, Result};
use crate::extend::extend_ridges;
use crate::hull::order_region;
use crate::polygon::{Polygon, clip_validated};
use log::{debug, info};
use rayon::prelude::*;

/// A region that could not be reconstructed, kept alongside the cells that
/// could. Partial success is a valid outcome; the caller decides whether
/// to skip or fail.
#[derive(Debug, Clone)]
pub struct CellFailure {
    pub seed: usize,
    pub error: Error,
}

/// Bounded Voronoi tessellation: turns raw diagram topology into one
/// closed convex polygon per seed, clipped to the enclosing box.
///
/// The raw diagram is immutable input. `calculate` builds the augmented
/// vertex table sequentially (ridge extension, region closing, corner
/// assignment), then orders every region in parallel. Results are indexed
/// by seed; seeds whose region degenerated are listed in `failures()`
/// instead.
pub struct BoundedVoronoi {
    pub bounds: BoundingBox,
    diagram: VoronoiDiagram,
    vertices: Vec<f64>,
    cells: Vec<Option<Polygon>>,
    failures: Vec<CellFailure>,
}

impl BoundedVoronoi {
    pub fn new(diagram: VoronoiDiagram, bounds: BoundingBox) -> Self {
        Self {
            bounds,
            diagram,
            vertices: Vec::new(),
            cells: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Build the raw topology from seed coordinates and wrap it.
    pub fn from_seeds(seeds: Vec<f64>, bounds: BoundingBox) -> Self {
        Self::new(VoronoiDiagram::from_seeds(seeds), bounds)
    }

    /// Smallest box containing every seed and every finite vertex of the
    /// diagram, grown by `pad`. Convenient when no external boundary
    /// dictates the box.
    pub fn fit_bounds(diagram: &VoronoiDiagram, pad: f64) -> BoundingBox {
        let mut bounds = BoundingBox::from_points(&diagram.points);
        for v in diagram.vertices.chunks_exact(2) {
            bounds.expand(v[0], v[1]);
        }
        bounds.padded(pad)
    }

    pub fn diagram(&self) -> &VoronoiDiagram {
        &self.diagram
    }

    /// Reconstruct all cells.
    ///
    /// Fails only on contract breaches (ray clipping cannot reach the box
    /// boundary); degenerate regions are collected per seed and do not
    /// abort the pass.
    pub fn calculate(&mut self) -> Result<()> {
        let mut extended = extend_ridges(&self.diagram, &self.bounds)?;
        let regions = close_regions(&self.diagram, &mut extended, &self.bounds);
        let vertices = extended.vertices;

        let diagram = &self.diagram;
        let count = diagram.count_seeds();
        let ordered: Vec<(usize, Result<Polygon>)> = (0..count)
            .into_par_iter()
            .map(|seed| {
                let region = &regions[diagram.point_region[seed]];
                (seed, order_region(region, &vertices, seed))
            })
            .collect();

        self.cells = vec![None; count];
        self.failures.clear();
        for (seed, result) in ordered {
            match result {
                Ok(polygon) => self.cells[seed] = Some(polygon),
                Err(error) => {
                    debug!("seed {}: {}", seed, error);
                    self.failures.push(CellFailure { seed, error });
                }
            }
        }
        self.vertices = vertices;

        info!(
            "reconstructed {} of {} cells ({} degenerate)",
            self.count_cells(),
            count,
            self.failures.len()
        );
        Ok(())
    }

    /// Reconstructed cell of a seed, if any. `None` before `calculate` or
    /// for a degenerate region.
    pub fn cell(&self, seed: usize) -> Option<&Polygon> {
        self.cells.get(seed).and_then(|c| c.as_ref())
    }

    /// All cells, indexed by seed.
    pub fn cells(&self) -> &[Option<Polygon>] {
        &self.cells
    }

    pub fn failures(&self) -> &[CellFailure] {
        &self.failures
    }

    pub fn count_seeds(&self) -> usize {
        self.diagram.count_seeds()
    }

    /// Number of successfully reconstructed cells.
    pub fn count_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Augmented vertex table (raw vertices, clipped ray endpoints, box
    /// corners), valid after `calculate`.
    pub fn vertices(&self) -> &[f64] {
        &self.vertices
    }

    /// Intersect every cell with an arbitrary simple boundary polygon.
    ///
    /// Returns, per seed, zero or more polygons: empty when the cell lies
    /// outside the boundary (not an error), several when a concave
    /// boundary cuts the cell apart. The boundary is validated once; a
    /// malformed ring aborts the clip for this boundary only.
    pub fn clip_to_boundary(&self, boundary: &Polygon) -> Result<Vec<Vec<Polygon>>> {
        boundary.validate_ring()?;
        let subject = boundary.clone().to_ccw();

        let clipped: Vec<Vec<Polygon>> = self
            .cells
            .par_iter()
            .map(|cell| match cell {
                Some(polygon) => clip_validated(polygon, &subject),
                None => Vec::new(),
            })
            .collect();

        debug!(
            "boundary clip: {} of {} cells intersect",
            clipped.iter().filter(|c| !c.is_empty()).count(),
            self.cells.len()
        );
        Ok(clipped)
    }
}
