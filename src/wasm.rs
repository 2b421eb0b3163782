use crate::bounds::BoundingBox;
use crate::polygon::{Polygon, clip_cell_to_boundary};
use crate::tessellation::BoundedVoronoi;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

// --- Bounding Box ---

#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct BoundingBox2D {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

#[wasm_bindgen]
impl BoundingBox2D {
    #[wasm_bindgen(constructor)]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BoundingBox2D {
        BoundingBox2D { min_x, min_y, max_x, max_y }
    }
}

impl From<BoundingBox2D> for BoundingBox {
    fn from(b: BoundingBox2D) -> Self {
        Self { min: [b.min_x, b.min_y], max: [b.max_x, b.max_y] }
    }
}

// --- Polygon Wrapper ---

#[wasm_bindgen]
pub struct Polygon2D {
    inner: Polygon,
}

#[wasm_bindgen]
impl Polygon2D {
    /// Build from a flat `[x, y, x, y, ...]` ring.
    #[wasm_bindgen(constructor)]
    pub fn new(points: &[f64]) -> Polygon2D {
        Polygon2D { inner: Polygon::new(points.to_vec()) }
    }

    #[wasm_bindgen(getter)]
    pub fn points(&self) -> Vec<f64> { self.inner.points().to_vec() }
    #[wasm_bindgen(getter)]
    pub fn count_vertices(&self) -> usize { self.inner.len() }
    pub fn area(&self) -> f64 { self.inner.area() }
    pub fn centroid(&self) -> Vec<f64> { self.inner.centroid().to_vec() }
    pub fn contains(&self, x: f64, y: f64) -> bool { self.inner.contains(x, y) }
}

// --- Bounded Voronoi ---

#[wasm_bindgen]
pub struct BoundedVoronoi2D {
    inner: BoundedVoronoi,
}

#[wasm_bindgen]
impl BoundedVoronoi2D {
    /// Build the diagram for a flat array of seed coordinates.
    #[wasm_bindgen(constructor)]
    pub fn new(seeds: &[f64], bounds: BoundingBox2D) -> BoundedVoronoi2D {
        BoundedVoronoi2D { inner: BoundedVoronoi::from_seeds(seeds.to_vec(), bounds.into()) }
    }

    /// Reconstruct all cells. Throws on a contract breach (box not
    /// containing the diagram); degenerate seeds are reported through
    /// `failed_seeds` instead.
    pub fn calculate(&mut self) -> Result<(), JsValue> {
        self.inner.calculate().map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn count_seeds(&self) -> usize { self.inner.count_seeds() }
    #[wasm_bindgen(getter)]
    pub fn count_cells(&self) -> usize { self.inner.count_cells() }

    /// Closed cell polygon of a seed, if reconstructed.
    pub fn cell(&self, seed: usize) -> Option<Polygon2D> {
        self.inner.cell(seed).map(|p| Polygon2D { inner: p.clone() })
    }

    /// Seeds whose region could not form a polygon.
    pub fn failed_seeds(&self) -> Vec<usize> {
        self.inner.failures().iter().map(|f| f.seed).collect()
    }

    /// Intersect one cell with a boundary ring; may return zero, one or
    /// several polygons.
    pub fn clip_cell(&self, seed: usize, boundary: &Polygon2D) -> Result<Vec<Polygon2D>, JsValue> {
        let Some(cell) = self.inner.cell(seed) else {
            return Ok(Vec::new());
        };
        clip_cell_to_boundary(cell, &boundary.inner)
            .map(|polys| polys.into_iter().map(|inner| Polygon2D { inner }).collect())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Intersect every cell with a boundary ring, flattened in seed order.
    pub fn clip_to_boundary(&self, boundary: &Polygon2D) -> Result<Vec<Polygon2D>, JsValue> {
        self.inner
            .clip_to_boundary(&boundary.inner)
            .map(|per_seed| {
                per_seed
                    .into_iter()
                    .flatten()
                    .map(|inner| Polygon2D { inner })
                    .collect()
            })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
