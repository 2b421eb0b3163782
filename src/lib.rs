//! # voroclip
//!
//! `voroclip` is a Rust library for bounded 2D Voronoi tessellations, designed to be used
//! in Rust as well as compiled to WebAssembly (WASM). It reconstructs the unbounded cells
//! of a raw Voronoi diagram into closed convex polygons clipped to an enclosing box, and
//! intersects them with arbitrary boundary polygons (e.g. an administrative region).
//!
//! ## Features
//!
//! - **Ridge extension**: Unbounded ridges are clipped against the enclosing box, turning
//!   every hull cell into a finite polygon; the box corners are assigned to the nearest
//!   seed's cell so the cells tile the box exactly.
//! - **Boundary clipping**: Cells can be intersected with a simple (possibly concave)
//!   boundary polygon, yielding zero, one or several polygons per cell.
//! - **Raw topology in, polygons out**: The diagram topology can be computed from seed
//!   coordinates (via Delaunay triangulation) or supplied by hand.
//! - **WASM-first**: Built with `wasm-bindgen` for seamless integration with JavaScript
//!   and TypeScript.
//!
//! ## Main Interface
//!
//! The primary entry point is the [`BoundedVoronoi`] struct, which owns the diagram and
//! the per-seed cell polygons.

mod assemble;
mod bounds;
mod diagram;
mod error;
mod extend;
mod hull;
mod kdtree;
mod polygon;
mod ray;
mod tessellation;
mod wasm;

pub use assemble::close_regions;
pub use bounds::BoundingBox;
pub use diagram::Ridge;
pub use diagram::RidgeVertex;
pub use diagram::VoronoiDiagram;
pub use error::Error;
pub use error::Result;
pub use extend::ExtendedRidges;
pub use extend::extend_ridges;
pub use hull::order_region;
pub use kdtree::KdTree;
pub use polygon::Polygon;
pub use polygon::clip_cell_to_boundary;
pub use ray::ray_box_crossing;
pub use tessellation::BoundedVoronoi;
pub use tessellation::CellFailure;
