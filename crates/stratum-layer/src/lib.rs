#![warn(missing_docs)]

//! Boundary layer extrusion for the stratum mesher.
//!
//! Grows a stack of prismatic layers outward from a surface mesh along
//! per-point warp vectors. The pipeline has 3 stages:
//! 1. **Warp**: per-point displacement for each sub-layer, with geometric
//!    grading of the sub-layer thicknesses
//! 2. **Extrude**: point blocks, volume cells, and optional sidewall and
//!    cap cells tagged by region
//! 3. **Relax**: fixed-iteration smoothing of the extruded layer surfaces
//!
//! [`generate_boundary_layer`] runs the whole pipeline;
//! [`BoundaryLayerGenerator`] additionally keeps the last inner surface.

mod element;
mod error;
mod extrude;
mod generator;
mod layout;
mod params;
mod relax;
#[cfg(test)]
mod testing;
mod warp;

pub use element::SurfaceElement;
pub use error::{BoundaryLayerError, Result};
pub use extrude::{classify_cells, extrude, Extrusion};
pub use generator::{generate_boundary_layer, BoundaryLayer, BoundaryLayerGenerator};
pub use layout::LayerLayout;
pub use params::{
    CellEntityIds, DegenerateWarpPolicy, LayerParams, RelaxationParams, ThicknessSource,
};
pub use relax::{RelaxationStats, SublayerRelaxer};
pub use warp::{Displacement, SubLayerGrading, WarpEvaluator};
