#![warn(missing_docs)]

//! Unstructured mesh storage for the stratum boundary layer mesher.
//!
//! Provides the services the layer generator relies on:
//! - point coordinates, read and write by index
//! - typed cell connectivity ([`CellKind`], [`Cell`])
//! - named point and cell attribute arrays ([`DataArray`], [`FieldData`])
//! - adjacency queries ([`MeshAdjacency`]): cells incident to a point and
//!   cells sharing an edge with a given cell

mod adjacency;
mod cell;
mod data;
mod error;
mod mesh;

pub use adjacency::MeshAdjacency;
pub use cell::{Cell, CellEdge, CellKind};
pub use data::{DataArray, FieldData};
pub use error::{MeshError, Result};
pub use mesh::UnstructuredMesh;
