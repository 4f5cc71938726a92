//! Error types for boundary layer generation.

use stratum_mesh::{CellKind, MeshError};
use thiserror::Error;

/// Errors that abort boundary layer generation.
///
/// Every variant is raised before any output is assembled, except
/// [`BoundaryLayerError::Mesh`] which signals an internal indexing fault.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundaryLayerError {
    /// A required array name was not configured.
    #[error("{0} array name not specified")]
    MissingArrayName(&'static str),

    /// The named point array does not exist on the input mesh.
    #[error("point array '{0}' does not exist")]
    MissingArray(String),

    /// The named point array exists but has the wrong tuple layout.
    #[error("point array '{name}' must hold {expected} tuples, found {found}")]
    WrongArrayType {
        /// Array name.
        name: String,
        /// Required layout.
        expected: &'static str,
        /// Layout actually stored.
        found: &'static str,
    },

    /// A numeric parameter is out of range.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// The input mesh has no cells.
    #[error("input mesh has no cells")]
    EmptyMesh,

    /// An input cell is not a triangle, quad or quadratic triangle.
    #[error("unsupported surface element: cell {cell} is a {kind}")]
    UnsupportedCell {
        /// Offending cell id.
        cell: usize,
        /// Its kind.
        kind: CellKind,
    },

    /// Input cells are not all of one kind.
    #[error("mixed surface elements: cell 0 is a {first}, cell {cell} is a {kind}")]
    MixedCellKinds {
        /// Kind of the first cell.
        first: CellKind,
        /// First cell that differs.
        cell: usize,
        /// Its kind.
        kind: CellKind,
    },

    /// A warp vector has zero length, so no extrusion direction exists.
    #[error("warp vector at point {point} has zero length")]
    DegenerateWarpVector {
        /// Offending point id.
        point: usize,
    },

    /// Mesh storage rejected an operation.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Result type for boundary layer operations.
pub type Result<T> = std::result::Result<T, BoundaryLayerError>;
