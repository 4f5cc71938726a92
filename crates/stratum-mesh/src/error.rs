//! Error types for mesh storage.

use thiserror::Error;

use crate::cell::CellKind;

/// Errors raised when building or validating a mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// Cell node count does not match its kind.
    #[error("{kind} cell needs {expected} points, got {got}")]
    CellArity {
        /// Cell kind.
        kind: CellKind,
        /// Node count required by the kind.
        expected: usize,
        /// Node count supplied.
        got: usize,
    },

    /// Polygon with fewer than three nodes.
    #[error("polygon needs at least 3 points, got {0}")]
    PolygonTooSmall(usize),

    /// Point id outside the point list.
    #[error("point index {index} out of range for {count} points")]
    PointOutOfRange {
        /// Offending id.
        index: usize,
        /// Number of points in the mesh.
        count: usize,
    },

    /// Cell id outside the cell list.
    #[error("cell index {index} out of range for {count} cells")]
    CellOutOfRange {
        /// Offending id.
        index: usize,
        /// Number of cells in the mesh.
        count: usize,
    },

    /// Attribute array length does not match the point or cell count.
    #[error("array '{name}' has {got} tuples, expected {expected}")]
    ArrayLength {
        /// Array name.
        name: String,
        /// Required tuple count.
        expected: usize,
        /// Supplied tuple count.
        got: usize,
    },
}

/// Result type for mesh operations.
pub type Result<T> = std::result::Result<T, MeshError>;
