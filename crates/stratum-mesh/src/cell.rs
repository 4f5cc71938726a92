//! Cell kinds and cell connectivity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MeshError;

/// Element kinds understood by the mesh store.
///
/// Node ordering follows the usual unstructured-grid layout: quadratic kinds
/// list their corner nodes first, then one mid-edge node per edge in edge
/// order. The quadratic wedge lists bottom corners, top corners, bottom
/// mid-edge nodes, top mid-edge nodes and finally the three vertical mid-edge
/// nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Single point.
    Vertex,
    /// Two-node segment.
    Line,
    /// Three-node triangle.
    Triangle,
    /// Four-node quadrilateral.
    Quad,
    /// Polygon with three or more nodes.
    Polygon,
    /// Six-node triangle (3 corners + 3 mid-edge nodes).
    QuadraticTriangle,
    /// Eight-node quadrilateral (4 corners + 4 mid-edge nodes).
    QuadraticQuad,
    /// Four-node tetrahedron.
    Tetra,
    /// Six-node triangular prism.
    Wedge,
    /// Eight-node hexahedron.
    Hexahedron,
    /// Fifteen-node triangular prism.
    QuadraticWedge,
}

impl CellKind {
    /// Exact node count, or `None` for variable-size kinds.
    pub fn point_count(self) -> Option<usize> {
        match self {
            Self::Vertex => Some(1),
            Self::Line => Some(2),
            Self::Triangle => Some(3),
            Self::Quad => Some(4),
            Self::Polygon => None,
            Self::QuadraticTriangle => Some(6),
            Self::QuadraticQuad => Some(8),
            Self::Tetra => Some(4),
            Self::Wedge => Some(6),
            Self::Hexahedron => Some(8),
            Self::QuadraticWedge => Some(15),
        }
    }

    /// Whether the kind carries mid-edge nodes.
    pub fn is_quadratic(self) -> bool {
        matches!(
            self,
            Self::QuadraticTriangle | Self::QuadraticQuad | Self::QuadraticWedge
        )
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Vertex => "vertex",
            Self::Line => "line",
            Self::Triangle => "triangle",
            Self::Quad => "quad",
            Self::Polygon => "polygon",
            Self::QuadraticTriangle => "quadratic triangle",
            Self::QuadraticQuad => "quadratic quad",
            Self::Tetra => "tetra",
            Self::Wedge => "wedge",
            Self::Hexahedron => "hexahedron",
            Self::QuadraticWedge => "quadratic wedge",
        };
        f.write_str(name)
    }
}

/// One edge of a 1D or 2D cell, in mesh point ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellEdge {
    /// First corner.
    pub start: usize,
    /// Second corner.
    pub end: usize,
    /// Mid-edge node for quadratic kinds.
    pub mid: Option<usize>,
}

impl CellEdge {
    /// Whether `p` is one of the nodes on this edge.
    pub fn contains(&self, p: usize) -> bool {
        self.start == p || self.end == p || self.mid == Some(p)
    }
}

/// A cell: kind plus ordered point ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Element kind.
    pub kind: CellKind,
    /// Point ids in the node ordering of `kind`.
    pub points: Vec<usize>,
}

impl Cell {
    /// Create a cell, checking the node count against the kind.
    pub fn new(kind: CellKind, points: Vec<usize>) -> Result<Self, MeshError> {
        let cell = Self { kind, points };
        cell.check_arity()?;
        Ok(cell)
    }

    pub(crate) fn check_arity(&self) -> Result<(), MeshError> {
        let got = self.points.len();
        match self.kind.point_count() {
            Some(expected) if expected != got => Err(MeshError::CellArity {
                kind: self.kind,
                expected,
                got,
            }),
            None if got < 3 => Err(MeshError::PolygonTooSmall(got)),
            _ => Ok(()),
        }
    }

    /// Edges of a 1D or 2D cell. Empty for vertices and 3D kinds.
    ///
    /// Quadratic kinds report corner-to-corner edges with their mid-edge
    /// node attached.
    pub fn edges(&self) -> Vec<CellEdge> {
        let pts = &self.points;
        let ring = |corners: usize, mids: Option<usize>| -> Vec<CellEdge> {
            (0..corners)
                .map(|j| CellEdge {
                    start: pts[j],
                    end: pts[(j + 1) % corners],
                    mid: mids.map(|offset| pts[offset + j]),
                })
                .collect()
        };
        match self.kind {
            CellKind::Line => vec![CellEdge {
                start: pts[0],
                end: pts[1],
                mid: None,
            }],
            CellKind::Triangle | CellKind::Quad | CellKind::Polygon => ring(pts.len(), None),
            CellKind::QuadraticTriangle => ring(3, Some(3)),
            CellKind::QuadraticQuad => ring(4, Some(4)),
            _ => Vec::new(),
        }
    }

    /// Whether points `a` and `b` lie on a common edge of this cell.
    pub fn shares_edge(&self, a: usize, b: usize) -> bool {
        a != b
            && self
                .edges()
                .iter()
                .any(|edge| edge.contains(a) && edge.contains(b))
    }
}
