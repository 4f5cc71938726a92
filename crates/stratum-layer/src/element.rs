//! Surface element kinds the extruder accepts, and the cells each one
//! produces.

use stratum_mesh::{Cell, CellKind};

use crate::error::{BoundaryLayerError, Result};
use crate::layout::LayerLayout;

/// A supported input surface element with its point ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceElement {
    /// Linear triangle; extrudes to wedges.
    Triangle([usize; 3]),
    /// Linear quad; extrudes to hexahedra.
    Quad([usize; 4]),
    /// Six-node triangle; extrudes to fifteen-node wedges.
    QuadraticTriangle([usize; 6]),
}

impl SurfaceElement {
    /// Classify input cell `id`.
    pub fn from_cell(id: usize, cell: &Cell) -> Result<Self> {
        let unsupported = || BoundaryLayerError::UnsupportedCell {
            cell: id,
            kind: cell.kind,
        };
        let element = match cell.kind {
            CellKind::Triangle => cell.points.as_slice().try_into().map(Self::Triangle),
            CellKind::Quad => cell.points.as_slice().try_into().map(Self::Quad),
            CellKind::QuadraticTriangle => {
                cell.points.as_slice().try_into().map(Self::QuadraticTriangle)
            }
            _ => return Err(unsupported()),
        };
        element.map_err(|_| unsupported())
    }

    /// Cell kind of the input element.
    pub fn kind(&self) -> CellKind {
        match self {
            Self::Triangle(_) => CellKind::Triangle,
            Self::Quad(_) => CellKind::Quad,
            Self::QuadraticTriangle(_) => CellKind::QuadraticTriangle,
        }
    }

    /// Input point ids.
    pub fn points(&self) -> &[usize] {
        match self {
            Self::Triangle(p) => p,
            Self::Quad(p) => p,
            Self::QuadraticTriangle(p) => p,
        }
    }

    fn corners(&self) -> &[usize] {
        match self {
            Self::QuadraticTriangle(p) => &p[..3],
            _ => self.points(),
        }
    }

    /// Copy of the element on layer surface `layer`, same kind and order.
    pub fn cap(&self, layout: &LayerLayout, layer: usize) -> Cell {
        Cell {
            kind: self.kind(),
            points: self
                .points()
                .iter()
                .map(|&p| layout.corner(layer, p))
                .collect(),
        }
    }

    /// Volume cell filling sub-layer `k`, between layer surfaces `k` and
    /// `k + 1`.
    pub fn volume(&self, layout: &LayerLayout, k: usize) -> Cell {
        let lower = |p: &usize| layout.corner(k, *p);
        let upper = |p: &usize| layout.corner(k + 1, *p);
        match self {
            Self::Triangle(p) => Cell {
                kind: CellKind::Wedge,
                points: p.iter().map(lower).chain(p.iter().map(upper)).collect(),
            },
            Self::Quad(p) => Cell {
                kind: CellKind::Hexahedron,
                points: p.iter().map(lower).chain(p.iter().map(upper)).collect(),
            },
            Self::QuadraticTriangle(p) => {
                let (corners, mids) = p.split_at(3);
                let points = corners
                    .iter()
                    .map(lower)
                    .chain(corners.iter().map(upper))
                    .chain(mids.iter().map(lower))
                    .chain(mids.iter().map(upper))
                    .chain(corners.iter().map(|&c| layout.midpoint(k + 1, c)))
                    .collect();
                Cell {
                    kind: CellKind::QuadraticWedge,
                    points,
                }
            }
        }
    }

    /// Corner-to-corner edges as local `(j, next)` indices.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> {
        let n = self.corners().len();
        (0..n).map(move |j| (j, (j + 1) % n))
    }

    /// Endpoints of local edge `(j, next)` as input point ids.
    pub fn edge_points(&self, (j, next): (usize, usize)) -> (usize, usize) {
        let corners = self.corners();
        (corners[j], corners[next])
    }

    /// Sidewall cell on local edge `(j, next)` across sub-layer `k`.
    ///
    /// Corners run edge-start and edge-end on layer `k`, then edge-end and
    /// edge-start on layer `k + 1`. The quadratic variant appends the
    /// mid-edge nodes of the bottom edge, the vertical edge at edge-end, the
    /// top edge and the vertical edge at edge-start.
    pub fn sidewall(&self, layout: &LayerLayout, k: usize, (j, next): (usize, usize)) -> Cell {
        let (a, b) = self.edge_points((j, next));
        let corners = [
            layout.corner(k, a),
            layout.corner(k, b),
            layout.corner(k + 1, b),
            layout.corner(k + 1, a),
        ];
        match self {
            Self::Triangle(_) | Self::Quad(_) => Cell {
                kind: CellKind::Quad,
                points: corners.to_vec(),
            },
            Self::QuadraticTriangle(p) => {
                let mid = p[3 + j];
                let mut points = corners.to_vec();
                points.extend([
                    layout.corner(k, mid),
                    layout.midpoint(k + 1, b),
                    layout.corner(k + 1, mid),
                    layout.midpoint(k + 1, a),
                ]);
                Cell {
                    kind: CellKind::QuadraticQuad,
                    points,
                }
            }
        }
    }
}
