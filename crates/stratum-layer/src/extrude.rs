//! Layer extrusion: point blocks plus volume, sidewall and cap cells.

use stratum_math::Point3;
use stratum_mesh::{Cell, DataArray, MeshAdjacency, UnstructuredMesh};
use tracing::debug;

use crate::element::SurfaceElement;
use crate::error::{BoundaryLayerError, Result};
use crate::layout::LayerLayout;
use crate::params::LayerParams;
use crate::warp::WarpEvaluator;

/// Classify every input cell, requiring one supported kind throughout.
pub fn classify_cells(input: &UnstructuredMesh) -> Result<Vec<SurfaceElement>> {
    let first = input.cell_kind(0).ok_or(BoundaryLayerError::EmptyMesh)?;
    input
        .cells()
        .iter()
        .enumerate()
        .map(|(id, cell)| {
            let element = SurfaceElement::from_cell(id, cell)?;
            if cell.kind != first {
                return Err(BoundaryLayerError::MixedCellKinds {
                    first,
                    cell: id,
                    kind: cell.kind,
                });
            }
            Ok(element)
        })
        .collect()
}

/// Output of the extruder before relaxation.
#[derive(Debug, Clone)]
pub struct Extrusion {
    /// Points, cells and the region tag cell array.
    pub mesh: UnstructuredMesh,
    /// Block numbering of `mesh`'s points.
    pub layout: LayerLayout,
}

/// Cells in emission order with their region tags.
#[derive(Default)]
struct CellSink {
    cells: Vec<Cell>,
    tags: Vec<i32>,
}

impl CellSink {
    fn emit(&mut self, cell: Cell, tag: i32) {
        self.cells.push(cell);
        self.tags.push(tag);
    }
}

/// Build the layered point set and all cells.
///
/// Emission order: inner caps (if enabled), then for each sub-layer each
/// element's volume cell followed by its sidewalls, then outer caps after
/// the last sub-layer.
pub fn extrude(
    input: &UnstructuredMesh,
    adjacency: &MeshAdjacency,
    elements: &[SurfaceElement],
    evaluator: &WarpEvaluator<'_>,
    params: &LayerParams,
) -> Result<Extrusion> {
    let sub_layers = params.number_of_sub_layers;
    let quadratic = elements
        .first()
        .is_some_and(|e| e.kind().is_quadratic());
    let layout = LayerLayout::new(input.num_points(), sub_layers, quadratic);
    let ids = &params.cell_entity_ids;

    let mut points: Vec<Point3> = Vec::with_capacity(layout.total_points());
    points.extend_from_slice(input.points());

    let mut sink = CellSink::default();

    if params.include_surface_cells {
        for element in elements {
            sink.emit(element.cap(&layout, 0), ids.inner_surface);
        }
    }

    for k in 0..sub_layers {
        points.extend(evaluator.warp_block(input.points(), k, quadratic)?);

        for (cell_id, element) in elements.iter().enumerate() {
            sink.emit(element.volume(&layout, k), ids.volume);

            if params.include_sidewall_cells {
                for edge in element.edges() {
                    let (a, b) = element.edge_points(edge);
                    if adjacency.is_boundary_edge(cell_id, a, b) {
                        sink.emit(element.sidewall(&layout, k, edge), ids.sidewall);
                    }
                }
            }
        }

        if params.include_surface_cells && k + 1 == sub_layers {
            for element in elements {
                sink.emit(element.cap(&layout, sub_layers), ids.outer_surface);
            }
        }

        debug!(
            sub_layer = k,
            points = points.len(),
            cells = sink.cells.len(),
            "extruded sub-layer"
        );
    }

    let mut mesh = UnstructuredMesh::with_points(points);
    for cell in sink.cells {
        mesh.push(cell)?;
    }
    let name = params
        .cell_entity_ids_array
        .clone()
        .ok_or(BoundaryLayerError::MissingArrayName("cell entity ids"))?;
    mesh.set_cell_array(name, DataArray::Int(sink.tags))?;

    Ok(Extrusion { mesh, layout })
}
