//! Point-to-cell and edge-to-cell lookups.

use hashbrown::HashMap;

use crate::mesh::UnstructuredMesh;

/// Adjacency information for a mesh.
///
/// Built once from a mesh whose connectivity no longer changes. Provides:
/// - cells incident to a point
/// - cells other than a given one that use a given set of points
/// - boundary edges (edges used by exactly one cell)
#[derive(Debug, Clone)]
pub struct MeshAdjacency {
    point_cells: Vec<Vec<usize>>,
    /// Maps corner pair (a, b), a < b, to the cells using that edge.
    edge_cells: HashMap<(usize, usize), Vec<usize>>,
}

impl MeshAdjacency {
    /// Build adjacency for `mesh`.
    pub fn build(mesh: &UnstructuredMesh) -> Self {
        let mut point_cells = vec![Vec::new(); mesh.num_points()];
        let mut edge_cells: HashMap<(usize, usize), Vec<usize>> = HashMap::new();

        for (cell_id, cell) in mesh.cells().iter().enumerate() {
            for &p in &cell.points {
                let cells: &mut Vec<usize> = &mut point_cells[p];
                // Degenerate cells may repeat a point.
                if cells.last() != Some(&cell_id) {
                    cells.push(cell_id);
                }
            }
            for edge in cell.edges() {
                edge_cells
                    .entry(normalize_edge(edge.start, edge.end))
                    .or_default()
                    .push(cell_id);
            }
        }

        Self {
            point_cells,
            edge_cells,
        }
    }

    /// Cells that use point `p`, in ascending id order.
    ///
    /// Returns an empty slice for points outside the mesh.
    pub fn cells_for_point(&self, p: usize) -> &[usize] {
        self.point_cells.get(p).map_or(&[], Vec::as_slice)
    }

    /// Cells other than `cell` that use every point in `points`.
    pub fn cell_neighbors(&self, cell: usize, points: &[usize]) -> Vec<usize> {
        let Some((&first, rest)) = points.split_first() else {
            return Vec::new();
        };
        self.cells_for_point(first)
            .iter()
            .copied()
            .filter(|&c| c != cell)
            .filter(|&c| rest.iter().all(|&p| self.cells_for_point(p).contains(&c)))
            .collect()
    }

    /// Whether no cell other than `cell` uses both `a` and `b`.
    pub fn is_boundary_edge(&self, cell: usize, a: usize, b: usize) -> bool {
        self.cell_neighbors(cell, &[a, b]).is_empty()
    }

    /// Number of boundary edges.
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_cells
            .values()
            .filter(|cells| cells.len() == 1)
            .count()
    }
}

#[inline]
fn normalize_edge(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
