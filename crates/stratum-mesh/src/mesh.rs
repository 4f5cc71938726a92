//! Unstructured mesh: points, typed cells and attribute arrays.

use serde::{Deserialize, Serialize};
use stratum_math::Point3;

use crate::cell::{Cell, CellKind};
use crate::data::{DataArray, FieldData};
use crate::error::{MeshError, Result};

/// A mesh of arbitrary cell kinds sharing one point list.
///
/// Used both for surface input (triangles, quads, quadratic triangles) and
/// for the volumetric boundary layer output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnstructuredMesh {
    points: Vec<Point3>,
    cells: Vec<Cell>,
    point_data: FieldData,
    cell_data: FieldData,
}

impl UnstructuredMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with the given points and no cells.
    pub fn with_points(points: Vec<Point3>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    /// Number of points.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Number of cells.
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// All point coordinates.
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Mutable access to point coordinates. The point count is fixed.
    pub fn points_mut(&mut self) -> &mut [Point3] {
        &mut self.points
    }

    /// Coordinates of point `id`.
    pub fn point(&self, id: usize) -> Option<&Point3> {
        self.points.get(id)
    }

    /// Overwrite the coordinates of point `id`.
    pub fn set_point(&mut self, id: usize, p: Point3) -> Result<()> {
        let count = self.points.len();
        let slot = self
            .points
            .get_mut(id)
            .ok_or(MeshError::PointOutOfRange { index: id, count })?;
        *slot = p;
        Ok(())
    }

    /// Replace every point coordinate at once, keeping the count.
    pub fn replace_points(&mut self, points: Vec<Point3>) -> Result<()> {
        if points.len() != self.points.len() {
            return Err(MeshError::ArrayLength {
                name: "points".into(),
                expected: self.points.len(),
                got: points.len(),
            });
        }
        self.points = points;
        Ok(())
    }

    /// Append a point, returning its id.
    pub fn push_point(&mut self, p: Point3) -> usize {
        self.points.push(p);
        self.points.len() - 1
    }

    /// All cells.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell `id`.
    pub fn cell(&self, id: usize) -> Option<&Cell> {
        self.cells.get(id)
    }

    /// Kind of cell `id`.
    pub fn cell_kind(&self, id: usize) -> Option<CellKind> {
        self.cells.get(id).map(|c| c.kind)
    }

    /// Append a cell after checking its arity and point ids.
    pub fn push_cell(&mut self, kind: CellKind, points: Vec<usize>) -> Result<usize> {
        let cell = Cell::new(kind, points)?;
        self.check_point_ids(&cell)?;
        self.cells.push(cell);
        Ok(self.cells.len() - 1)
    }

    /// Append an already-built cell after checking its point ids.
    pub fn push(&mut self, cell: Cell) -> Result<usize> {
        cell.check_arity()?;
        self.check_point_ids(&cell)?;
        self.cells.push(cell);
        Ok(self.cells.len() - 1)
    }

    /// Point attribute arrays.
    pub fn point_data(&self) -> &FieldData {
        &self.point_data
    }

    /// Cell attribute arrays.
    pub fn cell_data(&self) -> &FieldData {
        &self.cell_data
    }

    /// Attach a point array. Its length must equal the point count.
    ///
    /// Replaces and returns any array already stored under `name`.
    pub fn set_point_array(
        &mut self,
        name: impl Into<String>,
        array: DataArray,
    ) -> Result<Option<DataArray>> {
        let name = name.into();
        check_len(&name, &array, self.points.len())?;
        Ok(self.point_data.insert(name, array))
    }

    /// Attach a cell array. Its length must equal the cell count.
    ///
    /// Replaces and returns any array already stored under `name`.
    pub fn set_cell_array(
        &mut self,
        name: impl Into<String>,
        array: DataArray,
    ) -> Result<Option<DataArray>> {
        let name = name.into();
        check_len(&name, &array, self.cells.len())?;
        Ok(self.cell_data.insert(name, array))
    }

    /// Check cell arity, point ids and attribute lengths.
    ///
    /// Meshes assembled through `push_cell` and `set_*_array` are always
    /// valid; this is for meshes that arrive through deserialization.
    pub fn validate(&self) -> Result<()> {
        for cell in &self.cells {
            cell.check_arity()?;
            self.check_point_ids(cell)?;
        }
        for (name, array) in self.point_data.iter() {
            check_len(name, array, self.points.len())?;
        }
        for (name, array) in self.cell_data.iter() {
            check_len(name, array, self.cells.len())?;
        }
        Ok(())
    }

    fn check_point_ids(&self, cell: &Cell) -> Result<()> {
        let count = self.points.len();
        match cell.points.iter().find(|&&p| p >= count) {
            Some(&index) => Err(MeshError::PointOutOfRange { index, count }),
            None => Ok(()),
        }
    }
}

fn check_len(name: &str, array: &DataArray, expected: usize) -> Result<()> {
    if array.len() == expected {
        Ok(())
    } else {
        Err(MeshError::ArrayLength {
            name: name.to_string(),
            expected,
            got: array.len(),
        })
    }
}
