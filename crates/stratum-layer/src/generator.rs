//! Boundary layer generation pipeline.

use stratum_math::Point3;
use stratum_mesh::{DataArray, MeshAdjacency, UnstructuredMesh};
use tracing::info;

use crate::error::{BoundaryLayerError, Result};
use crate::extrude::{classify_cells, extrude};
use crate::params::LayerParams;
use crate::relax::SublayerRelaxer;
use crate::warp::WarpEvaluator;

/// Result of one generation run.
#[derive(Debug, Clone)]
pub struct BoundaryLayer {
    /// Layered volume mesh with the region tag cell array.
    pub mesh: UnstructuredMesh,
    /// Copy of the input moved onto the outermost layer surface.
    pub inner_surface: UnstructuredMesh,
}

/// Extrude, relax and tag a boundary layer over `input`.
///
/// Parameters, arrays and cell kinds are all checked before the first
/// point is generated. On error nothing is returned.
pub fn generate_boundary_layer(
    input: &UnstructuredMesh,
    params: &LayerParams,
) -> Result<BoundaryLayer> {
    params.validate()?;
    input.validate()?;

    let elements = classify_cells(input)?;
    let evaluator = WarpEvaluator::from_mesh(input, params)?;
    let collapsed = evaluator.check_directions()?;

    let adjacency = MeshAdjacency::build(input);

    info!(
        points = input.num_points(),
        cells = input.num_cells(),
        kind = %elements[0].kind(),
        boundary_edges = adjacency.boundary_edge_count(),
        sub_layers = params.number_of_sub_layers,
        collapsed,
        "generating boundary layer"
    );

    let mut extrusion = extrude(input, &adjacency, &elements, &evaluator, params)?;
    let layout = extrusion.layout;

    SublayerRelaxer::new(input, &adjacency, params.relaxation)
        .relax(extrusion.mesh.points_mut(), &layout);

    let outer: Vec<Point3> = {
        let points = extrusion.mesh.points();
        (0..input.num_points())
            .map(|j| points[layout.corner(layout.sub_layers(), j)])
            .collect()
    };
    let mut inner_surface = input.clone();
    inner_surface.replace_points(outer)?;
    let name = params
        .cell_entity_ids_array
        .clone()
        .ok_or(BoundaryLayerError::MissingArrayName("cell entity ids"))?;
    inner_surface.set_cell_array(
        name,
        DataArray::Int(vec![params.cell_entity_ids.inner_surface; input.num_cells()]),
    )?;

    info!(
        points = extrusion.mesh.num_points(),
        cells = extrusion.mesh.num_cells(),
        "boundary layer complete"
    );

    Ok(BoundaryLayer {
        mesh: extrusion.mesh,
        inner_surface,
    })
}

/// Stateful front end that keeps the last inner surface.
///
/// # Example
///
/// ```
/// use stratum_layer::{BoundaryLayerGenerator, LayerParams};
/// use stratum_math::{Point3, Vec3};
/// use stratum_mesh::{CellKind, DataArray, UnstructuredMesh};
///
/// let mut surface = UnstructuredMesh::with_points(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ]);
/// surface.push_cell(CellKind::Triangle, vec![0, 1, 2]).unwrap();
/// surface
///     .set_point_array("normals", DataArray::Vector(vec![Vec3::z(); 3]))
///     .unwrap();
///
/// let mut generator = BoundaryLayerGenerator::new(LayerParams {
///     warp_vectors_array: Some("normals".into()),
///     cell_entity_ids_array: Some("region".into()),
///     constant_thickness: true,
///     layer_thickness: 0.5,
///     ..Default::default()
/// });
/// let volume = generator.generate(&surface).unwrap();
/// assert_eq!(volume.num_points(), 6);
/// assert_eq!(volume.cell_kind(0), Some(CellKind::Wedge));
/// assert!(generator.inner_surface().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BoundaryLayerGenerator {
    params: LayerParams,
    inner_surface: Option<UnstructuredMesh>,
}

impl BoundaryLayerGenerator {
    /// Create a generator with `params`.
    pub fn new(params: LayerParams) -> Self {
        Self {
            params,
            inner_surface: None,
        }
    }

    /// Current parameters.
    pub fn params(&self) -> &LayerParams {
        &self.params
    }

    /// Mutable access to the parameters for the next run.
    pub fn params_mut(&mut self) -> &mut LayerParams {
        &mut self.params
    }

    /// Run generation and return the volume mesh.
    ///
    /// The inner surface of a successful run replaces the previous one. A
    /// failed run leaves none.
    pub fn generate(&mut self, input: &UnstructuredMesh) -> Result<UnstructuredMesh> {
        self.inner_surface = None;
        let layer = generate_boundary_layer(input, &self.params)?;
        self.inner_surface = Some(layer.inner_surface);
        Ok(layer.mesh)
    }

    /// Inner surface of the last successful run.
    pub fn inner_surface(&self) -> Option<&UnstructuredMesh> {
        self.inner_surface.as_ref()
    }

    /// Take ownership of the inner surface, leaving none.
    pub fn take_inner_surface(&mut self) -> Option<UnstructuredMesh> {
        self.inner_surface.take()
    }
}
