//! Small surface meshes shared by the unit tests.

use stratum_math::{Point3, Vec3};
use stratum_mesh::{CellKind, DataArray, UnstructuredMesh};

use crate::params::LayerParams;

pub const WARP: &str = "warp";
pub const THICKNESS: &str = "thickness";
pub const ENTITY_IDS: &str = "entity_ids";

/// Params naming the fixture arrays, constant thickness, distinct region tags.
pub fn params(sub_layers: usize, thickness: f64) -> LayerParams {
    let mut p = LayerParams {
        warp_vectors_array: Some(WARP.into()),
        layer_thickness_array: Some(THICKNESS.into()),
        cell_entity_ids_array: Some(ENTITY_IDS.into()),
        constant_thickness: true,
        layer_thickness: thickness,
        number_of_sub_layers: sub_layers,
        ..Default::default()
    };
    p.cell_entity_ids.inner_surface = 1;
    p.cell_entity_ids.outer_surface = 2;
    p.cell_entity_ids.sidewall = 3;
    p.cell_entity_ids.volume = 4;
    p
}

/// Attach `warp` at every point and a unit thickness array.
pub fn with_fields(mut mesh: UnstructuredMesh, warp: Vec3) -> UnstructuredMesh {
    let n = mesh.num_points();
    mesh.set_point_array(WARP, DataArray::Vector(vec![warp; n])).unwrap();
    mesh.set_point_array(THICKNESS, DataArray::Scalar(vec![1.0; n])).unwrap();
    mesh
}

/// One triangle in the XY plane, warp +Z.
pub fn single_triangle() -> UnstructuredMesh {
    let mut mesh = UnstructuredMesh::with_points(vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ]);
    mesh.push_cell(CellKind::Triangle, vec![0, 1, 2]).unwrap();
    with_fields(mesh, Vec3::z())
}

/// `nx` by `ny` squares in the XY plane, each split into two triangles,
/// warp +Z. Boundary edge count is `2 * (nx + ny)`.
pub fn flat_grid(nx: usize, ny: usize) -> UnstructuredMesh {
    let id = |i: usize, j: usize| j * (nx + 1) + i;
    let mut mesh = UnstructuredMesh::new();
    for j in 0..=ny {
        for i in 0..=nx {
            mesh.push_point(Point3::new(i as f64, j as f64, 0.0));
        }
    }
    for j in 0..ny {
        for i in 0..nx {
            let (a, b, c, d) = (id(i, j), id(i + 1, j), id(i + 1, j + 1), id(i, j + 1));
            mesh.push_cell(CellKind::Triangle, vec![a, b, c]).unwrap();
            mesh.push_cell(CellKind::Triangle, vec![a, c, d]).unwrap();
        }
    }
    with_fields(mesh, Vec3::z())
}

/// `n` unit quads in a row along X, warp +Z. Boundary edge count is
/// `2 * n + 2`.
pub fn quad_strip(n: usize) -> UnstructuredMesh {
    let mut mesh = UnstructuredMesh::new();
    for i in 0..=n {
        mesh.push_point(Point3::new(i as f64, 0.0, 0.0));
        mesh.push_point(Point3::new(i as f64, 1.0, 0.0));
    }
    for i in 0..n {
        let (a, b) = (2 * i, 2 * i + 1);
        mesh.push_cell(CellKind::Quad, vec![a, a + 2, b + 2, b]).unwrap();
    }
    with_fields(mesh, Vec3::z())
}

/// Closed tetrahedron surface with outward unit warp vectors.
pub fn tetrahedron_surface() -> UnstructuredMesh {
    let points = vec![
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(1.0, -1.0, -1.0),
        Point3::new(-1.0, 1.0, -1.0),
        Point3::new(-1.0, -1.0, 1.0),
    ];
    let warp: Vec<Vec3> = points.iter().map(|p| p.coords.normalize()).collect();
    let mut mesh = UnstructuredMesh::with_points(points);
    for tri in [[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]] {
        mesh.push_cell(CellKind::Triangle, tri.to_vec()).unwrap();
    }
    mesh.set_point_array(WARP, DataArray::Vector(warp)).unwrap();
    mesh
}

/// Two six-node triangles sharing the edge (1, 2), warp +Z.
///
/// Corners 0..4, mid-edge nodes 4..9. Four open corner edges.
pub fn quadratic_pair() -> UnstructuredMesh {
    let corners = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
        Point3::new(0.0, 2.0, 0.0),
        Point3::new(2.0, 2.0, 0.0),
    ];
    let mid = |a: usize, b: usize| Point3::from((corners[a].coords + corners[b].coords) * 0.5);
    let mut mesh = UnstructuredMesh::with_points(corners.to_vec());
    let m01 = mesh.push_point(mid(0, 1));
    let m12 = mesh.push_point(mid(1, 2));
    let m20 = mesh.push_point(mid(2, 0));
    let m13 = mesh.push_point(mid(1, 3));
    let m32 = mesh.push_point(mid(3, 2));
    mesh.push_cell(CellKind::QuadraticTriangle, vec![0, 1, 2, m01, m12, m20]).unwrap();
    mesh.push_cell(CellKind::QuadraticTriangle, vec![1, 3, 2, m13, m32, m12]).unwrap();
    with_fields(mesh, Vec3::z())
}
