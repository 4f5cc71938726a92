//! Sub-layer relaxation.
//!
//! Straight warping across curved or irregular surfaces leaves extruded
//! layers wrinkled. Each sweep nudges every extruded point toward the
//! barycenter of its neighbors on the same layer surface, then pulls it back
//! to the nominal distance from its counterpart one layer down.
//!
//! Updates are written in place while sweeping (Gauss-Seidel order: layer
//! 1 to N, then point id ascending), so later points in a sweep see the
//! already-moved positions of earlier ones.
//!
//! The nominal spacing between a point and its counterpart one layer down is
//! taken once, from the positions handed to [`SublayerRelaxer::relax`], and
//! held for every sweep. It does not follow a lower layer that moves.

use stratum_math::{barycenter, lerp, Point3, Tolerance, Vec3};
use stratum_mesh::{MeshAdjacency, UnstructuredMesh};
use tracing::debug;

use crate::layout::LayerLayout;
use crate::params::RelaxationParams;

/// Same-layer neighbors of one input point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Neighborhood {
    /// Other points of every incident cell, first-seen order, no repeats.
    neighbors: Vec<usize>,
    /// Neighbors joined to this point by an edge no other cell uses.
    on_edge: Vec<usize>,
}

impl Neighborhood {
    fn is_frozen(&self) -> bool {
        self.on_edge.len() >= 2
    }
}

/// Summary of one relaxation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelaxationStats {
    /// Sweeps performed.
    pub iterations: usize,
    /// Input points left fixed because they sit on the mesh boundary.
    pub frozen_points: usize,
    /// Input points without any neighbor.
    pub isolated_points: usize,
}

/// Relaxes the extruded layer surfaces of one input mesh.
#[derive(Debug, Clone)]
pub struct SublayerRelaxer {
    params: RelaxationParams,
    neighborhoods: Vec<Neighborhood>,
    tolerance: Tolerance,
}

impl SublayerRelaxer {
    /// Precompute neighborhoods from the input surface topology.
    pub fn new(
        input: &UnstructuredMesh,
        adjacency: &MeshAdjacency,
        params: RelaxationParams,
    ) -> Self {
        let neighborhoods = (0..input.num_points())
            .map(|j| neighborhood(input, adjacency, j))
            .collect();
        Self {
            params,
            neighborhoods,
            tolerance: Tolerance::DEFAULT,
        }
    }

    /// Relax `points` in place. Block 0 (the input surface) never moves.
    pub fn relax(&self, points: &mut [Point3], layout: &LayerLayout) -> RelaxationStats {
        let n = layout.base_points();
        let sub_layers = layout.sub_layers();

        let nominal: Vec<f64> = (1..=sub_layers)
            .flat_map(|i| (0..n).map(move |j| (i, j)))
            .map(|(i, j)| {
                (points[layout.corner(i, j)] - points[layout.corner(i - 1, j)]).norm()
            })
            .collect();

        let stats = RelaxationStats {
            iterations: self.params.iterations,
            frozen_points: self.neighborhoods.iter().filter(|h| h.is_frozen()).count(),
            isolated_points: self
                .neighborhoods
                .iter()
                .filter(|h| h.neighbors.is_empty())
                .count(),
        };

        for _ in 0..self.params.iterations {
            for i in 1..=sub_layers {
                for (j, hood) in self.neighborhoods.iter().enumerate() {
                    if hood.is_frozen() {
                        continue;
                    }
                    let target = nominal[(i - 1) * n + j];
                    if let Some(p) = self.relax_point(points, layout, i, j, hood, target) {
                        points[layout.corner(i, j)] = p;
                    }
                }
            }
        }

        if layout.is_quadratic() {
            reinterpolate_midpoints(points, layout);
        }

        debug!(
            iterations = stats.iterations,
            frozen = stats.frozen_points,
            isolated = stats.isolated_points,
            "relaxed sub-layers"
        );
        stats
    }

    /// New position of point `j` on layer `i`, or `None` to leave it.
    fn relax_point(
        &self,
        points: &[Point3],
        layout: &LayerLayout,
        i: usize,
        j: usize,
        hood: &Neighborhood,
        nominal: f64,
    ) -> Option<Point3> {
        let point = points[layout.corner(i, j)];
        let below = points[layout.corner(i - 1, j)];

        let center = barycenter(hood.neighbors.iter().map(|&p| &points[layout.corner(i, p)]))?;
        let smoothed = lerp(&point, &center, self.params.horizontal_relaxation);

        let (dir, length) = self.tolerance.normalize(&(smoothed - below))?;
        let length = length + self.params.vertical_relaxation * (nominal - length);

        let mut dir: Vec3 = dir.into_inner();
        if let Some((old, _)) = self.tolerance.normalize(&(point - below)) {
            if dir.dot(&old) < 0.0 {
                dir = -dir;
            }
        }
        Some(below + dir * length)
    }
}

fn neighborhood(input: &UnstructuredMesh, adjacency: &MeshAdjacency, j: usize) -> Neighborhood {
    let mut hood = Neighborhood::default();
    for &cell_id in adjacency.cells_for_point(j) {
        let Some(cell) = input.cell(cell_id) else {
            continue;
        };
        for &p in &cell.points {
            if p == j {
                continue;
            }
            if !hood.neighbors.contains(&p) {
                hood.neighbors.push(p);
            }
            if cell.shares_edge(j, p)
                && adjacency.is_boundary_edge(cell_id, j, p)
                && !hood.on_edge.contains(&p)
            {
                hood.on_edge.push(p);
            }
        }
    }
    hood
}

/// Put every midpoint ring back at half its end ring's displacement.
fn reinterpolate_midpoints(points: &mut [Point3], layout: &LayerLayout) {
    for i in 1..=layout.sub_layers() {
        for j in 0..layout.base_points() {
            let base = points[j];
            let end = points[layout.corner(i, j)];
            points[layout.midpoint(i, j)] = lerp(&base, &end, 0.5);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::SurfaceElement;
    use crate::extrude::{classify_cells, extrude, Extrusion};
    use crate::testing;
    use crate::warp::WarpEvaluator;
    use approx::assert_relative_eq;
    use stratum_mesh::CellKind;

    fn extruded(input: &UnstructuredMesh, sub_layers: usize, thickness: f64) -> Extrusion {
        let params = testing::params(sub_layers, thickness);
        let elements: Vec<SurfaceElement> = classify_cells(input).unwrap();
        let adjacency = MeshAdjacency::build(input);
        let evaluator = WarpEvaluator::from_mesh(input, &params).unwrap();
        extrude(input, &adjacency, &elements, &evaluator, &params).unwrap()
    }

    fn relaxer(input: &UnstructuredMesh, iterations: usize) -> SublayerRelaxer {
        let params = RelaxationParams {
            iterations,
            ..Default::default()
        };
        SublayerRelaxer::new(input, &MeshAdjacency::build(input), params)
    }

    #[test]
    fn test_neighborhoods_on_grid() {
        let input = testing::flat_grid(2, 2);
        let r = relaxer(&input, 0);
        // Center point (1, 1) touches six triangles and six other points.
        let center = &r.neighborhoods[4];
        assert_eq!(center.neighbors.len(), 6);
        assert!(center.on_edge.is_empty());
        assert!(!center.is_frozen());
        // Corner point 0 lies on two boundary edges.
        let corner = &r.neighborhoods[0];
        assert_eq!(corner.on_edge.len(), 2);
        assert!(corner.is_frozen());
    }

    #[test]
    fn test_quad_diagonals_are_not_on_edge() {
        let input = testing::quad_strip(3);
        let r = relaxer(&input, 0);
        // Point 2 is on the bottom row, between quads 0 and 1.
        let hood = &r.neighborhoods[2];
        assert_eq!(hood.neighbors.len(), 5);
        assert_eq!(hood.on_edge.len(), 2);
    }

    #[test]
    fn test_flat_grid_is_a_fixed_point() {
        let input = testing::flat_grid(4, 4);
        let mut ext = extruded(&input, 3, 1.5);
        let before = ext.mesh.points().to_vec();
        let stats = relaxer(&input, 1000).relax(ext.mesh.points_mut(), &ext.layout);
        assert_eq!(stats.iterations, 1000);
        assert_eq!(stats.frozen_points, 16);

        let layout = ext.layout;
        let points = ext.mesh.points();
        for (a, b) in before.iter().zip(points) {
            assert_relative_eq!(a.x, b.x, epsilon = 1e-9);
            assert_relative_eq!(a.y, b.y, epsilon = 1e-9);
            assert_relative_eq!(a.z, b.z, epsilon = 1e-9);
        }
        for i in 1..=3 {
            for j in 0..input.num_points() {
                let gap = (points[layout.corner(i, j)] - points[layout.corner(i - 1, j)]).norm();
                assert_relative_eq!(gap, 0.5, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_smooths_a_perturbed_point_and_keeps_spacing() {
        let input = testing::flat_grid(4, 4);
        let mut ext = extruded(&input, 2, 1.0);
        let layout = ext.layout;
        // Center of the 5x5 point grid.
        let center = 12;
        let (id, top) = (layout.corner(1, center), layout.corner(2, center));
        // Tilt the column at the center point, keeping both gaps at 0.5.
        {
            let points = ext.mesh.points_mut();
            points[id] = points[center] + Vec3::new(0.3, 0.0, 0.4);
            points[top] = points[id] + Vec3::new(0.0, 0.0, 0.5);
        }

        relaxer(&input, 200).relax(ext.mesh.points_mut(), &layout);

        let points = ext.mesh.points();
        let p = points[id];
        assert!((p.x - 2.0).abs() < 0.05, "x = {}", p.x);
        assert!((points[top].x - 2.0).abs() < 0.05, "x = {}", points[top].x);
        let gap = (p - points[center]).norm();
        assert_relative_eq!(gap, 0.5, epsilon = 1e-9);
        let gap = (points[top] - p).norm();
        assert_relative_eq!(gap, 0.5, epsilon = 1e-9);
        // Base surface untouched.
        assert_eq!(points[center], input.points()[center]);
    }

    /// One sweep step for a point with `vertical_relaxation = 1`.
    fn expected_step(point: Point3, below: Point3, neighbors: &[Point3], nominal: f64) -> Point3 {
        let center = barycenter(neighbors).unwrap();
        let smoothed = point + (center - point) * 0.1;
        below + (smoothed - below).normalize() * nominal
    }

    #[test]
    fn test_sweep_reads_points_moved_earlier_in_the_same_pass() {
        // 4x4 point grid; interior points 5, 6, 9, 10. Points 5 and 6 share an
        // edge and 5 is visited first.
        let input = testing::flat_grid(3, 3);
        let mut ext = extruded(&input, 1, 1.0);
        let layout = ext.layout;
        let top = |j: usize| layout.corner(1, j);
        {
            let points = ext.mesh.points_mut();
            points[top(5)].x += 0.3;
            points[top(6)].y += 0.2;
        }
        let start = ext.mesh.points().to_vec();
        let r = relaxer(&input, 1);

        let around_5 = [0, 1, 6, 10, 9, 4];
        let around_6 = [1, 2, 7, 11, 10, 5];
        let mut sorted = r.neighborhoods[5].neighbors.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 4, 6, 9, 10]);
        let mut sorted = r.neighborhoods[6].neighbors.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 5, 7, 10, 11]);

        let nominal = |j: usize| (start[top(j)] - start[j]).norm();
        let layer = |ids: &[usize], pts: &[Point3]| -> Vec<Point3> {
            ids.iter().map(|&k| pts[top(k)]).collect()
        };

        let step = |j: usize, around: &[usize], pts: &[Point3]| {
            expected_step(start[top(j)], start[j], &layer(around, pts), nominal(j))
        };

        let moved_5 = step(5, &around_5, &start);
        let mut after_5 = start.clone();
        after_5[top(5)] = moved_5;
        let moved_6 = step(6, &around_6, &after_5);
        // What a double-buffered sweep would produce for point 6.
        let buffered_6 = step(6, &around_6, &start);
        assert!((moved_6 - buffered_6).norm() > 1e-6);

        r.relax(ext.mesh.points_mut(), &layout);
        let points = ext.mesh.points();
        for (got, want) in [(points[top(5)], moved_5), (points[top(6)], moved_6)] {
            assert_relative_eq!(got.x, want.x, epsilon = 1e-12);
            assert_relative_eq!(got.y, want.y, epsilon = 1e-12);
            assert_relative_eq!(got.z, want.z, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_boundary_points_stay_put() {
        let input = testing::flat_grid(3, 3);
        let mut ext = extruded(&input, 1, 1.0);
        let layout = ext.layout;
        let id = layout.corner(1, 0);
        ext.mesh.points_mut()[id].y += 0.25;
        let moved = ext.mesh.points()[id];

        relaxer(&input, 50).relax(ext.mesh.points_mut(), &layout);
        assert_eq!(ext.mesh.points()[id], moved);
    }

    #[test]
    fn test_isolated_point_left_unchanged() {
        let mut input = testing::single_triangle();
        input.push_point(Point3::new(5.0, 5.0, 0.0));
        let layout = LayerLayout::new(4, 1, false);
        let mut points: Vec<Point3> = input.points().to_vec();
        points.extend(input.points().iter().map(|p| p + Vec3::new(0.0, 0.0, 1.0)));
        let before = points[7];

        let stats = relaxer(&input, 10).relax(&mut points, &layout);
        assert_eq!(stats.isolated_points, 1);
        assert_eq!(points[7], before);
    }

    #[test]
    fn test_quadratic_midpoints_follow_end_ring() {
        let input = testing::quadratic_pair();
        assert_eq!(input.cell_kind(0), Some(CellKind::QuadraticTriangle));
        let mut ext = extruded(&input, 1, 1.0);
        let layout = ext.layout;
        let id = layout.corner(1, 2);
        ext.mesh.points_mut()[id].x += 0.2;

        relaxer(&input, 5).relax(ext.mesh.points_mut(), &layout);

        let points = ext.mesh.points();
        for j in 0..input.num_points() {
            let expected = lerp(&points[j], &points[layout.corner(1, j)], 0.5);
            let mid = points[layout.midpoint(1, j)];
            assert_relative_eq!(mid.x, expected.x, epsilon = 1e-12);
            assert_relative_eq!(mid.z, expected.z, epsilon = 1e-12);
        }
    }
}
