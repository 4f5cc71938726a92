//! Per-point, per-sub-layer displacement of the input surface.

use stratum_math::{Dir3, Point3, Tolerance, Vec3};
use stratum_mesh::{DataArray, UnstructuredMesh};
use tracing::warn;

use crate::error::{BoundaryLayerError, Result};
use crate::params::{DegenerateWarpPolicy, LayerParams, ThicknessSource};

/// Geometric grading of the layer thickness over its sub-layers.
///
/// Sub-layer `i` of `N` gets weight `r^(N-1-i)`; fractions are weights over
/// their sum, so the thickness fractions of all sub-layers add up to one.
/// Weights are stored divided by the largest one, which keeps them finite for
/// any ratio and sub-layer count.
#[derive(Debug, Clone)]
pub struct SubLayerGrading {
    weights: Vec<f64>,
    total: f64,
}

impl SubLayerGrading {
    /// Grading for `sub_layers` sub-layers with successive ratio `ratio`.
    pub fn new(sub_layers: usize, ratio: f64) -> Self {
        // r^(N-1-i) / r^(N-1) = r^-i when the first weight is the largest.
        let weights: Vec<f64> = (0..sub_layers)
            .map(|i| {
                if ratio > 1.0 {
                    ratio.powi(i as i32).recip()
                } else {
                    ratio.powi((sub_layers - 1 - i) as i32)
                }
            })
            .collect();
        let total = weights.iter().sum();
        Self { weights, total }
    }

    /// Fraction of the layer thickness below sub-layer `k`.
    pub fn offset_fraction(&self, k: usize) -> f64 {
        self.weights[..k].iter().sum::<f64>() / self.total
    }

    /// Fraction of the layer thickness taken by sub-layer `k`.
    pub fn thickness_fraction(&self, k: usize) -> f64 {
        self.weights[k] / self.total
    }

    /// Fraction of the layer thickness at the outer end of sub-layer `k`.
    pub fn end_fraction(&self, k: usize) -> f64 {
        self.offset_fraction(k) + self.thickness_fraction(k)
    }
}

/// Displacement of one input point at the end of one sub-layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Displacement {
    /// Offset from the input point to the end of the sub-layer.
    pub end: Vec3,
    /// Half of `end`, used for the quadratic midpoint ring.
    pub midpoint: Vec3,
}

/// Evaluates warp displacements from the input mesh's point arrays.
///
/// Stateless across sub-layers: `displacement(k, p)` depends only on `k`,
/// `p` and the parameters.
#[derive(Debug, Clone)]
pub struct WarpEvaluator<'a> {
    warp: &'a [Vec3],
    thickness: Option<&'a [f64]>,
    source: ThicknessSource,
    layer_thickness: f64,
    thickness_ratio: f64,
    maximum_thickness: f64,
    negate: bool,
    policy: DegenerateWarpPolicy,
    grading: SubLayerGrading,
    tolerance: Tolerance,
}

impl<'a> WarpEvaluator<'a> {
    /// Look up the warp and thickness arrays named in `params` on `mesh`.
    pub fn from_mesh(mesh: &'a UnstructuredMesh, params: &LayerParams) -> Result<Self> {
        let warp_name = params
            .warp_vectors_array
            .as_deref()
            .ok_or(BoundaryLayerError::MissingArrayName("warp vectors"))?;
        let warp = lookup(mesh, warp_name, "vector", DataArray::as_vectors)?;

        let source = params.thickness_source();
        let thickness = match source {
            ThicknessSource::Field => {
                let name = params
                    .layer_thickness_array
                    .as_deref()
                    .ok_or(BoundaryLayerError::MissingArrayName("layer thickness"))?;
                Some(lookup(mesh, name, "scalar", DataArray::as_scalars)?)
            }
            ThicknessSource::Constant | ThicknessSource::WarpMagnitude => None,
        };

        Ok(Self {
            warp,
            thickness,
            source,
            layer_thickness: params.layer_thickness,
            thickness_ratio: params.layer_thickness_ratio,
            maximum_thickness: params.maximum_layer_thickness,
            negate: params.negate_warp_vectors,
            policy: params.degenerate_warp,
            grading: SubLayerGrading::new(params.number_of_sub_layers, params.sub_layer_ratio),
            tolerance: Tolerance::DEFAULT,
        })
    }

    /// Full layer thickness at `point`, after the maximum clamp.
    pub fn layer_thickness(&self, point: usize) -> f64 {
        let t = match (self.source, self.thickness) {
            (ThicknessSource::Constant, _) => self.layer_thickness,
            (ThicknessSource::WarpMagnitude, _) => self.warp[point].norm(),
            (ThicknessSource::Field, Some(values)) => values[point] * self.thickness_ratio,
            (ThicknessSource::Field, None) => 0.0,
        };
        t.min(self.maximum_thickness)
    }

    /// Unit extrusion direction at `point`.
    ///
    /// `Ok(None)` means the warp vector is degenerate and the policy is
    /// [`DegenerateWarpPolicy::Collapse`].
    pub fn direction(&self, point: usize) -> Result<Option<Dir3>> {
        let mut v = self.warp[point];
        if self.negate {
            v = -v;
        }
        match self.tolerance.normalize(&v) {
            Some((dir, _)) => Ok(Some(dir)),
            None => match self.policy {
                DegenerateWarpPolicy::Reject => {
                    Err(BoundaryLayerError::DegenerateWarpVector { point })
                }
                DegenerateWarpPolicy::Collapse => Ok(None),
            },
        }
    }

    /// Check every warp vector before any point is generated.
    ///
    /// Returns the number of collapsed points under the collapse policy.
    pub fn check_directions(&self) -> Result<usize> {
        let mut collapsed = 0;
        for point in 0..self.warp.len() {
            if self.direction(point)?.is_none() {
                warn!(point, "zero-length warp vector, point will not be extruded");
                collapsed += 1;
            }
        }
        Ok(collapsed)
    }

    /// Displacement of `point` at the end of sub-layer `sub_layer`.
    pub fn displacement(&self, sub_layer: usize, point: usize) -> Result<Displacement> {
        let Some(dir) = self.direction(point)? else {
            return Ok(Displacement {
                end: Vec3::zeros(),
                midpoint: Vec3::zeros(),
            });
        };
        let magnitude = self.layer_thickness(point) * self.grading.end_fraction(sub_layer);
        let end = dir.into_inner() * magnitude;
        Ok(Displacement {
            end,
            midpoint: end * 0.5,
        })
    }

    /// Warped copy of `points` for sub-layer `sub_layer`.
    ///
    /// For quadratic layouts the block is the midpoint ring followed by the
    /// end ring.
    pub fn warp_block(
        &self,
        points: &[Point3],
        sub_layer: usize,
        quadratic: bool,
    ) -> Result<Vec<Point3>> {
        let mut ends = Vec::with_capacity(points.len());
        let mut mids = Vec::with_capacity(if quadratic { points.len() } else { 0 });
        for (i, p) in points.iter().enumerate() {
            let d = self.displacement(sub_layer, i)?;
            ends.push(p + d.end);
            if quadratic {
                mids.push(p + d.midpoint);
            }
        }
        mids.extend(ends);
        Ok(mids)
    }
}

fn lookup<'a, T: ?Sized>(
    mesh: &'a UnstructuredMesh,
    name: &str,
    expected: &'static str,
    view: impl Fn(&'a DataArray) -> Option<&'a T>,
) -> Result<&'a T> {
    let array = mesh
        .point_data()
        .get(name)
        .ok_or_else(|| BoundaryLayerError::MissingArray(name.to_string()))?;
    view(array).ok_or_else(|| BoundaryLayerError::WrongArrayType {
        name: name.to_string(),
        expected,
        found: array.layout(),
    })
}
