//! Generation parameters.

use serde::{Deserialize, Serialize};

use crate::error::{BoundaryLayerError, Result};

/// Where the per-point layer thickness comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThicknessSource {
    /// `LayerParams::layer_thickness` at every point.
    Constant,
    /// Length of the point's warp vector.
    WarpMagnitude,
    /// The thickness point array, scaled by `LayerParams::layer_thickness_ratio`.
    Field,
}

/// What to do with a zero-length warp vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DegenerateWarpPolicy {
    /// Abort generation with `DegenerateWarpVector`.
    #[default]
    Reject,
    /// Leave the point where it is in every sub-layer and log a warning.
    Collapse,
}

/// Region tags written to the cell entity ids array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CellEntityIds {
    /// Cap cells on the input surface (block 0).
    pub inner_surface: i32,
    /// Cap cells on the outermost extruded surface (block N).
    pub outer_surface: i32,
    /// Quads closing open edges of the input surface.
    pub sidewall: i32,
    /// Wedges and hexahedra filling each sub-layer.
    pub volume: i32,
}

/// Controls for the sub-layer relaxation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaxationParams {
    /// Number of sweeps over all extruded points. Always run in full.
    pub iterations: usize,
    /// Fraction of the step toward the neighbor barycenter taken per sweep.
    pub horizontal_relaxation: f64,
    /// Fraction of the step back to the nominal sub-layer spacing.
    pub vertical_relaxation: f64,
}

impl Default for RelaxationParams {
    fn default() -> Self {
        Self {
            iterations: 1000,
            horizontal_relaxation: 0.1,
            vertical_relaxation: 1.0,
        }
    }
}

/// Boundary layer generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerParams {
    /// Name of the point vector array giving the extrusion direction.
    pub warp_vectors_array: Option<String>,
    /// Name of the point scalar array giving the layer thickness.
    ///
    /// Only read when neither constant nor magnitude thickness is enabled.
    pub layer_thickness_array: Option<String>,
    /// Name of the integer cell array holding region tags.
    pub cell_entity_ids_array: Option<String>,
    /// Thickness used when `constant_thickness` is set.
    pub layer_thickness: f64,
    /// Multiplier applied to the thickness array values.
    pub layer_thickness_ratio: f64,
    /// Upper clamp on the per-point layer thickness.
    pub maximum_layer_thickness: f64,
    /// Number of sub-layers stacked to make up the full layer.
    pub number_of_sub_layers: usize,
    /// Thickness ratio between successive sub-layers, moving away from the
    /// surface.
    pub sub_layer_ratio: f64,
    /// Use the warp vector length as the layer thickness.
    pub use_warp_vector_magnitude_as_thickness: bool,
    /// Use `layer_thickness` everywhere.
    pub constant_thickness: bool,
    /// Extrude against the warp vectors.
    pub negate_warp_vectors: bool,
    /// Emit cap cells on the input and outermost surfaces.
    pub include_surface_cells: bool,
    /// Emit quads on open edges of the input surface.
    pub include_sidewall_cells: bool,
    /// Region tag values.
    pub cell_entity_ids: CellEntityIds,
    /// Relaxation controls.
    pub relaxation: RelaxationParams,
    /// Handling of zero-length warp vectors.
    pub degenerate_warp: DegenerateWarpPolicy,
}

impl Default for LayerParams {
    fn default() -> Self {
        Self {
            warp_vectors_array: None,
            layer_thickness_array: None,
            cell_entity_ids_array: None,
            layer_thickness: 1.0,
            layer_thickness_ratio: 1.0,
            maximum_layer_thickness: f64::MAX,
            number_of_sub_layers: 1,
            sub_layer_ratio: 1.0,
            use_warp_vector_magnitude_as_thickness: false,
            constant_thickness: false,
            negate_warp_vectors: false,
            include_surface_cells: false,
            include_sidewall_cells: false,
            cell_entity_ids: CellEntityIds::default(),
            relaxation: RelaxationParams::default(),
            degenerate_warp: DegenerateWarpPolicy::default(),
        }
    }
}

impl LayerParams {
    /// Resolve the thickness flags. Constant wins over magnitude.
    pub fn thickness_source(&self) -> ThicknessSource {
        if self.constant_thickness {
            ThicknessSource::Constant
        } else if self.use_warp_vector_magnitude_as_thickness {
            ThicknessSource::WarpMagnitude
        } else {
            ThicknessSource::Field
        }
    }

    /// Check names and numeric ranges.
    pub fn validate(&self) -> Result<()> {
        if self.warp_vectors_array.is_none() {
            return Err(BoundaryLayerError::MissingArrayName("warp vectors"));
        }
        if self.cell_entity_ids_array.is_none() {
            return Err(BoundaryLayerError::MissingArrayName("cell entity ids"));
        }
        if self.thickness_source() == ThicknessSource::Field
            && self.layer_thickness_array.is_none()
        {
            return Err(BoundaryLayerError::MissingArrayName("layer thickness"));
        }
        if self.number_of_sub_layers == 0 {
            return Err(BoundaryLayerError::InvalidParams(
                "number_of_sub_layers must be at least 1".into(),
            ));
        }
        if !(self.sub_layer_ratio.is_finite() && self.sub_layer_ratio > 0.0) {
            return Err(BoundaryLayerError::InvalidParams(format!(
                "sub_layer_ratio must be positive, got {}",
                self.sub_layer_ratio
            )));
        }
        if !(self.layer_thickness.is_finite() && self.layer_thickness >= 0.0) {
            return Err(BoundaryLayerError::InvalidParams(format!(
                "layer_thickness must be non-negative, got {}",
                self.layer_thickness
            )));
        }
        if !(self.layer_thickness_ratio.is_finite() && self.layer_thickness_ratio >= 0.0) {
            return Err(BoundaryLayerError::InvalidParams(format!(
                "layer_thickness_ratio must be non-negative, got {}",
                self.layer_thickness_ratio
            )));
        }
        if self.maximum_layer_thickness.is_nan() || self.maximum_layer_thickness <= 0.0 {
            return Err(BoundaryLayerError::InvalidParams(format!(
                "maximum_layer_thickness must be positive, got {}",
                self.maximum_layer_thickness
            )));
        }
        let relax = &self.relaxation;
        if !(0.0..=1.0).contains(&relax.horizontal_relaxation)
            || !(0.0..=1.0).contains(&relax.vertical_relaxation)
        {
            return Err(BoundaryLayerError::InvalidParams(
                "relaxation factors must be between 0 and 1".into(),
            ));
        }
        Ok(())
    }
}
