//! Point numbering of the extruded mesh.
//!
//! Block 0 holds the `n` input points verbatim. Each of the `N` extruded
//! blocks follows, holding `n` points for linear elements. For quadratic
//! elements an extruded block holds `2n` points: first the midpoint ring
//! (half the sub-layer's end displacement), then the end ring.

/// Index arithmetic over the point blocks of the output mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerLayout {
    base_points: usize,
    sub_layers: usize,
    quadratic: bool,
}

impl LayerLayout {
    /// Layout for `base_points` input points and `sub_layers` sub-layers.
    pub fn new(base_points: usize, sub_layers: usize, quadratic: bool) -> Self {
        Self {
            base_points,
            sub_layers,
            quadratic,
        }
    }

    /// Number of input points.
    pub fn base_points(&self) -> usize {
        self.base_points
    }

    /// Number of sub-layers.
    pub fn sub_layers(&self) -> usize {
        self.sub_layers
    }

    /// Whether extruded blocks carry a midpoint ring.
    pub fn is_quadratic(&self) -> bool {
        self.quadratic
    }

    /// Points per extruded block.
    pub fn block_len(&self) -> usize {
        if self.quadratic {
            2 * self.base_points
        } else {
            self.base_points
        }
    }

    /// Total point count of the output mesh.
    pub fn total_points(&self) -> usize {
        self.base_points + self.block_len() * self.sub_layers
    }

    /// First output id of extruded block `layer` (1-based, `layer >= 1`).
    fn block_start(&self, layer: usize) -> usize {
        debug_assert!(layer >= 1 && layer <= self.sub_layers);
        self.base_points + (layer - 1) * self.block_len()
    }

    /// Output id of input point `point` on layer surface `layer`.
    ///
    /// Layer 0 is the input surface; layer `k + 1` is the end of sub-layer `k`.
    pub fn corner(&self, layer: usize, point: usize) -> usize {
        if layer == 0 {
            point
        } else {
            self.block_start(layer) + self.block_len() - self.base_points + point
        }
    }

    /// Output id of the midpoint-ring copy of `point` in block `layer`.
    ///
    /// Only meaningful for quadratic layouts and `layer >= 1`.
    pub fn midpoint(&self, layer: usize, point: usize) -> usize {
        debug_assert!(self.quadratic);
        self.block_start(layer) + point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_layout() {
        let layout = LayerLayout::new(5, 3, false);
        assert_eq!(layout.block_len(), 5);
        assert_eq!(layout.total_points(), 20);
        assert_eq!(layout.corner(0, 2), 2);
        assert_eq!(layout.corner(1, 2), 7);
        assert_eq!(layout.corner(3, 4), 19);
    }

    #[test]
    fn test_quadratic_layout() {
        // n = 4, blocks of 8: [0..4) base, [4..8) mid 1, [8..12) end 1,
        // [12..16) mid 2, [16..20) end 2.
        let layout = LayerLayout::new(4, 2, true);
        assert_eq!(layout.block_len(), 8);
        assert_eq!(layout.total_points(), 20);
        assert_eq!(layout.corner(0, 3), 3);
        assert_eq!(layout.midpoint(1, 0), 4);
        assert_eq!(layout.corner(1, 0), 8);
        assert_eq!(layout.midpoint(2, 1), 13);
        assert_eq!(layout.corner(2, 3), 19);
    }

    #[test]
    fn test_quadratic_corner_matches_block_offsets() {
        // The end ring of sub-layer k sits one full block past its lower
        // surface, for every k.
        let layout = LayerLayout::new(6, 4, true);
        for k in 0..4 {
            for p in 0..6 {
                assert_eq!(layout.corner(k + 1, p), p + (k + 1) * layout.block_len());
                assert_eq!(layout.midpoint(k + 1, p), p + k * layout.block_len() + 6);
            }
        }
    }
}
