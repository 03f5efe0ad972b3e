/// How far, in multiples of the tolerance, the bounds are grown before the
/// spatial grid is laid over them.
pub const AABB_MARGIN_FACTOR: f32 = 10.0;

/// Upper bound on the number of grid cells along the longest side.
pub const SPARSE_GRID_MAX_SIZE: usize = 1024 * 1024;

/// Default welding tolerance, in world units.
pub const DEFAULT_TOLERANCE: f32 = 1e-5;

/// Parameters used when converting a [`crate::TriangleSoup`] into an
/// [`crate::IndexedMesh`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexConfig {
    /// Maximum absolute per-component difference between two corners that
    /// still allows them to be welded. Applies to positions, normals and
    /// texture coordinates alike.
    pub tolerance: f32,
    pub margin_factor: f32,
    pub max_grid_size: usize,
}

impl IndexConfig {
    pub fn with_tolerance(tolerance: f32) -> Self {
        Self {
            tolerance,
            ..Default::default()
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            margin_factor: AABB_MARGIN_FACTOR,
            max_grid_size: SPARSE_GRID_MAX_SIZE,
        }
    }
}
