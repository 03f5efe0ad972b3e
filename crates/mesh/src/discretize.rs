use crate::{Aabb, IndexConfig, Vector3};

/// Integer grid coordinates of a position. Only ever used as a lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiscretizedPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Number of cells searched around a vertex: the cell itself and its 26
/// neighbours.
pub const NEIGHBOUR_COUNT: usize = 27;

/// Offsets to the cells around a cell, starting with the cell itself.
#[rustfmt::skip]
pub const NEIGHBOUR_OFFSETS: [[i32; 3]; NEIGHBOUR_COUNT] = [
    [0, 0, 0], [0, 0, 1], [0, 0, -1],
    [0, 1, 0], [0, 1, 1], [0, 1, -1],
    [0, -1, 0], [0, -1, 1], [0, -1, -1],

    [1, 0, 0], [1, 0, 1], [1, 0, -1],
    [1, 1, 0], [1, 1, 1], [1, 1, -1],
    [1, -1, 0], [1, -1, 1], [1, -1, -1],

    [-1, 0, 0], [-1, 0, 1], [-1, 0, -1],
    [-1, 1, 0], [-1, 1, 1], [-1, 1, -1],
    [-1, -1, 0], [-1, -1, 1], [-1, -1, -1],
];

/// Largest number of cells along one axis. Leaves headroom in `i32` for the
/// neighbour offsets.
pub const MAX_SUBDIVISIONS: usize = (i32::MAX / 2) as usize;

impl DiscretizedPosition {
    /// Returns the `j`th cell of the 3x3x3 block centred on this one.
    pub fn neighbour(&self, j: usize) -> Self {
        let [dx, dy, dz] = NEIGHBOUR_OFFSETS[j];
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            z: self.z.saturating_add(dz),
        }
    }

    pub fn neighbours(&self) -> impl Iterator<Item = DiscretizedPosition> + '_ {
        (0..NEIGHBOUR_COUNT).map(move |j| self.neighbour(j))
    }
}

/// Maps continuous positions onto a uniform grid.
///
/// The grid covers the mesh bounds grown by `margin_factor * tolerance` and
/// uses the same scale on every axis. Cells are roughly `2 * tolerance` wide,
/// so two positions within `tolerance` of each other on every axis always
/// land in the same or in adjacent cells.
#[derive(Debug, Clone, Copy)]
pub struct Discretizer {
    min: Vector3,
    scale: f32,
    subdivisions: usize,
}

impl Discretizer {
    pub fn new(bounds: &Aabb, config: &IndexConfig) -> Self {
        let grown = bounds.expanded(config.margin_factor * config.tolerance);
        let longest_side = grown.longest_side();

        // A zero tolerance gives an infinite cell count, which saturates to
        // the grid limit. Degenerate bounds give NaN, which saturates to zero.
        let cells = longest_side / (2.0 * config.tolerance);
        let max_grid_size = config.max_grid_size.clamp(1, MAX_SUBDIVISIONS);
        let subdivisions = ((cells + 0.5) as usize).clamp(1, max_grid_size);

        let scale = if longest_side > 0.0 {
            subdivisions as f32 / longest_side
        } else {
            // Every position is the same point; any finite scale will do.
            1.0
        };

        log::trace!(
            "discretizer: longest side {longest_side}, {subdivisions} cells, scale {scale}"
        );

        Self {
            min: if grown.is_empty() {
                Vector3::new(0.0, 0.0, 0.0)
            } else {
                grown.min
            },
            scale,
            subdivisions,
        }
    }

    pub fn discretize(&self, p: &Vector3) -> DiscretizedPosition {
        DiscretizedPosition {
            x: ((p.x - self.min.x) * self.scale).floor() as i32,
            y: ((p.y - self.min.y) * self.scale).floor() as i32,
            z: ((p.z - self.min.z) * self.scale).floor() as i32,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Width of one grid cell in world units.
    pub fn cell_size(&self) -> f32 {
        self.scale.recip()
    }

    /// Number of cells along the longest side of the grown bounds.
    pub fn subdivisions(&self) -> usize {
        self.subdivisions
    }
}
