//! Welds triangle soups into indexed meshes and derives tangent frames for
//! normal mapping.
//!
//! ```
//! use weldkit_mesh::{make_indexed_mesh, TriangleSoup, Vector2, Vector3};
//!
//! let p = [
//!     Vector3::new(0.0, 0.0, 0.0),
//!     Vector3::new(1.0, 0.0, 0.0),
//!     Vector3::new(1.0, 1.0, 0.0),
//!     Vector3::new(0.0, 1.0, 0.0),
//! ];
//! let corners = [0, 1, 2, 0, 2, 3];
//! let soup = TriangleSoup::new(
//!     corners.iter().map(|&i| p[i]).collect(),
//!     corners.iter().map(|&i| Vector2::new(p[i].x, p[i].y)).collect(),
//!     None,
//! );
//!
//! let mesh = make_indexed_mesh(&soup, 1e-4);
//! assert_eq!(mesh.vertex_count(), 4);
//! assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
//! ```

mod collapse;
mod config;
mod discretize;
mod frame;
mod geometry;
mod indexed_mesh;
mod merge;
mod normals;
mod soup;
mod tangent;
mod vicinity;

pub use collapse::*;
pub use config::*;
pub use discretize::*;
pub use frame::*;
pub use geometry::*;
pub use indexed_mesh::*;
pub use merge::*;
pub use normals::*;
pub use soup::*;
pub use tangent::*;
pub use vicinity::*;

/// A reasonable default mesh to select for unopinionated consumers.
pub type DefaultMesh = IndexedMesh;

pub trait TriangleMesh: Sized {
    /// Creates a TriangleMesh from a list of triangles.
    ///
    /// # Arguments
    ///
    /// * `triangles` - A vector of the triangles of the mesh.
    /// * `facet_normals` - One normal per triangle, if the source has them.
    fn from_triangles(triangles: Vec<Triangle>, facet_normals: Option<Vec<Vector3>>) -> Self;

    /// Returns the number of triangles that comprises this mesh.
    fn triangle_count(&self) -> usize;

    /// Returns the positions of triangle `index`.
    fn triangle(&self, index: usize) -> Triangle;

    /// Iterates over the triangles of the mesh in order.
    fn triangles(&self) -> Triangles<'_, Self> {
        Triangles {
            mesh: self,
            next: 0,
        }
    }
}

pub struct Triangles<'a, M> {
    mesh: &'a M,
    next: usize,
}

impl<'a, M: TriangleMesh> Iterator for Triangles<'a, M> {
    type Item = Triangle;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.mesh.triangle_count() {
            return None;
        }
        self.next += 1;
        Some(self.mesh.triangle(self.next - 1))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.mesh.triangle_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl<'a, M: TriangleMesh> ExactSizeIterator for Triangles<'a, M> {}
