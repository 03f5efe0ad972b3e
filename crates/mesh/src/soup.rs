use crate::{Aabb, Triangle, TriangleMesh, Vector2, Vector3};

/// An unindexed mesh: one entry per triangle corner.
///
/// Corners `3 * i`, `3 * i + 1` and `3 * i + 2` form triangle `i`. Nothing is
/// shared between triangles, so a vertex touched by six triangles appears six
/// times.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleSoup {
    pub positions: Vec<Vector3>,
    pub texcoords: Vec<Vector2>,
    pub normals: Option<Vec<Vector3>>,
}

impl TriangleSoup {
    /// Creates a soup from parallel attribute arrays.
    ///
    /// # Panics
    ///
    /// Panics if the attribute arrays differ in length or if the corner count
    /// is not a multiple of three.
    pub fn new(
        positions: Vec<Vector3>,
        texcoords: Vec<Vector2>,
        normals: Option<Vec<Vector3>>,
    ) -> Self {
        assert_eq!(
            positions.len(),
            texcoords.len(),
            "every corner needs a texture coordinate"
        );
        if let Some(normals) = &normals {
            assert_eq!(positions.len(), normals.len(), "every corner needs a normal");
        }
        assert_eq!(positions.len() % 3, 0, "corner count must be a multiple of 3");
        Self {
            positions,
            texcoords,
            normals,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    pub fn normal(&self, index: usize) -> Option<Vector3> {
        self.normals.as_ref().map(|n| n[index])
    }

    /// Bounds of the corner positions as given.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(&self.positions)
    }
}

impl TriangleMesh for TriangleSoup {
    fn from_triangles(triangles: Vec<Triangle>, facet_normals: Option<Vec<Vector3>>) -> Self {
        let positions: Vec<Vector3> = triangles.iter().flat_map(Triangle::corners).collect();
        // Formats without texture coordinates still need one per corner.
        let texcoords = vec![Vector2::new(0.0, 0.0); positions.len()];
        let normals = facet_normals.map(|normals| {
            normals
                .into_iter()
                .flat_map(|n| std::iter::repeat(n).take(3))
                .collect()
        });
        Self::new(positions, texcoords, normals)
    }

    fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    fn triangle(&self, index: usize) -> Triangle {
        Triangle {
            p0: self.positions[3 * index],
            p1: self.positions[3 * index + 1],
            p2: self.positions[3 * index + 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Triangle {
        Triangle {
            p0: Vector3::new(0.0, 0.0, 0.0),
            p1: Vector3::new(1.0, 0.0, 0.0),
            p2: Vector3::new(0.0, 1.0, 0.0),
        }
    }

    #[test]
    fn from_triangles_replicates_facet_normals() {
        let up = Vector3::new(0.0, 0.0, 1.0);
        let soup = TriangleSoup::from_triangles(vec![triangle(); 2], Some(vec![up; 2]));
        assert_eq!(soup.vertex_count(), 6);
        assert_eq!(soup.triangle_count(), 2);
        assert_eq!(soup.normals.as_ref().map(Vec::len), Some(6));
        assert_eq!(soup.normal(4), Some(up));
        assert_eq!(soup.triangle(1), triangle());
        assert!(soup.texcoords.iter().all(|t| *t == Vector2::new(0.0, 0.0)));
    }

    #[test]
    fn from_triangles_without_normals() {
        let soup = TriangleSoup::from_triangles(vec![triangle()], None);
        assert!(!soup.has_normals());
        assert_eq!(soup.normal(0), None);
        assert_eq!(soup.triangles().count(), 1);
    }

    #[test]
    #[should_panic(expected = "texture coordinate")]
    fn mismatched_texcoords() {
        TriangleSoup::new(vec![Vector3::new(0.0, 0.0, 0.0); 3], Vec::new(), None);
    }

    #[test]
    #[should_panic(expected = "multiple of 3")]
    fn partial_triangle() {
        TriangleSoup::new(
            vec![Vector3::new(0.0, 0.0, 0.0); 2],
            vec![Vector2::new(0.0, 0.0); 2],
            None,
        );
    }
}
