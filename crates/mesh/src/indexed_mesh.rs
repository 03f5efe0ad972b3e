use crate::{
    collapse_vertices, ensure_normals, Aabb, Collapse, Discretizer, IndexConfig, TangentSpace,
    Triangle, TriangleMesh, TriangleSoup, Vector2, Vector3, Vector4, VicinityMap,
};

/// A welded mesh ready to be copied into vertex and index buffers.
///
/// The attribute arrays all have one entry per vertex. `indices` has one entry
/// per corner of the soup the mesh was built from, so every consecutive triple
/// is a triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedMesh {
    pub positions: Vec<Vector3>,
    pub texcoords: Vec<Vector2>,
    pub normals: Vec<Vector3>,
    pub tangents: Vec<Vector4>,
    pub packed_tbn: Vec<u32>,
    pub indices: Vec<u32>,
    /// Bounds of the soup positions before welding.
    pub aabb: Aabb,
}

impl Default for IndexedMesh {
    fn default() -> Self {
        Self {
            positions: Vec::new(),
            texcoords: Vec::new(),
            normals: Vec::new(),
            tangents: Vec::new(),
            packed_tbn: Vec::new(),
            indices: Vec::new(),
            aabb: Aabb::EMPTY,
        }
    }
}

/// Welds `soup` with the default settings and the given tolerance.
pub fn make_indexed_mesh(soup: &TriangleSoup, tolerance: f32) -> IndexedMesh {
    IndexedMesh::from_soup(soup, &IndexConfig::with_tolerance(tolerance))
}

impl IndexedMesh {
    /// Welds the corners of `soup` and derives the tangent frames.
    ///
    /// Normals are copied when the soup has them and synthesised from the
    /// welded triangles otherwise.
    ///
    /// # Panics
    ///
    /// Panics if the soup has more corners than a `u32` index can address.
    pub fn from_soup(soup: &TriangleSoup, config: &IndexConfig) -> Self {
        assert!(
            soup.vertex_count() <= u32::MAX as usize,
            "{} corners do not fit 32 bit indices",
            soup.vertex_count()
        );

        let aabb = soup.aabb();
        let discretizer = Discretizer::new(&aabb, config);
        let vicinity = VicinityMap::build(&soup.positions, &discretizer);
        let collapse = collapse_vertices(soup, &vicinity, &discretizer, config.tolerance);

        assert_eq!(collapse.indices.len(), soup.vertex_count());

        let mut mesh = Self::gather(soup, collapse, aabb);
        ensure_normals(&mut mesh);

        let space = TangentSpace::compute(
            &mesh.positions,
            &mesh.texcoords,
            &mesh.normals,
            &mesh.indices,
        );
        mesh.tangents = space.tangents;
        mesh.packed_tbn = space.packed_tbn;

        assert_eq!(mesh.tangents.len(), mesh.vertex_count());
        assert_eq!(mesh.packed_tbn.len(), mesh.vertex_count());

        log::debug!(
            "indexed {} corners into {} vertices (tolerance {}, {} grid cells)",
            soup.vertex_count(),
            mesh.vertex_count(),
            config.tolerance,
            discretizer.subdivisions()
        );
        mesh
    }

    /// Copies the attributes of each representative corner; nothing is
    /// averaged.
    fn gather(soup: &TriangleSoup, collapse: Collapse, aabb: Aabb) -> Self {
        let Collapse {
            indices,
            representatives,
        } = collapse;

        let positions: Vec<Vector3> = representatives.iter().map(|&i| soup.positions[i]).collect();
        let texcoords: Vec<Vector2> = representatives.iter().map(|&i| soup.texcoords[i]).collect();
        let normals: Vec<Vector3> = soup
            .normals
            .as_ref()
            .map(|normals| representatives.iter().map(|&i| normals[i]).collect())
            .unwrap_or_default();

        Self {
            positions,
            texcoords,
            normals,
            tangents: Vec::new(),
            packed_tbn: Vec::new(),
            indices,
            aabb,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Average number of corners sharing each vertex. `1.0` means nothing was
    /// welded.
    pub fn weld_ratio(&self) -> f32 {
        if self.positions.is_empty() {
            return 0.0;
        }
        self.indices.len() as f32 / self.positions.len() as f32
    }

    /// Expands the mesh back into a soup, one entry per corner.
    pub fn to_soup(&self) -> TriangleSoup {
        let corners = |i: &u32| *i as usize;
        TriangleSoup::new(
            self.indices.iter().map(corners).map(|i| self.positions[i]).collect(),
            self.indices.iter().map(corners).map(|i| self.texcoords[i]).collect(),
            (!self.normals.is_empty()).then(|| {
                self.indices
                    .iter()
                    .map(corners)
                    .map(|i| self.normals[i])
                    .collect()
            }),
        )
    }
}

impl TriangleMesh for IndexedMesh {
    fn from_triangles(triangles: Vec<Triangle>, facet_normals: Option<Vec<Vector3>>) -> Self {
        let soup = TriangleSoup::from_triangles(triangles, facet_normals);
        Self::from_soup(&soup, &IndexConfig::default())
    }

    fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn triangle(&self, index: usize) -> Triangle {
        let corner = |i: usize| self.positions[self.indices[3 * index + i] as usize];
        Triangle {
            p0: corner(0),
            p1: corner(1),
            p2: corner(2),
        }
    }
}
