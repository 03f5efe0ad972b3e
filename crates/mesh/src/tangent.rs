//! Per-vertex tangent frames for normal mapping.
//!
//! Tangents follow the texture gradient of each triangle: the tangent points
//! along increasing `u` and the bitangent along increasing `v`. Each triangle
//! corner gets its own estimate, estimates are averaged per vertex and the
//! result is made orthogonal to the vertex normal.

use cgmath::InnerSpace;

use crate::{frame::pack_tbn, geometry::unit_or_zero, Vector2, Vector3, Vector4};

/// Tangent handed out when no tangent can be derived, for instance because
/// all three texture coordinates of a triangle coincide.
pub const DEFAULT_TANGENT: Vector4 = Vector4 {
    x: 0.0,
    y: 0.0,
    z: 0.0,
    w: 1.0,
};

/// Tangent data for every vertex of an indexed mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TangentSpace {
    /// `xyz` is the tangent, `w` is `1.0` or `-1.0` and gives the handedness of
    /// the bitangent: `bitangent = w * cross(normal, tangent)`.
    pub tangents: Vec<Vector4>,
    /// The tangent frame of each vertex as a quantised quaternion, see
    /// [`crate::pack_tbn`].
    pub packed_tbn: Vec<u32>,
}

impl TangentSpace {
    pub fn compute(
        positions: &[Vector3],
        texcoords: &[Vector2],
        normals: &[Vector3],
        indices: &[u32],
    ) -> Self {
        assert_eq!(positions.len(), texcoords.len());
        assert_eq!(positions.len(), normals.len());

        let (corner_tangents, corner_bitangents) =
            corner_tangent_space(positions, texcoords, indices);
        let (tangents, bitangents) = vertex_tangent_space(
            indices,
            &corner_tangents,
            &corner_bitangents,
            positions.len(),
        );

        let mut degenerate = 0;
        let tangents: Vec<Vector4> = normals
            .iter()
            .zip(tangents.iter().zip(bitangents.iter()))
            .map(|(n, (t, b))| {
                let (t, b) = orthogonalize(n, t, b);
                let tangent = tangent_4d(n, &t, &b);
                if has_nan(&tangent) {
                    degenerate += 1;
                    DEFAULT_TANGENT
                } else {
                    tangent
                }
            })
            .collect();

        if degenerate > 0 {
            log::warn!(
                "{degenerate} of {} vertices have no usable texture gradient, using default tangent",
                tangents.len()
            );
        }

        let packed_tbn = tangents
            .iter()
            .zip(normals)
            .map(|(t, n)| pack_tbn(t, n))
            .collect();

        Self {
            tangents,
            packed_tbn,
        }
    }
}

fn is_finite(v: &Vector3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

fn has_nan(v: &Vector4) -> bool {
    v.x.is_nan() || v.y.is_nan() || v.z.is_nan() || v.w.is_nan()
}

/// Computes a unit tangent and bitangent for every triangle corner, in index
/// buffer order.
///
/// Each corner uses the two triangle edges leaving it. Triangles whose
/// texture coordinates have no area produce NaN.
pub fn corner_tangent_space(
    positions: &[Vector3],
    texcoords: &[Vector2],
    indices: &[u32],
) -> (Vec<Vector3>, Vec<Vector3>) {
    let mut tangents = Vec::with_capacity(indices.len());
    let mut bitangents = Vec::with_capacity(indices.len());

    for triangle in indices.chunks_exact(3) {
        for corner in 0..3 {
            let i0 = triangle[corner] as usize;
            let i1 = triangle[(corner + 1) % 3] as usize;
            let i2 = triangle[(corner + 2) % 3] as usize;

            let e1 = positions[i1] - positions[i0];
            let e2 = positions[i2] - positions[i0];
            let d1 = texcoords[i1] - texcoords[i0];
            let d2 = texcoords[i2] - texcoords[i0];

            let r = (d1.x * d2.y - d1.y * d2.x).recip();
            tangents.push(((e1 * d2.y - e2 * d1.y) * r).normalize());
            bitangents.push(((e2 * d1.x - e1 * d2.x) * r).normalize());
        }
    }

    (tangents, bitangents)
}

/// Averages corner tangents and bitangents onto the vertices they belong to.
///
/// Corners of degenerate triangles carry NaN and are left out, so they do not
/// spoil their neighbours. Vertices with no usable corner get zero vectors.
pub fn vertex_tangent_space(
    indices: &[u32],
    corner_tangents: &[Vector3],
    corner_bitangents: &[Vector3],
    vertex_count: usize,
) -> (Vec<Vector3>, Vec<Vector3>) {
    assert_eq!(indices.len(), corner_tangents.len());
    assert_eq!(indices.len(), corner_bitangents.len());

    let zero = Vector3::new(0.0, 0.0, 0.0);
    let mut tangents = vec![zero; vertex_count];
    let mut bitangents = vec![zero; vertex_count];
    let mut counts = vec![0u32; vertex_count];

    for ((&index, t), b) in indices.iter().zip(corner_tangents).zip(corner_bitangents) {
        if !is_finite(t) || !is_finite(b) {
            continue;
        }
        let index = index as usize;
        tangents[index] += *t;
        bitangents[index] += *b;
        counts[index] += 1;
    }

    for ((t, b), &count) in tangents.iter_mut().zip(bitangents.iter_mut()).zip(&counts) {
        if count > 0 {
            let scale = (count as f32).recip();
            *t *= scale;
            *b *= scale;
        }
    }

    (tangents, bitangents)
}

/// Gram-Schmidt: makes the tangent orthogonal to the normal and the bitangent
/// orthogonal to both, keeping the side of the bitangent.
///
/// The normal does not need to be unit length; authored normals often are not.
pub fn orthogonalize(normal: &Vector3, tangent: &Vector3, bitangent: &Vector3) -> (Vector3, Vector3) {
    let (n, t, b) = (unit_or_zero(*normal), *tangent, *bitangent);
    let t = (t - n * n.dot(t)).normalize();
    let b = (b - n * n.dot(b) - t * t.dot(b)).normalize();
    (t, b)
}

/// Packs the tangent with the handedness of the frame.
///
/// `w` is `-1.0` when the bitangent points away from `cross(normal, tangent)`
/// and `1.0` otherwise.
pub fn tangent_4d(normal: &Vector3, tangent: &Vector3, bitangent: &Vector3) -> Vector4 {
    let w = if normal.cross(*tangent).dot(*bitangent) < 0.0 {
        -1.0
    } else {
        1.0
    };
    tangent.extend(w)
}
