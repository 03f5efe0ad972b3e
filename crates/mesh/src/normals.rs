use cgmath::InnerSpace;

use crate::{geometry::unit_or_zero, IndexedMesh, Vector3};

/// Computes smooth vertex normals for an indexed triangle list.
///
/// Every triangle adds its unit face normal, taken at each corner from the two
/// edges leaving that corner, to each of its three vertices. The sums are
/// normalised at the end. Contributions are not weighted by area or angle.
/// Vertices touched only by zero-area triangles are left as zero vectors.
pub fn compute_smooth_normals(positions: &[Vector3], indices: &[u32]) -> Vec<Vector3> {
    let mut normals = vec![Vector3::new(0.0, 0.0, 0.0); positions.len()];

    for triangle in indices.chunks_exact(3) {
        for corner in 0..3 {
            let i = triangle[corner] as usize;
            let j = triangle[(corner + 1) % 3] as usize;
            let k = triangle[(corner + 2) % 3] as usize;
            let a = positions[j] - positions[i];
            let b = positions[k] - positions[i];
            let face = a.cross(b).normalize();
            // Zero-area triangles have no direction to contribute.
            if face.x.is_finite() && face.y.is_finite() && face.z.is_finite() {
                normals[i] += face;
            }
        }
    }

    for n in normals.iter_mut() {
        *n = unit_or_zero(*n);
    }
    normals
}

/// Fills in smooth normals if the mesh has none.
///
/// Returns true if normals were synthesised.
pub fn ensure_normals(mesh: &mut IndexedMesh) -> bool {
    if !mesh.normals.is_empty() {
        return false;
    }
    mesh.normals = compute_smooth_normals(&mesh.positions, &mesh.indices);
    log::debug!("synthesised {} vertex normals", mesh.normals.len());
    true
}
