use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use weldkit_mesh::IndexedMesh;

/// Writes `mesh` as Wavefront OBJ. Every vertex carries a position, texture
/// coordinate and normal under the same (1-based) index.
pub fn write_obj<W: Write>(w: &mut W, mesh: &IndexedMesh) -> std::io::Result<()> {
    writeln!(w, "# {} vertices, {} triangles", mesh.vertex_count(), mesh.indices.len() / 3)?;
    for p in &mesh.positions {
        writeln!(w, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for t in &mesh.texcoords {
        writeln!(w, "vt {} {}", t.x, t.y)?;
    }
    for n in &mesh.normals {
        writeln!(w, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for triangle in mesh.indices.chunks_exact(3) {
        let [a, b, c] = [triangle[0] + 1, triangle[1] + 1, triangle[2] + 1];
        writeln!(w, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
    }
    Ok(())
}

pub fn write_obj_file<P: AsRef<Path>>(p: P, mesh: &IndexedMesh) -> std::io::Result<()> {
    let mut f = BufWriter::new(File::create(p)?);
    write_obj(&mut f, mesh)?;
    f.flush()
}
