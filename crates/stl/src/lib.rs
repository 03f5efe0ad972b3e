use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Read, Seek};
use std::path::Path;
use weldkit_mesh::{Triangle, TriangleMesh, Vector3};

const HEADER_SIZE: u64 = 80;
/// Normal, three corners and the attribute byte count.
const TRIANGLE_SIZE: u64 = 4 * 3 * 4 + 2;

fn read_vector<T: Read>(f: &mut T) -> std::io::Result<Vector3> {
    Ok(Vector3 {
        x: f.read_f32::<LittleEndian>()?,
        y: f.read_f32::<LittleEndian>()?,
        z: f.read_f32::<LittleEndian>()?,
    })
}

fn read_binary<M: TriangleMesh, T: Read + Seek>(f: &mut T) -> std::io::Result<M> {
    let len = f.seek(std::io::SeekFrom::End(0))?;

    // Binary files start with an 80 byte header with no defined structure.
    f.seek(std::io::SeekFrom::Start(HEADER_SIZE))?;

    let n_triangles = f.read_u32::<LittleEndian>()? as usize;

    // The count comes from the file; only reserve what the file can hold.
    let available = len.saturating_sub(HEADER_SIZE + 4) / TRIANGLE_SIZE;
    let capacity = n_triangles.min(available as usize);
    let mut triangles = Vec::<Triangle>::with_capacity(capacity);
    let mut normals = Vec::<Vector3>::with_capacity(capacity);
    for _ in 0..n_triangles {
        // Writers are free to leave the facet normal as (0, 0, 0) and rely on
        // counter-clockwise winding instead.
        normals.push(read_vector(f)?);
        triangles.push(Triangle {
            p0: read_vector(f)?,
            p1: read_vector(f)?,
            p2: read_vector(f)?,
        });
        // Attribute byte count, some applications keep color data here.
        let _attribute_byte_count = f.read_u16::<LittleEndian>()?;
    }

    let zero = Vector3::new(0.0, 0.0, 0.0);
    let facet_normals = if !normals.is_empty() && normals.iter().all(|n| *n != zero) {
        Some(normals)
    } else {
        if !normals.is_empty() {
            log::debug!("STL facet normals are incomplete, they will be recomputed");
        }
        None
    };

    log::trace!("read {} triangles from binary STL", triangles.len());
    Ok(M::from_triangles(triangles, facet_normals))
}

pub fn read_stl<M: TriangleMesh, P: AsRef<Path>>(p: P) -> std::io::Result<M> {
    let mut f = std::fs::File::open(p)?;
    read_binary(&mut f)
}

pub fn parse_stl<M: TriangleMesh>(data: &[u8]) -> std::io::Result<M> {
    let mut c = std::io::Cursor::new(data);
    read_binary(&mut c)
}

pub trait StlReader: Read {
    fn read_stl<M: TriangleMesh>(&mut self) -> std::io::Result<M>;
}

impl<T: Read + Seek> StlReader for T {
    fn read_stl<M: TriangleMesh>(&mut self) -> std::io::Result<M> {
        read_binary(self)
    }
}
