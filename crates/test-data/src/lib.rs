pub struct TestModel {
    pub bytes: &'static [u8],
    pub triangles: usize,
    /// Number of distinct (position, normal) corners in the model.
    pub unique_vertices: usize,
    pub model_size: f32,
}

pub const STL_CUBE: TestModel = TestModel {
    bytes: include_bytes!("../../../res/cube/cube-bin.stl"),
    triangles: 12,
    unique_vertices: 24,
    model_size: 20.0,
};

/// The same cube with every facet normal zeroed out, as some exporters write it.
pub const STL_CUBE_NO_NORMALS: TestModel = TestModel {
    bytes: include_bytes!("../../../res/cube/cube-no-normals-bin.stl"),
    triangles: 12,
    unique_vertices: 8,
    model_size: 20.0,
};
