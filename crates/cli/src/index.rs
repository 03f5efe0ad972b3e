use anyhow::{ensure, Context};
use weldkit_mesh::{IndexConfig, IndexedMesh, TriangleSoup, MAX_SUBDIVISIONS};

use crate::{args, obj};

pub fn index_command(args: args::IndexArgs) -> anyhow::Result<()> {
    let config = config_from_args(&args)?;

    let soup = weldkit_stl::read_stl::<TriangleSoup, _>(&args.stl_path)
        .with_context(|| format!("failed to read {}", args.stl_path))?;
    log::info!(
        "loaded {} triangles from {}",
        soup.vertex_count() / 3,
        args.stl_path
    );

    let mesh = IndexedMesh::from_soup(&soup, &config);
    println!("{}", summary(&soup, &mesh));

    if let Some(path) = &args.obj {
        obj::write_obj_file(path, &mesh).with_context(|| format!("failed to write {path}"))?;
        log::info!("wrote {path}");
    }
    Ok(())
}

fn config_from_args(args: &args::IndexArgs) -> anyhow::Result<IndexConfig> {
    ensure!(
        args.tolerance.is_finite() && args.tolerance >= 0.0,
        "tolerance must be a non-negative number, got {}",
        args.tolerance
    );
    ensure!(
        (1..=MAX_SUBDIVISIONS).contains(&args.max_grid_size),
        "max grid size must be between 1 and {MAX_SUBDIVISIONS}, got {}",
        args.max_grid_size
    );
    Ok(IndexConfig {
        max_grid_size: args.max_grid_size,
        ..IndexConfig::with_tolerance(args.tolerance)
    })
}

fn summary(soup: &TriangleSoup, mesh: &IndexedMesh) -> String {
    let (min, max) = (mesh.aabb.min, mesh.aabb.max);
    let mut s = format!(
        "corners: {}\nvertices: {}\nweld ratio: {:.3}\n",
        soup.vertex_count(),
        mesh.vertex_count(),
        mesh.weld_ratio()
    );
    if mesh.aabb.is_empty() {
        s.push_str("bounds: empty");
    } else {
        s.push_str(&format!(
            "bounds: ({}, {}, {}) - ({}, {}, {})",
            min.x, min.y, min.z, max.x, max.y, max.z
        ));
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use weldkit_test_data::STL_CUBE_NO_NORMALS;

    fn index_args(stl_path: String) -> args::IndexArgs {
        args::IndexArgs {
            stl_path,
            tolerance: 1e-4,
            max_grid_size: 1024,
            obj: None,
        }
    }

    #[test]
    fn rejects_negative_tolerance() {
        let mut args = index_args("cube.stl".into());
        args.tolerance = -1.0;
        assert!(config_from_args(&args).is_err());
        args.tolerance = f32::NAN;
        assert!(config_from_args(&args).is_err());
    }

    #[test]
    fn rejects_empty_grid() {
        let mut args = index_args("cube.stl".into());
        args.max_grid_size = 0;
        assert!(config_from_args(&args).is_err());
    }

    #[test]
    fn rejects_oversized_grid() {
        let mut args = index_args("cube.stl".into());
        args.max_grid_size = MAX_SUBDIVISIONS + 1;
        assert!(config_from_args(&args).is_err());
        args.max_grid_size = MAX_SUBDIVISIONS;
        assert!(config_from_args(&args).is_ok());
    }

    #[test]
    fn config_keeps_the_margin() {
        let config = config_from_args(&index_args("cube.stl".into())).unwrap();
        assert_eq!(config.max_grid_size, 1024);
        assert_eq!(config.margin_factor, IndexConfig::default().margin_factor);
        float_eq::assert_float_eq!(config.tolerance, 1e-4, abs <= 1e-9);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.stl");
        let err = index_command(index_args(path.display().to_string())).unwrap_err();
        assert!(err.to_string().starts_with("failed to read"));
    }

    #[test]
    fn cube_to_obj() {
        let dir = tempfile::tempdir().unwrap();
        let stl = dir.path().join("cube.stl");
        let obj = dir.path().join("cube.obj");
        std::fs::write(&stl, STL_CUBE_NO_NORMALS.bytes).unwrap();

        let mut args = index_args(stl.display().to_string());
        args.obj = Some(obj.display().to_string());
        index_command(args).unwrap();

        let text = std::fs::read_to_string(&obj).unwrap();
        let count = |prefix: &str| text.lines().filter(|l| l.starts_with(prefix)).count();
        assert_eq!(count("v "), STL_CUBE_NO_NORMALS.unique_vertices);
        assert_eq!(count("vn "), STL_CUBE_NO_NORMALS.unique_vertices);
        assert_eq!(count("f "), STL_CUBE_NO_NORMALS.triangles);
    }

    #[test]
    fn summary_lists_counts_and_bounds() {
        let soup = weldkit_stl::parse_stl::<TriangleSoup>(STL_CUBE_NO_NORMALS.bytes).unwrap();
        let mesh = IndexedMesh::from_soup(&soup, &IndexConfig::default());
        assert_eq!(
            summary(&soup, &mesh),
            "corners: 36\nvertices: 8\nweld ratio: 4.500\nbounds: (0, 0, 0) - (20, 20, 20)"
        );
    }

    #[test]
    fn summary_of_nothing() {
        let soup = TriangleSoup::default();
        let mesh = IndexedMesh::from_soup(&soup, &IndexConfig::default());
        assert!(summary(&soup, &mesh).ends_with("bounds: empty"));
    }
}
