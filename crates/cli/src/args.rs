use clap::{Parser, Subcommand};
use weldkit_mesh::{DEFAULT_TOLERANCE, SPARSE_GRID_MAX_SIZE};

#[derive(clap::Args, Debug)]
pub struct IndexArgs {
    pub stl_path: String,

    /// Largest per-component difference for two corners to be welded.
    #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f32,

    /// Cap on the number of grid cells along the longest side of the model.
    #[arg(long, default_value_t = SPARSE_GRID_MAX_SIZE)]
    pub max_grid_size: usize,

    /// Write the indexed mesh to this path as a Wavefront OBJ file.
    #[arg(short, long)]
    pub obj: Option<String>,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Weld an STL file into an indexed mesh.
    Index(IndexArgs),
}
