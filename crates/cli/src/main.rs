use clap::Parser;

mod args;
mod index;
mod obj;

use args::{Args, Commands};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    match args.command {
        Commands::Index(args) => index::index_command(args),
    }
}
