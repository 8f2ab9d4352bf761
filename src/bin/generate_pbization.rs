//! Pbization Generation CLI
//!
//! Runs the meta-model-driven generator to regenerate the adaptation layer.
//! The generator's own exit code is passed through unchanged.

use std::path::PathBuf;

use aas_protobuf_sync::generate::{generate_pbization, AasCoreCodegen};
use aas_protobuf_sync::{ProcessRunner, ProjectLayout};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "generate-pbization")]
#[command(about = "Regenerate the pbization layer from the meta-model")]
struct Cli {
    /// Root of the binding project
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let layout = ProjectLayout::new(cli.root);
    let runner = ProcessRunner;
    let engine = AasCoreCodegen::new(&runner);

    match generate_pbization(&layout, &runner, &engine) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
