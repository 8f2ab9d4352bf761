//! Schema Compiler CLI
//!
//! Runs `protoc` to (re-)generate the low-level binding code from the stored
//! schema.

use std::path::PathBuf;

use aas_protobuf_sync::protoc::compile_schema;
use aas_protobuf_sync::{ProcessRunner, ProjectLayout};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "run-protoc")]
#[command(about = "Regenerate the binding code from the stored schema")]
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

    if let Err(e) = compile_schema(&layout, &ProcessRunner) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
