//! Schema Update CLI
//!
//! Downloads the schema definition from the upstream repository and stores
//! it with a provenance header.

use std::path::PathBuf;

use aas_protobuf_sync::fetch::{fetch_schema, DEFAULT_REVISION};
use aas_protobuf_sync::ProjectLayout;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "update-schema")]
#[command(about = "Download the schema definition from the upstream repository")]
struct Cli {
    /// Revision hash or branch name on
    /// https://github.com/aas-core-works/aas-core-protobuf
    #[arg(long, default_value = DEFAULT_REVISION)]
    revision: String,

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

    if let Err(e) = fetch_schema(&layout, &cli.revision) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
