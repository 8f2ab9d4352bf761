//! Version Consistency CLI
//!
//! Pre-release gate: verifies that the package's `__version__` attribute and
//! the distribution metadata declare the same version.

use std::path::PathBuf;

use aas_protobuf_sync::version_check::check_version_consistent;
use aas_protobuf_sync::ProjectLayout;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "check-version")]
#[command(about = "Verify that both declared package versions coincide")]
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

    if let Err(e) = check_version_consistent(&layout) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
