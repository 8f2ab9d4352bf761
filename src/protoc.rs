//! Schema Compiler Invoker
//!
//! Runs `protoc` over the stored schema to (re-)generate the low-level
//! binding code inside the package directory.

use crate::error::{PipelineError, Result};
use crate::layout::ProjectLayout;
use crate::tool::{ToolInvocation, ToolRunner};

/// Name of the schema compiler executable looked up on the `PATH`.
pub const PROTOC: &str = "protoc";

/// Assemble the `protoc` command line for the project layout.
///
/// Generated code and type stubs are both directed at the package directory;
/// the upstream packaging has always kept them side by side.
pub fn protoc_invocation(layout: &ProjectLayout) -> ToolInvocation {
    let package_dir = layout.package_dir();
    ToolInvocation::new(PROTOC)
        .arg("--proto_path")
        .arg(layout.proto_dir().display().to_string())
        .arg("--python_out")
        .arg(package_dir.display().to_string())
        .arg("--pyi_out")
        .arg(package_dir.display().to_string())
        .arg(layout.schema_path().display().to_string())
        .current_dir(layout.root())
}

/// Compile the stored schema into binding code.
///
/// Fails without spawning anything if `protoc` is not on the `PATH`; fails
/// with the reconstructed command line if the compiler exits non-zero. Stale
/// outputs from earlier runs are not cleaned up first (compiler-dependent).
pub fn compile_schema(layout: &ProjectLayout, runner: &dyn ToolRunner) -> Result<()> {
    if runner.which(PROTOC).is_none() {
        return Err(PipelineError::ToolingMissing {
            tool: format!("The ProtoBuf compiler `{}`", PROTOC),
            hint: "Have you installed it on your system and does it reside on your PATH?"
                .to_string(),
        });
    }

    let invocation = protoc_invocation(layout);
    let code = runner.run(&invocation)?;
    if code != 0 {
        return Err(PipelineError::ToolingFailure {
            command: invocation.to_string(),
            code,
        });
    }

    tracing::info!(schema = %layout.schema_path().display(), "compiled schema");
    Ok(())
}
