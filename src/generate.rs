//! Adaptation-Layer Generator
//!
//! Drives the meta-model-based generator that produces the pbization layer:
//! the glue converting between in-memory model instances and the compiled
//! binding types. The generator itself is a black box; this module only
//! assembles its configuration and passes its result code through.

use std::path::PathBuf;

use crate::error::{PipelineError, Result};
use crate::layout::ProjectLayout;
use crate::tool::{ToolInvocation, ToolRunner};

/// Python module shipping the meta-model definition.
pub const META_MODEL_MODULE: &str = "aas_core_meta.v3";

/// Executable name of the generation engine.
pub const GENERATOR: &str = "aas-core-codegen";

/// Generation target understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Pbization code for the ProtoBuf bindings.
    PythonProtobuf,
}

impl Target {
    pub fn as_arg(&self) -> &'static str {
        match self {
            Target::PythonProtobuf => "python_protobuf",
        }
    }
}

/// Configuration bundle handed to the generation engine.
///
/// The engine contract: given the same bundle and the same meta-model
/// content, it deterministically rewrites the full contents of
/// `output_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    pub model_path: PathBuf,
    pub target: Target,
    pub snippets_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl GenerateConfig {
    /// Assemble the bundle for the project layout, resolving the meta-model
    /// through `runner`.
    pub fn for_layout(layout: &ProjectLayout, runner: &dyn ToolRunner) -> Result<Self> {
        Ok(Self {
            model_path: meta_model_path(runner)?,
            target: Target::PythonProtobuf,
            snippets_dir: layout.snippets_dir(),
            output_dir: layout.package_dir(),
        })
    }
}

/// Resolve the file-system location of the meta-model module.
///
/// The module is supplied by an external dependency of the generator's
/// environment; asking the interpreter is the only authoritative way to
/// locate it. An irresolvable meta-model is a broken precondition of the
/// whole generation stage, not something to recover from.
pub fn meta_model_path(runner: &dyn ToolRunner) -> Result<PathBuf> {
    let probe = ToolInvocation::new("python3").arg("-c").arg(format!(
        "import {module} as m; print(m.__file__ or '')",
        module = META_MODEL_MODULE
    ));

    let (code, stdout) = runner.run_capture(&probe)?;
    if code != 0 {
        return Err(PipelineError::MetaModelUnresolved {
            module: META_MODEL_MODULE.to_string(),
            reason: format!("interpreter probe exited with code {}", code),
        });
    }

    let path = stdout.trim();
    if path.is_empty() {
        return Err(PipelineError::MetaModelUnresolved {
            module: META_MODEL_MODULE.to_string(),
            reason: "the module reports no file location".to_string(),
        });
    }

    Ok(PathBuf::from(path))
}

/// The generation engine as a capability: `run(config) -> exit_code`.
pub trait GeneratorEngine {
    fn run(&self, config: &GenerateConfig) -> Result<i32>;
}

/// Production engine: the `aas-core-codegen` command-line tool.
pub struct AasCoreCodegen<'r> {
    runner: &'r dyn ToolRunner,
}

impl<'r> AasCoreCodegen<'r> {
    pub fn new(runner: &'r dyn ToolRunner) -> Self {
        Self { runner }
    }

    fn invocation(config: &GenerateConfig) -> ToolInvocation {
        ToolInvocation::new(GENERATOR)
            .arg("--model_path")
            .arg(config.model_path.display().to_string())
            .arg("--target")
            .arg(config.target.as_arg())
            .arg("--snippets_dir")
            .arg(config.snippets_dir.display().to_string())
            .arg("--output_dir")
            .arg(config.output_dir.display().to_string())
    }
}

impl GeneratorEngine for AasCoreCodegen<'_> {
    fn run(&self, config: &GenerateConfig) -> Result<i32> {
        self.runner.run(&Self::invocation(config))
    }
}

/// Regenerate the pbization layer.
///
/// Returns the engine's result code unchanged; classifying it is the
/// caller's (i.e. the release process's) business.
pub fn generate_pbization(
    layout: &ProjectLayout,
    runner: &dyn ToolRunner,
    engine: &dyn GeneratorEngine,
) -> Result<i32> {
    let config = GenerateConfig::for_layout(layout, runner)?;
    tracing::info!(
        model = %config.model_path.display(),
        output = %config.output_dir.display(),
        "generating pbization layer"
    );
    engine.run(&config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_invocation_arguments() {
        let config = GenerateConfig {
            model_path: PathBuf::from("/site-packages/aas_core_meta/v3.py"),
            target: Target::PythonProtobuf,
            snippets_dir: PathBuf::from("/srv/bindings/snippets"),
            output_dir: PathBuf::from("/srv/bindings/aas_core3_protobuf"),
        };
        let inv = AasCoreCodegen::invocation(&config);

        assert_eq!(inv.program, "aas-core-codegen");
        assert_eq!(
            inv.args,
            vec![
                "--model_path",
                "/site-packages/aas_core_meta/v3.py",
                "--target",
                "python_protobuf",
                "--snippets_dir",
                "/srv/bindings/snippets",
                "--output_dir",
                "/srv/bindings/aas_core3_protobuf",
            ]
        );
    }

    #[test]
    fn test_target_argument_spelling() {
        assert_eq!(Target::PythonProtobuf.as_arg(), "python_protobuf");
    }
}
