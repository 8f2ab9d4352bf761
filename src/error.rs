//! Error types for the synchronization pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Pipeline errors
#[derive(Error, Debug)]
pub enum PipelineError {
    // Surfaces the transport's own message; the fetcher adds no framing.
    #[error("{0}")]
    Network(#[from] Box<ureq::Error>),

    #[error("{tool} could not be found on your PATH. {hint}")]
    ToolingMissing { tool: String, hint: String },

    #[error("Failed to run with exit code {code}: {command}")]
    ToolingFailure { command: String, code: i32 },

    #[error(
        "The version in {init_file:?} is: {package_version:?}, \
         but the version in {metadata_file:?} is: {metadata_version:?}"
    )]
    VersionMismatch {
        package_version: String,
        init_file: PathBuf,
        metadata_version: String,
        metadata_file: PathBuf,
    },

    #[error("could not resolve the meta-model module {module}: {reason}")]
    MetaModelUnresolved { module: String, reason: String },

    #[error("invalid packaging metadata in {path:?}: {reason}")]
    InvalidMetadata { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl From<ureq::Error> for PipelineError {
    fn from(err: ureq::Error) -> Self {
        PipelineError::Network(Box::new(err))
    }
}
