//! Version Consistency Checker
//!
//! The binding package declares its version twice: as the `__version__`
//! attribute in the package init file, and as `[project] version` in the
//! distribution metadata. The two are maintained by hand and drift when only
//! one gets bumped; this check gates a release on exact agreement.

use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use crate::error::{PipelineError, Result};
use crate::layout::ProjectLayout;

/// Declared distribution name the metadata must belong to.
pub const DISTRIBUTION_NAME: &str = "aas-core3.0-protobuf";

#[derive(Debug, Deserialize)]
struct PyProject {
    project: ProjectTable,
}

#[derive(Debug, Deserialize)]
struct ProjectTable {
    name: String,
    version: String,
}

/// Read the `__version__` attribute declared in the package init file.
pub fn package_version(init_file: &Path) -> Result<String> {
    let source = std::fs::read_to_string(init_file)?;
    let pattern = Regex::new(r#"(?m)^__version__\s*=\s*"([^"]*)""#).unwrap();
    match pattern.captures(&source) {
        Some(caps) => Ok(caps[1].to_string()),
        None => Err(PipelineError::InvalidMetadata {
            path: init_file.to_path_buf(),
            reason: "no __version__ attribute found".to_string(),
        }),
    }
}

/// Read the version recorded in the distribution metadata, verifying it
/// belongs to the expected distribution.
///
/// This is deliberately an independent oracle: the metadata is looked up by
/// the declared distribution name, never derived from the package attribute.
pub fn distribution_version(pyproject: &Path, distribution: &str) -> Result<String> {
    let source = std::fs::read_to_string(pyproject)?;
    let metadata: PyProject = toml::from_str(&source)?;
    if metadata.project.name != distribution {
        return Err(PipelineError::InvalidMetadata {
            path: pyproject.to_path_buf(),
            reason: format!(
                "expected distribution {:?}, but the metadata declares {:?}",
                distribution, metadata.project.name
            ),
        });
    }
    Ok(metadata.project.version)
}

/// Verify that both version declarations agree byte for byte.
///
/// No normalization: `1.0.0` and `1.0.0rc1` are a mismatch, and so would be
/// any semantically-equal-but-differently-spelled pair.
pub fn check_version_consistent(layout: &ProjectLayout) -> Result<()> {
    let init_file = layout.package_init();
    let metadata_file = layout.pyproject_path();

    let package_version = package_version(&init_file)?;
    let metadata_version = distribution_version(&metadata_file, DISTRIBUTION_NAME)?;

    if package_version != metadata_version {
        return Err(PipelineError::VersionMismatch {
            package_version,
            init_file,
            metadata_version,
            metadata_file,
        });
    }

    Ok(())
}
