//! Conventional file-system layout of the binding project
//!
//! All four pipeline stages agree on a handful of well-known paths under a
//! single project root. Nothing here is configurable beyond the root itself;
//! the layout is a convention shared with the packaging setup.

use std::path::{Path, PathBuf};

/// Directory name of the generated binding package.
pub const PACKAGE_DIR: &str = "aas_core3_protobuf";

/// Fixed paths of the binding project, resolved under one root.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    /// Create a layout rooted at `root` (resolves relative paths against the
    /// current working directory).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root: PathBuf = root.into();
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir().unwrap_or_default().join(root)
        };
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the stored schema.
    pub fn proto_dir(&self) -> PathBuf {
        self.root.join("proto")
    }

    /// The locally stored schema document.
    pub fn schema_path(&self) -> PathBuf {
        self.proto_dir().join("types.proto")
    }

    /// Hand-written fragments merged into the generated pbization code.
    pub fn snippets_dir(&self) -> PathBuf {
        self.root.join("snippets")
    }

    /// The generated binding package; both `protoc` and the pbization
    /// generator write here.
    pub fn package_dir(&self) -> PathBuf {
        self.root.join(PACKAGE_DIR)
    }

    /// The package init file carrying the `__version__` attribute.
    pub fn package_init(&self) -> PathBuf {
        self.package_dir().join("__init__.py")
    }

    /// Distribution metadata of the binding package.
    pub fn pyproject_path(&self) -> PathBuf {
        self.root.join("pyproject.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_hang_off_root() {
        let layout = ProjectLayout::new("/srv/bindings");
        assert_eq!(
            layout.schema_path(),
            PathBuf::from("/srv/bindings/proto/types.proto")
        );
        assert_eq!(
            layout.package_init(),
            PathBuf::from("/srv/bindings/aas_core3_protobuf/__init__.py")
        );
        assert_eq!(
            layout.pyproject_path(),
            PathBuf::from("/srv/bindings/pyproject.toml")
        );
    }

    #[test]
    fn test_relative_root_is_anchored() {
        let layout = ProjectLayout::new(".");
        assert!(layout.root().is_absolute());
    }
}
