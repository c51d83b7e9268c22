use std::path::{Path, PathBuf};

use crate::config::project_paths::ProjectPaths;
use crate::core::errors::{Result, ReviewError};

/// Resolved locations for one invocation.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub paths: ProjectPaths,
    pub plugin_root: Option<PathBuf>,
}

impl ProjectContext {
    /// Resolve the project and plugin directories from the CLI/environment.
    ///
    /// The project directory must exist; an empty plugin root counts as unset.
    pub fn resolve(project_dir: &str, plugin_root: Option<&str>) -> Result<Self> {
        let root = PathBuf::from(project_dir);
        if !root.is_dir() {
            return Err(ReviewError::ProjectDirNotFound { path: root });
        }

        Ok(Self {
            paths: ProjectPaths::new(root),
            plugin_root: plugin_root.filter(|p| !p.is_empty()).map(PathBuf::from),
        })
    }

    pub fn plugin_root(&self) -> Option<&Path> {
        self.plugin_root.as_deref()
    }
}
