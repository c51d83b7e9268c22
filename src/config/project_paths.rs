use std::path::{Path, PathBuf};

/// Directory under the project root that holds host configuration.
pub const CLAUDE_DIR: &str = ".claude";

/// File locations for one project, all derived from the project root.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub settings_file: PathBuf,
    pub log_file: PathBuf,
    pub sessions_file: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let claude_dir = root.join(CLAUDE_DIR);
        let state_dir = claude_dir.join("code-review");
        Self {
            settings_file: claude_dir.join("settings.json"),
            log_file: state_dir.join("event-log.jsonl"),
            sessions_file: state_dir.join("sessions.json"),
            root,
        }
    }

    /// Resolve a path from the settings file against the project root.
    /// Absolute paths are returned unchanged.
    pub fn resolve(&self, configured: &str) -> PathBuf {
        let path = Path::new(configured);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}
