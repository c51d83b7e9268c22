use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use crate::adapters::atomic_file::write_atomic;
use crate::core::errors::{Result, ReviewError};

/// Persisted set of session ids that have already run settings
/// initialization for this project.
///
/// Format: a JSON array of strings, e.g. `["3f2a…", "9bc1…"]`.
/// A missing or unreadable file is treated as empty. Callers are expected to
/// hold the event log lock around `contains` + `insert`.
pub struct FileSessionRegistry {
    path: PathBuf,
}

impl FileSessionRegistry {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.load().contains(session_id)
    }

    /// Record `session_id`. Returns `true` when it was not yet recorded.
    pub fn insert(&self, session_id: &str) -> Result<bool> {
        let mut sessions = self.load();
        if !sessions.insert(session_id.to_string()) {
            return Ok(false);
        }
        self.save(&sessions)?;
        Ok(true)
    }

    fn load(&self) -> BTreeSet<String> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return BTreeSet::new();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::debug!("ignoring corrupt session registry {}: {e}", self.path.display());
            BTreeSet::new()
        })
    }

    fn save(&self, sessions: &BTreeSet<String>) -> Result<()> {
        let json = serde_json::to_string_pretty(sessions).map_err(|e| {
            ReviewError::SessionRegistry {
                detail: format!("cannot serialize sessions: {e}"),
            }
        })?;
        write_atomic(&self.path, json.as_bytes()).map_err(|e| ReviewError::SessionRegistry {
            detail: format!("cannot write {}: {e}", self.path.display()),
        })
    }
}
