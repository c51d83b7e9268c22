use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// A single line of the event log (JSON lines format).
///
/// The `event` field carries the variant tag, so each line reads as
/// `{"event":"file_modified","timestamp":"…","file":"…","tool":"…"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogRecord {
    /// A tracked tool wrote to `file`.
    FileModified {
        timestamp: DateTime<Utc>,
        file: String,
        tool: String,
    },
    /// A review was requested for `files`; everything before this line is
    /// considered reviewed.
    ReviewTriggered {
        timestamp: DateTime<Utc>,
        files: Vec<String>,
    },
}

impl LogRecord {
    pub fn file_modified(file: impl Into<String>, tool: impl Into<String>) -> Self {
        Self::FileModified {
            timestamp: now(),
            file: file.into(),
            tool: tool.into(),
        }
    }

    pub fn review_triggered(files: Vec<String>) -> Self {
        Self::ReviewTriggered {
            timestamp: now(),
            files,
        }
    }

    /// True for review markers.
    pub fn is_marker(&self) -> bool {
        matches!(self, Self::ReviewTriggered { .. })
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::FileModified { timestamp, .. } | Self::ReviewTriggered { timestamp, .. } => {
                *timestamp
            }
        }
    }
}

/// Current time at second resolution, so records serialize as
/// `2026-10-18T09:30:00Z`.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}
