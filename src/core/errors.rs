use std::path::PathBuf;

/// All domain errors for review-gate.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error(
        "Project directory not found: {path}\n\n  \
         review-gate runs against a project root containing .claude/.\n\n  \
         Solutions:\n    \
         → Run from the project root\n    \
         → Pass --project-dir <DIR>\n    \
         → Or set CLAUDE_PROJECT_DIR"
    )]
    ProjectDirNotFound { path: PathBuf },

    #[error("Event log error at {path}: {detail}")]
    EventLog { path: PathBuf, detail: String },

    #[error(
        "Invalid settings in {path}: {detail}\n\n  \
         Expected a JSON object. review-gate reads the \"codeReview\" key:\n    \
         {{ \"codeReview\": {{ \"enabled\": true, \"fileExtensions\": [\"py\"] }} }}"
    )]
    InvalidSettings { path: PathBuf, detail: String },

    #[error(
        "Code review is already configured in {path}\n\n  \
         Edit the \"codeReview\" section directly, or remove it and run\n  \
         'review-gate init' again to restore the defaults."
    )]
    AlreadyInitialized { path: PathBuf },

    #[error("Session registry error: {detail}")]
    SessionRegistry { detail: String },

    #[error("Rule install failed for {target}: {detail}")]
    RuleInstall { target: PathBuf, detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ReviewError>;
