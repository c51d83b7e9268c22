pub mod commands;
pub mod context;
pub mod output;

use clap::{Parser, Subcommand};

/// Track file edits from an agentic coding host and gate work on a code review.
#[derive(Parser, Debug)]
#[command(name = "review-gate", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project root containing .claude/
    #[arg(long, global = true, env = "CLAUDE_PROJECT_DIR", default_value = ".")]
    pub project_dir: String,

    /// Plugin directory shipping the bundled rules/ documents
    #[arg(long, global = true, env = "CLAUDE_PLUGIN_ROOT")]
    pub plugin_root: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a file modification (reads a tool-use event on stdin)
    Track,

    /// Report files changed since the last review; exits 2 when a review is due
    Check,

    /// Write the default codeReview settings and install bundled rules
    Init,

    /// Show settings and files pending review
    Status,

    /// Show the event log
    Log {
        /// Show last N entries
        #[arg(long)]
        last: Option<usize>,
    },
}

/// How a successful command wants the process to exit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Done,
    /// Files are pending review; the caller must act before continuing.
    ReviewRequired,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Done => 0,
            Self::ReviewRequired => 2,
        }
    }
}
