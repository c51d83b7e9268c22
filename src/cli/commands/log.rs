use colored::Colorize;

use crate::adapters::event_log::jsonl_event_log::JsonlEventLog;
use crate::cli::context::ProjectContext;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::log_record::LogRecord;
use crate::core::traits::event_log::EventLog;

/// Execute the `review-gate log` command.
///
/// Displays the event log, optionally limited to the last N entries.
pub fn execute(ctx: &ProjectContext, last: Option<usize>) -> Result<()> {
    let log = JsonlEventLog::new(ctx.paths.log_file.clone());
    // A predicate that never matches yields the whole log.
    let entries = log.scan_since(|_| false)?;

    if entries.is_empty() {
        output::header("review-gate log");
        output::warning("No events recorded");
        return Ok(());
    }

    let skip = last.map_or(0, |n| entries.len().saturating_sub(n));
    let display = &entries[skip..];

    output::header(&format!("review-gate log ({} entries)", display.len()));
    println!();

    for entry in display {
        println!("{}", format_entry(entry));
    }

    Ok(())
}

/// Format a single log record as a `timestamp │ event │ files` row.
fn format_entry(entry: &LogRecord) -> String {
    let date = entry.timestamp().format("%Y-%m-%d %H:%M:%S").to_string();
    let (event, files, detail) = match entry {
        LogRecord::FileModified { file, tool, .. } => {
            ("modified".green().to_string(), file.clone(), tool.dimmed().to_string())
        }
        LogRecord::ReviewTriggered { files, .. } => (
            "review".cyan().to_string(),
            files.join(", "),
            format!("{} file(s)", files.len()).dimmed().to_string(),
        ),
    };

    let separator = "│".dimmed();
    format!("  {} {separator} {:<10} {separator} {} {}", date.dimmed(), event, files, detail)
}
