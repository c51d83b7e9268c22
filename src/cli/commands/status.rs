use crate::adapters::event_log::jsonl_event_log::JsonlEventLog;
use crate::cli::context::ProjectContext;
use crate::cli::output;
use crate::config::settings::{self, ReviewSettings};
use crate::core::errors::Result;
use crate::core::services::review_service;

/// Execute the `review-gate status` command.
///
/// Read-only: never initializes settings and never records a review marker.
pub fn execute(ctx: &ProjectContext) -> Result<()> {
    let configured = settings::load(&ctx.paths.settings_file);
    let source = if configured.is_some() {
        ctx.paths.settings_file.display().to_string()
    } else {
        "built-in defaults (not configured)".to_string()
    };
    let settings = configured.unwrap_or_else(ReviewSettings::default);
    let log = JsonlEventLog::new(ctx.paths.log_file.clone());

    output::header("review-gate status");
    output::field("Settings", &source);
    output::field(
        "Review",
        if settings.enabled { "enabled" } else { "disabled" },
    );
    output::field("Extensions", &settings.file_extensions.join(", "));
    output::field("Rules", &settings.rules_file);
    output::field("Event log", &log.path().display().to_string());

    let pending = review_service::peek_pending(&log)?;

    output::header(&format!("Pending review ({})", pending.len()));
    if pending.is_empty() {
        output::success("Nothing changed since the last review");
    } else {
        for file in &pending {
            output::bullet(file);
        }
    }

    Ok(())
}
