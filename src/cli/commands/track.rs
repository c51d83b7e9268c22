use crate::adapters::event_log::jsonl_event_log::JsonlEventLog;
use crate::cli::context::ProjectContext;
use crate::core::errors::Result;
use crate::core::models::hook_input::HookInput;
use crate::core::models::log_record::LogRecord;
use crate::core::services::tracking_service;
use crate::core::traits::event_log::EventLog;

use super::settings_helpers;

/// Execute the `review-gate track` command.
///
/// Reads a tool-use event from stdin and records a `file_modified` event
/// when it qualifies. Always succeeds: a logging failure must not affect
/// the tool action being observed.
pub fn execute(ctx: &ProjectContext) -> Result<()> {
    record(ctx, &HookInput::from_stdin());
    Ok(())
}

/// Record `input` if it is tracked. Returns the appended record.
pub fn record(ctx: &ProjectContext, input: &HookInput) -> Option<LogRecord> {
    // Nothing to attribute the event to.
    let session_id = input.session_id()?;

    let load = settings_helpers::load_or_init(&ctx.paths, Some(session_id), ctx.plugin_root());
    let file = tracking_service::tracked_file(input, &load.settings)?;
    let tool = input.tool_name().unwrap_or_default();

    let entry = LogRecord::file_modified(file, tool);
    let log = JsonlEventLog::new(ctx.paths.log_file.clone());
    match log.append(&entry) {
        Ok(()) => Some(entry),
        Err(e) => {
            tracing::debug!("could not record {file}: {e}");
            None
        }
    }
}
