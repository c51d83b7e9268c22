use std::io::Write;

use crate::adapters::event_log::jsonl_event_log::JsonlEventLog;
use crate::cli::Outcome;
use crate::cli::context::ProjectContext;
use crate::config::settings::ReviewSettings;
use crate::core::errors::Result;
use crate::core::models::hook_input::HookInput;
use crate::core::services::review_service;

use super::settings_helpers;

/// Execute the `review-gate check` command.
///
/// When files changed since the last review, records a new review marker,
/// writes delegation instructions to stderr and the bare file list to
/// stdout, and returns [`Outcome::ReviewRequired`].
pub fn execute(ctx: &ProjectContext) -> Result<Outcome> {
    let input = HookInput::from_stdin();
    let load = settings_helpers::load_or_init(&ctx.paths, input.session_id(), ctx.plugin_root());
    tracing::debug!("settings source: {:?}", load.source);

    let Some(pending) = pending_review(ctx, &load.settings)? else {
        return Ok(Outcome::Done);
    };

    report(
        &load.settings,
        &pending,
        &mut std::io::stderr().lock(),
        &mut std::io::stdout().lock(),
    )?;

    Ok(Outcome::ReviewRequired)
}

/// Write the instruction block to `err` and the bare file list to `out`.
/// Write failures are returned, never panicked on.
pub fn report(
    settings: &ReviewSettings,
    pending: &[String],
    err: &mut impl Write,
    out: &mut impl Write,
) -> Result<()> {
    write!(err, "{}", instructions(settings, pending))?;
    err.flush()?;

    for file in pending {
        writeln!(out, "{file}")?;
    }
    out.flush()?;
    Ok(())
}

/// Trigger a review if one is due. `None` when disabled or nothing changed.
pub fn pending_review(ctx: &ProjectContext, settings: &ReviewSettings) -> Result<Option<Vec<String>>> {
    if !settings.enabled {
        return Ok(None);
    }
    let log = JsonlEventLog::new(ctx.paths.log_file.clone());
    review_service::trigger_review(&log)
}

/// The instruction block handed back to the host's agent.
pub fn instructions(settings: &ReviewSettings, pending: &[String]) -> String {
    let mut text = format!(
        "CODE REVIEW REQUIRED: {} file(s) changed since the last review.\n\n\
         Before continuing, delegate to the code-review agent. Ask it to review\n\
         the files below against the project rules in {}",
        pending.len(),
        settings.rules_file,
    );
    if !settings.language_specific_rules.is_empty() {
        text.push_str("\nand the language-specific rules that apply to each file");
    }
    text.push_str(
        ".\nAddress every issue it reports, then continue with the task.\n\nFiles to review:\n",
    );
    for file in pending {
        text.push_str(&format!("- {file}\n"));
    }
    text
}
