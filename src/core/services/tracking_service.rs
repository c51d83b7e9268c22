use crate::config::settings::ReviewSettings;
use crate::core::models::hook_input::HookInput;

/// Tools whose use modifies a file on disk.
pub const MUTATING_TOOLS: &[&str] = &["Write", "Edit", "MultiEdit"];

/// The file a tool-use event should record, or `None` when the event is not
/// tracked.
///
/// An event is tracked only when it carries a session id, comes from a
/// mutating tool, names a file, review is enabled, and the file's extension
/// is configured.
pub fn tracked_file<'a>(input: &'a HookInput, settings: &ReviewSettings) -> Option<&'a str> {
    input.session_id()?;

    let tool = input.tool_name()?;
    if !MUTATING_TOOLS.contains(&tool) {
        return None;
    }

    let file = input.file_path()?;
    if !settings.enabled || !settings.tracks(file) {
        return None;
    }

    Some(file)
}
