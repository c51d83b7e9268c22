use std::io::Read;

use serde::Deserialize;

/// The JSON payload a coding-assistant host sends to a hook on stdin.
///
/// Only the fields review-gate needs are modelled; anything else in the
/// payload is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub tool_input: Option<ToolInput>,
}

/// The `tool_input` object of a tool-use event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolInput {
    #[serde(default)]
    pub file_path: Option<String>,
}

impl HookInput {
    /// Parse a payload. Empty or malformed input yields an input with every
    /// field absent, which every caller treats as a no-op.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::default();
        }
        match serde_json::from_str(trimmed) {
            Ok(input) => input,
            Err(e) => {
                tracing::debug!("ignoring malformed hook input: {e}");
                Self::default()
            }
        }
    }

    /// Read and parse the payload from stdin.
    pub fn from_stdin() -> Self {
        let mut raw = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut raw) {
            tracing::debug!("could not read hook input: {e}");
            return Self::default();
        }
        Self::parse(&raw)
    }

    pub fn session_id(&self) -> Option<&str> {
        non_empty(self.session_id.as_deref())
    }

    pub fn tool_name(&self) -> Option<&str> {
        non_empty(self.tool_name.as_deref())
    }

    pub fn file_path(&self) -> Option<&str> {
        non_empty(self.tool_input.as_ref().and_then(|t| t.file_path.as_deref()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
