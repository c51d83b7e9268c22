use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::adapters::atomic_file::write_atomic;
use crate::core::errors::{Result, ReviewError};

/// Key of the review section inside `.claude/settings.json`.
pub const SETTINGS_KEY: &str = "codeReview";

/// Extensions tracked when the settings do not say otherwise.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "py", "pyi", "js", "jsx", "ts", "tsx", "go", "rs", "java", "kt", "rb", "php", "c", "h", "cpp",
    "hpp", "cs", "swift",
];

pub const DEFAULT_RULES_FILE: &str = ".claude/code-review/rules.md";

/// Languages with a bundled rule document, and where each one is installed.
pub const DEFAULT_LANGUAGE_RULES: &[(&str, &str)] = &[
    ("go", ".claude/code-review/languages/go.md"),
    ("java", ".claude/code-review/languages/java.md"),
    ("javascript", ".claude/code-review/languages/javascript.md"),
    ("python", ".claude/code-review/languages/python.md"),
    ("rust", ".claude/code-review/languages/rust.md"),
    ("typescript", ".claude/code-review/languages/typescript.md"),
];

/// The `codeReview` section of `.claude/settings.json`.
///
/// Missing keys fall back to their defaults, so a section containing only
/// `{"enabled": false}` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_extensions")]
    pub file_extensions: Vec<String>,
    #[serde(default = "default_rules_file")]
    pub rules_file: String,
    #[serde(default = "default_language_rules")]
    pub language_specific_rules: BTreeMap<String, String>,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            file_extensions: default_extensions(),
            rules_file: default_rules_file(),
            language_specific_rules: default_language_rules(),
        }
    }
}

impl ReviewSettings {
    /// True when `path` ends in `.<ext>` for a configured extension.
    /// Matching is case-sensitive; extensions may be configured with or
    /// without the leading dot.
    pub fn tracks(&self, path: &str) -> bool {
        self.file_extensions.iter().any(|ext| {
            let ext = ext.trim_start_matches('.');
            !ext.is_empty()
                && path
                    .strip_suffix(ext)
                    .is_some_and(|stem| stem.ends_with('.'))
        })
    }
}

fn default_enabled() -> bool {
    true
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

fn default_rules_file() -> String {
    DEFAULT_RULES_FILE.to_string()
}

fn default_language_rules() -> BTreeMap<String, String> {
    DEFAULT_LANGUAGE_RULES
        .iter()
        .map(|(lang, path)| (lang.to_string(), path.to_string()))
        .collect()
}

/// What was found at the settings path.
#[derive(Debug)]
pub enum SettingsFile {
    Missing,
    /// The top-level JSON object, including keys unrelated to review.
    Object(Map<String, Value>),
    /// Present but not a JSON object.
    Invalid(String),
}

/// State of the `codeReview` key within a settings object.
#[derive(Debug)]
pub enum Section {
    Missing,
    Valid(ReviewSettings),
    Invalid(String),
}

impl SettingsFile {
    pub fn read(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::Missing,
            Err(e) => return Self::Invalid(format!("cannot read file: {e}")),
        };

        // An empty file is as good as a missing one.
        if content.trim().is_empty() {
            return Self::Object(Map::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Self::Object(map),
            Ok(_) => Self::Invalid("top-level value is not an object".into()),
            Err(e) => Self::Invalid(format!("not valid JSON: {e}")),
        }
    }
}

/// Extract the review section from a settings object.
pub fn section(map: &Map<String, Value>) -> Section {
    match map.get(SETTINGS_KEY) {
        None | Some(Value::Null) => Section::Missing,
        Some(value @ Value::Object(_)) => match ReviewSettings::deserialize(value) {
            Ok(settings) => Section::Valid(settings),
            Err(e) => Section::Invalid(e.to_string()),
        },
        Some(_) => Section::Invalid(format!("\"{SETTINGS_KEY}\" is not an object")),
    }
}

/// Read-only lookup: the configured section, if there is a valid one.
pub fn load(path: &Path) -> Option<ReviewSettings> {
    match SettingsFile::read(path) {
        SettingsFile::Object(map) => match section(&map) {
            Section::Valid(settings) => Some(settings),
            _ => None,
        },
        _ => None,
    }
}

/// Insert `settings` under [`SETTINGS_KEY`] in `map` and persist the whole
/// object, preserving every other key.
pub fn write_section(path: &Path, mut map: Map<String, Value>, settings: &ReviewSettings) -> Result<()> {
    let value = serde_json::to_value(settings).map_err(|e| ReviewError::InvalidSettings {
        path: path.to_path_buf(),
        detail: format!("cannot serialize settings: {e}"),
    })?;
    map.insert(SETTINGS_KEY.to_string(), value);

    let mut json = serde_json::to_string_pretty(&Value::Object(map)).map_err(|e| {
        ReviewError::InvalidSettings {
            path: path.to_path_buf(),
            detail: format!("cannot serialize settings: {e}"),
        }
    })?;
    json.push('\n');

    write_atomic(path, json.as_bytes())?;
    Ok(())
}
