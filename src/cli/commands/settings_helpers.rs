use std::path::Path;

use crate::adapters::event_log::jsonl_event_log::JsonlEventLog;
use crate::adapters::rules::rule_installer;
use crate::adapters::session_registry::file_session_registry::FileSessionRegistry;
use crate::config::project_paths::ProjectPaths;
use crate::config::settings::{self, ReviewSettings, Section, SettingsFile};
use crate::core::errors::Result;

/// Where the effective settings came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingsSource {
    /// Read from an existing `codeReview` section.
    Existing,
    /// Written to the settings file by this call.
    Initialized,
    /// Built-in defaults, used without touching the settings file.
    Defaults,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsLoad {
    pub settings: ReviewSettings,
    pub source: SettingsSource,
}

impl SettingsLoad {
    fn existing(settings: ReviewSettings) -> Self {
        Self {
            settings,
            source: SettingsSource::Existing,
        }
    }

    fn defaults() -> Self {
        Self {
            settings: ReviewSettings::default(),
            source: SettingsSource::Defaults,
        }
    }
}

/// Return the effective settings, creating the default `codeReview` section
/// the first time a session runs in a project that has none.
///
/// Never fails: anything unreadable degrades to in-memory defaults. When a
/// plugin root is known, bundled rule documents are installed afterwards on
/// a best-effort basis.
pub fn load_or_init(
    paths: &ProjectPaths,
    session_id: Option<&str>,
    plugin_root: Option<&Path>,
) -> SettingsLoad {
    let load = match SettingsFile::read(&paths.settings_file) {
        SettingsFile::Object(map) => match settings::section(&map) {
            Section::Valid(settings) => SettingsLoad::existing(settings),
            Section::Missing => initialize(paths, session_id),
            Section::Invalid(detail) => {
                tracing::warn!(
                    "ignoring invalid \"{}\" section in {}: {detail}",
                    settings::SETTINGS_KEY,
                    paths.settings_file.display()
                );
                SettingsLoad::defaults()
            }
        },
        SettingsFile::Missing => initialize(paths, session_id),
        SettingsFile::Invalid(detail) => {
            tracing::debug!(
                "settings file {} unusable, using defaults: {detail}",
                paths.settings_file.display()
            );
            SettingsLoad::defaults()
        }
    };

    if let Some(plugin_root) = plugin_root {
        let report = rule_installer::install_rules(paths, plugin_root, &load.settings);
        if !report.copied.is_empty() {
            tracing::debug!("installed {} rule document(s)", report.copied.len());
        }
    }

    load
}

/// Lazy initialization, serialized with appends through the event log lock.
fn initialize(paths: &ProjectPaths, session_id: Option<&str>) -> SettingsLoad {
    let Some(session_id) = session_id else {
        return SettingsLoad::defaults();
    };

    let log = JsonlEventLog::new(paths.log_file.clone());
    log.locked(|| initialize_locked(paths, session_id))
        .unwrap_or_else(|e| {
            tracing::debug!("settings initialization skipped: {e}");
            SettingsLoad::defaults()
        })
}

fn initialize_locked(paths: &ProjectPaths, session_id: &str) -> Result<SettingsLoad> {
    // Re-read under the lock: a concurrent first run may have won.
    let map = match SettingsFile::read(&paths.settings_file) {
        SettingsFile::Object(map) => match settings::section(&map) {
            Section::Valid(settings) => return Ok(SettingsLoad::existing(settings)),
            Section::Invalid(_) => return Ok(SettingsLoad::defaults()),
            Section::Missing => map,
        },
        SettingsFile::Missing => serde_json::Map::new(),
        SettingsFile::Invalid(_) => return Ok(SettingsLoad::defaults()),
    };

    let registry = FileSessionRegistry::new(paths.sessions_file.clone());
    if registry.contains(session_id) {
        // Initialized earlier in this session and removed since; respect that.
        return Ok(SettingsLoad::defaults());
    }

    let defaults = ReviewSettings::default();
    settings::write_section(&paths.settings_file, map, &defaults)?;
    registry.insert(session_id)?;

    tracing::info!(
        "created default \"{}\" settings in {}",
        settings::SETTINGS_KEY,
        paths.settings_file.display()
    );

    Ok(SettingsLoad {
        settings: defaults,
        source: SettingsSource::Initialized,
    })
}
