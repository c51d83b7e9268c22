use crate::adapters::event_log::jsonl_event_log::JsonlEventLog;
use crate::adapters::rules::rule_installer;
use crate::cli::context::ProjectContext;
use crate::cli::output;
use crate::config::settings::{self, ReviewSettings, Section, SettingsFile};
use crate::core::errors::{Result, ReviewError};

/// Execute the `review-gate init` command.
///
/// Adds the default `codeReview` section to `.claude/settings.json`, keeping
/// any other keys, then installs the bundled rule documents when a plugin
/// root is configured.
pub fn execute(ctx: &ProjectContext) -> Result<()> {
    let settings_path = &ctx.paths.settings_file;

    output::header("review-gate — Initializing code review");

    let log = JsonlEventLog::new(ctx.paths.log_file.clone());
    let defaults = ReviewSettings::default();
    log.locked(|| {
        let map = match SettingsFile::read(settings_path) {
            SettingsFile::Missing => serde_json::Map::new(),
            SettingsFile::Object(map) => match settings::section(&map) {
                Section::Missing => map,
                Section::Valid(_) | Section::Invalid(_) => {
                    return Err(ReviewError::AlreadyInitialized {
                        path: settings_path.clone(),
                    });
                }
            },
            SettingsFile::Invalid(detail) => {
                return Err(ReviewError::InvalidSettings {
                    path: settings_path.clone(),
                    detail,
                });
            }
        };
        settings::write_section(settings_path, map, &defaults)
    })?;

    output::success(&format!(
        "Added \"{}\" to {}",
        settings::SETTINGS_KEY,
        settings_path.display()
    ));
    output::success(&format!(
        "Tracking {} file extensions",
        defaults.file_extensions.len()
    ));

    match ctx.plugin_root() {
        Some(plugin_root) => {
            let report = rule_installer::install_rules(&ctx.paths, plugin_root, &defaults);
            for path in &report.copied {
                output::success(&format!("Installed {}", path.display()));
            }
            if report.already_present > 0 {
                output::success(&format!(
                    "{} rule document(s) already present, left unchanged",
                    report.already_present
                ));
            }
            if report.missing_source > 0 {
                output::warning(&format!(
                    "{} rule document(s) not shipped by the plugin at {}",
                    report.missing_source,
                    plugin_root.display()
                ));
            }
            if report.failed > 0 {
                output::warning(&format!(
                    "{} rule document(s) could not be copied",
                    report.failed
                ));
            }
        }
        None => {
            output::warning("No plugin root set; rule documents were not installed");
            println!("  Pass --plugin-root <DIR> or set CLAUDE_PLUGIN_ROOT to install them.");
        }
    }

    Ok(())
}
