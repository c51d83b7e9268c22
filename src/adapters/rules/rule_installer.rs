use std::fs;
use std::path::{Path, PathBuf};

use crate::config::project_paths::ProjectPaths;
use crate::config::settings::ReviewSettings;
use crate::core::errors::{Result, ReviewError};

/// Bundled general rules, relative to the plugin root.
const DEFAULT_RULES_SOURCE: &str = "rules/default.md";

/// Directory of bundled per-language rules, relative to the plugin root.
const LANGUAGE_RULES_DIR: &str = "rules/languages";

/// Outcome of one install pass.
#[derive(Debug, Default, PartialEq)]
pub struct InstallReport {
    pub copied: Vec<PathBuf>,
    pub already_present: usize,
    pub missing_source: usize,
    pub failed: usize,
}

/// Copy the bundled rule documents into the project.
///
/// A document is copied only when its target does not exist yet and the
/// plugin ships a source for it. Existing project files are never touched.
/// Individual failures are counted and logged, not returned.
pub fn install_rules(
    paths: &ProjectPaths,
    plugin_root: &Path,
    settings: &ReviewSettings,
) -> InstallReport {
    let mut report = InstallReport::default();

    let mut jobs = vec![(
        plugin_root.join(DEFAULT_RULES_SOURCE),
        paths.resolve(&settings.rules_file),
    )];
    for (language, target) in &settings.language_specific_rules {
        jobs.push((
            plugin_root.join(LANGUAGE_RULES_DIR).join(format!("{language}.md")),
            paths.resolve(target),
        ));
    }

    for (source, target) in jobs {
        if target.exists() {
            report.already_present += 1;
            continue;
        }
        if !source.is_file() {
            report.missing_source += 1;
            continue;
        }
        match copy_rule(&source, &target) {
            Ok(()) => report.copied.push(target),
            Err(e) => {
                tracing::debug!("{e}");
                report.failed += 1;
            }
        }
    }

    report
}

fn copy_rule(source: &Path, target: &Path) -> Result<()> {
    let fail = |e: std::io::Error| ReviewError::RuleInstall {
        target: target.to_path_buf(),
        detail: e.to_string(),
    };

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(fail)?;
    }
    fs::copy(source, target).map_err(fail)?;
    Ok(())
}
