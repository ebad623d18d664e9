//! INI parsing: `Ini` → `ConfigFile`.
//!
//! The single place where INI key names are mapped to struct fields.

use ini::{Ini, Properties};
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::{ConfigFile, ConflictSetting, UnknownRoleSetting};
use crate::manager::ConflictDecision;
use crate::pack::PackRole;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found.
/// Empty values keep the default.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [paths] section
    if let Some(section) = ini.section(Some("paths")) {
        let paths = &mut config.paths;
        for (key, slot) in [
            ("intake_dir", &mut paths.intake_dir),
            ("scratch_dir", &mut paths.scratch_dir),
            ("behavior_dir", &mut paths.behavior_dir),
            ("resource_dir", &mut paths.resource_dir),
            ("behavior_index", &mut paths.behavior_index),
            ("resource_index", &mut paths.resource_index),
        ] {
            if let Some(v) = non_empty(section, key) {
                *slot = expand_tilde(v);
            }
        }
    }

    // [classifier] section
    if let Some(section) = ini.section(Some("classifier")) {
        if let Some(v) = non_empty(section, "priority") {
            config.classifier.priority = v.parse().map_err(|_| ConfigFileError::InvalidValue {
                section: "classifier".to_string(),
                key: "priority".to_string(),
                value: v.to_string(),
                reason: "must be 'behavior' or 'resource'".to_string(),
            })?;
        }
    }

    // [decisions] section
    if let Some(section) = ini.section(Some("decisions")) {
        if let Some(v) = non_empty(section, "unknown_role") {
            config.decisions.unknown_role =
                parse_unknown_role(v).ok_or_else(|| ConfigFileError::InvalidValue {
                    section: "decisions".to_string(),
                    key: "unknown_role".to_string(),
                    value: v.to_string(),
                    reason: "must be one of: prompt, skip, behavior, resource".to_string(),
                })?;
        }
        if let Some(v) = non_empty(section, "on_conflict") {
            config.decisions.on_conflict =
                parse_conflict(v).ok_or_else(|| ConfigFileError::InvalidValue {
                    section: "decisions".to_string(),
                    key: "on_conflict".to_string(),
                    value: v.to_string(),
                    reason: "must be one of: prompt, skip, overwrite, rename".to_string(),
                })?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = non_empty(section, "directory") {
            config.logging.directory = expand_tilde(v);
        }
        if let Some(v) = non_empty(section, "file") {
            config.logging.file = v.to_string();
        }
    }

    Ok(config)
}

fn non_empty<'a>(section: &'a Properties, key: &str) -> Option<&'a str> {
    section
        .get(key)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Parse an `unknown_role` value.
pub fn parse_unknown_role(value: &str) -> Option<UnknownRoleSetting> {
    match value.trim().to_lowercase().as_str() {
        "prompt" => Some(UnknownRoleSetting::Prompt),
        "skip" => Some(UnknownRoleSetting::Skip),
        other => other.parse::<PackRole>().ok().map(UnknownRoleSetting::Assign),
    }
}

/// Parse an `on_conflict` value.
pub fn parse_conflict(value: &str) -> Option<ConflictSetting> {
    match value.trim().to_lowercase().as_str() {
        "prompt" => Some(ConflictSetting::Prompt),
        other => other
            .parse::<ConflictDecision>()
            .ok()
            .map(ConflictSetting::Fixed),
    }
}

/// Expand a leading `~/` to the user's home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
