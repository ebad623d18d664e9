//! Settings structs for each configuration section.
//!
//! Each struct represents one `[section]` of `addonkeeper.ini`. Path values
//! are stored as written; [`ConfigFile::layout`](super::ConfigFile::layout)
//! resolves them against a root directory.

use std::fmt;
use std::path::PathBuf;

use crate::logging::{default_log_dir, default_log_file};
use crate::manager::{ConflictDecision, DEFAULT_INTAKE_DIR, DEFAULT_SCRATCH_DIR};
use crate::pack::PackRole;

/// Complete configuration loaded from `addonkeeper.ini`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    /// Directory and index file locations
    pub paths: PathsSettings,
    /// Classifier settings
    pub classifier: ClassifierSettings,
    /// How undecidable situations are handled
    pub decisions: DecisionSettings,
    /// Log file location
    pub logging: LoggingSettings,
}

/// `[paths]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsSettings {
    pub intake_dir: PathBuf,
    pub scratch_dir: PathBuf,
    pub behavior_dir: PathBuf,
    pub resource_dir: PathBuf,
    pub behavior_index: PathBuf,
    pub resource_index: PathBuf,
}

impl Default for PathsSettings {
    fn default() -> Self {
        Self {
            intake_dir: PathBuf::from(DEFAULT_INTAKE_DIR),
            scratch_dir: PathBuf::from(DEFAULT_SCRATCH_DIR),
            behavior_dir: PathBuf::from(PackRole::Behavior.default_dir_name()),
            resource_dir: PathBuf::from(PackRole::Resource.default_dir_name()),
            behavior_index: PathBuf::from(PackRole::Behavior.default_index_name()),
            resource_index: PathBuf::from(PackRole::Resource.default_index_name()),
        }
    }
}

/// `[classifier]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierSettings {
    /// Role whose rules win when a name matches both.
    pub priority: PackRole,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            priority: PackRole::Behavior,
        }
    }
}

/// What to do with a pack whose role cannot be inferred.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownRoleSetting {
    /// Ask interactively.
    #[default]
    Prompt,
    /// Leave the pack where it is.
    Skip,
    /// Always treat it as this role.
    Assign(PackRole),
}

impl UnknownRoleSetting {
    /// The fixed answer, if any. `Prompt` has none.
    pub fn fixed(&self) -> Option<Option<PackRole>> {
        match self {
            Self::Prompt => None,
            Self::Skip => Some(None),
            Self::Assign(role) => Some(Some(*role)),
        }
    }
}

impl fmt::Display for UnknownRoleSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prompt => f.write_str("prompt"),
            Self::Skip => f.write_str("skip"),
            Self::Assign(role) => f.write_str(role.as_str()),
        }
    }
}

/// What to do when a destination folder already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictSetting {
    /// Ask interactively.
    #[default]
    Prompt,
    /// Always apply this decision.
    Fixed(ConflictDecision),
}

impl fmt::Display for ConflictSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prompt => f.write_str("prompt"),
            Self::Fixed(decision) => f.write_str(decision.as_str()),
        }
    }
}

/// `[decisions]` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecisionSettings {
    pub unknown_role: UnknownRoleSetting,
    pub on_conflict: ConflictSetting,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Log directory, relative to the root unless absolute.
    pub directory: PathBuf,
    /// Log file name inside `directory`.
    pub file: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(default_log_dir()),
            file: default_log_file().to_string(),
        }
    }
}
