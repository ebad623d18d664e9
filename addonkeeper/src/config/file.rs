//! Configuration file handling for `<root>/addonkeeper.ini`.
//!
//! Settings structs live in [`super::settings`], parsing in
//! [`super::parser`], and serialization in [`super::writer`].

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::settings::ConfigFile;
use crate::manager::ManagerConfig;
use crate::pack::{Classifier, PackRole};

/// Default config file name inside the root directory.
pub const CONFIG_FILE_NAME: &str = "addonkeeper.ini";

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
            }
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Resolve the configured paths against `root` into a manager layout.
    pub fn layout(&self, root: &Path) -> ManagerConfig {
        let paths = &self.paths;
        ManagerConfig::new(root)
            .with_intake_dir(resolve(root, &paths.intake_dir))
            .with_scratch_dir(resolve(root, &paths.scratch_dir))
            .with_role_dir(PackRole::Behavior, resolve(root, &paths.behavior_dir))
            .with_role_dir(PackRole::Resource, resolve(root, &paths.resource_dir))
            .with_index_path(PackRole::Behavior, resolve(root, &paths.behavior_index))
            .with_index_path(PackRole::Resource, resolve(root, &paths.resource_index))
    }

    /// The classifier with the configured tie-break priority.
    pub fn classifier(&self) -> Classifier {
        Classifier::default().with_priority(self.classifier.priority)
    }

    /// Log directory resolved against `root`.
    pub fn log_dir(&self, root: &Path) -> PathBuf {
        resolve(root, &self.logging.directory)
    }
}

/// Path of the config file inside a root directory.
pub fn config_file_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{ConflictSetting, UnknownRoleSetting};
    use crate::manager::ConflictDecision;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigFile::load_from(&temp_dir.path().join("nope.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = config_file_path(temp_dir.path());

        let mut config = ConfigFile::default();
        config.paths.intake_dir = PathBuf::from("incoming");
        config.classifier.priority = PackRole::Resource;
        config.decisions.unknown_role = UnknownRoleSetting::Skip;
        config.decisions.on_conflict = ConflictSetting::Fixed(ConflictDecision::Rename);
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_layout_resolves_relative_and_keeps_absolute() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let absolute = root.join("elsewhere").join("bp");

        let mut config = ConfigFile::default();
        config.paths.behavior_dir = absolute.clone();
        let layout = config.layout(root);

        assert_eq!(layout.intake_dir, root.join("downloaded_addons"));
        assert_eq!(layout.role_dir(PackRole::Behavior), absolute.as_path());
        assert_eq!(
            layout.index_path(PackRole::Resource),
            root.join("world_resource_packs.json").as_path()
        );
    }

    #[test]
    fn test_default_layout_matches_manager_default() {
        let root = Path::new("/srv/world");
        assert_eq!(ConfigFile::default().layout(root), ManagerConfig::new(root));
    }

    #[test]
    fn test_classifier_priority_applied() {
        let mut config = ConfigFile::default();
        config.classifier.priority = PackRole::Resource;
        let classifier = config.classifier();
        assert_eq!(classifier.rules()[0].role(), PackRole::Resource);
    }
}
