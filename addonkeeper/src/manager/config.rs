//! Directory layout for the add-on manager.

use std::path::{Path, PathBuf};

use crate::pack::PackRole;

/// Default intake directory name, relative to the root.
pub const DEFAULT_INTAKE_DIR: &str = "downloaded_addons";

/// Default scratch directory name, relative to the root.
pub const DEFAULT_SCRATCH_DIR: &str = "temp";

/// Directory layout used by one manager run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerConfig {
    /// Directory scanned for `.mcaddon` / `.mcpack` files.
    pub intake_dir: PathBuf,

    /// Scratch area for extraction. Removed at the end of every intake run.
    pub scratch_dir: PathBuf,

    /// Destination for behavior packs.
    pub behavior_dir: PathBuf,

    /// Destination for resource packs.
    pub resource_dir: PathBuf,

    /// Index file for behavior packs.
    pub behavior_index: PathBuf,

    /// Index file for resource packs.
    pub resource_index: PathBuf,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("."))
    }
}

impl ManagerConfig {
    /// Create the default layout under a root directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            intake_dir: root.join(DEFAULT_INTAKE_DIR),
            scratch_dir: root.join(DEFAULT_SCRATCH_DIR),
            behavior_dir: root.join(PackRole::Behavior.default_dir_name()),
            resource_dir: root.join(PackRole::Resource.default_dir_name()),
            behavior_index: root.join(PackRole::Behavior.default_index_name()),
            resource_index: root.join(PackRole::Resource.default_index_name()),
        }
    }

    /// Set the intake directory.
    pub fn with_intake_dir(mut self, path: PathBuf) -> Self {
        self.intake_dir = path;
        self
    }

    /// Set the scratch directory.
    pub fn with_scratch_dir(mut self, path: PathBuf) -> Self {
        self.scratch_dir = path;
        self
    }

    /// Set the destination directory for a role.
    pub fn with_role_dir(mut self, role: PackRole, path: PathBuf) -> Self {
        match role {
            PackRole::Behavior => self.behavior_dir = path,
            PackRole::Resource => self.resource_dir = path,
        }
        self
    }

    /// Set the index file for a role.
    pub fn with_index_path(mut self, role: PackRole, path: PathBuf) -> Self {
        match role {
            PackRole::Behavior => self.behavior_index = path,
            PackRole::Resource => self.resource_index = path,
        }
        self
    }

    /// Destination directory for a role.
    pub fn role_dir(&self, role: PackRole) -> &Path {
        match role {
            PackRole::Behavior => &self.behavior_dir,
            PackRole::Resource => &self.resource_dir,
        }
    }

    /// Index file for a role.
    pub fn index_path(&self, role: PackRole) -> &Path {
        match role {
            PackRole::Behavior => &self.behavior_index,
            PackRole::Resource => &self.resource_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = ManagerConfig::new("/games/mc");
        assert_eq!(config.intake_dir, PathBuf::from("/games/mc/downloaded_addons"));
        assert_eq!(config.scratch_dir, PathBuf::from("/games/mc/temp"));
        assert_eq!(
            config.role_dir(PackRole::Behavior),
            Path::new("/games/mc/behavior_packs")
        );
        assert_eq!(
            config.index_path(PackRole::Resource),
            Path::new("/games/mc/world_resource_packs.json")
        );
    }

    #[test]
    fn test_builder_pattern() {
        let config = ManagerConfig::new("/root")
            .with_intake_dir(PathBuf::from("/downloads"))
            .with_scratch_dir(PathBuf::from("/tmp/scratch"))
            .with_role_dir(PackRole::Resource, PathBuf::from("/rp"))
            .with_index_path(PackRole::Behavior, PathBuf::from("/bp.json"));

        assert_eq!(config.intake_dir, PathBuf::from("/downloads"));
        assert_eq!(config.scratch_dir, PathBuf::from("/tmp/scratch"));
        assert_eq!(config.role_dir(PackRole::Resource), Path::new("/rp"));
        assert_eq!(config.role_dir(PackRole::Behavior), Path::new("/root/behavior_packs"));
        assert_eq!(config.index_path(PackRole::Behavior), Path::new("/bp.json"));
    }
}
