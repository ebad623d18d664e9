//! Read-only checks over the installed pack folders.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::pack::{has_manifest, PackRole};

use super::config::ManagerConfig;

/// Audit of a single role directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAudit {
    /// Role the directory holds.
    pub role: PackRole,
    /// The directory does not exist.
    pub missing_dir: bool,
    /// All pack folders, sorted by name.
    pub folders: Vec<String>,
    /// Folders without a `manifest.json`, sorted by name.
    pub without_manifest: Vec<String>,
}

/// Names of the immediate subfolders of `role_dir`, sorted.
///
/// A missing or unreadable directory yields an empty list.
pub fn list_pack_folders(role_dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(role_dir) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut names: Vec<String> = entries
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Pack folders in `role_dir` that have no `manifest.json`, sorted.
pub fn find_folders_without_manifest(role_dir: &Path) -> Vec<String> {
    list_pack_folders(role_dir)
        .into_iter()
        .filter(|name| !has_manifest(&role_dir.join(name)))
        .collect()
}

/// Audit both role directories of a layout, behavior first.
pub fn audit_layout(config: &ManagerConfig) -> Vec<RoleAudit> {
    PackRole::ALL
        .iter()
        .map(|&role| {
            let dir = config.role_dir(role);
            let missing_dir = !dir.is_dir();
            let folders = list_pack_folders(dir);
            let without_manifest: Vec<String> = folders
                .iter()
                .filter(|name| !has_manifest(&dir.join(name)))
                .cloned()
                .collect();
            for name in &without_manifest {
                warn!(role = %role, folder = %name, "pack folder has no manifest.json");
            }
            RoleAudit {
                role,
                missing_dir,
                folders,
                without_manifest,
            }
        })
        .collect()
}
