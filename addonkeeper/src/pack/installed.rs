//! Installed pack type with filesystem context.
//!
//! The [`InstalledPack`] struct extends [`PackManifest`] with the folder the
//! pack lives in, using composition.

use std::ops::Deref;
use std::path::{Path, PathBuf};

use super::manifest::PackManifest;

/// A pack folder under a role directory whose manifest could be read.
///
/// `InstalledPack` contains a `PackManifest` rather than copying its fields.
/// The [`Deref`] implementation gives transparent access to them.
///
/// # Example
///
/// ```
/// use addonkeeper::pack::{InstalledPack, PackManifest, PackVersion};
///
/// let manifest = PackManifest {
///     uuid: "abc".to_string(),
///     version: PackVersion(vec![1, 0, 0]),
/// };
/// let installed = InstalledPack::new(manifest, "/packs/behavior_packs/Dragon BP");
///
/// assert_eq!(installed.uuid, "abc");
/// assert_eq!(installed.folder_name(), "Dragon BP");
/// ```
#[derive(Debug, Clone)]
pub struct InstalledPack {
    /// Identity and version (composition).
    pub manifest: PackManifest,

    /// Filesystem path to the pack folder.
    pub path: PathBuf,
}

impl InstalledPack {
    /// Create a new installed pack.
    pub fn new(manifest: PackManifest, path: impl Into<PathBuf>) -> Self {
        Self {
            manifest,
            path: path.into(),
        }
    }

    /// Get the path to the pack folder.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Folder name of the pack (last path component).
    pub fn folder_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl Deref for InstalledPack {
    type Target = PackManifest;

    fn deref(&self) -> &Self::Target {
        &self.manifest
    }
}

/// Convert InstalledPack back to PackManifest (drops the folder).
impl From<InstalledPack> for PackManifest {
    fn from(installed: InstalledPack) -> Self {
        installed.manifest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::PackVersion;

    fn test_manifest() -> PackManifest {
        PackManifest {
            uuid: "1234".to_string(),
            version: PackVersion(vec![2, 0]),
        }
    }

    #[test]
    fn test_installed_pack_deref() {
        let installed = InstalledPack::new(test_manifest(), "/packs/Castle RP");

        assert_eq!(installed.uuid, "1234");
        assert_eq!(installed.version.to_string(), "2.0");
        assert_eq!(installed.path(), Path::new("/packs/Castle RP"));
        assert_eq!(installed.folder_name(), "Castle RP");
    }

    #[test]
    fn test_installed_pack_into_manifest() {
        let installed = InstalledPack::new(test_manifest(), "/packs/x");
        let manifest: PackManifest = installed.into();
        assert_eq!(manifest, test_manifest());
    }
}
