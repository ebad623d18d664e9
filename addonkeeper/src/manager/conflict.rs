//! Destination-name conflict handling.
//!
//! A conflict happens when a pack folder is about to be moved into a role
//! directory that already holds a folder of the same name. The choice between
//! overwriting, skipping and renaming comes from a
//! [`DecisionProvider`](super::DecisionProvider); this module applies it.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::error::{ManagerError, ManagerResult};

/// How to handle a destination that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictDecision {
    /// Delete the existing folder, then move the new one in.
    Overwrite,
    /// Keep the existing folder and drop the new one.
    Skip,
    /// Move the new folder in under a free `name_N` name.
    Rename,
}

impl ConflictDecision {
    /// Lowercase name used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::Skip => "skip",
            Self::Rename => "rename",
        }
    }
}

impl fmt::Display for ConflictDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConflictDecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "overwrite" | "o" => Ok(Self::Overwrite),
            "skip" | "s" => Ok(Self::Skip),
            "rename" | "r" => Ok(Self::Rename),
            other => Err(format!(
                "unknown conflict action '{}' (expected overwrite, skip or rename)",
                other
            )),
        }
    }
}

/// Outcome of applying a [`ConflictDecision`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictResolution {
    /// Move the pack to `path`, which is now free, under `name`.
    Proceed { path: PathBuf, name: String },
    /// Leave the existing folder alone.
    Skip,
}

/// Generate a folder name not present in `destination_dir`.
///
/// Appends `_1`, `_2`, ... to `base_name` and returns the first free name.
/// The base name itself is never returned.
pub fn unique_folder_name(destination_dir: &Path, base_name: &str) -> String {
    let mut counter = 1u32;
    loop {
        let candidate = format!("{}_{}", base_name, counter);
        if !destination_dir.join(&candidate).exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Apply a conflict decision for `destination_dir/folder_name`.
///
/// Overwrite removes the existing folder recursively (contents are replaced,
/// never merged). Rename picks a free name via [`unique_folder_name`].
pub fn apply_conflict(
    destination_dir: &Path,
    folder_name: &str,
    decision: ConflictDecision,
) -> ManagerResult<ConflictResolution> {
    let existing = destination_dir.join(folder_name);
    match decision {
        ConflictDecision::Skip => Ok(ConflictResolution::Skip),
        ConflictDecision::Overwrite => {
            remove_path(&existing)?;
            Ok(ConflictResolution::Proceed {
                path: existing,
                name: folder_name.to_string(),
            })
        }
        ConflictDecision::Rename => {
            let name = unique_folder_name(destination_dir, folder_name);
            Ok(ConflictResolution::Proceed {
                path: destination_dir.join(&name),
                name,
            })
        }
    }
}

/// Remove a file or directory tree.
fn remove_path(path: &Path) -> ManagerResult<()> {
    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| ManagerError::RemoveFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_unique_name_starts_at_one() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("Castle BP")).unwrap();

        assert_eq!(unique_folder_name(temp.path(), "Castle BP"), "Castle BP_1");
    }

    #[test]
    fn test_unique_name_skips_taken_suffixes() {
        let temp = TempDir::new().unwrap();
        for name in ["name", "name_1", "name_2"] {
            fs::create_dir(temp.path().join(name)).unwrap();
        }

        assert_eq!(unique_folder_name(temp.path(), "name"), "name_3");
    }

    #[test]
    fn test_unique_name_counts_files_as_taken() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("name_1"), "file").unwrap();

        assert_eq!(unique_folder_name(temp.path(), "name"), "name_2");
    }

    #[test]
    fn test_apply_skip_leaves_existing() {
        let temp = TempDir::new().unwrap();
        let existing = temp.path().join("Pack");
        fs::create_dir(&existing).unwrap();

        let resolution = apply_conflict(temp.path(), "Pack", ConflictDecision::Skip).unwrap();
        assert_eq!(resolution, ConflictResolution::Skip);
        assert!(existing.exists());
    }

    #[test]
    fn test_apply_overwrite_removes_tree() {
        let temp = TempDir::new().unwrap();
        let existing = temp.path().join("Pack");
        fs::create_dir_all(existing.join("textures")).unwrap();
        fs::write(existing.join("textures/a.png"), "png").unwrap();

        let resolution =
            apply_conflict(temp.path(), "Pack", ConflictDecision::Overwrite).unwrap();
        assert_eq!(
            resolution,
            ConflictResolution::Proceed {
                path: existing.clone(),
                name: "Pack".to_string(),
            }
        );
        assert!(!existing.exists());
    }

    #[test]
    fn test_apply_rename() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("Pack")).unwrap();

        let resolution = apply_conflict(temp.path(), "Pack", ConflictDecision::Rename).unwrap();
        assert_eq!(
            resolution,
            ConflictResolution::Proceed {
                path: temp.path().join("Pack_1"),
                name: "Pack_1".to_string(),
            }
        );
        assert!(temp.path().join("Pack").exists());
    }

    #[test]
    fn test_decision_from_str() {
        assert_eq!("O".parse::<ConflictDecision>(), Ok(ConflictDecision::Overwrite));
        assert_eq!("skip".parse::<ConflictDecision>(), Ok(ConflictDecision::Skip));
        assert_eq!(" Rename ".parse::<ConflictDecision>(), Ok(ConflictDecision::Rename));
        assert!("merge".parse::<ConflictDecision>().is_err());
    }
}
