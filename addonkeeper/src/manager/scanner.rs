//! Manifest scanning and index reconciliation for one role directory.
//!
//! A scan reads `manifest.json` from every immediate subfolder of a role
//! directory (in name order), keeps the first pack seen for each identity,
//! and rewrites the role's index file from scratch. The previous index is
//! read only to report identities that disappeared; nothing on disk besides
//! the index file is ever modified.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::pack::{
    read_index_ids, read_manifest, IndexRecord, InstalledPack, ManifestError, PackIndex,
    PackVersion,
};

use super::error::{ManagerError, ManagerResult};

/// What happened to one pack folder during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Added to the index.
    Accepted { pack_id: String, version: PackVersion },
    /// Another folder earlier in the scan has the same identity.
    Duplicate { pack_id: String },
    /// Not indexable; the reason is a human-readable diagnostic.
    Skipped { reason: String },
}

/// Per-folder scan result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEntry {
    /// Folder name under the role directory.
    pub folder: String,
    /// Outcome for that folder.
    pub outcome: ScanOutcome,
}

/// Summary counts of a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Packs accepted into the index.
    pub processed: usize,
    /// Folders whose identity was already indexed.
    pub duplicates: usize,
    /// Folders without a usable manifest.
    pub skipped: usize,
    /// Identities dropped since the previous index.
    pub removed: usize,
    /// Records in the new index.
    pub total: usize,
}

/// Result of scanning one role directory.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Role directory that was scanned.
    pub role_dir: PathBuf,
    /// Index file that was written.
    pub index_path: PathBuf,
    /// The role directory does not exist; nothing was read or written.
    pub missing_dir: bool,
    /// Set when the role directory could not be listed; the index was left
    /// untouched.
    pub dir_unreadable: Option<String>,
    /// The index file did not exist before this scan.
    pub created: bool,
    /// Set when the previous index existed but could not be read.
    pub previous_unreadable: Option<String>,
    /// Packs accepted into the index, in index order.
    pub installed: Vec<InstalledPack>,
    /// The regenerated index.
    pub index: PackIndex,
    /// Identities present in the previous index but not found now.
    pub removed: Vec<String>,
    /// Per-folder outcomes, in scan order.
    pub entries: Vec<ScanEntry>,
    /// Summary counts.
    pub stats: ScanStats,
}

/// Scans role directories and maintains their indexes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManifestScanner;

impl ManifestScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        Self
    }

    /// Scan `role_dir` and replace the index at `index_path`.
    ///
    /// A missing role directory yields an empty report with `missing_dir`
    /// set, and one that cannot be listed sets `dir_unreadable`. In both
    /// cases the index is left untouched. The only error is a failure to
    /// write the new index.
    pub fn scan(&self, role_dir: &Path, index_path: &Path) -> ManagerResult<ScanReport> {
        let mut report = ScanReport {
            role_dir: role_dir.to_path_buf(),
            index_path: index_path.to_path_buf(),
            ..Default::default()
        };

        if !role_dir.is_dir() {
            warn!(dir = %role_dir.display(), "pack directory not found");
            report.missing_dir = true;
            return Ok(report);
        }

        let folders = match pack_folders(role_dir) {
            Ok(folders) => folders,
            Err(e) => {
                warn!(dir = %role_dir.display(), error = %e, "could not list pack directory");
                report.dir_unreadable = Some(e.to_string());
                return Ok(report);
            }
        };

        let previous = match read_index_ids(index_path) {
            Ok(Some(ids)) => ids,
            Ok(None) => {
                info!(index = %index_path.display(), "index does not exist, will create it");
                report.created = true;
                Vec::new()
            }
            Err(e) => {
                warn!(index = %index_path.display(), error = %e, "could not read existing index");
                report.previous_unreadable = Some(e.to_string());
                Vec::new()
            }
        };

        info!(dir = %role_dir.display(), "scanning packs");
        for folder in folders {
            let entry = self.scan_folder(&folder, &mut report);
            report.entries.push(entry);
        }

        report.removed = previous
            .into_iter()
            .filter(|pack_id| !report.index.contains(pack_id))
            .collect();
        for pack_id in &report.removed {
            info!(pack_id = %pack_id, "removed orphaned entry");
        }

        report.index.write_atomic(index_path).map_err(|e| ManagerError::IndexWriteFailed {
            path: index_path.to_path_buf(),
            source: e,
        })?;

        report.stats.removed = report.removed.len();
        report.stats.total = report.index.len();
        info!(
            processed = report.stats.processed,
            duplicates = report.stats.duplicates,
            skipped = report.stats.skipped,
            removed = report.stats.removed,
            total = report.stats.total,
            index = %index_path.display(),
            "index written"
        );
        Ok(report)
    }

    fn scan_folder(&self, folder: &Path, report: &mut ScanReport) -> ScanEntry {
        let name = folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let manifest = match read_manifest(folder) {
            Ok(manifest) => manifest,
            Err(e) => {
                match e {
                    ManifestError::InvalidJson(_) | ManifestError::Unreadable(_) => {
                        warn!(folder = %name, error = %e, "unusable manifest")
                    }
                    _ => info!(folder = %name, reason = %e, "pack skipped"),
                }
                report.stats.skipped += 1;
                return ScanEntry {
                    folder: name,
                    outcome: ScanOutcome::Skipped {
                        reason: e.to_string(),
                    },
                };
            }
        };

        let record = IndexRecord::new(manifest.uuid.clone(), manifest.version.clone());
        if !report.index.insert(record) {
            info!(folder = %name, pack_id = %manifest.uuid, "duplicate pack_id");
            report.stats.duplicates += 1;
            return ScanEntry {
                folder: name,
                outcome: ScanOutcome::Duplicate {
                    pack_id: manifest.uuid,
                },
            };
        }

        debug!(folder = %name, pack_id = %manifest.uuid, version = %manifest.version, "pack indexed");
        report.stats.processed += 1;
        let outcome = ScanOutcome::Accepted {
            pack_id: manifest.uuid.clone(),
            version: manifest.version.clone(),
        };
        report.installed.push(InstalledPack::new(manifest, folder));
        ScanEntry {
            folder: name,
            outcome,
        }
    }
}

/// Immediate subdirectories of a role directory, sorted by name.
fn pack_folders(role_dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut folders: Vec<PathBuf> = fs::read_dir(role_dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    folders.sort();
    Ok(folders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::{read_index, MANIFEST_FILE};
    use tempfile::TempDir;

    fn add_pack(role_dir: &Path, folder: &str, uuid: &str, version: &str) {
        let dir = role_dir.join(folder);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(MANIFEST_FILE),
            format!(
                r#"{{"format_version": 2, "header": {{"uuid": "{}", "version": {}}}}}"#,
                uuid, version
            ),
        )
        .unwrap();
    }

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let temp = TempDir::new().unwrap();
        let role_dir = temp.path().join("behavior_packs");
        fs::create_dir_all(&role_dir).unwrap();
        let index = temp.path().join("world_behavior_packs.json");
        (temp, role_dir, index)
    }

    #[test]
    fn test_missing_role_dir() {
        let temp = TempDir::new().unwrap();
        let index = temp.path().join("index.json");

        let report = ManifestScanner::new()
            .scan(&temp.path().join("nope"), &index)
            .unwrap();

        assert!(report.missing_dir);
        assert_eq!(report.stats, ScanStats::default());
        assert!(!index.exists());
    }

    #[test]
    fn test_scan_accepts_and_skips() {
        let (_temp, role_dir, index) = setup();
        add_pack(&role_dir, "b_pack", "uuid-b", "[1, 0, 0]");
        add_pack(&role_dir, "a_pack", "uuid-a", "[2, 1]");
        fs::create_dir_all(role_dir.join("c_no_manifest")).unwrap();
        fs::create_dir_all(role_dir.join("d_broken")).unwrap();
        fs::write(role_dir.join("d_broken").join(MANIFEST_FILE), "{ nope").unwrap();
        add_pack(&role_dir, "e_no_version", "uuid-e", "null");
        fs::write(role_dir.join("stray.txt"), "files are ignored").unwrap();

        let report = ManifestScanner::new().scan(&role_dir, &index).unwrap();

        assert!(report.created);
        assert_eq!(report.stats.processed, 2);
        assert_eq!(report.stats.skipped, 3);
        assert_eq!(report.stats.total, 2);

        let folders: Vec<&str> = report.entries.iter().map(|e| e.folder.as_str()).collect();
        assert_eq!(
            folders,
            vec!["a_pack", "b_pack", "c_no_manifest", "d_broken", "e_no_version"]
        );
        assert!(matches!(
            &report.entries[3].outcome,
            ScanOutcome::Skipped { reason } if reason.starts_with("invalid JSON")
        ));

        let records = read_index(&index).unwrap();
        assert_eq!(records[0].pack_id, "uuid-a");
        assert_eq!(records[0].version, vec![2, 1]);
        assert_eq!(records[1].pack_id, "uuid-b");
        assert_eq!(report.installed[1].folder_name(), "b_pack");
    }

    #[test]
    fn test_duplicate_first_wins() {
        let (_temp, role_dir, index) = setup();
        add_pack(&role_dir, "Castle BP", "same-id", "[1, 0, 0]");
        add_pack(&role_dir, "Castle BP_1", "same-id", "[1, 1, 0]");

        let report = ManifestScanner::new().scan(&role_dir, &index).unwrap();

        assert_eq!(report.stats.duplicates, 1);
        assert_eq!(report.stats.total, 1);
        assert_eq!(
            report.entries[1].outcome,
            ScanOutcome::Duplicate {
                pack_id: "same-id".to_string()
            }
        );
        assert_eq!(read_index(&index).unwrap()[0].version, vec![1, 0, 0]);
        // duplicates stay on disk
        assert!(role_dir.join("Castle BP_1").exists());
    }

    #[test]
    fn test_orphans_reported_and_dropped() {
        let (_temp, role_dir, index) = setup();
        fs::write(
            &index,
            r#"[{"pack_id": "gone", "version": [1]}, {"pack_id": "kept", "version": [1]}]"#,
        )
        .unwrap();
        add_pack(&role_dir, "Kept", "kept", "[1, 0]");

        let report = ManifestScanner::new().scan(&role_dir, &index).unwrap();

        assert!(!report.created);
        assert_eq!(report.removed, vec!["gone".to_string()]);
        assert_eq!(report.stats.removed, 1);
        let ids: Vec<String> = read_index(&index)
            .unwrap()
            .into_iter()
            .map(|r| r.pack_id)
            .collect();
        assert_eq!(ids, vec!["kept".to_string()]);
    }

    #[test]
    fn test_rescan_is_stable() {
        let (_temp, role_dir, index) = setup();
        add_pack(&role_dir, "One", "id-1", "[1, 0, 0]");
        add_pack(&role_dir, "Two", "id-2", "[0, 3]");

        let scanner = ManifestScanner::new();
        scanner.scan(&role_dir, &index).unwrap();
        let first = fs::read_to_string(&index).unwrap();

        let report = scanner.scan(&role_dir, &index).unwrap();
        let second = fs::read_to_string(&index).unwrap();

        assert_eq!(first, second);
        assert!(report.removed.is_empty());
        assert!(!report.created);
    }

    #[test]
    fn test_unreadable_previous_index_is_treated_as_empty() {
        let (_temp, role_dir, index) = setup();
        fs::write(&index, "this was hand-edited badly").unwrap();
        add_pack(&role_dir, "One", "id-1", "[1]");

        let report = ManifestScanner::new().scan(&role_dir, &index).unwrap();

        assert!(report.previous_unreadable.is_some());
        assert!(report.removed.is_empty());
        assert_eq!(read_index(&index).unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_previous_entries_do_not_hide_orphans() {
        let (_temp, role_dir, index) = setup();
        fs::write(
            &index,
            r#"[{"pack_id": "gone", "version": [1]}, {"pack_id": 5, "version": [2]}]"#,
        )
        .unwrap();

        let report = ManifestScanner::new().scan(&role_dir, &index).unwrap();

        assert!(report.previous_unreadable.is_none());
        assert_eq!(report.removed, vec!["gone".to_string()]);
        assert_eq!(report.stats.removed, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_unlistable_role_dir_leaves_index() {
        use std::os::unix::fs::PermissionsExt;

        let (_temp, role_dir, index) = setup();
        add_pack(&role_dir, "One", "id-1", "[1]");
        fs::write(&index, r#"[{"pack_id": "id-1", "version": [1]}]"#).unwrap();
        fs::set_permissions(&role_dir, fs::Permissions::from_mode(0o000)).unwrap();

        let listable = fs::read_dir(&role_dir).is_ok();
        let report = ManifestScanner::new().scan(&role_dir, &index);
        fs::set_permissions(&role_dir, fs::Permissions::from_mode(0o755)).unwrap();

        // privileged users can list the directory anyway
        if listable {
            return;
        }
        let report = report.unwrap();
        assert!(report.dir_unreadable.is_some());
        assert!(report.removed.is_empty());
        assert!(fs::read_to_string(&index).unwrap().contains("id-1"));
    }

    #[test]
    fn test_empty_role_dir_writes_empty_index() {
        let (_temp, role_dir, index) = setup();

        let report = ManifestScanner::new().scan(&role_dir, &index).unwrap();

        assert_eq!(report.stats.total, 0);
        assert_eq!(fs::read_to_string(&index).unwrap().trim(), "[]");
    }
}
