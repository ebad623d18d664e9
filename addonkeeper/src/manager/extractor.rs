//! Archive extraction for add-on intake.
//!
//! This module handles:
//! - Unpacking ZIP-based `.mcaddon` and `.mcpack` files into scratch space
//! - Normalizing both layouts into a list of [`Candidate`] pack folders
//!
//! Extraction failures never propagate past [`extract_multi`] and
//! [`extract_single`]: a broken archive is logged and yields no candidates,
//! so one bad download cannot stop the rest of the intake run.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::pack::ArchiveKind;

use super::error::{ManagerError, ManagerResult};
use super::traits::ArchiveExtractor;

/// An extracted pack folder waiting to be classified and moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Folder name used for classification and as the destination name.
    pub name: String,
    /// Location in scratch space.
    pub path: PathBuf,
    /// Archive the folder came from.
    pub archive: PathBuf,
}

impl Candidate {
    /// Create a candidate named after the last component of `path`.
    pub fn new(path: PathBuf, archive: impl Into<PathBuf>) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name,
            path,
            archive: archive.into(),
        }
    }
}

/// ZIP extractor built on the `zip` crate.
///
/// Entry names are sanitized: entries that would land outside the
/// destination directory fail the whole extraction.
#[derive(Debug, Default)]
pub struct ZipExtractor;

impl ZipExtractor {
    /// Create a new ZIP extractor.
    pub fn new() -> Self {
        Self
    }

    fn open(&self, archive_path: &Path) -> ManagerResult<ZipArchive<BufReader<File>>> {
        let file = File::open(archive_path).map_err(|e| ManagerError::ReadFailed {
            path: archive_path.to_path_buf(),
            source: e,
        })?;
        ZipArchive::new(BufReader::new(file)).map_err(|e| zip_error(archive_path, e))
    }
}

impl ArchiveExtractor for ZipExtractor {
    fn extract(&self, archive_path: &Path, dest_dir: &Path) -> ManagerResult<usize> {
        let mut archive = self.open(archive_path)?;

        fs::create_dir_all(dest_dir).map_err(|e| ManagerError::CreateDirFailed {
            path: dest_dir.to_path_buf(),
            source: e,
        })?;

        let mut count = 0;
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).map_err(|e| zip_error(archive_path, e))?;
            let entry_path = match entry.enclosed_name() {
                Some(p) => p.to_path_buf(),
                None => {
                    return Err(ManagerError::ExtractionFailed {
                        path: archive_path.to_path_buf(),
                        reason: format!("unsafe entry path '{}'", entry.name()),
                    })
                }
            };

            let output_path = dest_dir.join(&entry_path);

            if entry.is_dir() {
                fs::create_dir_all(&output_path).map_err(|e| ManagerError::CreateDirFailed {
                    path: output_path.clone(),
                    source: e,
                })?;
                continue;
            }

            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent).map_err(|e| ManagerError::CreateDirFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
            let mut outfile = File::create(&output_path).map_err(|e| ManagerError::WriteFailed {
                path: output_path.clone(),
                source: e,
            })?;
            io::copy(&mut entry, &mut outfile).map_err(|e| ManagerError::ExtractionFailed {
                path: archive_path.to_path_buf(),
                reason: format!("failed to unpack '{}': {}", entry_path.display(), e),
            })?;
            count += 1;
        }

        debug!(archive = %archive_path.display(), files = count, "archive extracted");
        Ok(count)
    }

    fn list_contents(&self, archive_path: &Path) -> ManagerResult<Vec<String>> {
        let archive = self.open(archive_path)?;
        Ok(archive.file_names().map(str::to_string).collect())
    }
}

fn zip_error(path: &Path, err: ZipError) -> ManagerError {
    match err {
        ZipError::Io(e) => ManagerError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        },
        other => ManagerError::InvalidArchive {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    }
}

/// Scratch subfolder for an archive: `scratch_dir/<archive stem>`.
pub fn scratch_folder(archive_path: &Path, scratch_dir: &Path) -> PathBuf {
    let stem = archive_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "archive".to_string());
    scratch_dir.join(stem)
}

/// Scratch subfolder for an archive, emptied of leftovers from an earlier
/// archive with the same stem (e.g. `Dragons.mcaddon` then `Dragons.mcpack`).
fn fresh_scratch_folder(archive_path: &Path, scratch_dir: &Path) -> PathBuf {
    let extract_dir = scratch_folder(archive_path, scratch_dir);
    if extract_dir.exists() {
        if let Err(e) = fs::remove_dir_all(&extract_dir) {
            debug!(path = %extract_dir.display(), error = %e, "could not clear scratch folder");
        }
    }
    extract_dir
}

/// Immediate subdirectories of `dir`, sorted by name.
fn top_level_dirs(dir: &Path) -> ManagerResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| ManagerError::ReadFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

/// Whether any archive entry lives below a top-level folder.
fn has_folder_entries(names: &[String]) -> bool {
    names
        .iter()
        .any(|name| name.trim_start_matches(['/', '\\']).contains(['/', '\\']))
}

/// Extract a `.mcaddon` (Multi) archive.
///
/// Unpacks into `scratch_dir/<stem>` and returns every top-level directory
/// as a candidate, sorted by name. An archive holding only loose files is
/// not unpacked. Returns an empty list if listing or extraction fails.
pub fn extract_multi<E: ArchiveExtractor + ?Sized>(
    extractor: &E,
    archive_path: &Path,
    scratch_dir: &Path,
) -> Vec<Candidate> {
    match extractor.list_contents(archive_path) {
        Ok(names) if !has_folder_entries(&names) => {
            info!(archive = %archive_path.display(), "no pack folders in archive");
            return Vec::new();
        }
        Ok(_) => {}
        Err(e) => {
            error!(
                archive = %archive_path.display(),
                kind = %ArchiveKind::Multi,
                error = %e,
                "could not read archive"
            );
            return Vec::new();
        }
    }

    let extract_dir = fresh_scratch_folder(archive_path, scratch_dir);

    let result = extractor
        .extract(archive_path, &extract_dir)
        .and_then(|_| top_level_dirs(&extract_dir));

    match result {
        Ok(dirs) => dirs
            .into_iter()
            .map(|dir| Candidate::new(dir, archive_path))
            .collect(),
        Err(e) => {
            error!(
                archive = %archive_path.display(),
                kind = %ArchiveKind::Multi,
                error = %e,
                "extraction failed"
            );
            Vec::new()
        }
    }
}

/// Extract a `.mcpack` (Single) archive.
///
/// Unpacks into `scratch_dir/<stem>`. If the archive holds exactly one
/// top-level entry and it is a directory, that directory is the candidate
/// (wrapped layout); otherwise `scratch_dir/<stem>` itself is (flat layout).
/// Returns `None` if extraction fails.
pub fn extract_single<E: ArchiveExtractor + ?Sized>(
    extractor: &E,
    archive_path: &Path,
    scratch_dir: &Path,
) -> Option<Candidate> {
    let extract_dir = fresh_scratch_folder(archive_path, scratch_dir);

    let result = extractor
        .extract(archive_path, &extract_dir)
        .and_then(|_| single_root(&extract_dir));

    match result {
        Ok(root) => Some(Candidate::new(root, archive_path)),
        Err(e) => {
            error!(
                archive = %archive_path.display(),
                kind = %ArchiveKind::Single,
                error = %e,
                "extraction failed"
            );
            None
        }
    }
}

/// Pick the pack root inside an extracted single-pack archive.
fn single_root(extract_dir: &Path) -> ManagerResult<PathBuf> {
    let entries: Vec<PathBuf> = fs::read_dir(extract_dir)
        .map_err(|e| ManagerError::ReadFailed {
            path: extract_dir.to_path_buf(),
            source: e,
        })?
        .flatten()
        .map(|entry| entry.path())
        .collect();

    match entries.as_slice() {
        [only] if only.is_dir() => Ok(only.clone()),
        _ => Ok(extract_dir.to_path_buf()),
    }
}
