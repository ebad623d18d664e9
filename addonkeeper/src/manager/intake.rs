//! Add-on intake for extracting and installing downloaded archives.
//!
//! This module orchestrates the full intake workflow:
//! 1. Discover `.mcaddon` and `.mcpack` files in the intake directory
//! 2. Extract each archive into scratch space
//! 3. Relocate every extracted pack into its role directory
//! 4. Remove the scratch directory
//!
//! `.mcaddon` files are processed before `.mcpack` files, each group in
//! file-name order. Scratch space is removed at the end of every run that
//! created it, whatever happened to the individual archives.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::pack::ArchiveKind;

use super::config::ManagerConfig;
use super::error::{ManagerError, ManagerResult};
use super::extractor::{extract_multi, extract_single};
use super::relocator::{RelocationOutcome, RelocationStats, Relocator};
use super::traits::{ArchiveExtractor, DecisionProvider};

/// Progress callback for intake operations.
///
/// # Arguments
///
/// * `stage` - Current intake stage
/// * `message` - Human-readable message
pub type IntakeProgressCallback = Box<dyn Fn(IntakeStage, &str)>;

/// Intake stages for progress reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeStage {
    /// Looking for archives in the intake directory.
    Discovering,
    /// Extracting one archive.
    Extracting,
    /// Removing the scratch directory.
    Cleanup,
    /// Intake complete.
    Complete,
}

impl IntakeStage {
    /// Get a human-readable name for the stage.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Discovering => "Discovering",
            Self::Extracting => "Extracting",
            Self::Cleanup => "Cleaning up",
            Self::Complete => "Complete",
        }
    }
}

/// What happened to one archive as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveStatus {
    /// Extracted; see the per-pack outcomes.
    Extracted,
    /// A `.mcaddon` that produced no pack folders (or could not be read).
    NoFolders,
    /// A `.mcpack` that could not be extracted.
    Failed,
}

/// Outcome for one pack folder from an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackEvent {
    /// Folder name as extracted.
    pub folder: String,
    /// What the relocator did with it.
    pub outcome: RelocationOutcome,
}

/// Itemized result for one archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReport {
    /// Archive file.
    pub archive: PathBuf,
    /// Multi or single pack archive.
    pub kind: ArchiveKind,
    /// Archive-level status.
    pub status: ArchiveStatus,
    /// Per-pack outcomes, in processing order.
    pub packs: Vec<PackEvent>,
}

impl ArchiveReport {
    /// File name of the archive for display.
    pub fn file_name(&self) -> String {
        self.archive
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Result of an intake run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeReport {
    /// The intake directory does not exist; nothing was done.
    pub intake_missing: bool,
    /// Number of `.mcaddon` files processed.
    pub addons_processed: usize,
    /// Number of `.mcpack` files processed.
    pub packs_processed: usize,
    /// Relocation totals, including archive-level errors.
    pub stats: RelocationStats,
    /// Per-archive details.
    pub archives: Vec<ArchiveReport>,
    /// Set when the scratch directory could not be removed.
    pub cleanup_error: Option<String>,
}

impl IntakeReport {
    /// Total archives processed.
    pub fn archives_processed(&self) -> usize {
        self.addons_processed + self.packs_processed
    }
}

/// Archives found in the intake directory, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredArchives {
    /// `.mcaddon` files, sorted by name.
    pub addons: Vec<PathBuf>,
    /// `.mcpack` files, sorted by name.
    pub packs: Vec<PathBuf>,
}

impl DiscoveredArchives {
    /// Check if no archives were found.
    pub fn is_empty(&self) -> bool {
        self.addons.is_empty() && self.packs.is_empty()
    }
}

/// Find add-on archives directly inside `intake_dir`.
pub fn discover_archives(intake_dir: &Path) -> ManagerResult<DiscoveredArchives> {
    let entries = fs::read_dir(intake_dir).map_err(|e| ManagerError::ReadFailed {
        path: intake_dir.to_path_buf(),
        source: e,
    })?;

    let mut found = DiscoveredArchives::default();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        match ArchiveKind::from_path(&path) {
            Some(ArchiveKind::Multi) => found.addons.push(path),
            Some(ArchiveKind::Single) => found.packs.push(path),
            None => {}
        }
    }
    found.addons.sort();
    found.packs.sort();
    Ok(found)
}

/// Intake runner.
///
/// Handles the complete intake workflow: discovery, extraction, relocation
/// and scratch cleanup.
pub struct AddonIntake<E: ArchiveExtractor> {
    /// Extractor for archive contents.
    extractor: E,
    /// Directory layout.
    config: ManagerConfig,
}

impl<E: ArchiveExtractor> AddonIntake<E> {
    /// Create a new intake runner.
    pub fn new(extractor: E, config: ManagerConfig) -> Self {
        Self { extractor, config }
    }

    /// Get the directory layout.
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Run intake over every archive in the intake directory.
    ///
    /// Never fails as a whole: per-archive and per-pack problems are counted
    /// and itemized in the returned report.
    pub fn run<D: DecisionProvider>(
        &self,
        relocator: &mut Relocator<D>,
        on_progress: Option<IntakeProgressCallback>,
    ) -> IntakeReport {
        let report_progress = |stage: IntakeStage, message: &str| {
            if let Some(ref cb) = on_progress {
                cb(stage, message);
            }
        };

        let mut report = IntakeReport::default();
        let intake_dir = &self.config.intake_dir;

        if !intake_dir.exists() {
            info!(dir = %intake_dir.display(), "intake directory not found, skipping extraction");
            report.intake_missing = true;
            report.stats = relocator.stats();
            return report;
        }

        report_progress(
            IntakeStage::Discovering,
            &format!("Scanning {}", intake_dir.display()),
        );
        let discovered = match discover_archives(intake_dir) {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "could not list intake directory");
                relocator.record_error();
                report.stats = relocator.stats();
                return report;
            }
        };

        if discovered.is_empty() {
            info!(dir = %intake_dir.display(), "no .mcaddon or .mcpack files found");
            report.stats = relocator.stats();
            return report;
        }
        info!(
            addons = discovered.addons.len(),
            packs = discovered.packs.len(),
            "archives found"
        );

        self.prepare_dirs();

        for archive in &discovered.addons {
            report_progress(IntakeStage::Extracting, &display_name(archive));
            report.archives.push(self.process_multi(archive, relocator));
            report.addons_processed += 1;
        }

        for archive in &discovered.packs {
            report_progress(IntakeStage::Extracting, &display_name(archive));
            report.archives.push(self.process_single(archive, relocator));
            report.packs_processed += 1;
        }

        report_progress(IntakeStage::Cleanup, "Removing temp folder");
        report.cleanup_error = self.cleanup();

        report.stats = relocator.stats();
        report_progress(IntakeStage::Complete, "Intake complete");
        report
    }

    /// Create the role and scratch directories. Failures are left for the
    /// individual moves to report.
    fn prepare_dirs(&self) {
        for dir in [
            &self.config.behavior_dir,
            &self.config.resource_dir,
            &self.config.scratch_dir,
        ] {
            if let Err(e) = fs::create_dir_all(dir) {
                warn!(dir = %dir.display(), error = %e, "could not create directory");
            }
        }
    }

    fn process_multi<D: DecisionProvider>(
        &self,
        archive: &Path,
        relocator: &mut Relocator<D>,
    ) -> ArchiveReport {
        info!(archive = %archive.display(), "extracting add-on");
        let candidates = extract_multi(&self.extractor, archive, &self.config.scratch_dir);

        if candidates.is_empty() {
            warn!(archive = %archive.display(), "no folders found in archive");
            relocator.record_error();
            return ArchiveReport {
                archive: archive.to_path_buf(),
                kind: ArchiveKind::Multi,
                status: ArchiveStatus::NoFolders,
                packs: Vec::new(),
            };
        }

        let packs = candidates
            .iter()
            .map(|candidate| PackEvent {
                folder: candidate.name.clone(),
                outcome: relocator.relocate(candidate),
            })
            .collect();

        ArchiveReport {
            archive: archive.to_path_buf(),
            kind: ArchiveKind::Multi,
            status: ArchiveStatus::Extracted,
            packs,
        }
    }

    fn process_single<D: DecisionProvider>(
        &self,
        archive: &Path,
        relocator: &mut Relocator<D>,
    ) -> ArchiveReport {
        info!(archive = %archive.display(), "extracting pack");
        let Some(candidate) = extract_single(&self.extractor, archive, &self.config.scratch_dir)
        else {
            relocator.record_error();
            return ArchiveReport {
                archive: archive.to_path_buf(),
                kind: ArchiveKind::Single,
                status: ArchiveStatus::Failed,
                packs: Vec::new(),
            };
        };

        let outcome = relocator.relocate(&candidate);
        ArchiveReport {
            archive: archive.to_path_buf(),
            kind: ArchiveKind::Single,
            status: ArchiveStatus::Extracted,
            packs: vec![PackEvent {
                folder: candidate.name,
                outcome,
            }],
        }
    }

    /// Remove scratch space. Returns the error message on failure.
    fn cleanup(&self) -> Option<String> {
        let scratch = &self.config.scratch_dir;
        if !scratch.exists() {
            return None;
        }
        match fs::remove_dir_all(scratch) {
            Ok(()) => {
                info!(dir = %scratch.display(), "temp folder deleted");
                None
            }
            Err(e) => {
                let error = ManagerError::RemoveFailed {
                    path: scratch.clone(),
                    source: e,
                };
                warn!(error = %error, "could not delete temp folder");
                Some(error.to_string())
            }
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use tempfile::TempDir;

    use crate::manager::{PolicyDecisions, ZipExtractor};
    use crate::pack::{Classifier, PackRole};

    fn setup() -> (TempDir, ManagerConfig) {
        let temp = TempDir::new().unwrap();
        let config = ManagerConfig::new(temp.path());
        (temp, config)
    }

    fn relocator(config: &ManagerConfig) -> Relocator<PolicyDecisions> {
        Relocator::new(config, Classifier::default(), PolicyDecisions::default())
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(IntakeStage::Extracting.name(), "Extracting");
        assert_eq!(IntakeStage::Cleanup.name(), "Cleaning up");
    }

    #[test]
    fn test_discover_sorts_and_filters() {
        let temp = TempDir::new().unwrap();
        for name in ["b.mcaddon", "a.MCADDON", "z.mcpack", "notes.txt", "c.zip"] {
            fs::write(temp.path().join(name), "").unwrap();
        }
        fs::create_dir(temp.path().join("folder.mcpack")).unwrap();

        let found = discover_archives(temp.path()).unwrap();
        assert_eq!(
            found.addons,
            vec![temp.path().join("a.MCADDON"), temp.path().join("b.mcaddon")]
        );
        assert_eq!(found.packs, vec![temp.path().join("z.mcpack")]);
    }

    #[test]
    fn test_missing_intake_dir() {
        let (_temp, config) = setup();
        let intake = AddonIntake::new(ZipExtractor::new(), config.clone());

        let report = intake.run(&mut relocator(&config), None);

        assert!(report.intake_missing);
        assert_eq!(report.archives_processed(), 0);
        assert!(!config.behavior_dir.exists());
    }

    #[test]
    fn test_empty_intake_dir_creates_nothing() {
        let (_temp, config) = setup();
        fs::create_dir_all(&config.intake_dir).unwrap();
        let intake = AddonIntake::new(ZipExtractor::new(), config.clone());

        let report = intake.run(&mut relocator(&config), None);

        assert!(!report.intake_missing);
        assert!(report.archives.is_empty());
        assert!(!config.scratch_dir.exists());
    }

    #[test]
    fn test_corrupt_archives_are_errors_and_scratch_removed() {
        let (_temp, config) = setup();
        fs::create_dir_all(&config.intake_dir).unwrap();
        fs::write(config.intake_dir.join("bad.mcaddon"), "not a zip at all, sorry").unwrap();
        fs::write(config.intake_dir.join("bad.mcpack"), "also not a zip archive").unwrap();

        let stages = Rc::new(RefCell::new(Vec::new()));
        let stages_clone = Rc::clone(&stages);
        let callback: IntakeProgressCallback = Box::new(move |stage, _message| {
            stages_clone.borrow_mut().push(stage);
        });

        let intake = AddonIntake::new(ZipExtractor::new(), config.clone());
        let report = intake.run(&mut relocator(&config), Some(callback));

        assert_eq!(report.addons_processed, 1);
        assert_eq!(report.packs_processed, 1);
        assert_eq!(report.stats.errors, 2);
        assert_eq!(report.archives[0].status, ArchiveStatus::NoFolders);
        assert_eq!(report.archives[1].status, ArchiveStatus::Failed);
        assert!(report.cleanup_error.is_none());
        assert!(!config.scratch_dir.exists());
        assert!(config.role_dir(PackRole::Behavior).exists());

        let stages = stages.borrow();
        assert_eq!(stages.first(), Some(&IntakeStage::Discovering));
        assert_eq!(stages.last(), Some(&IntakeStage::Complete));
        assert_eq!(
            stages.iter().filter(|s| **s == IntakeStage::Extracting).count(),
            2
        );
    }
}
