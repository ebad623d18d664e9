//! Relocation of extracted pack folders into their role directories.
//!
//! For each [`Candidate`] the relocator:
//! 1. Detects the role from the folder name, or asks the
//!    [`DecisionProvider`] when no classifier rule matches
//! 2. Resolves a clash with an existing folder of the same name
//! 3. Moves the folder out of scratch space into the role directory
//!
//! I/O failures are reported in the outcome and counted; they never abort
//! the remaining candidates.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::pack::{Classifier, PackRole};

use super::config::ManagerConfig;
use super::conflict::{apply_conflict, ConflictResolution};
use super::error::{ManagerError, ManagerResult};
use super::extractor::Candidate;
use super::traits::DecisionProvider;

/// Why a candidate was not moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No role could be detected and the decision provider chose to skip.
    RoleNotChosen,
    /// The destination exists and the existing folder was kept.
    KeptExisting,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RoleNotChosen => write!(f, "skipped by user"),
            Self::KeptExisting => write!(f, "kept existing"),
        }
    }
}

/// Result of relocating one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelocationOutcome {
    /// The folder now lives at `path` under `final_name`.
    Moved {
        role: PackRole,
        final_name: String,
        path: PathBuf,
    },
    /// Nothing was moved.
    Skipped(SkipReason),
    /// An I/O error stopped the move.
    Failed(String),
}

/// Running totals across all candidates of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelocationStats {
    /// Packs moved into the behavior directory.
    pub behavior_moved: usize,
    /// Packs moved into the resource directory.
    pub resource_moved: usize,
    /// Packs skipped (by choice or because the existing folder was kept).
    pub skipped: usize,
    /// Packs or archives that failed.
    pub errors: usize,
}

impl RelocationStats {
    /// Count one relocation outcome.
    pub fn record(&mut self, outcome: &RelocationOutcome) {
        match outcome {
            RelocationOutcome::Moved {
                role: PackRole::Behavior,
                ..
            } => self.behavior_moved += 1,
            RelocationOutcome::Moved {
                role: PackRole::Resource,
                ..
            } => self.resource_moved += 1,
            RelocationOutcome::Skipped(_) => self.skipped += 1,
            RelocationOutcome::Failed(_) => self.errors += 1,
        }
    }

    /// Total packs moved into either role directory.
    pub fn moved(&self) -> usize {
        self.behavior_moved + self.resource_moved
    }
}

/// Moves candidates into role directories.
pub struct Relocator<D: DecisionProvider> {
    classifier: Classifier,
    decisions: D,
    behavior_dir: PathBuf,
    resource_dir: PathBuf,
    stats: RelocationStats,
}

impl<D: DecisionProvider> Relocator<D> {
    /// Create a relocator for the role directories of `config`.
    pub fn new(config: &ManagerConfig, classifier: Classifier, decisions: D) -> Self {
        Self::with_dirs(
            config.behavior_dir.clone(),
            config.resource_dir.clone(),
            classifier,
            decisions,
        )
    }

    /// Create a relocator with explicit role directories.
    pub fn with_dirs(
        behavior_dir: PathBuf,
        resource_dir: PathBuf,
        classifier: Classifier,
        decisions: D,
    ) -> Self {
        Self {
            classifier,
            decisions,
            behavior_dir,
            resource_dir,
            stats: RelocationStats::default(),
        }
    }

    /// Totals so far.
    pub fn stats(&self) -> RelocationStats {
        self.stats
    }

    /// Count an archive-level failure (e.g. an archive that yielded nothing).
    pub fn record_error(&mut self) {
        self.stats.errors += 1;
    }

    /// Give back the decision provider.
    pub fn into_decisions(self) -> D {
        self.decisions
    }

    fn role_dir(&self, role: PackRole) -> &Path {
        match role {
            PackRole::Behavior => &self.behavior_dir,
            PackRole::Resource => &self.resource_dir,
        }
    }

    /// Classify and move one candidate, updating the totals.
    pub fn relocate(&mut self, candidate: &Candidate) -> RelocationOutcome {
        let outcome = self.relocate_inner(candidate);
        match &outcome {
            RelocationOutcome::Moved {
                role, final_name, ..
            } => info!(
                folder = %candidate.name,
                role = %role,
                dest = %final_name,
                "pack moved"
            ),
            RelocationOutcome::Skipped(reason) => {
                info!(folder = %candidate.name, reason = %reason, "pack skipped")
            }
            RelocationOutcome::Failed(error) => {
                warn!(folder = %candidate.name, error = %error, "pack relocation failed")
            }
        }
        self.stats.record(&outcome);
        outcome
    }

    fn relocate_inner(&mut self, candidate: &Candidate) -> RelocationOutcome {
        let role = match self.classifier.classify(&candidate.name) {
            Some(role) => {
                debug!(folder = %candidate.name, role = %role, "role detected from name");
                role
            }
            None => match self.decisions.choose_role(&candidate.name) {
                Some(role) => role,
                None => return RelocationOutcome::Skipped(SkipReason::RoleNotChosen),
            },
        };

        let destination_dir = self.role_dir(role).to_path_buf();
        if let Err(e) = fs::create_dir_all(&destination_dir) {
            return RelocationOutcome::Failed(
                ManagerError::CreateDirFailed {
                    path: destination_dir,
                    source: e,
                }
                .to_string(),
            );
        }

        let mut target = destination_dir.join(&candidate.name);
        let mut final_name = candidate.name.clone();

        if target.exists() {
            let decision = self
                .decisions
                .resolve_conflict(&candidate.name, &destination_dir);
            debug!(folder = %candidate.name, decision = %decision, "destination conflict");

            match apply_conflict(&destination_dir, &candidate.name, decision) {
                Ok(ConflictResolution::Skip) => {
                    return RelocationOutcome::Skipped(SkipReason::KeptExisting)
                }
                Ok(ConflictResolution::Proceed { path, name }) => {
                    target = path;
                    final_name = name;
                }
                Err(e) => return RelocationOutcome::Failed(e.to_string()),
            }
        }

        match move_dir(&candidate.path, &target) {
            Ok(()) => RelocationOutcome::Moved {
                role,
                final_name,
                path: target,
            },
            Err(e) => RelocationOutcome::Failed(e.to_string()),
        }
    }
}

/// Move a directory, copying when a plain rename is not possible
/// (e.g. scratch space on another filesystem).
pub fn move_dir(source: &Path, target: &Path) -> ManagerResult<()> {
    let rename_err = match fs::rename(source, target) {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };
    debug!(
        source = %source.display(),
        target = %target.display(),
        error = %rename_err,
        "rename failed, falling back to copy"
    );

    if target.exists() {
        return Err(ManagerError::MoveFailed {
            source_path: source.to_path_buf(),
            target: target.to_path_buf(),
            source: rename_err,
        });
    }

    if let Err(e) = copy_dir_recursive(source, target) {
        // don't leave a half-copied pack behind
        let _ = fs::remove_dir_all(target);
        return Err(ManagerError::MoveFailed {
            source_path: source.to_path_buf(),
            target: target.to_path_buf(),
            source: e,
        });
    }

    if let Err(e) = fs::remove_dir_all(source) {
        debug!(source = %source.display(), error = %e, "could not remove moved source");
    }
    Ok(())
}

fn copy_dir_recursive(source: &Path, target: &Path) -> io::Result<()> {
    if !source.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} is not a directory", source.display()),
        ));
    }
    fs::create_dir(target)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let from = entry.path();
        let to = target.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&from, &to)?;
        } else {
            fs::copy(&from, &to)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::{ConflictDecision, PolicyDecisions, ScriptedDecisions};
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        scratch: PathBuf,
        behavior: PathBuf,
        resource: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let scratch = temp.path().join("temp");
            fs::create_dir_all(&scratch).unwrap();
            Self {
                scratch,
                behavior: temp.path().join("behavior_packs"),
                resource: temp.path().join("resource_packs"),
                _temp: temp,
            }
        }

        fn candidate(&self, name: &str, marker: &str) -> Candidate {
            let path = self.scratch.join("bundle").join(name);
            fs::create_dir_all(&path).unwrap();
            fs::write(path.join("marker.txt"), marker).unwrap();
            Candidate::new(path, self.scratch.join("bundle.mcaddon"))
        }

        fn relocator<D: DecisionProvider>(&self, decisions: D) -> Relocator<D> {
            Relocator::with_dirs(
                self.behavior.clone(),
                self.resource.clone(),
                Classifier::default(),
                decisions,
            )
        }
    }

    #[test]
    fn test_moves_by_detected_role() {
        let fx = Fixture::new();
        let mut relocator = fx.relocator(PolicyDecisions::default());

        let bp = fx.candidate("Dragon BP", "bp");
        let rp = fx.candidate("Dragon RP", "rp");

        assert!(matches!(
            relocator.relocate(&bp),
            RelocationOutcome::Moved { role: PackRole::Behavior, .. }
        ));
        assert!(matches!(
            relocator.relocate(&rp),
            RelocationOutcome::Moved { role: PackRole::Resource, .. }
        ));

        assert!(fx.behavior.join("Dragon BP/marker.txt").is_file());
        assert!(fx.resource.join("Dragon RP/marker.txt").is_file());
        assert!(!bp.path.exists());

        let stats = relocator.stats();
        assert_eq!(stats.behavior_moved, 1);
        assert_eq!(stats.resource_moved, 1);
        assert_eq!(stats.moved(), 2);
    }

    #[test]
    fn test_unknown_role_asks_provider() {
        let fx = Fixture::new();
        let script = ScriptedDecisions::new(PolicyDecisions::default())
            .with_role("Castle", Some(PackRole::Resource));
        let mut relocator = fx.relocator(script);

        let outcome = relocator.relocate(&fx.candidate("Castle", "x"));
        assert_eq!(
            outcome,
            RelocationOutcome::Moved {
                role: PackRole::Resource,
                final_name: "Castle".to_string(),
                path: fx.resource.join("Castle"),
            }
        );

        // classified names never reach the provider
        relocator.relocate(&fx.candidate("Castle BP", "x"));
        let script = relocator.into_decisions();
        assert_eq!(script.role_questions(), ["Castle"]);
    }

    #[test]
    fn test_unknown_role_skipped_leaves_candidate() {
        let fx = Fixture::new();
        let mut relocator = fx.relocator(PolicyDecisions::default());
        let candidate = fx.candidate("Castle", "x");

        let outcome = relocator.relocate(&candidate);

        assert_eq!(outcome, RelocationOutcome::Skipped(SkipReason::RoleNotChosen));
        assert!(candidate.path.exists());
        assert!(!fx.behavior.exists());
        assert_eq!(relocator.stats().skipped, 1);
    }

    #[test]
    fn test_conflict_skip_keeps_existing() {
        let fx = Fixture::new();
        fs::create_dir_all(fx.behavior.join("Dragon BP")).unwrap();
        fs::write(fx.behavior.join("Dragon BP/marker.txt"), "old").unwrap();

        let mut relocator = fx.relocator(PolicyDecisions::new(None, ConflictDecision::Skip));
        let outcome = relocator.relocate(&fx.candidate("Dragon BP", "new"));

        assert_eq!(outcome, RelocationOutcome::Skipped(SkipReason::KeptExisting));
        assert_eq!(
            fs::read_to_string(fx.behavior.join("Dragon BP/marker.txt")).unwrap(),
            "old"
        );
    }

    #[test]
    fn test_conflict_overwrite_replaces_not_merges() {
        let fx = Fixture::new();
        fs::create_dir_all(fx.behavior.join("Dragon BP")).unwrap();
        fs::write(fx.behavior.join("Dragon BP/stale.txt"), "old").unwrap();

        let mut relocator =
            fx.relocator(PolicyDecisions::new(None, ConflictDecision::Overwrite));
        relocator.relocate(&fx.candidate("Dragon BP", "new"));

        assert!(!fx.behavior.join("Dragon BP/stale.txt").exists());
        assert_eq!(
            fs::read_to_string(fx.behavior.join("Dragon BP/marker.txt")).unwrap(),
            "new"
        );
    }

    #[test]
    fn test_conflict_rename() {
        let fx = Fixture::new();
        fs::create_dir_all(fx.resource.join("Dragon RP")).unwrap();
        fs::create_dir_all(fx.resource.join("Dragon RP_1")).unwrap();

        let mut relocator = fx.relocator(PolicyDecisions::new(None, ConflictDecision::Rename));
        let outcome = relocator.relocate(&fx.candidate("Dragon RP", "new"));

        assert_eq!(
            outcome,
            RelocationOutcome::Moved {
                role: PackRole::Resource,
                final_name: "Dragon RP_2".to_string(),
                path: fx.resource.join("Dragon RP_2"),
            }
        );
    }

    #[test]
    fn test_move_failure_is_counted_not_fatal() {
        let fx = Fixture::new();
        let mut relocator = fx.relocator(PolicyDecisions::default());

        let missing = Candidate::new(fx.scratch.join("gone/Ghost BP"), "gone.mcaddon");
        let outcome = relocator.relocate(&missing);
        assert!(matches!(outcome, RelocationOutcome::Failed(_)));

        let outcome = relocator.relocate(&fx.candidate("Dragon BP", "x"));
        assert!(matches!(outcome, RelocationOutcome::Moved { .. }));

        let stats = relocator.stats();
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.behavior_moved, 1);
    }

    #[test]
    fn test_copy_fallback_copies_tree() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("src");
        fs::create_dir_all(source.join("a/b")).unwrap();
        fs::write(source.join("a/b/c.txt"), "c").unwrap();
        let target = temp.path().join("dst");

        copy_dir_recursive(&source, &target).unwrap();
        assert_eq!(fs::read_to_string(target.join("a/b/c.txt")).unwrap(), "c");
    }
}
