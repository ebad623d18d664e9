//! Trait definitions for add-on manager abstractions.
//!
//! These traits enable dependency injection and testing of the manager
//! components without real archives or a terminal.

use std::path::Path;

use crate::pack::PackRole;

use super::conflict::ConflictDecision;
use super::ManagerResult;

/// Extractor for add-on archives.
///
/// This trait abstracts archive extraction to support different container
/// formats and enable testing.
pub trait ArchiveExtractor: Send + Sync {
    /// Extract an archive to a destination directory.
    ///
    /// # Arguments
    ///
    /// * `archive_path` - Path to the archive file
    /// * `dest_dir` - Directory to extract to (created if missing)
    ///
    /// # Returns
    ///
    /// The number of files extracted on success.
    fn extract(&self, archive_path: &Path, dest_dir: &Path) -> ManagerResult<usize>;

    /// List contents of an archive without extracting.
    ///
    /// # Returns
    ///
    /// Entry names within the archive, in archive order.
    fn list_contents(&self, archive_path: &Path) -> ManagerResult<Vec<String>>;
}

/// Source of decisions the relocation engine cannot make on its own.
///
/// Implementations may prompt the user, apply a fixed policy, or replay
/// pre-supplied answers. Calls block until an answer is available.
pub trait DecisionProvider {
    /// Pick a role for a pack folder whose name matched no classifier rule.
    ///
    /// Returning `None` skips the pack.
    fn choose_role(&mut self, folder_name: &str) -> Option<PackRole>;

    /// Decide what to do when `folder_name` already exists in `destination`.
    fn resolve_conflict(&mut self, folder_name: &str, destination: &Path) -> ConflictDecision;
}

impl<D: DecisionProvider + ?Sized> DecisionProvider for &mut D {
    fn choose_role(&mut self, folder_name: &str) -> Option<PackRole> {
        (**self).choose_role(folder_name)
    }

    fn resolve_conflict(&mut self, folder_name: &str, destination: &Path) -> ConflictDecision {
        (**self).resolve_conflict(folder_name, destination)
    }
}

impl<D: DecisionProvider + ?Sized> DecisionProvider for Box<D> {
    fn choose_role(&mut self, folder_name: &str) -> Option<PackRole> {
        (**self).choose_role(folder_name)
    }

    fn resolve_conflict(&mut self, folder_name: &str, destination: &Path) -> ConflictDecision {
        (**self).resolve_conflict(folder_name, destination)
    }
}
