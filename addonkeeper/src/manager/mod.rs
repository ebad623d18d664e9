//! Add-on manager: archive intake, relocation, and index reconciliation.
//!
//! This module holds the two engines that act on the filesystem, built on
//! the domain types in [`pack`](crate::pack).
//!
//! # Overview
//!
//! The manager handles:
//! - Discovering `.mcaddon` / `.mcpack` archives in the intake directory
//! - Extracting them into a scratch area and picking out the pack folders
//! - Classifying each pack and moving it into its role directory,
//!   resolving name collisions
//! - Scanning role directories and rewriting the per-role indexes
//! - Auditing pack folders that lack a `manifest.json`
//!
//! # Architecture
//!
//! Every human decision and every archive format sits behind a trait:
//!
//! - [`ArchiveExtractor`] - Unpacks archives ([`ZipExtractor`] in production)
//! - [`DecisionProvider`] - Answers role and conflict questions
//!   ([`PolicyDecisions`], [`ScriptedDecisions`], or an interactive prompt)
//!
//! The extraction side ([`AddonIntake`] driving a [`Relocator`]) and the
//! reconciliation side ([`ManifestScanner`]) share no state. They only meet
//! on disk, so a scan can run without any intake.
//!
//! # Example
//!
//! ```no_run
//! use addonkeeper::manager::{
//!     AddonIntake, ManagerConfig, ManifestScanner, PolicyDecisions, Relocator, ZipExtractor,
//! };
//! use addonkeeper::pack::{Classifier, PackRole};
//!
//! let config = ManagerConfig::new(".");
//! let mut relocator = Relocator::new(&config, Classifier::default(), PolicyDecisions::default());
//! let intake = AddonIntake::new(ZipExtractor::new(), config.clone());
//! let report = intake.run(&mut relocator, None);
//! println!("moved {} packs", report.stats.moved());
//!
//! let scanner = ManifestScanner::new();
//! for role in PackRole::ALL {
//!     let scan = scanner.scan(config.role_dir(role), config.index_path(role))?;
//!     println!("{}: {} packs indexed", role, scan.stats.total);
//! }
//! # Ok::<(), addonkeeper::manager::ManagerError>(())
//! ```

mod audit;
mod config;
mod conflict;
mod decisions;
mod error;
mod extractor;
mod intake;
mod relocator;
mod scanner;
mod traits;

pub use audit::{audit_layout, find_folders_without_manifest, list_pack_folders, RoleAudit};
pub use config::{ManagerConfig, DEFAULT_INTAKE_DIR, DEFAULT_SCRATCH_DIR};
pub use conflict::{apply_conflict, unique_folder_name, ConflictDecision, ConflictResolution};
pub use decisions::{PolicyDecisions, ScriptedDecisions};
pub use error::{ManagerError, ManagerResult};
pub use extractor::{extract_multi, extract_single, scratch_folder, Candidate, ZipExtractor};
pub use intake::{
    discover_archives, AddonIntake, ArchiveReport, ArchiveStatus, DiscoveredArchives,
    IntakeProgressCallback, IntakeReport, IntakeStage, PackEvent,
};
pub use relocator::{move_dir, RelocationOutcome, RelocationStats, Relocator, SkipReason};
pub use scanner::{ManifestScanner, ScanEntry, ScanOutcome, ScanReport, ScanStats};
pub use traits::{ArchiveExtractor, DecisionProvider};
