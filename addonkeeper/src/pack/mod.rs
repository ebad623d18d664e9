//! Add-on pack domain types and parsing.
//!
//! This module provides the data structures shared by the extraction and
//! reconciliation engines in [`manager`](crate::manager).
//!
//! # Overview
//!
//! Minecraft Bedrock add-ons are distributed as ZIP archives. A `.mcaddon`
//! bundles several packs, a `.mcpack` holds exactly one. Each pack is either
//! a behavior pack or a resource pack and carries a `manifest.json` with its
//! identity (`header.uuid`) and version (`header.version`).
//!
//! - **PackRole / ArchiveKind**: role of a pack, kind of an archive
//! - **Classifier**: folder-name rules that infer a pack's role
//! - **PackManifest**: identity and version read from `manifest.json`
//! - **InstalledPack**: a manifest plus the folder it was read from
//! - **PackIndex**: the per-role `world_*_packs.json` index
//!
//! # Type Hierarchy
//!
//! ```text
//! PackManifest (base)             InstalledPack (composition)
//! ├── uuid: String                ├── manifest: PackManifest  ←── contains
//! └── version: PackVersion        └── path: PathBuf
//! ```

mod classifier;
mod index;
mod installed;
mod manifest;
mod types;

pub use classifier::{classify, Classifier, ClassifierError, ClassifierRule, DEFAULT_RULES};
pub use index::{read_index, read_index_ids, IndexRecord, PackIndex};
pub use installed::InstalledPack;
pub use manifest::{
    has_manifest, parse_manifest, read_manifest, ManifestError, PackManifest, PackVersion,
    MANIFEST_FILE,
};
pub use types::{ArchiveKind, PackRole, ParseRoleError};
