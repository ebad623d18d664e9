//! Pack role and archive kind types.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Functional role of a pack, which decides the directory it is installed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PackRole {
    /// Behavior pack (scripts, entities, loot tables).
    Behavior,
    /// Resource pack (textures, models, sounds).
    Resource,
}

impl PackRole {
    /// Both roles, in default classification order.
    pub const ALL: [PackRole; 2] = [PackRole::Behavior, PackRole::Resource];

    /// Lowercase name used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Behavior => "behavior",
            Self::Resource => "resource",
        }
    }

    /// Default name of the directory holding packs of this role.
    pub fn default_dir_name(&self) -> &'static str {
        match self {
            Self::Behavior => "behavior_packs",
            Self::Resource => "resource_packs",
        }
    }

    /// Default name of the index file for this role.
    pub fn default_index_name(&self) -> &'static str {
        match self {
            Self::Behavior => "world_behavior_packs.json",
            Self::Resource => "world_resource_packs.json",
        }
    }
}

impl fmt::Display for PackRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError(pub String);

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown pack role '{}' (expected 'behavior' or 'resource')",
            self.0
        )
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for PackRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "behavior" | "behaviour" | "bp" => Ok(Self::Behavior),
            "resource" | "rp" => Ok(Self::Resource),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

/// Kind of add-on archive, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArchiveKind {
    /// `.mcaddon`: zero or more top-level pack folders.
    Multi,
    /// `.mcpack`: a single pack, flat or wrapped in one folder.
    Single,
}

impl ArchiveKind {
    /// File extension (without dot) for this kind.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Multi => "mcaddon",
            Self::Single => "mcpack",
        }
    }

    /// Detect the archive kind from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "mcaddon" => Some(Self::Multi),
            "mcpack" => Some(Self::Single),
            _ => None,
        }
    }
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}
