//! Pack manifest (`manifest.json`) reading.
//!
//! Only the two fields needed for indexing are extracted: `header.uuid`
//! (the pack identity) and `header.version` (an array of non-negative
//! integers). Everything else in the manifest is ignored.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

/// File name of the manifest inside a pack folder.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Pack version as written in the manifest, e.g. `[1, 0, 3]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackVersion(pub Vec<u64>);

impl PackVersion {
    /// Version components in order.
    pub fn components(&self) -> &[u64] {
        &self.0
    }
}

impl fmt::Display for PackVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|n| n.to_string()).collect();
        f.write_str(&parts.join("."))
    }
}

impl From<Vec<u64>> for PackVersion {
    fn from(parts: Vec<u64>) -> Self {
        Self(parts)
    }
}

/// Identity and version read from a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackManifest {
    /// Globally unique pack identity (`header.uuid`).
    pub uuid: String,
    /// Pack version (`header.version`).
    pub version: PackVersion,
}

/// Reasons a manifest cannot be used for indexing.
#[derive(Debug)]
pub enum ManifestError {
    /// The pack folder has no manifest file.
    Missing,
    /// The manifest exists but could not be read.
    Unreadable(io::Error),
    /// The manifest is not valid JSON.
    InvalidJson(serde_json::Error),
    /// `header.uuid` is absent or empty.
    MissingUuid,
    /// `header.version` is absent or empty.
    MissingVersion,
    /// `header.version` is not an array of non-negative integers.
    InvalidVersion(String),
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "no {} found", MANIFEST_FILE),
            Self::Unreadable(e) => write!(f, "failed to read {}: {}", MANIFEST_FILE, e),
            Self::InvalidJson(e) => write!(f, "invalid JSON - {}", e),
            Self::MissingUuid => write!(f, "no uuid found in header"),
            Self::MissingVersion => write!(f, "no version found in header"),
            Self::InvalidVersion(v) => write!(f, "invalid version in header: {}", v),
        }
    }
}

impl std::error::Error for ManifestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unreadable(e) => Some(e),
            Self::InvalidJson(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct RawManifest {
    #[serde(default)]
    header: Option<RawHeader>,
}

#[derive(Deserialize)]
struct RawHeader {
    #[serde(default)]
    uuid: Option<Value>,
    #[serde(default)]
    version: Option<Value>,
}

/// Parse manifest JSON text.
pub fn parse_manifest(content: &str) -> Result<PackManifest, ManifestError> {
    // Some exporters write a UTF-8 BOM
    let content = content.trim_start_matches('\u{feff}');
    let raw: RawManifest = serde_json::from_str(content).map_err(ManifestError::InvalidJson)?;
    let header = raw.header.ok_or(ManifestError::MissingUuid)?;

    let uuid = match header.uuid {
        Some(Value::String(s)) if !s.trim().is_empty() => s,
        _ => return Err(ManifestError::MissingUuid),
    };

    let version = match header.version {
        None | Some(Value::Null) => return Err(ManifestError::MissingVersion),
        Some(Value::Array(items)) if items.is_empty() => {
            return Err(ManifestError::MissingVersion)
        }
        Some(Value::Array(items)) => {
            let parts = items.iter().map(Value::as_u64).collect::<Option<Vec<_>>>();
            match parts {
                Some(parts) => PackVersion(parts),
                None => {
                    return Err(ManifestError::InvalidVersion(
                        Value::Array(items).to_string(),
                    ))
                }
            }
        }
        Some(Value::String(s)) if s.is_empty() => return Err(ManifestError::MissingVersion),
        Some(other) => return Err(ManifestError::InvalidVersion(other.to_string())),
    };

    Ok(PackManifest { uuid, version })
}

/// Read the manifest of a pack folder.
pub fn read_manifest(pack_dir: &Path) -> Result<PackManifest, ManifestError> {
    let path = pack_dir.join(MANIFEST_FILE);
    if !path.is_file() {
        return Err(ManifestError::Missing);
    }
    let content = fs::read_to_string(&path).map_err(ManifestError::Unreadable)?;
    parse_manifest(&content)
}

/// Check whether a pack folder has a manifest file.
pub fn has_manifest(pack_dir: &Path) -> bool {
    pack_dir.join(MANIFEST_FILE).is_file()
}
