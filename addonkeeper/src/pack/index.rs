//! Per-role pack index (`world_behavior_packs.json` / `world_resource_packs.json`).
//!
//! The index is a JSON array of `{"pack_id": ..., "version": [...]}` records,
//! written with two-space indentation. It is a derived view: every scan
//! rebuilds it from the pack folders on disk and replaces the old file in a
//! single rename, so readers never observe a partially written index.

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tempfile::{Builder, NamedTempFile};

use super::manifest::PackVersion;

/// One installed pack in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRecord {
    /// Pack identity (manifest `header.uuid`).
    pub pack_id: String,
    /// Pack version (manifest `header.version`).
    pub version: Vec<u64>,
}

impl IndexRecord {
    /// Create a record.
    pub fn new(pack_id: impl Into<String>, version: PackVersion) -> Self {
        Self {
            pack_id: pack_id.into(),
            version: version.0,
        }
    }
}

/// Ordered list of index records with unique identities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackIndex {
    records: Vec<IndexRecord>,
    seen: HashSet<String>,
}

impl PackIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record unless its identity is already present.
    ///
    /// Returns `false` (and leaves the index untouched) for a duplicate.
    pub fn insert(&mut self, record: IndexRecord) -> bool {
        if !self.seen.insert(record.pack_id.clone()) {
            return false;
        }
        self.records.push(record);
        true
    }

    /// Check whether an identity is present.
    pub fn contains(&self, pack_id: &str) -> bool {
        self.seen.contains(pack_id)
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[IndexRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize to the on-disk JSON form.
    pub fn to_json(&self) -> String {
        // Vec<IndexRecord> of strings and integers cannot fail to serialize
        serde_json::to_string_pretty(&self.records).unwrap_or_else(|_| "[]".to_string())
    }

    /// Write the index to `path`, replacing any existing file atomically.
    ///
    /// The content goes to a temporary file in the same directory which is
    /// then renamed over the target.
    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        // temp files are created 0600; keep the index readable by the server
        let existing = fs::metadata(path).ok().map(|meta| meta.permissions());
        let mut temp = temp_file_in(dir)?;
        if let Some(permissions) = existing {
            temp.as_file().set_permissions(permissions)?;
        }
        temp.write_all(self.to_json().as_bytes())?;
        temp.write_all(b"\n")?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Temp file in `dir` with the permissions a freshly created file would get.
#[cfg(unix)]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    // the requested mode is still masked by the process umask
    Builder::new()
        .permissions(fs::Permissions::from_mode(0o644))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    Builder::new().tempfile_in(dir)
}

impl FromIterator<IndexRecord> for PackIndex {
    fn from_iter<I: IntoIterator<Item = IndexRecord>>(iter: I) -> Self {
        let mut index = Self::new();
        for record in iter {
            index.insert(record);
        }
        index
    }
}

/// Read the identities listed in an existing index file.
///
/// The file must hold a JSON array. Entries without a `pack_id` string are
/// ignored one by one. Returns `Ok(None)` if the file does not exist. Order
/// follows the file, with repeats removed.
pub fn read_index_ids(path: &Path) -> io::Result<Option<Vec<String>>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let entries: Vec<Value> = serde_json::from_str(content.trim_start_matches('\u{feff}'))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let mut seen = HashSet::new();
    let ids = entries
        .iter()
        .filter_map(|entry| entry.get("pack_id").and_then(Value::as_str))
        .filter(|id| seen.insert(id.to_string()))
        .map(str::to_string)
        .collect();
    Ok(Some(ids))
}

/// Read a full index file back into records.
pub fn read_index(path: &Path) -> io::Result<Vec<IndexRecord>> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
