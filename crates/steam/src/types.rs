//! Domain types for the scan result set.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One installed app, keyed by its manifest path.
///
/// The read-only state is deliberately **not** a field: the lock may be
/// flipped out-of-band between scans, so it is re-read from the filesystem
/// on every observation via [`GameEntry::is_read_only`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEntry {
    /// Display name; falls back to the manifest's base filename when the
    /// manifest carries no `name` key. Never empty.
    pub name: String,
    /// Steam app id as digits; empty when the manifest carries no `appid`.
    pub app_id: String,
    /// Path of the `appmanifest_*.acf` file. Unique within a scan.
    pub manifest_path: PathBuf,
    /// Final path segment of the owning library directory, for grouping.
    pub library: String,
}

impl GameEntry {
    /// Current read-only state of the manifest, read live from disk.
    pub fn is_read_only(&self) -> bool {
        crate::lock::is_read_only(&self.manifest_path)
    }
}
