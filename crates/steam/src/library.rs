//! Library folder discovery from `libraryfolders.vdf`.
//!
//! The VDF file is a loosely-structured key/value text format with no
//! strict grammar published, and its layout has drifted across Steam
//! releases. Rather than a full parser, two permissive regex passes are
//! merged: the `"path"` key/value pairs that current Steam writes, plus
//! any quoted absolute drive-letter path as a fallback for older layouts.
//! The fallback can admit unrelated quoted paths; the only filter applied
//! is that the directory must exist on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::SteamError;
use crate::paths::Paths;

/// Filename of the library folder configuration.
const LIBRARY_CONFIG: &str = "libraryfolders.vdf";

fn path_key_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?i)"path"\s*"([^"]+)""#).expect("valid pattern"))
}

fn drive_path_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""([A-Za-z]:\\[^"\r\n]+)""#).expect("valid pattern"))
}

/// Finds `libraryfolders.vdf` under `root`.
///
/// Checks `steamapps/`, `config/`, then the root itself; first existing
/// file wins.
pub fn resolve_library_config_path(root: impl AsRef<Path>) -> Option<PathBuf> {
    let paths = Paths::with_base(root.as_ref());
    [
        paths.steamapps_dir().join(LIBRARY_CONFIG),
        paths.config_dir().join(LIBRARY_CONFIG),
        paths.base_dir().join(LIBRARY_CONFIG),
    ]
    .into_iter()
    .find(|c| c.is_file())
}

/// Parses `libraryfolders.vdf` and returns the library directories that
/// exist on disk.
///
/// Read errors propagate; the caller cannot scan anything without this
/// file. The returned order follows match order in the file, deduplicated
/// case-insensitively.
pub fn parse_library_folders(config_path: impl AsRef<Path>) -> Result<Vec<PathBuf>, SteamError> {
    let text = fs::read_to_string(config_path.as_ref())?;

    let folders: Vec<PathBuf> = extract_candidates(&text)
        .into_iter()
        .map(PathBuf::from)
        .filter(|p| p.is_dir())
        .collect();

    tracing::debug!(
        config = %config_path.as_ref().display(),
        count = folders.len(),
        "parsed library folders"
    );
    Ok(folders)
}

/// Runs both extraction passes over the raw text, unescaping doubled
/// backslashes and deduplicating case-insensitively. No filesystem checks.
fn extract_candidates(text: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();

    let matches = path_key_re()
        .captures_iter(text)
        .chain(drive_path_re().captures_iter(text));
    for caps in matches {
        let path = caps[1].replace("\\\\", "\\");
        if seen.insert(path.to_lowercase()) {
            out.push(path);
        }
    }

    out
}
