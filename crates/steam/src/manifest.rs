//! App manifest parsing.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::types::GameEntry;

fn appid_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?i)"appid"\s*"(\d+)""#).expect("valid pattern"))
}

fn name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?i)"name"\s*"([^"]+)""#).expect("valid pattern"))
}

/// Parses a single `appmanifest_*.acf` file into a [`GameEntry`].
///
/// The `appid` and `name` keys are extracted independently; either may be
/// missing. A missing `name` falls back to the manifest's base filename
/// (extension stripped), a missing `appid` to the empty string. A file
/// that cannot be read at all yields `None` so the caller's enumeration of
/// sibling manifests keeps going.
pub fn parse_manifest(manifest_path: impl AsRef<Path>, library: &str) -> Option<GameEntry> {
    let manifest_path = manifest_path.as_ref();

    let text = match fs::read_to_string(manifest_path) {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!(manifest = %manifest_path.display(), error = %e, "skipping unreadable manifest");
            return None;
        }
    };

    let app_id = appid_re()
        .captures(&text)
        .map(|c| c[1].to_string())
        .unwrap_or_default();

    let name = name_re()
        .captures(&text)
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| {
            manifest_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

    Some(GameEntry {
        name,
        app_id,
        manifest_path: manifest_path.to_path_buf(),
        library: library.to_string(),
    })
}
