//! Full-installation scan: every manifest across every library folder.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::SteamError;
use crate::library;
use crate::manifest;
use crate::paths::{Paths, STEAMAPPS};
use crate::types::GameEntry;

const MANIFEST_PREFIX: &str = "appmanifest_";
const MANIFEST_SUFFIX: &str = ".acf";

/// Scans all libraries reachable from `root` and returns one entry per
/// manifest, sorted by display name (case-insensitive).
///
/// A missing `libraryfolders.vdf` is fatal to the whole call; a single
/// unreadable manifest is dropped and the scan continues. Given an
/// unchanged filesystem snapshot the result is deterministic: library
/// order follows the config file, manifests are sorted within each
/// directory, duplicates collapse by path (case-insensitive, first
/// occurrence wins) and the final sort is stable.
pub fn scan_all(root: impl AsRef<Path>) -> Result<Vec<GameEntry>, SteamError> {
    let root = root.as_ref();

    let config = library::resolve_library_config_path(root).ok_or_else(|| {
        SteamError::LibraryConfigNotFound {
            root: root.to_path_buf(),
        }
    })?;

    let mut libs = library::parse_library_folders(&config)?;
    // The root always implicitly hosts its own library.
    libs.push(root.to_path_buf());

    let mut seen_libs = HashSet::new();
    let mut seen_manifests = HashSet::new();
    let mut games = Vec::new();

    for lib in libs {
        if !seen_libs.insert(path_key(&lib)) {
            continue;
        }

        let apps_dir = if last_segment(&lib).eq_ignore_ascii_case(STEAMAPPS) {
            lib.clone()
        } else {
            Paths::with_base(&lib).steamapps_dir()
        };
        if !apps_dir.is_dir() {
            continue;
        }

        let library_name = last_segment(&lib);
        let manifests = list_manifests(&apps_dir)?;
        tracing::debug!(
            library = %lib.display(),
            manifests = manifests.len(),
            "scanned library"
        );

        for path in manifests {
            if !seen_manifests.insert(path_key(&path)) {
                continue;
            }
            if let Some(entry) = manifest::parse_manifest(&path, &library_name) {
                games.push(entry);
            }
        }
    }

    games.sort_by_key(|g| g.name.to_lowercase());

    tracing::debug!(root = %root.display(), games = games.len(), "scan complete");
    Ok(games)
}

/// Direct-child `appmanifest_*.acf` files, sorted for deterministic output.
fn list_manifests(apps_dir: &Path) -> Result<Vec<PathBuf>, SteamError> {
    let mut manifests = Vec::new();
    for entry in fs::read_dir(apps_dir)? {
        let entry = entry?;
        if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy().to_lowercase();
        if name.starts_with(MANIFEST_PREFIX) && name.ends_with(MANIFEST_SUFFIX) {
            manifests.push(entry.path());
        }
    }
    manifests.sort();
    Ok(manifests)
}

/// Case-insensitive dedup key for a path.
fn path_key(path: &Path) -> String {
    path.to_string_lossy().to_lowercase()
}

/// Final path segment, or the whole path string when there is none.
fn last_segment(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn mk_manifest(apps_dir: &Path, id: u32, name: &str) {
        fs::create_dir_all(apps_dir).unwrap();
        fs::write(
            apps_dir.join(format!("appmanifest_{id}.acf")),
            format!("\"AppState\"\n{{\n\t\"appid\"\t\"{id}\"\n\t\"name\"\t\"{name}\"\n}}\n"),
        )
        .unwrap();
    }

    fn mk_root(root: &Path, extra_libs: &[&Path]) {
        fs::create_dir_all(root.join("config")).unwrap();
        fs::create_dir_all(root.join("steamapps")).unwrap();
        let body: String = extra_libs
            .iter()
            .map(|l| format!("\"path\"  \"{}\"\n", l.display()))
            .collect();
        fs::write(root.join("steamapps/libraryfolders.vdf"), body).unwrap();
    }

    #[test]
    fn missing_config_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let err = scan_all(tmp.path()).unwrap_err();
        assert!(matches!(err, SteamError::LibraryConfigNotFound { .. }));
    }

    #[test]
    fn scans_root_and_extra_library_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("Steam");
        let lib = tmp.path().join("Library");
        fs::create_dir_all(&lib).unwrap();
        mk_root(&root, &[&lib]);

        mk_manifest(&root.join("steamapps"), 20, "Beta");
        mk_manifest(&lib.join("steamapps"), 10, "alpha");

        let games = scan_all(&root).unwrap();
        assert_eq!(games.len(), 2);
        // Case-insensitive name order, not insertion order.
        assert_eq!(games[0].name, "alpha");
        assert_eq!(games[0].app_id, "10");
        assert_eq!(games[1].name, "Beta");
    }

    #[test]
    fn library_ending_in_steamapps_is_used_directly() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("Steam");
        let apps = tmp.path().join("other").join("steamapps");
        fs::create_dir_all(&apps).unwrap();
        mk_root(&root, &[&apps]);
        mk_manifest(&apps, 30, "Gamma");

        let games = scan_all(&root).unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].name, "Gamma");
        assert_eq!(games[0].library, "steamapps");
    }

    #[test]
    fn duplicate_library_yields_one_entry_per_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("Steam");
        // The config lists the root itself, which the scan also adds.
        mk_root(&root, &[&root]);
        mk_manifest(&root.join("steamapps"), 40, "Delta");

        let games = scan_all(&root).unwrap();
        assert_eq!(games.len(), 1);
    }

    #[test]
    fn distinct_libraries_sharing_a_manifest_dir_collapse_by_path() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("Steam");
        let apps = root.join("steamapps");
        // Two distinct library paths that both resolve to the root's
        // steamapps directory: the root itself, and that directory named
        // outright. Only the manifest-path dedup can collapse these.
        mk_root(&root, &[&root, &apps]);
        mk_manifest(&apps, 70, "Eta");

        let games = scan_all(&root).unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].app_id, "70");
    }

    #[test]
    fn nonexistent_library_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("Steam");
        let ghost = tmp.path().join("ghost");
        mk_root(&root, &[&ghost]);
        mk_manifest(&root.join("steamapps"), 50, "Epsilon");

        let games = scan_all(&root).unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].name, "Epsilon");
    }

    #[test]
    fn scan_is_deterministic() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("Steam");
        mk_root(&root, &[]);
        for (id, name) in [(3, "Same"), (1, "same"), (2, "SAME")] {
            mk_manifest(&root.join("steamapps"), id, name);
        }

        let first = scan_all(&root).unwrap();
        let second = scan_all(&root).unwrap();
        assert_eq!(first, second);
        // Stable sort: equal names keep manifest-path order.
        let ids: Vec<&str> = first.iter().map(|g| g.app_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn entries_record_owning_library_name() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("Steam");
        let lib = tmp.path().join("FastDisk");
        fs::create_dir_all(&lib).unwrap();
        mk_root(&root, &[&lib]);
        mk_manifest(&lib.join("steamapps"), 60, "Zeta");

        let games = scan_all(&root).unwrap();
        assert_eq!(games[0].library, "FastDisk");
    }
}
