//! Steam root location and validation.

use std::path::{Path, PathBuf};

/// Name of the per-library directory that holds app manifests.
pub(crate) const STEAMAPPS: &str = "steamapps";

/// Name of the root's configuration directory.
pub(crate) const CONFIG: &str = "config";

/// Provides access to directories under a Steam root.
pub struct Paths {
    base_dir: PathBuf,
}

impl Paths {
    /// Creates a `Paths` instance for the given root directory.
    pub fn with_base(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Returns the Steam base directory.
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Returns the `config` directory.
    pub fn config_dir(&self) -> PathBuf {
        self.base_dir.join(CONFIG)
    }

    /// Returns the `steamapps` directory directly under the root.
    pub fn steamapps_dir(&self) -> PathBuf {
        self.base_dir.join(STEAMAPPS)
    }
}

/// Locates the default Steam installation directory, if any.
///
/// Tries the platform preference store first (the registry on Windows),
/// then a fixed list of well-known install locations. Every candidate is
/// accepted only if the directory actually exists. A failed or absent
/// preference lookup is a normal outcome, not an error, so this returns
/// `Option` rather than `Result`.
pub fn resolve_default_root() -> Option<PathBuf> {
    default_root_candidates()
        .into_iter()
        .find(|p| p.is_dir())
}

/// Returns whether `root` looks like a usable Steam installation.
///
/// A root is valid iff it has a direct `config` child directory and a
/// resolvable `libraryfolders.vdf` (see
/// [`library::resolve_library_config_path`](crate::library::resolve_library_config_path)).
pub fn is_valid_root(root: impl AsRef<Path>) -> bool {
    let paths = Paths::with_base(root.as_ref());
    paths.config_dir().is_dir()
        && crate::library::resolve_library_config_path(paths.base_dir()).is_some()
}

// Platform-specific candidate lists.
#[cfg(windows)]
fn default_root_candidates() -> Vec<PathBuf> {
    crate::paths_windows::default_root_candidates()
}

#[cfg(target_os = "linux")]
fn default_root_candidates() -> Vec<PathBuf> {
    crate::paths_linux::default_root_candidates()
}

#[cfg(not(any(windows, target_os = "linux")))]
fn default_root_candidates() -> Vec<PathBuf> {
    Vec::new()
}
