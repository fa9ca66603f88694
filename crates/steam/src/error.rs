//! Error types for Steam scanning and manifest mutation.

use std::path::PathBuf;

/// Errors produced while scanning libraries or toggling manifests.
#[derive(Debug, thiserror::Error)]
pub enum SteamError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("libraryfolders.vdf not found under {root}")]
    LibraryConfigNotFound { root: PathBuf },

    #[error("manifest not found: {0}")]
    ManifestNotFound(PathBuf),
}
