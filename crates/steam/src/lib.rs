//! Steam library discovery, manifest scanning and update-lock toggling.
//!
//! This crate implements the **business logic** for locating a Steam
//! installation, enumerating every installed app across all configured
//! library folders, and flipping a manifest's read-only attribute as an
//! update lock. It is a library crate with no UI dependencies — the CLI
//! (or any other front end) drives it and owns presentation concerns like
//! filtering and grouping.
//!
//! # Operations
//!
//! - **Resolve** — find the default Steam root, validate a candidate root
//! - **Scan** — collect one [`GameEntry`] per installed app manifest
//! - **Lock** — toggle a manifest's read-only attribute, backing up the
//!   pristine manifest on first toggle

pub mod error;
pub mod library;
pub mod lock;
pub mod manifest;
pub mod paths;
pub mod scanner;
pub mod types;

#[cfg(windows)]
mod paths_windows;

#[cfg(target_os = "linux")]
mod paths_linux;

// Re-export primary types for convenience.
pub use error::SteamError;
pub use lock::{is_read_only, set_read_only};
pub use paths::{Paths, is_valid_root, resolve_default_root};
pub use scanner::scan_all;
pub use types::GameEntry;
