use std::path::PathBuf;

/// Returns candidate Steam roots on Linux.
///
/// Covers the native install, the XDG data location and the Flatpak
/// sandbox. There is no preference store to consult here.
pub(crate) fn default_root_candidates() -> Vec<PathBuf> {
    let home = match std::env::var("HOME") {
        Ok(h) => PathBuf::from(h),
        Err(_) => return Vec::new(),
    };

    vec![
        home.join(".steam/steam"),
        home.join(".local/share/Steam"),
        home.join(".var/app/com.valvesoftware.Steam/.local/share/Steam"),
    ]
}
