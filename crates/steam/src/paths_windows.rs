use std::path::PathBuf;

/// Returns candidate Steam roots on Windows, preference store first.
///
/// The registry values are checked in order (`SteamPath`, then
/// `InstallPath`); a missing key or value is skipped silently.
pub(crate) fn default_root_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    for value in ["SteamPath", "InstallPath"] {
        if let Some(path) = read_steam_registry(value) {
            candidates.push(path);
        }
    }

    for (var, tail) in [
        ("ProgramFiles(x86)", &["Steam"][..]),
        ("ProgramFiles", &["Steam"][..]),
        ("LOCALAPPDATA", &["Programs", "Steam"][..]),
    ] {
        if let Ok(base) = std::env::var(var) {
            let mut path = PathBuf::from(base);
            path.extend(tail);
            candidates.push(path);
        }
    }

    candidates
}

fn read_steam_registry(value: &str) -> Option<PathBuf> {
    use winreg::RegKey;
    use winreg::enums::HKEY_CURRENT_USER;

    let hkcu = RegKey::predef(HKEY_CURRENT_USER);
    let key = hkcu.open_subkey(r"Software\Valve\Steam").ok()?;
    let path: String = key.get_value(value).ok()?;
    if path.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(path))
}
