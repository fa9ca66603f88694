//! Manifest update-lock: read-only attribute toggling with first-write backup.

use std::fs;
use std::path::Path;

use crate::SteamError;

/// Sets the read-only attribute of a manifest file.
///
/// When `backup_if_missing` is set and no `<path>.bak` exists yet, the
/// current manifest content is copied there **before** the attribute
/// changes, so the pristine first-ever snapshot survives any number of
/// later toggles. An existing backup is never overwritten. The two steps
/// are not transactional; the toggle is idempotent and safe to retry.
pub fn set_read_only(
    manifest_path: impl AsRef<Path>,
    read_only: bool,
    backup_if_missing: bool,
) -> Result<(), SteamError> {
    let manifest_path = manifest_path.as_ref();

    if manifest_path.as_os_str().is_empty() || !manifest_path.is_file() {
        return Err(SteamError::ManifestNotFound(manifest_path.to_path_buf()));
    }

    if backup_if_missing {
        let backup = backup_path(manifest_path);
        if !backup.exists() {
            fs::copy(manifest_path, &backup)?;
            tracing::info!(backup = %backup.display(), "created manifest backup");
        }
    }

    let mut perms = fs::metadata(manifest_path)?.permissions();
    perms.set_readonly(read_only);
    fs::set_permissions(manifest_path, perms)?;

    tracing::info!(manifest = %manifest_path.display(), read_only, "set manifest lock");
    Ok(())
}

/// Current read-only state of a manifest, read live from disk.
///
/// Missing files and metadata errors read as `false`.
pub fn is_read_only(manifest_path: impl AsRef<Path>) -> bool {
    fs::metadata(manifest_path.as_ref())
        .map(|m| m.permissions().readonly())
        .unwrap_or(false)
}

fn backup_path(manifest_path: &Path) -> std::path::PathBuf {
    let mut os = manifest_path.as_os_str().to_owned();
    os.push(".bak");
    std::path::PathBuf::from(os)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_manifest_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = set_read_only(tmp.path().join("appmanifest_0.acf"), true, true).unwrap_err();
        assert!(matches!(err, SteamError::ManifestNotFound(_)));
    }

    #[test]
    fn empty_path_is_an_error() {
        let err = set_read_only("", true, true).unwrap_err();
        assert!(matches!(err, SteamError::ManifestNotFound(_)));
    }

    #[test]
    fn toggle_roundtrip_creates_one_backup() {
        let tmp = tempfile::tempdir().unwrap();
        let manifest = tmp.path().join("appmanifest_440.acf");
        fs::write(&manifest, "original content").unwrap();

        set_read_only(&manifest, true, true).unwrap();
        assert!(is_read_only(&manifest));

        let backup = tmp.path().join("appmanifest_440.acf.bak");
        assert_eq!(fs::read_to_string(&backup).unwrap(), "original content");

        set_read_only(&manifest, false, true).unwrap();
        assert!(!is_read_only(&manifest));

        // Backup still holds the pristine snapshot, not a second copy.
        assert_eq!(fs::read_to_string(&backup).unwrap(), "original content");
        let baks = fs::read_dir(tmp.path())
            .unwrap()
            .filter(|e| {
                e.as_ref()
                    .unwrap()
                    .file_name()
                    .to_string_lossy()
                    .ends_with(".bak")
            })
            .count();
        assert_eq!(baks, 1);
    }

    #[test]
    fn existing_backup_is_never_overwritten() {
        let tmp = tempfile::tempdir().unwrap();
        let manifest = tmp.path().join("appmanifest_10.acf");
        let backup = tmp.path().join("appmanifest_10.acf.bak");
        fs::write(&manifest, "v2").unwrap();
        fs::write(&backup, "v1").unwrap();

        set_read_only(&manifest, true, true).unwrap();
        assert_eq!(fs::read_to_string(&backup).unwrap(), "v1");

        set_read_only(&manifest, false, true).unwrap();
    }

    #[test]
    fn backup_can_be_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let manifest = tmp.path().join("appmanifest_20.acf");
        fs::write(&manifest, "content").unwrap();

        set_read_only(&manifest, true, false).unwrap();
        assert!(!tmp.path().join("appmanifest_20.acf.bak").exists());

        set_read_only(&manifest, false, false).unwrap();
    }

    #[test]
    fn missing_file_reads_as_unlocked() {
        assert!(!is_read_only("/nonexistent/appmanifest_0.acf"));
    }
}
