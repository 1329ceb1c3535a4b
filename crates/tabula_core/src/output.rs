use std::io::Write;
use std::path::Path;

use tempfile::Builder;
use tracing::debug;

use crate::error::ExportError;

/// Write `bytes` to `path`, replacing any existing file.
///
/// Data goes to a temporary file in the same directory which is renamed over
/// the target only once fully written, so a failure never leaves a partial
/// file at `path`. New files get the same mode a plain `fs::write` would
/// (0666 less the umask); an overwritten file keeps its permissions. Missing
/// parent directories are created.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| ExportError::io(dir, e))?;
    }

    let existing = std::fs::metadata(path)
        .ok()
        .filter(|m| m.is_file())
        .map(|m| m.permissions());

    let mut builder = Builder::new();
    builder.prefix(".tabula");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir).map_err(|e| ExportError::io(dir, e))?;
    if let Some(permissions) = existing {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| ExportError::io(tmp.path(), e))?;
    }
    tmp.write_all(bytes).map_err(|e| ExportError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| ExportError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| ExportError::io(path, e.error))?;

    debug!(path = %path.display(), bytes = bytes.len(), "Wrote file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_and_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("out.bin");

        write_atomically(&target, b"first version, longer").unwrap();
        write_atomically(&target, b"second").unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), b"second");
    }

    #[test]
    fn test_write_creates_missing_parent() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("nested").join("deeper").join("out.bin");
        write_atomically(&target, b"x").unwrap();
        assert!(target.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_mode_matches_plain_write() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let plain = tmp.path().join("plain.bin");
        std::fs::write(&plain, b"x").unwrap();
        let target = tmp.path().join("Product.pdf");
        write_atomically(&target, b"x").unwrap();

        let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&target), mode(&plain));
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("files.zip");
        std::fs::write(&target, b"old").unwrap();
        std::fs::set_permissions(&target, std::fs::Permissions::from_mode(0o640)).unwrap();

        write_atomically(&target, b"new").unwrap();
        let mode = std::fs::metadata(&target).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
        assert_eq!(std::fs::read(&target).unwrap(), b"new");
    }

    #[test]
    fn test_failed_write_leaves_no_temp_files() {
        let tmp = tempfile::tempdir().unwrap();
        // A directory squatting on the target name makes the rename fail.
        let target = tmp.path().join("taken");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep"), b"").unwrap();

        let err = write_atomically(&target, b"data").unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));

        let leftovers: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("taken")]);
    }
}
