use std::fs;
use std::path::Path;

use crate::fs_op::error::FsOpError;
use crate::fs_op::stat::PathType;

/// Mode for directories created by [`ensure_dir`]. Tighter than the usual
/// `0o777` mkdir default: no write or execute for "other".
pub const DEFAULT_DIR_MODE: u32 = 0o774;

/// Ensure `path` exists as a directory, creating missing parents with
/// [`DEFAULT_DIR_MODE`].
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<(), FsOpError> {
    ensure_dir_with_mode(path, DEFAULT_DIR_MODE)
}

/// Ensure `path` exists as a directory, creating it and any missing parents
/// with `mode` (Unix only, subject to the process umask).
///
/// An existing directory, or a symlink resolving to one, is left untouched.
/// Anything else already occupying `path` is an error rather than being
/// treated as "done".
pub fn ensure_dir_with_mode<P: AsRef<Path>>(path: P, mode: u32) -> Result<(), FsOpError> {
    let p = path.as_ref();
    match PathType::of(p) {
        PathType::Directory => return Ok(()),
        PathType::Symlink if p.is_dir() => return Ok(()),
        PathType::NotFound => {}
        _ => return Err(FsOpError::NotDirectory(p.to_path_buf())),
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }

    builder.create(p).map_err(|e| FsOpError::io(p, e))?;
    tracing::debug!("created directory {} (mode {:o})", p.display(), mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_op::error::ErrorKind;
    use tempfile::tempdir;

    #[test]
    fn creates_nested_and_is_idempotent() {
        let td = tempdir().unwrap();
        let dir = td.path().join("a/b/c");
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn file_in_the_way_is_an_error() {
        let td = tempdir().unwrap();
        let f = td.path().join("taken");
        fs::write(&f, b"x").unwrap();
        let err = ensure_dir(&f).unwrap_err();
        assert!(matches!(err, FsOpError::NotDirectory(ref p) if p == &f));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[cfg(unix)]
    #[test]
    fn mode_is_applied_within_umask() {
        use std::os::unix::fs::PermissionsExt;
        let td = tempdir().unwrap();
        let dir = td.path().join("private");
        ensure_dir_with_mode(&dir, 0o700).unwrap();
        let mode = fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
        // umask can only remove bits
        assert_eq!(mode & !0o700, 0);
    }
}
