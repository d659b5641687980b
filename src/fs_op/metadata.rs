//! Small utilities to carry file metadata (permissions, timestamps) from a
//! source item to its copy.
//!
//! Core failures are propagated for single-item calls; the copy code
//! decides which of them it treats as best-effort.

use std::fs::{self, Permissions};
use std::io;
use std::path::Path;

use filetime::{set_file_times, FileTime};

/// Copy permission bits from `src` to `dst`.
pub(crate) fn copy_permissions(src: &Path, dst: &Path) -> io::Result<()> {
    let perms: Permissions = fs::metadata(src)?.permissions();
    fs::set_permissions(dst, perms)
}

/// Copy access and modification times from `src` to `dst`.
pub(crate) fn copy_times(src: &Path, dst: &Path) -> io::Result<()> {
    let meta = fs::metadata(src)?;
    let m_ft = FileTime::from_last_modification_time(&meta);
    let a_ft = FileTime::from_last_access_time(&meta);
    set_file_times(dst, a_ft, m_ft)
}

/// Permission bits and timestamps in one go.
pub(crate) fn preserve_metadata(src: &Path, dst: &Path) -> io::Result<()> {
    copy_permissions(src, dst)?;
    copy_times(src, dst)
}

/// Unix permission bits of `path`, if the platform has them. Setuid,
/// setgid and sticky bits are not included.
pub(crate) fn unix_mode(meta: &fs::Metadata) -> Option<u32> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(meta.permissions().mode() & 0o777)
    }
    #[cfg(not(unix))]
    {
        let _ = meta;
        None
    }
}

/// Apply Unix permission bits to `path`. Setuid, setgid and sticky bits in
/// `mode` are dropped. No-op on other platforms.
pub(crate) fn set_unix_mode(path: &Path, mode: u32) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, Permissions::from_mode(mode & 0o777))
    }
    #[cfg(not(unix))]
    {
        let _ = (path, mode);
        Ok(())
    }
}
