//! Boolean call surface over the `fs_op` operations.
//!
//! Each function runs the matching `Result`-returning operation, logs any
//! error at `warn` level and reports plain success or failure. Use the
//! typed functions (`zip_path`, `copy_path`, ...) when the reason matters.

use std::ffi::OsStr;
use std::path::Path;

use crate::fs_op::copy::copy_path;
use crate::fs_op::create::{ensure_dir, ensure_dir_with_mode};
use crate::fs_op::error::FsOpError;
use crate::fs_op::pack::zip_path;
use crate::fs_op::path::Excludes;
use crate::fs_op::remove::remove_path;
use crate::fs_op::unpack::unzip_path;

fn report<T>(operation: &str, res: Result<T, FsOpError>) -> bool {
    match res {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(operation, kind = ?e.kind(), "{}", e);
            false
        }
    }
}

/// Zip a file or directory into a new archive at `destination`.
pub fn zip(source: impl AsRef<Path>, destination: impl AsRef<Path>) -> bool {
    report("zip", zip_path(source, destination))
}

/// Extract `source` into `destination`, wiping it first when `overwrite`.
pub fn unzip(source: impl AsRef<Path>, destination: impl AsRef<Path>, overwrite: bool) -> bool {
    report("unzip", unzip_path(source, destination, overwrite))
}

/// Delete a file or directory tree. Already-absent paths succeed.
pub fn delete(path: impl AsRef<Path>) -> bool {
    report("delete", remove_path(path))
}

/// Alias for [`delete`].
pub fn rm(path: impl AsRef<Path>) -> bool {
    delete(path)
}

/// Copy a file or directory tree, skipping every item whose base name is in
/// `excludes`. Fails when `source` itself is excluded.
pub fn copy<I, S>(source: impl AsRef<Path>, destination: impl AsRef<Path>, excludes: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    report("copy", copy_path(source, destination, &Excludes::new(excludes)))
}

/// Alias for [`copy`].
pub fn cp<I, S>(source: impl AsRef<Path>, destination: impl AsRef<Path>, excludes: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    copy(source, destination, excludes)
}

/// Ensure a directory exists, creating parents with the default mode.
pub fn ensure_directory(path: impl AsRef<Path>) -> bool {
    report("ensure_directory", ensure_dir(path))
}

pub fn ensure_directory_with_mode(path: impl AsRef<Path>, mode: u32) -> bool {
    report("ensure_directory", ensure_dir_with_mode(path, mode))
}
