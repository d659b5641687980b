//! Archive extraction.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::fs_op::create::{ensure_dir_with_mode, DEFAULT_DIR_MODE};
use crate::fs_op::error::FsOpError;
use crate::fs_op::helpers::ensure_parent_exists;
use crate::fs_op::metadata::set_unix_mode;
use crate::fs_op::path::RESOURCE_FORK_DIR;
use crate::fs_op::remove::remove_path;
use crate::fs_op::stat::{exists, PathType};

/// Knobs for [`unzip_path_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnpackOptions {
    /// Wipe an existing destination before extracting instead of merging
    /// into it.
    pub overwrite: bool,
    /// Mode for the destination directory when it has to be created.
    pub dir_mode: u32,
}

impl Default for UnpackOptions {
    fn default() -> Self {
        UnpackOptions {
            overwrite: false,
            dir_mode: DEFAULT_DIR_MODE,
        }
    }
}

/// Extract the archive at `src` into the directory `dst`.
///
/// See [`unzip_path_with`]; this uses the default directory mode.
pub fn unzip_path<P: AsRef<Path>, Q: AsRef<Path>>(
    src: P,
    dst: Q,
    overwrite: bool,
) -> Result<usize, FsOpError> {
    let options = UnpackOptions {
        overwrite,
        ..UnpackOptions::default()
    };
    unzip_path_with(src, dst, &options)
}

/// Extract the archive at `src` into the directory `dst`, returning the
/// number of entries extracted.
///
/// A missing `dst` is created (with parents). An existing one is merged
/// into, unless `overwrite` is set, in which case it is deleted and
/// recreated first so only the archive's contents remain. A non-directory
/// at `dst` is only replaced when `overwrite` is set.
///
/// Entry names that would land outside `dst` (absolute, or climbing with
/// `..`) abort the extraction with [`FsOpError::UnsafeEntry`]. Stored Unix
/// permission bits are restored. A top-level `__MACOSX` directory is
/// always removed afterwards.
pub fn unzip_path_with<P: AsRef<Path>, Q: AsRef<Path>>(
    src: P,
    dst: Q,
    options: &UnpackOptions,
) -> Result<usize, FsOpError> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    if !exists(src) {
        return Err(FsOpError::NotFound(src.to_path_buf()));
    }
    let file = File::open(src).map_err(|e| FsOpError::io(src, e))?;
    let mut archive =
        ZipArchive::new(BufReader::new(file)).map_err(|e| FsOpError::archive(src, e))?;

    prepare_destination(dst, options)?;

    // Directory modes are applied last, deepest first, so a read-only
    // directory does not block extraction of its own contents.
    let mut dir_modes: Vec<(PathBuf, u32)> = Vec::new();
    let total = archive.len();

    for i in 0..total {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| FsOpError::archive(src, e))?;
        let rel = entry
            .enclosed_name()
            .ok_or_else(|| FsOpError::UnsafeEntry(entry.name().to_string()))?;
        let out = dst.join(&rel);

        if entry.is_dir() {
            fs::create_dir_all(&out).map_err(|e| FsOpError::io(&out, e))?;
            if let Some(mode) = entry.unix_mode() {
                dir_modes.push((out, mode));
            }
        } else {
            ensure_parent_exists(&out).map_err(|e| FsOpError::io(&out, e))?;
            let mut outfile = File::create(&out).map_err(|e| FsOpError::io(&out, e))?;
            io::copy(&mut entry, &mut outfile).map_err(|e| FsOpError::io(&out, e))?;
            if let Some(mode) = entry.unix_mode() {
                set_unix_mode(&out, mode).map_err(|e| FsOpError::io(&out, e))?;
            }
        }
        tracing::debug!("extracted {}", rel.display());
    }

    dir_modes.sort_by_key(|(p, _)| std::cmp::Reverse(p.components().count()));
    for (dir, mode) in &dir_modes {
        set_unix_mode(dir, *mode).map_err(|e| FsOpError::io(dir, e))?;
    }

    let resource_fork = dst.join(RESOURCE_FORK_DIR);
    if exists(&resource_fork) {
        tracing::debug!("removing resource fork {}", resource_fork.display());
        remove_path(&resource_fork)?;
    }

    tracing::info!("unzipped {} into {} ({} entries)", src.display(), dst.display(), total);
    Ok(total)
}

fn prepare_destination(dst: &Path, options: &UnpackOptions) -> Result<(), FsOpError> {
    let is_dir = match PathType::of(dst) {
        PathType::NotFound => return ensure_dir_with_mode(dst, options.dir_mode),
        PathType::Directory => true,
        PathType::Symlink => dst.is_dir(),
        _ => false,
    };

    if options.overwrite {
        remove_path(dst)?;
        ensure_dir_with_mode(dst, options.dir_mode)
    } else if is_dir {
        Ok(())
    } else {
        Err(FsOpError::NotDirectory(dst.to_path_buf()))
    }
}
