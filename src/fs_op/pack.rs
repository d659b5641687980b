//! Archive creation: zip a single file or a whole directory tree.
//!
//! The source root is flattened away. Zipping `project/` whose contents are
//! `a.txt` and `sub/` yields the entries `a.txt` and `sub/`, never
//! `project/a.txt`. A single file is stored under its bare file name.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::fs_op::error::FsOpError;
use crate::fs_op::metadata::unix_mode;
use crate::fs_op::path::entry_name;
use crate::fs_op::remove::remove_path;
use crate::fs_op::stat::{exists, is_dir};

/// How file entries are stored in a new archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    #[default]
    Deflated,
    Stored,
}

/// Knobs for [`zip_path_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackOptions {
    pub compression: Compression,
    /// Deflate level; `None` picks the library default. Ignored for
    /// `Stored`.
    pub level: Option<i64>,
}

impl PackOptions {
    fn entry_options(&self, mode: Option<u32>) -> SimpleFileOptions {
        let mut opts = match self.compression {
            Compression::Deflated => SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(self.level),
            Compression::Stored => {
                SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
            }
        };
        if let Some(mode) = mode {
            opts = opts.unix_permissions(mode);
        }
        opts
    }
}

type Writer = ZipWriter<BufWriter<File>>;

/// Zip `src` (file or directory) into a new archive at `dst` using default
/// options. Returns the number of entries written.
pub fn zip_path<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Result<usize, FsOpError> {
    zip_path_with(src, dst, &PackOptions::default())
}

/// Zip `src` into a new archive at `dst`.
///
/// `dst` is created or truncated; its parent must already exist. Directory
/// trees are walked self-first in file-name order, so every directory entry
/// precedes its contents and the same tree always yields the same entry
/// order. Empty directories get an explicit `name/` entry.
///
/// Symbolic links inside the tree are never descended. A link to a regular
/// file is stored as a regular file holding the target's bytes; links to
/// directories and dangling links are skipped.
///
/// On failure the partially written archive is removed.
pub fn zip_path_with<P: AsRef<Path>, Q: AsRef<Path>>(
    src: P,
    dst: Q,
    options: &PackOptions,
) -> Result<usize, FsOpError> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    if !exists(src) {
        return Err(FsOpError::NotFound(src.to_path_buf()));
    }
    let root = fs::canonicalize(src).map_err(|e| FsOpError::io(src, e))?;
    if fs::canonicalize(dst).ok().as_deref() == Some(root.as_path()) {
        return Err(FsOpError::PathContext {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
            msg: "archive would overwrite its own source".to_string(),
        });
    }

    let file = File::create(dst).map_err(|e| FsOpError::io(dst, e))?;
    let mut writer = ZipWriter::new(BufWriter::new(file));

    let written = if is_dir(&root) {
        // Skip the archive itself if it is being written inside the tree.
        let own = fs::canonicalize(dst).ok();
        add_tree(&mut writer, &root, own.as_deref(), options)
    } else {
        add_single_file(&mut writer, &root, options)
    };

    let finished = written.and_then(|count| {
        let mut out = writer.finish().map_err(|e| FsOpError::archive(dst, e))?;
        out.flush().map_err(|e| FsOpError::io(dst, e))?;
        Ok(count)
    });

    match finished {
        Ok(count) => {
            tracing::info!("zipped {} into {} ({} entries)", src.display(), dst.display(), count);
            Ok(count)
        }
        Err(e) => {
            if let Err(cleanup) = remove_path(dst) {
                tracing::warn!("could not remove partial archive: {}", cleanup);
            }
            Err(e)
        }
    }
}

fn add_single_file(
    writer: &mut Writer,
    file: &Path,
    options: &PackOptions,
) -> Result<usize, FsOpError> {
    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| FsOpError::UnsafeEntry(file.display().to_string()))?
        .to_string();
    let meta = fs::metadata(file).map_err(|e| FsOpError::io(file, e))?;
    if !meta.is_file() {
        return Err(FsOpError::PathContext {
            src: file.to_path_buf(),
            dst: PathBuf::new(),
            msg: "only regular files and directories can be zipped".to_string(),
        });
    }
    add_file(writer, file, name, options.entry_options(unix_mode(&meta)))?;
    Ok(1)
}

fn add_tree(
    writer: &mut Writer,
    root: &Path,
    own_archive: Option<&Path>,
    options: &PackOptions,
) -> Result<usize, FsOpError> {
    let mut count = 0;
    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        if own_archive == Some(path) {
            continue;
        }

        let ft = entry.file_type();
        if ft.is_dir() {
            let meta = entry.metadata()?;
            let name = entry_name(root, path, true)?;
            tracing::debug!("adding dir {}", name);
            writer
                .add_directory(name, options.entry_options(unix_mode(&meta)))
                .map_err(|e| FsOpError::archive(path, e))?;
            count += 1;
        } else if ft.is_file() {
            let meta = entry.metadata()?;
            let name = entry_name(root, path, false)?;
            add_file(writer, path, name, options.entry_options(unix_mode(&meta)))?;
            count += 1;
        } else if ft.is_symlink() {
            // fs::metadata follows the link
            match fs::metadata(path) {
                Ok(meta) if meta.is_file() => {
                    let name = entry_name(root, path, false)?;
                    add_file(writer, path, name, options.entry_options(unix_mode(&meta)))?;
                    count += 1;
                }
                _ => tracing::warn!("skipping symlink {}", path.display()),
            }
        } else {
            tracing::warn!("skipping special file {}", path.display());
        }
    }
    Ok(count)
}

fn add_file(
    writer: &mut Writer,
    path: &Path,
    name: String,
    opts: SimpleFileOptions,
) -> Result<(), FsOpError> {
    tracing::debug!("adding file {} as {}", path.display(), name);
    let mut input = File::open(path).map_err(|e| FsOpError::io(path, e))?;
    writer
        .start_file(name, opts)
        .map_err(|e| FsOpError::archive(path, e))?;
    io::copy(&mut input, writer).map_err(|e| FsOpError::io(path, e))?;
    Ok(())
}
