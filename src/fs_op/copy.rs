use std::fs;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::fs_op::error::FsOpError;
use crate::fs_op::helpers::atomic_copy_file;
use crate::fs_op::metadata::copy_permissions;
use crate::fs_op::path::Excludes;
use crate::fs_op::stat::PathType;
use crate::fs_op::symlink::{create_symlink, read_symlink, remove_symlink};

/// Copy a file, a symlink or a whole directory tree from `src` to `dst`.
///
/// - A symlink is recreated at `dst` with the same target; the target's
///   contents are never copied.
/// - A regular file is copied byte-for-byte (replacing an existing `dst`).
/// - A directory is mirrored into `dst`, which is created when missing and
///   otherwise merged into. Directories created here receive the source
///   directory's permission bits once their contents are in place.
///
/// Every item whose base name is in `excludes` is skipped together with its
/// subtree, at any depth. If `src` itself is excluded nothing is copied and
/// [`FsOpError::Excluded`] is returned.
///
/// The first failure aborts the copy; items already copied are left in
/// place.
pub fn copy_path<P: AsRef<Path>, Q: AsRef<Path>>(
    src: P,
    dst: Q,
    excludes: &Excludes,
) -> Result<(), FsOpError> {
    let s = src.as_ref();
    let d = dst.as_ref();

    if excludes.matches(s) {
        return Err(FsOpError::Excluded(s.to_path_buf()));
    }

    match PathType::of(s) {
        PathType::NotFound => Err(FsOpError::NotFound(s.to_path_buf())),
        PathType::Directory => copy_tree(s, d, excludes),
        _ => copy_item(s, d),
    }
}

/// Copy one non-directory item.
fn copy_item(s: &Path, d: &Path) -> Result<(), FsOpError> {
    match PathType::of(s) {
        PathType::Symlink => {
            let target = read_symlink(s).map_err(|e| FsOpError::io(s, e))?;
            if PathType::of(d) == PathType::Symlink {
                remove_symlink(d).map_err(|e| FsOpError::io(d, e))?;
            }
            create_symlink(&target, d).map_err(|e| FsOpError::io(d, e))?;
            tracing::debug!("linked {} -> {}", d.display(), target.display());
        }
        PathType::File => {
            let n = atomic_copy_file(s, d).map_err(|e| FsOpError::io(d, e))?;
            tracing::debug!("copied {} ({} bytes)", s.display(), n);
        }
        PathType::NotFound => return Err(FsOpError::NotFound(s.to_path_buf())),
        PathType::Directory | PathType::Other => {
            return Err(FsOpError::PathContext {
                src: s.to_path_buf(),
                dst: d.to_path_buf(),
                msg: "unsupported file type".to_string(),
            });
        }
    }
    Ok(())
}

fn copy_tree(s: &Path, d: &Path, excludes: &Excludes) -> Result<(), FsOpError> {
    if lies_within(d, s) {
        return Err(FsOpError::PathContext {
            src: s.to_path_buf(),
            dst: d.to_path_buf(),
            msg: "cannot copy a directory into itself".to_string(),
        });
    }

    // (source dir, destination dir) pairs whose permissions we owe
    let mut created: Vec<(PathBuf, PathBuf)> = Vec::new();

    match PathType::of(d) {
        PathType::Directory => {}
        PathType::Symlink if d.is_dir() => {}
        PathType::NotFound => {
            fs::create_dir_all(d).map_err(|e| FsOpError::io(d, e))?;
            created.push((s.to_path_buf(), d.to_path_buf()));
        }
        _ => return Err(FsOpError::NotDirectory(d.to_path_buf())),
    }

    // Self-first walk: every directory is visited (and created) before
    // anything inside it. Excluded names prune their whole subtree.
    let walker = WalkDir::new(s)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let skip = excludes.matches(e.path());
            if skip {
                tracing::debug!("excluded {}", e.path().display());
            }
            !skip
        });

    for entry in walker {
        let entry = entry?;
        let from = entry.path();
        let rel = from.strip_prefix(s).map_err(|_| FsOpError::PathContext {
            src: s.to_path_buf(),
            dst: from.to_path_buf(),
            msg: "walk left the source tree".to_string(),
        })?;
        let to = d.join(rel);

        if entry.file_type().is_dir() {
            match PathType::of(&to) {
                PathType::Directory => {}
                PathType::NotFound => {
                    fs::create_dir(&to).map_err(|e| FsOpError::io(&to, e))?;
                    created.push((from.to_path_buf(), to));
                }
                _ => return Err(FsOpError::NotDirectory(to)),
            }
        } else {
            copy_item(from, &to)?;
        }
    }

    // Deepest first, so a read-only parent never blocks its children.
    for (from, to) in created.iter().rev() {
        copy_permissions(from, to).map_err(|e| FsOpError::io(to, e))?;
    }

    tracing::debug!("copied tree {} -> {}", s.display(), d.display());
    Ok(())
}

// Whether `dst` (which may not exist yet) resolves to `src` or somewhere
// below it.
fn lies_within(dst: &Path, src: &Path) -> bool {
    let Ok(src) = fs::canonicalize(src) else {
        return false;
    };

    // Canonicalize the longest existing prefix, then resolve the missing
    // tail by hand. Nothing in the tail exists yet, so it holds no links
    // and `..` simply drops the previous component.
    for existing in dst.ancestors() {
        let base = if existing.as_os_str().is_empty() {
            Path::new(".")
        } else {
            existing
        };
        let Ok(mut full) = fs::canonicalize(base) else {
            continue;
        };
        let Ok(rest) = dst.strip_prefix(existing) else {
            return false;
        };
        for comp in rest.components() {
            match comp {
                Component::Normal(name) => full.push(name),
                Component::ParentDir => {
                    full.pop();
                }
                _ => {}
            }
        }
        return full.starts_with(&src);
    }
    false
}
