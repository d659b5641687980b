use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::fs_op::error::FsOpError;
use crate::fs_op::stat::PathType;
use crate::fs_op::symlink::remove_symlink;

/// Remove a file, a symlink, or a whole directory tree at `path`.
///
/// A path that does not exist counts as already removed, so calling this
/// twice is fine. Directories are emptied children-first before being
/// removed themselves. Symbolic links are always unlinked as leaves, never
/// followed, whether they sit inside the tree or are `path` itself.
///
/// The first failure stops the walk and is returned; whatever was removed
/// before it stays removed.
///
/// # Examples
///
/// ```no_run
/// use pathops::fs_op::remove::remove_path;
/// remove_path("/tmp/some_dir").expect("remove failed");
/// ```
pub fn remove_path(path: impl AsRef<Path>) -> Result<(), FsOpError> {
    let p = path.as_ref();

    match PathType::of(p) {
        PathType::NotFound => Ok(()),
        PathType::Symlink => remove_symlink(p).map_err(|e| FsOpError::io(p, e)),
        PathType::Directory => remove_tree(p),
        PathType::File | PathType::Other => fs::remove_file(p).map_err(|e| FsOpError::io(p, e)),
    }
}

fn remove_tree(root: &Path) -> Result<(), FsOpError> {
    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .contents_first(true);

    for entry in walker {
        let entry = entry?;
        let child = entry.path();
        let ft = entry.file_type();
        let res = if ft.is_dir() {
            // contents_first guarantees the directory is already empty
            fs::remove_dir(child)
        } else if ft.is_symlink() {
            remove_symlink(child)
        } else {
            fs::remove_file(child)
        };
        res.map_err(|e| FsOpError::io(child, e))?;
    }

    fs::remove_dir(root).map_err(|e| FsOpError::io(root, e))?;
    tracing::debug!("removed tree {}", root.display());
    Ok(())
}
