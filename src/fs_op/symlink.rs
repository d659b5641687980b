//! Small utilities for working with symbolic links.
//!
//! These helpers centralize symlink-specific behavior so copy and delete
//! don't need to duplicate platform distinctions. They return `io::Result`
//! and propagate underlying OS errors unchanged.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Create a symbolic link at `link` whose target is `target`.
///
/// `target` is stored verbatim, so relative targets stay relative to the
/// link's own directory. On Windows the link kind is chosen from what
/// `target` currently resolves to (file link when it doesn't resolve).
pub(crate) fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link)
    }

    #[cfg(windows)]
    {
        use std::os::windows::fs::{symlink_dir, symlink_file};

        let resolved = match link.parent() {
            Some(parent) if target.is_relative() => parent.join(target),
            _ => target.to_path_buf(),
        };
        if resolved.metadata().map(|m| m.is_dir()).unwrap_or(false) {
            symlink_dir(target, link)
        } else {
            symlink_file(target, link)
        }
    }
}

/// Read the target of a symbolic link.
pub(crate) fn read_symlink(path: &Path) -> io::Result<PathBuf> {
    path.read_link()
}

/// Remove a symbolic link at `path` without touching its target.
///
/// On Windows a directory link has to go through `remove_dir`.
pub(crate) fn remove_symlink(path: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        fs::remove_file(path)
    }

    #[cfg(windows)]
    {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(_) => fs::remove_dir(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_op::stat::PathType;
    use std::io::Write;
    use tempfile::tempdir;

    // Windows symlink creation often requires developer privileges, so
    // these only run on Unix.
    #[cfg(unix)]
    #[test]
    fn create_and_remove_file_symlink() -> io::Result<()> {
        let tmp = tempdir()?;
        let file = tmp.path().join("file.txt");
        let mut f = fs::File::create(&file)?;
        writeln!(f, "hello")?;

        let link = tmp.path().join("file.link");
        create_symlink(Path::new("file.txt"), &link)?;
        assert_eq!(PathType::of(&link), PathType::Symlink);
        assert_eq!(read_symlink(&link)?, PathBuf::from("file.txt"));
        assert_eq!(fs::read_to_string(&link)?, "hello\n");

        remove_symlink(&link)?;
        assert!(!link.exists());
        assert!(file.exists(), "target must survive link removal");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn remove_dir_symlink_keeps_target_contents() -> io::Result<()> {
        let tmp = tempdir()?;
        let dir = tmp.path().join("somedir");
        fs::create_dir(&dir)?;
        fs::write(dir.join("keep.txt"), b"k")?;

        let link = tmp.path().join("dir.link");
        create_symlink(&dir, &link)?;
        assert_eq!(PathType::of(&link), PathType::Symlink);
        remove_symlink(&link)?;
        assert!(!link.exists());
        assert!(dir.join("keep.txt").exists());
        Ok(())
    }
}
