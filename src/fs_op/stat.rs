use std::fs;
use std::path::Path;

/// Lightweight classification of a filesystem path's kind.
///
/// Unlike `Path::is_dir`/`Path::is_file`, classification does not follow a
/// symbolic link: a link is reported as `Symlink` whatever it points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathType {
    /// Nothing exists at the path (not even a dangling link).
    NotFound,
    Directory,
    File,
    Symlink,
    /// Sockets, FIFOs, device nodes.
    Other,
}

impl PathType {
    /// Classify `path` and return its `PathType`.
    pub fn of<P: AsRef<Path>>(path: P) -> Self {
        match fs::symlink_metadata(path.as_ref()) {
            Err(_) => PathType::NotFound,
            Ok(meta) => {
                let ft = meta.file_type();
                if ft.is_symlink() {
                    PathType::Symlink
                } else if ft.is_dir() {
                    PathType::Directory
                } else if ft.is_file() {
                    PathType::File
                } else {
                    PathType::Other
                }
            }
        }
    }
}

/// Return `true` if anything, including a dangling symlink, exists at `path`.
pub fn exists<P: AsRef<Path>>(path: P) -> bool {
    PathType::of(path) != PathType::NotFound
}

/// Return `true` if `path` is a real directory (not a link to one).
pub fn is_dir<P: AsRef<Path>>(path: P) -> bool {
    PathType::of(path) == PathType::Directory
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn path_type_nonexistent() {
        let tmp = tempdir().unwrap();
        let p = tmp.path().join("no_such_file_hopefully");
        assert_eq!(PathType::of(&p), PathType::NotFound);
        assert!(!exists(&p));
        assert!(!is_dir(&p));
    }

    #[test]
    fn path_type_file_and_dir() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("a.txt");
        fs::write(&file, b"hello").unwrap();
        assert_eq!(PathType::of(&file), PathType::File);
        assert!(exists(&file));
        assert!(!is_dir(&file));

        let dir = tmp.path().join("subdir");
        fs::create_dir(&dir).unwrap();
        assert_eq!(PathType::of(&dir), PathType::Directory);
        assert!(is_dir(&dir));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_still_exists() {
        let tmp = tempdir().unwrap();
        let link = tmp.path().join("dangling");
        std::os::unix::fs::symlink(tmp.path().join("missing"), &link).unwrap();
        assert_eq!(PathType::of(&link), PathType::Symlink);
        assert!(exists(&link));
        assert!(!link.exists(), "std follows the link and reports absence");
    }
}
