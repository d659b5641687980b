//! Path conventions shared by the archive, copy and delete operations.
//!
//! A directory tree, an archive of it, and a copy of it all name their
//! items by the same relative path: the source root itself is never part
//! of the name, components are joined with `/` on every host, and
//! directory entries carry a trailing `/`.

use std::collections::BTreeSet;
use std::ffi::{OsStr, OsString};
use std::path::{Component, Path};

use crate::fs_op::error::FsOpError;

/// Metadata directory injected by some macOS archivers. Never user content.
pub const RESOURCE_FORK_DIR: &str = "__MACOSX";

/// Compute the archive entry name for `path` inside the tree rooted at
/// `root`.
///
/// Directory names get a trailing `/`. The root itself has no entry name
/// and is rejected, as is anything outside `root` or any name that is not
/// valid UTF-8 (zip entry names are text).
pub fn entry_name(root: &Path, path: &Path, is_dir: bool) -> Result<String, FsOpError> {
    let rel = path.strip_prefix(root).map_err(|_| FsOpError::PathContext {
        src: root.to_path_buf(),
        dst: path.to_path_buf(),
        msg: "path is outside the archive root".to_string(),
    })?;

    let mut parts: Vec<&str> = Vec::new();
    for comp in rel.components() {
        match comp {
            Component::Normal(name) => {
                let name = name.to_str().ok_or_else(|| FsOpError::PathContext {
                    src: root.to_path_buf(),
                    dst: path.to_path_buf(),
                    msg: "entry name is not valid UTF-8".to_string(),
                })?;
                parts.push(name);
            }
            Component::CurDir => {}
            _ => {
                return Err(FsOpError::UnsafeEntry(rel.display().to_string()));
            }
        }
    }

    if parts.is_empty() {
        return Err(FsOpError::PathContext {
            src: root.to_path_buf(),
            dst: path.to_path_buf(),
            msg: "archive root has no entry name".to_string(),
        });
    }

    let mut name = parts.join("/");
    if is_dir {
        name.push('/');
    }
    Ok(name)
}

/// Set of base names skipped by `copy`.
///
/// Matching looks only at the final component of each visited path, so a
/// name excludes every item carrying it at any depth of the tree, not only
/// the top-level one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Excludes(BTreeSet<OsString>);

impl Excludes {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Excludes(names.into_iter().map(|n| n.as_ref().to_os_string()).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the base name of `path` is in the set. Paths without a base
    /// name (`/`, `..`) never match.
    pub fn matches(&self, path: &Path) -> bool {
        match path.file_name() {
            Some(name) => self.0.contains(name),
            None => false,
        }
    }
}

impl<S: AsRef<OsStr>> FromIterator<S> for Excludes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Excludes::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn nested_file_uses_forward_slashes() {
        let root = Path::new("/tmp/project");
        let p: PathBuf = ["/tmp/project", "sub", "deep", "a.txt"].iter().collect();
        assert_eq!(entry_name(root, &p, false).unwrap(), "sub/deep/a.txt");
    }

    #[test]
    fn directory_gets_trailing_separator() {
        let root = Path::new("/tmp/project");
        let p = root.join("sub");
        assert_eq!(entry_name(root, &p, true).unwrap(), "sub/");
    }

    #[test]
    fn root_itself_has_no_name() {
        let root = Path::new("/tmp/project");
        assert!(entry_name(root, root, true).is_err());
    }

    #[test]
    fn outside_root_is_rejected() {
        let root = Path::new("/tmp/project");
        assert!(entry_name(root, Path::new("/tmp/other/a.txt"), false).is_err());
    }

    #[test]
    fn excludes_match_on_base_name_only() {
        let ex = Excludes::new(["node_modules", ".git"]);
        assert!(ex.matches(Path::new("/src/node_modules")));
        assert!(ex.matches(Path::new("/src/pkg/deep/node_modules")));
        assert!(!ex.matches(Path::new("/src/node_modules_backup")));
        assert!(!ex.matches(Path::new("/")));
        assert!(Excludes::default().is_empty());
    }
}
