use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Coarse classification of an [`FsOpError`].
///
/// Callers that only care about *why* an operation failed (and not the
/// exact path involved) can match on this instead of the full error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The archive uses a feature or compression method we cannot handle.
    CapabilityMissing,
    /// An input path does not exist.
    NotFound,
    /// The OS refused the operation.
    PermissionDenied,
    /// The top-level source of a copy matched the exclusion set.
    Excluded,
    /// The request itself does not make sense (wrong file type, unsafe
    /// archive entry, copying a directory into itself, ...).
    InvalidInput,
    /// Any other I/O or archive failure.
    Io,
}

/// Errors produced by the filesystem operations in `fs_op`.
#[derive(Error, Debug)]
pub enum FsOpError {
    #[error("path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotDirectory(PathBuf),

    #[error("excluded from copy: {}", .0.display())]
    Excluded(PathBuf),

    /// An archive entry name that would resolve outside the destination.
    #[error("archive entry escapes destination: {0}")]
    UnsafeEntry(String),

    #[error("archive error on `{}`: {source}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("I/O error on `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Contextual error that includes source and destination paths.
    #[error("Operation failed from `{}` to `{}`: {msg}", src.display(), dst.display())]
    PathContext {
        src: PathBuf,
        dst: PathBuf,
        msg: String,
    },
}

impl FsOpError {
    /// Wrap an I/O error together with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        FsOpError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn archive(path: impl AsRef<Path>, source: zip::result::ZipError) -> Self {
        FsOpError::Archive {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Collapse this error into the coarse [`ErrorKind`] taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FsOpError::NotFound(_) => ErrorKind::NotFound,
            FsOpError::NotDirectory(_) | FsOpError::UnsafeEntry(_) => ErrorKind::InvalidInput,
            FsOpError::PathContext { .. } => ErrorKind::InvalidInput,
            FsOpError::Excluded(_) => ErrorKind::Excluded,
            FsOpError::Io { source, .. } => io_kind(source),
            FsOpError::Archive { source, .. } => match source {
                zip::result::ZipError::UnsupportedArchive(_) => ErrorKind::CapabilityMissing,
                zip::result::ZipError::FileNotFound => ErrorKind::NotFound,
                zip::result::ZipError::Io(e) => io_kind(e),
                _ => ErrorKind::Io,
            },
        }
    }
}

fn io_kind(e: &io::Error) -> ErrorKind {
    match e.kind() {
        io::ErrorKind::NotFound => ErrorKind::NotFound,
        io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
        _ => ErrorKind::Io,
    }
}

impl From<walkdir::Error> for FsOpError {
    fn from(e: walkdir::Error) -> Self {
        let path = e.path().map(Path::to_path_buf).unwrap_or_default();
        FsOpError::Io {
            path,
            source: io::Error::from(e),
        }
    }
}
