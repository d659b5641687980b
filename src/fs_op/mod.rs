//! Filesystem maintenance operations.
//!
//! Five independent, stateless operations: zip a file or tree, extract an
//! archive, delete a tree, copy a tree with exclusions, and ensure a
//! directory exists. Each has a `Result`-returning form (re-exported here)
//! and a boolean form in [`ops`].
//!
//! Traversal order is part of the contract: zip and copy walk self-first
//! (a directory before its contents), delete walks children-first.

pub mod copy;
pub mod create;
pub mod error;
pub(crate) mod helpers;
pub(crate) mod metadata;
pub mod ops;
pub mod pack;
pub mod path;
pub mod remove;
pub mod stat;
pub(crate) mod symlink;
pub mod unpack;

pub use copy::copy_path;
pub use create::{ensure_dir, ensure_dir_with_mode, DEFAULT_DIR_MODE};
pub use error::{ErrorKind, FsOpError};
pub use pack::{zip_path, zip_path_with, Compression, PackOptions};
pub use path::Excludes;
pub use remove::remove_path;
pub use unpack::{unzip_path, unzip_path_with, UnpackOptions};
