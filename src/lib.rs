pub mod fs_op;
pub mod logging;
pub mod settings;

pub use crate::fs_op::ops::{
    copy, cp, delete, ensure_directory, ensure_directory_with_mode, rm, unzip, zip,
};
pub use crate::fs_op::{ErrorKind, Excludes, FsOpError};
