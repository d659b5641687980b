use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fs_op::{Compression, PackOptions, UnpackOptions, DEFAULT_DIR_MODE};

/// User-tunable defaults for the operations.
///
/// Every field is optional in the TOML file; missing ones fall back to
/// [`Settings::default`]. Octal literals work for the mode:
///
/// ```toml
/// dir_mode = 0o750
/// compression = "stored"
/// log_level = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Mode for directories created by `mkdir` and by `unzip` destinations.
    pub dir_mode: u32,
    pub compression: Compression,
    pub compression_level: Option<i64>,
    /// Default tracing filter, e.g. `info` or `pathops=debug`.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            dir_mode: DEFAULT_DIR_MODE,
            compression: Compression::default(),
            compression_level: None,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn pack_options(&self) -> PackOptions {
        PackOptions {
            compression: self.compression,
            level: self.compression_level,
        }
    }

    pub fn unpack_options(&self, overwrite: bool) -> UnpackOptions {
        UnpackOptions {
            overwrite,
            dir_mode: self.dir_mode,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings `{}`: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Load settings from `path`. A missing file yields the defaults; an
/// unreadable or malformed one is an error.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("no settings at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    parse_settings(&text).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_settings(text: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let td = tempdir().unwrap();
        let s = load_settings(&td.path().join("nope.toml")).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.dir_mode, 0o774);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let s = parse_settings("dir_mode = 0o750\ncompression = \"stored\"\n").unwrap();
        assert_eq!(s.dir_mode, 0o750);
        assert_eq!(s.compression, Compression::Stored);
        assert_eq!(s.log_level, "info");
        assert_eq!(s.unpack_options(true).dir_mode, 0o750);
        assert_eq!(s.pack_options().compression, Compression::Stored);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let td = tempdir().unwrap();
        let p = td.path().join("settings.toml");
        fs::write(&p, "dir_mode = \"not a number\"").unwrap();
        assert!(matches!(load_settings(&p), Err(SettingsError::Parse { .. })));

        fs::write(&p, "unknown_key = 1").unwrap();
        assert!(load_settings(&p).is_err());
    }
}
