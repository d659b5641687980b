use std::path::PathBuf;

use directories_next::ProjectDirs;

const SETTINGS_FILE: &str = "settings.toml";

/// Per-user configuration directory for pathops, e.g.
/// `~/.config/pathops` on Linux. `None` when no home directory is known.
pub fn project_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "pathops").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Where `load_settings` looks when no explicit path is given.
pub fn default_settings_path() -> Option<PathBuf> {
    project_config_dir().map(|dir| dir.join(SETTINGS_FILE))
}
