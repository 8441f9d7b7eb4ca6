//! Module for searching for driftfix config files

use std::path::PathBuf;

/// Base system fallback path to use if one cannot be found with XDG
const FALLBACK_BASE_PATH: &str = "/usr/share/driftfix";
/// Name of the configuration file in every search directory
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Returns the base path for shipped data
pub fn get_base_path() -> PathBuf {
    let Ok(base_dirs) = xdg::BaseDirectories::with_prefix("driftfix") else {
        log::warn!("Unable to determine config base path. Using fallback path.");
        return PathBuf::from(FALLBACK_BASE_PATH);
    };

    // Get the data directories in preference order
    let data_dirs = base_dirs.get_data_dirs();
    for dir in data_dirs {
        if dir.exists() {
            return dir;
        }
    }

    log::debug!("Config base path not found. Using fallback path.");
    PathBuf::from(FALLBACK_BASE_PATH)
}

/// Returns a list of config file paths in load order.
/// E.g. ["~/.config/driftfix/config.yaml", "/etc/driftfix/config.yaml"]
pub fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(base_dirs) = xdg::BaseDirectories::with_prefix("driftfix") {
        paths.push(base_dirs.get_config_home().join(CONFIG_FILE_NAME));
    }
    paths.push(PathBuf::from("/etc/driftfix").join(CONFIG_FILE_NAME));
    paths.push(get_base_path().join(CONFIG_FILE_NAME));

    paths
}

/// Returns the first config file that exists in the search paths
pub fn find_config_file() -> Option<PathBuf> {
    get_config_paths().into_iter().find(|path| {
        log::trace!("Looking for config at: {path:?}");
        path.is_file()
    })
}
