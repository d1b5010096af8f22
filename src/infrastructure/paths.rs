//! Platform path resolution for configuration and log files.
//!
//! Uses the platform conventions from the `dirs` crate:
//! - Data: `~/.local/share/imagefinder` on Linux, `~/Library/Application Support/imagefinder`
//!   on macOS, `%LOCALAPPDATA%\imagefinder` on Windows
//! - Config: `~/.config/imagefinder/config.toml` and the platform equivalents
//!
//! When the platform directory cannot be determined, the system temp directory
//! is used instead.

use std::path::PathBuf;

const APP_DIR: &str = "imagefinder";

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Returns the directory for log files.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
}

/// Returns the default configuration file path.
#[must_use]
pub fn default_config_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
        .join(CONFIG_FILE_NAME)
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and all paths when the home directory is
/// unknown, are returned unchanged.
///
/// # Examples
///
/// ```
/// use imagefinder::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = dirs::home_dir() else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_ends_with_app_name() {
        assert!(get_data_dir().ends_with(APP_DIR));
    }

    #[test]
    fn config_file_is_toml_in_app_dir() {
        let path = default_config_file();
        assert!(path.ends_with(format!("{APP_DIR}/{CONFIG_FILE_NAME}")));
    }

    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/gallery.toml"), home.join("gallery.toml"));
            assert_eq!(expand_tilde("~"), home);
        }
    }

    #[test]
    fn relative_and_absolute_paths_are_untouched() {
        assert_eq!(expand_tilde("conf/a.toml"), PathBuf::from("conf/a.toml"));
        assert_eq!(expand_tilde("/etc/a.toml"), PathBuf::from("/etc/a.toml"));
    }
}
