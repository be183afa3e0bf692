//! Layered configuration: built-in defaults, an optional TOML file, then
//! command-line flags.
//!
//! ```toml
//! # ~/.config/caltodo/config.toml
//! data_dir = "~/notes/caltodo"
//! week_start = "monday"
//! log_level = "debug"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use serde::Deserialize;
use tracing::{debug, info};

use crate::fields::WeekStart;

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_DIR_NAME: &str = "caltodo";

/// Settings read from the config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub week_start: WeekStart,
    pub log_level: Option<String>,
    #[serde(skip)]
    pub loaded_from: Option<PathBuf>,
}

impl Config {
    /// Load the config file. An explicit `override_path` must exist; the
    /// default location is optional.
    pub fn load(override_path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match override_path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => {
                    debug!("no config file found; using defaults");
                    return Ok(Config::default());
                }
            },
        };

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut cfg = Config::parse(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        cfg.loaded_from = Some(path);
        Ok(cfg)
    }

    /// Parse TOML config text.
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        toml::from_str(raw).map_err(|e| anyhow!("{e}"))
    }

    /// Apply command-line overrides on top of the file values.
    pub fn apply_overrides(&mut self, data_dir: Option<&Path>, week_start: Option<WeekStart>) {
        if let Some(dir) = data_dir {
            self.data_dir = Some(dir.to_path_buf());
        }
        if let Some(week_start) = week_start {
            self.week_start = week_start;
        }
    }
}

/// `<config_dir>/caltodo/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Resolve the directory holding the task blob and log file, creating it if
/// needed.
pub fn resolve_data_dir(cfg: &Config) -> anyhow::Result<PathBuf> {
    let dir = match cfg.data_dir.as_deref() {
        Some(path) => expand_tilde(path),
        None => default_data_dir()?,
    };

    if !dir.exists() {
        info!(dir = %dir.display(), "creating data directory");
        fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }

    Ok(dir)
}

fn default_data_dir() -> anyhow::Result<PathBuf> {
    if let Some(dir) = dirs::data_dir() {
        return Ok(dir.join(APP_DIR_NAME));
    }
    let home = dirs::home_dir().ok_or_else(|| anyhow!("cannot determine home directory"))?;
    Ok(home.join(format!(".{APP_DIR_NAME}")))
}

fn expand_tilde(path: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    if let Some(rest) = text.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = Config::parse("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.week_start, WeekStart::Sunday);
    }

    #[test]
    fn parses_all_keys() {
        let cfg = Config::parse(
            "data_dir = \"/srv/todo\"\nweek_start = \"monday\"\nlog_level = \"debug\"\n",
        )
        .unwrap();
        assert_eq!(cfg.data_dir, Some(PathBuf::from("/srv/todo")));
        assert_eq!(cfg.week_start, WeekStart::Monday);
        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        assert!(Config::parse("colour = true").is_err());
        assert!(Config::parse("week_start = \"friday\"").is_err());
    }

    #[test]
    fn flags_override_file() {
        let mut cfg = Config::parse("week_start = \"monday\"\ndata_dir = \"/a\"").unwrap();
        cfg.apply_overrides(Some(Path::new("/b")), Some(WeekStart::Sunday));
        assert_eq!(cfg.data_dir, Some(PathBuf::from("/b")));
        assert_eq!(cfg.week_start, WeekStart::Sunday);

        cfg.apply_overrides(None, None);
        assert_eq!(cfg.data_dir, Some(PathBuf::from("/b")));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        assert!(Config::load(Some(Path::new("/definitely/not/here.toml"))).is_err());
    }

    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/x")), home.join("x"));
        }
        assert_eq!(expand_tilde(Path::new("/abs")), PathBuf::from("/abs"));
    }
}
