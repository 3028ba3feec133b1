//! Runtime configuration: file locations and search defaults.
//!
//! Values come from an optional TOML file; every key is optional and falls
//! back to [`Config::default`]. Command-line flags override the file.

use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "RULESEARCH_CONFIG";

/// Directory name used under the platform config and data directories.
const APP_DIR: &str = "rulesearch";

/// Error returned when a config file cannot be read or is invalid.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{name} must be a finite number, got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON array of rules.
    pub rules_file: PathBuf,
    /// JSON store of daily rotation state.
    pub groups_file: PathBuf,
    /// Minimum score for fuzzy search results.
    pub threshold: f64,
    /// Minimum average score for keyword search results.
    pub keyword_threshold: f64,
    /// Maximum number of fuzzy search results.
    pub max_results: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules_file: PathBuf::from("rules.json"),
            groups_file: default_groups_file(),
            threshold: 0.6,
            keyword_threshold: 0.5,
            max_results: 10,
        }
    }
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.rules_file = expand_path(&config.rules_file);
        config.groups_file = expand_path(&config.groups_file);
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Resolve the config: explicit path, then `$RULESEARCH_CONFIG`, then the
    /// platform config directory if a file exists there, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }

        if let Some(path) = dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
            && path.is_file()
        {
            tracing::debug!("Using config at {}", path.display());
            return Self::from_file(&path);
        }

        Ok(Self::default())
    }

    /// Reject thresholds that cannot be compared meaningfully.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("threshold", self.threshold),
            ("keyword_threshold", self.keyword_threshold),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }
        Ok(())
    }
}

fn default_groups_file() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from("data/groups.json"),
        |dir| dir.join(APP_DIR).join("groups.json"),
    )
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
///
/// Returns `Cow::Borrowed` if no expansion needed, `Cow::Owned` if expanded.
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}

/// [`expand_tilde`] for paths; non-UTF-8 paths are left alone.
pub fn expand_path(path: &Path) -> PathBuf {
    path.to_str()
        .map_or_else(|| path.to_path_buf(), |s| PathBuf::from(expand_tilde(s).as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = Config::from_toml("", Path::new("inline")).unwrap();
        check!(config == Config::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = Config::from_toml(
            "rules_file = \"/srv/rules.json\"\nthreshold = 0.4\nmax_results = 5\n",
            Path::new("inline"),
        )
        .unwrap();
        check!(config.rules_file == PathBuf::from("/srv/rules.json"));
        check!(config.threshold == 0.4);
        check!(config.max_results == 5);
        check!(config.keyword_threshold == 0.5);
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::from_toml("threshold = \"high\"", Path::new("inline"));
        let_assert!(Err(ConfigError::Parse { .. }) = result);
    }

    #[test]
    fn test_non_finite_threshold_rejected() {
        let result = Config::from_toml("threshold = nan", Path::new("inline"));
        let_assert!(Err(ConfigError::InvalidThreshold { name: "threshold", .. }) = result);
    }

    #[test]
    fn test_tilde_expansion() {
        check!(expand_tilde("/abs/path") == "/abs/path");
        check!(expand_tilde("relative") == "relative");
        if let Some(home) = dirs::home_dir() {
            check!(expand_tilde("~/rules.json") == home.join("rules.json").display().to_string());
        }
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "keyword_threshold = 0.8\n").unwrap();
        let config = Config::from_file(&path).unwrap();
        check!(config.keyword_threshold == 0.8);
    }
}
