//! Configuration for toeic
//!
//! Stored in `<config dir>/toeic/config.toml`, or in the data directory
//! when one is given explicitly.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "toeic";
const CONFIG_FILE: &str = "config.toml";

/// toeic configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Where the state blob is kept (defaults to the platform data dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// External vocabulary dataset used for the default decks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_path: Option<PathBuf>,

    /// Target score for a fresh or reset state
    pub default_goal: u16,

    /// Mock test settings
    #[serde(default)]
    pub mock: MockConfig,

    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            seed_path: None,
            default_goal: crate::state::DEFAULT_GOAL,
            mock: MockConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

/// Mock test configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MockConfig {
    /// Highlight the countdown when fewer seconds than this remain
    pub warning_seconds: u32,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            warning_seconds: crate::timer::WARNING_SECONDS,
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Use colors in output
    pub colors: bool,

    /// Date format for display
    pub date_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            colors: true,
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

/// Platform data directory for toeic
pub fn default_data_dir() -> crate::Result<PathBuf> {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .ok_or(crate::Error::NoDataDir)
}

/// Config file location: inside `data_dir` when given, else the platform
/// config directory
pub fn config_path(data_dir: Option<&Path>) -> crate::Result<PathBuf> {
    match data_dir {
        Some(dir) => Ok(dir.join(CONFIG_FILE)),
        None => dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(CONFIG_FILE))
            .ok_or(crate::Error::NoDataDir),
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        Ok(config)
    }

    /// Save config to a TOML file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(format!("Failed to serialize config: {}", e)))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Set one value by dotted key, e.g. `display.colors`
    pub fn set(&mut self, key: &str, value: &str) -> crate::Result<()> {
        fn parse<T: std::str::FromStr>(key: &str, value: &str) -> crate::Result<T> {
            value
                .parse()
                .map_err(|_| crate::Error::Config(format!("Invalid value for {}: {}", key, value)))
        }

        match key {
            "data_dir" => self.data_dir = Some(PathBuf::from(value)),
            "seed_path" => self.seed_path = Some(PathBuf::from(value)),
            "default_goal" => self.default_goal = parse(key, value)?,
            "mock.warning_seconds" => self.mock.warning_seconds = parse(key, value)?,
            "display.colors" => self.display.colors = parse(key, value)?,
            "display.date_format" => self.display.date_format = value.to_string(),
            _ => return Err(crate::Error::Config(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }

    /// Resolve the data directory: explicit override, then config, then
    /// the platform default
    pub fn resolve_data_dir(&self, explicit: Option<&Path>) -> crate::Result<PathBuf> {
        if let Some(dir) = explicit {
            return Ok(dir.to_path_buf());
        }
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }

    /// Generate a default config file with comments
    pub fn default_with_comments() -> String {
        r#"# toeic configuration

# Where the state blob is kept (defaults to the platform data directory)
# data_dir = "/home/me/.local/share/toeic"

# External vocabulary dataset (JSON list of lessons) used for default decks
# seed_path = "/home/me/toeic/vocab-data.json"

# Target score for a fresh or reset state
default_goal = 800

[mock]
# Highlight the countdown when fewer seconds than this remain
warning_seconds = 300

[display]
# Use colors in output
colors = true

# Date format for display (strftime format)
date_format = "%Y-%m-%d"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let config = Config::load(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_commented_default_parses_to_default() {
        let config: Config = toml::from_str(&Config::default_with_comments()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_goal = 900\n[display]\ncolors = false\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.default_goal, 900);
        assert!(!config.display.colors);
        assert_eq!(config.display.date_format, "%Y-%m-%d");
        assert_eq!(config.mock.warning_seconds, 300);
    }

    #[test]
    fn test_save_roundtrip_and_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub").join("config.toml");
        let mut config = Config::default();
        config.seed_path = Some(PathBuf::from("/tmp/vocab.json"));
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);

        std::fs::write(&path, "default_goal = \"lots\"").unwrap();
        assert!(matches!(Config::load(&path), Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_set_by_key() {
        let mut config = Config::default();
        config.set("default_goal", "750").unwrap();
        config.set("display.colors", "false").unwrap();
        config.set("mock.warning_seconds", "120").unwrap();
        assert_eq!(config.default_goal, 750);
        assert!(!config.display.colors);
        assert_eq!(config.mock.warning_seconds, 120);

        assert!(matches!(config.set("default_goal", "lots"), Err(crate::Error::Config(_))));
        assert!(matches!(config.set("display.theme", "dark"), Err(crate::Error::Config(_))));
        assert_eq!(config.default_goal, 750);
    }

    #[test]
    fn test_resolve_data_dir_prefers_explicit() {
        let mut config = Config::default();
        config.data_dir = Some(PathBuf::from("/from/config"));
        assert_eq!(
            config.resolve_data_dir(Some(Path::new("/explicit"))).unwrap(),
            PathBuf::from("/explicit")
        );
        assert_eq!(config.resolve_data_dir(None).unwrap(), PathBuf::from("/from/config"));
    }
}
