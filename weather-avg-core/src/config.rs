use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

pub const DEFAULT_ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";
pub const DEFAULT_TIMEZONE: &str = "auto";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// archive_url = "https://archive-api.open-meteo.com/v1/archive"
/// timezone = "auto"
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub archive_url: String,

    /// Passed through as the `timezone` query parameter.
    pub timezone: String,

    /// HTTP timeout; the client default applies when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            archive_url: DEFAULT_ARCHIVE_URL.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-avg", "weather-avg")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_archive_url(&mut self, url: &str) -> Result<()> {
        check_url(url)?;
        self.archive_url = url.trim_end_matches('/').to_string();
        Ok(())
    }

    /// Zero clears the timeout.
    pub fn set_timeout_secs(&mut self, secs: u64) {
        self.timeout_secs = (secs > 0).then_some(secs);
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn validate(&self) -> Result<()> {
        check_url(&self.archive_url)?;
        if self.timezone.trim().is_empty() {
            return Err(anyhow!("timezone must not be empty (use \"auto\" to localize)"));
        }
        Ok(())
    }
}

fn check_url(url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(anyhow!("Archive URL '{url}' must start with http:// or https://"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_open_meteo_archive() {
        let cfg = Config::default();
        assert_eq!(cfg.archive_url, DEFAULT_ARCHIVE_URL);
        assert_eq!(cfg.timezone, "auto");
        assert!(cfg.timeout().is_none());
    }

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = Config::from_toml_str("").expect("empty config is valid");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = Config::from_toml_str("timeout_secs = 15").expect("valid config");
        assert_eq!(cfg.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(cfg.archive_url, DEFAULT_ARCHIVE_URL);
    }

    #[test]
    fn rejects_non_http_archive_url() {
        let err = Config::from_toml_str("archive_url = \"ftp://example.com\"").unwrap_err();
        assert!(err.to_string().contains("must start with http"));
    }

    #[test]
    fn rejects_blank_timezone() {
        let err = Config::from_toml_str("timezone = \" \"").unwrap_err();
        assert!(err.to_string().contains("timezone"));
    }

    #[test]
    fn set_archive_url_strips_trailing_slash() {
        let mut cfg = Config::default();
        cfg.set_archive_url("http://localhost:8080/v1/archive/").expect("valid url");
        assert_eq!(cfg.archive_url, "http://localhost:8080/v1/archive");

        assert!(cfg.set_archive_url("localhost").is_err());
        assert_eq!(cfg.archive_url, "http://localhost:8080/v1/archive");
    }

    #[test]
    fn zero_timeout_clears_it() {
        let mut cfg = Config::default();
        cfg.set_timeout_secs(10);
        assert_eq!(cfg.timeout_secs, Some(10));

        cfg.set_timeout_secs(0);
        assert_eq!(cfg.timeout_secs, None);
    }

    #[test]
    fn toml_roundtrip_omits_unset_timeout() {
        let cfg = Config::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        assert!(!text.contains("timeout_secs"));
        assert_eq!(Config::from_toml_str(&text).unwrap(), cfg);
    }
}
