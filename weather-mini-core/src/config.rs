use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// Free public service the lookups go to unless configured otherwise.
pub const DEFAULT_BASE_URL: &str = "http://wthrcdn.etouch.cn";

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Cities queried by `weather-mini demo` when none are given.
pub const DEFAULT_DEMO_CITIES: [&str; 4] = ["北京", "上海", "广州", "深圳"];

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// base_url = "http://wthrcdn.etouch.cn"
/// timeout_secs = 5
/// demo_cities = ["北京", "上海"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scheme and host of the upstream service, without the `/weather_mini` path.
    pub base_url: String,

    /// Client-side timeout for a single lookup.
    pub timeout_secs: u64,

    pub demo_cities: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            demo_cities: DEFAULT_DEMO_CITIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Apply command-line overrides on top of the loaded file.
    pub fn with_overrides(mut self, base_url: Option<String>, timeout_secs: Option<u64>) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if let Some(timeout_secs) = timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        self
    }

    /// Reject values that would make every lookup fail before it starts.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }

        validate_base_url(&self.base_url)
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-mini", "weather-mini")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Checks that `base_url` is an absolute http(s) URL.
pub fn validate_base_url(base_url: &str) -> Result<()> {
    let url = Url::parse(base_url).with_context(|| format!("Invalid base URL '{base_url}'"))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(anyhow!(
            "Unsupported scheme '{other}' in base URL '{base_url}'; expected http or https"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_upstream() {
        let cfg = Config::default();

        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout(), Duration::from_secs(5));
        assert_eq!(cfg.demo_cities.len(), 4);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = 12\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();

        assert_eq!(cfg.timeout_secs, 12);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn save_creates_parent_dirs_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            base_url: "https://weather.example.test".into(),
            timeout_secs: 9,
            demo_cities: vec!["杭州".into()],
        };
        cfg.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = \"soon\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn overrides_win_over_file_values() {
        let cfg = Config::default().with_overrides(Some("http://localhost:8080".into()), None);

        assert_eq!(cfg.base_url, "http://localhost:8080");
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let cfg = Config::default().with_overrides(None, Some(0));

        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn validate_rejects_bad_base_urls() {
        assert!(validate_base_url("not a url").is_err());

        let err = validate_base_url("ftp://example.com").unwrap_err();
        assert!(err.to_string().contains("Unsupported scheme"));
    }
}
