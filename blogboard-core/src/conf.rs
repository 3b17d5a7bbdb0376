use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000/posts";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const SERVER_URL_ENV: &str = "BLOGBOARD_SERVER_URL";

const CONFIG_FILE: &str = "blogboard.conf";

/// Client settings, stored as `key|value` lines in `blogboard.conf`.
#[derive(Debug, Clone)]
pub struct Config {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub server_url: String,
    pub timeout_secs: u64,
}

impl Config {
    /// Load from the per-user config directory, creating it with defaults on
    /// first run. `BLOGBOARD_SERVER_URL` overrides the stored URL.
    pub fn new() -> Result<Self> {
        let proj_dirs = ProjectDirs::from("com", "blogboard", "blogboard")
            .context("Failed to get project directories")?;
        let mut config = Self::load_from(proj_dirs.config_dir())?;

        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            if !url.trim().is_empty() {
                debug!("{} overrides server_url", SERVER_URL_ENV);
                config.server_url = url.trim().to_string();
            }
        }

        Ok(config)
    }

    /// Load (or create) the config file inside `config_dir`.
    pub fn load_from(config_dir: &Path) -> Result<Self> {
        let config_file = config_dir.join(CONFIG_FILE);
        fs::create_dir_all(config_dir)
            .with_context(|| format!("Failed to create {}", config_dir.display()))?;

        let mut config = Config {
            config_dir: config_dir.to_path_buf(),
            config_file,
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        };

        if !config.config_file.exists() {
            config.save()?;
            return Ok(config);
        }

        let content = fs::read_to_string(&config.config_file)
            .with_context(|| format!("Failed to read {}", config.config_file.display()))?;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once('|') {
                Some(("server_url", url)) if !url.trim().is_empty() => {
                    config.server_url = url.trim().to_string();
                }
                Some(("timeout_secs", secs)) => match secs.trim().parse() {
                    Ok(secs) => config.timeout_secs = secs,
                    Err(_) => warn!("Ignoring invalid timeout_secs: {}", secs),
                },
                _ => warn!("Ignoring unknown config line: {}", line),
            }
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let content = format!(
            "server_url|{}\ntimeout_secs|{}\n",
            self.server_url, self.timeout_secs
        );
        fs::write(&self.config_file, content)
            .with_context(|| format!("Failed to write {}", self.config_file.display()))?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path()).unwrap();
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let written = fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap();
        assert!(written.contains("server_url|http://localhost:3000/posts"));
    }

    #[test]
    fn reads_stored_values_and_skips_junk() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "# blog api\nserver_url|https://example.test/api/posts\ntimeout_secs|abc\ncolour|blue\ntimeout_secs|5\n",
        )
        .unwrap();

        let config = Config::load_from(dir.path()).unwrap();
        assert_eq!(config.server_url, "https://example.test/api/posts");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn save_round_trips_through_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::load_from(dir.path()).unwrap();
        config.server_url = "http://10.0.0.2:3000/posts".into();
        config.save().unwrap();

        let reloaded = Config::load_from(dir.path()).unwrap();
        assert_eq!(reloaded.server_url, "http://10.0.0.2:3000/posts");
    }
}
