//! Configuration loading
//!
//! Settings resolve in priority order: command-line argument, environment
//! variable (both handled by clap at the binary seam), TOML config file,
//! compiled default.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE: &str = "rollcall.db";
pub const DEFAULT_MAILBOX_TTL_SECS: u64 = 300;

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port
    pub port: u16,
    /// SQLite database path
    pub database: PathBuf,
    /// Webhook receiving cross-tenant mismatch alerts; alerts are dropped
    /// when unset
    pub alert_webhook_url: Option<String>,
    /// Unread mailbox entries older than this are discarded
    pub mailbox_ttl_secs: u64,
}

/// Raw TOML config file contents; every field may be omitted
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub port: Option<u16>,
    pub database: Option<PathBuf>,
    pub alert_webhook_url: Option<String>,
    pub mailbox_ttl_secs: Option<u64>,
}

impl ConfigFile {
    /// Load and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("invalid config {}: {e}", path.display())))
    }

    /// Per-user config file location, if one exists
    /// (`~/.config/rollcall/config.toml` on Linux)
    pub fn default_path() -> Option<PathBuf> {
        let path = dirs::config_dir()?.join("rollcall").join("config.toml");
        path.exists().then_some(path)
    }
}

impl Config {
    /// Merge CLI/env overrides over file contents over compiled defaults
    pub fn resolve(file: ConfigFile, port: Option<u16>, database: Option<PathBuf>) -> Self {
        Config {
            port: port.or(file.port).unwrap_or(DEFAULT_PORT),
            database: database
                .or(file.database)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE)),
            alert_webhook_url: file.alert_webhook_url,
            mailbox_ttl_secs: file.mailbox_ttl_secs.unwrap_or(DEFAULT_MAILBOX_TTL_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_apply_when_nothing_is_set() {
        let config = Config::resolve(ConfigFile::default(), None, None);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.database, PathBuf::from(DEFAULT_DATABASE));
        assert!(config.alert_webhook_url.is_none());
        assert_eq!(config.mailbox_ttl_secs, DEFAULT_MAILBOX_TTL_SECS);
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let file = ConfigFile {
            port: Some(4000),
            database: Some(PathBuf::from("/data/rollcall.db")),
            alert_webhook_url: Some("https://alerts.example/hook".into()),
            mailbox_ttl_secs: Some(60),
        };
        let config = Config::resolve(file, Some(5000), None);
        assert_eq!(config.port, 5000);
        assert_eq!(config.database, PathBuf::from("/data/rollcall.db"));
        assert_eq!(
            config.alert_webhook_url.as_deref(),
            Some("https://alerts.example/hook")
        );
        assert_eq!(config.mailbox_ttl_secs, 60);
    }

    #[test]
    fn test_load_parses_toml_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "port = 8088\nmailbox_ttl_secs = 120").unwrap();

        let file = ConfigFile::load(tmp.path()).unwrap();
        assert_eq!(file.port, Some(8088));
        assert_eq!(file.mailbox_ttl_secs, Some(120));
        assert!(file.database.is_none());
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "port = [not a number").unwrap();
        assert!(ConfigFile::load(tmp.path()).is_err());
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        assert!(ConfigFile::load(Path::new("/nonexistent/rollcall.toml")).is_err());
    }
}
