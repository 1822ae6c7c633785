// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::storage::LocalStorage;
use crate::store::DEFAULT_ALERT_WINDOW_DAYS;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_alert_window() -> i64 {
    DEFAULT_ALERT_WINDOW_DAYS
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Overrides the task file location chosen by the context.
    #[serde(default)]
    pub task_file: Option<PathBuf>,
    #[serde(default = "default_alert_window")]
    pub alert_window_days: i64,
    /// Reject priorities other than Alta/Media/Baja (or High/Medium/Low) when adding.
    #[serde(default)]
    pub strict_priority: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            task_file: None,
            alert_window_days: DEFAULT_ALERT_WINDOW_DAYS,
            strict_priority: false,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        if config.alert_window_days < 0 {
            anyhow::bail!(
                "Invalid config file '{}': alert_window_days must not be negative",
                path.display()
            );
        }

        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(c) => Ok(c),
            Err(e) if Self::is_missing_config_error(&e) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Helper to detect whether an anyhow::Error indicates that the config file was missing.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        let toml_str = toml::to_string_pretty(self)?;
        LocalStorage::with_lock(&path, || {
            LocalStorage::atomic_write(&path, &toml_str).map_err(|source| {
                crate::error::TaskError::Write {
                    path: path.clone(),
                    source,
                }
            })
        })?;
        Ok(())
    }

    /// Task file to use: the configured override, else the context default.
    pub fn task_file_path(&self, ctx: &dyn AppContext) -> Result<PathBuf> {
        match &self.task_file {
            Some(p) => Ok(p.clone()),
            None => ctx.get_task_file_path(),
        }
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let ctx = TestContext::new();
        let err = Config::load(&ctx).unwrap_err();
        assert!(Config::is_missing_config_error(&err));
        assert_eq!(Config::load_or_default(&ctx).unwrap(), Config::default());
    }

    #[test]
    fn test_save_and_reload() {
        let ctx = TestContext::new();
        let cfg = Config {
            task_file: Some(PathBuf::from("/tmp/elsewhere.json")),
            alert_window_days: 5,
            strict_priority: true,
            log_level: "debug".to_string(),
        };
        cfg.save(&ctx).unwrap();

        assert_eq!(Config::load(&ctx).unwrap(), cfg);
        assert_eq!(
            cfg.task_file_path(&ctx).unwrap(),
            PathBuf::from("/tmp/elsewhere.json")
        );
        assert_eq!(cfg.log_level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_partial_config_uses_field_defaults() {
        let ctx = TestContext::new();
        let path = ctx.get_config_file_path().unwrap();
        fs::write(&path, "strict_priority = true\n").unwrap();

        let cfg = Config::load(&ctx).unwrap();
        assert!(cfg.strict_priority);
        assert_eq!(cfg.alert_window_days, 2);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.task_file_path(&ctx).unwrap(), ctx.get_task_file_path().unwrap());
    }

    #[test]
    fn test_syntax_error_is_not_missing() {
        let ctx = TestContext::new();
        let path = ctx.get_config_file_path().unwrap();
        fs::write(&path, "alert_window_days = [oops").unwrap();

        let err = Config::load_or_default(&ctx).unwrap_err();
        assert!(!Config::is_missing_config_error(&err));
    }

    #[test]
    fn test_negative_window_rejected() {
        let ctx = TestContext::new();
        let path = ctx.get_config_file_path().unwrap();
        fs::write(&path, "alert_window_days = -1\n").unwrap();

        assert!(Config::load(&ctx).is_err());
    }
}
