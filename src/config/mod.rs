use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::core::utils::{ensure_dir, write_file_atomic, PathResolver};
use crate::errors::BudgetError;

/// Keys accepted by [`Config::set_value`].
pub const CONFIG_KEYS: &[&str] = &["currency_symbol", "log_filter", "data_dir"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub currency_symbol: String,
    /// `tracing` filter directive; `RUST_LOG` takes precedence when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
    /// Overrides where the transaction and budget records live.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: "$".into(),
            log_filter: None,
            data_dir: None,
        }
    }
}

impl Config {
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), BudgetError> {
        let value = value.trim();
        match key {
            "currency_symbol" => {
                if value.is_empty() {
                    return Err(BudgetError::ConfigError(
                        "currency_symbol cannot be empty".into(),
                    ));
                }
                self.currency_symbol = value.to_string();
            }
            "log_filter" => self.log_filter = non_empty(value).map(str::to_string),
            "data_dir" => self.data_dir = non_empty(value).map(PathBuf::from),
            other => {
                return Err(BudgetError::ConfigError(format!(
                    "unknown key `{other}` (expected one of: {})",
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() || value == "-" {
        None
    } else {
        Some(value)
    }
}

/// Loads and saves `config.json` inside the application directory.
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn with_base_dir(base: PathBuf) -> Result<Self, BudgetError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    /// Missing file yields the defaults.
    pub fn load(&self) -> Result<Config, BudgetError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| {
                BudgetError::ConfigError(format!("{}: {err}", self.path.display()))
            })
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), BudgetError> {
        let json = serde_json::to_string_pretty(config)?;
        write_file_atomic(&self.path, &json)
    }

    /// Directory holding the persisted records for `config`.
    pub fn data_dir(&self, config: &Config) -> PathBuf {
        match &config.data_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => self.base.join(dir),
            None => PathResolver::data_dir_in(&self.base),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
