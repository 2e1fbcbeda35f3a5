//! Theme store configuration parsed from environment variables.

use std::path::PathBuf;

use crate::error::ThemeError;

pub const DEFAULT_STORAGE_KEY: &str = "theme";
pub const DEFAULT_ATTRIBUTE: &str = "data-theme";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeConfig {
    /// Key the theme string is stored under.
    pub storage_key: String,
    /// Document-root attribute mirroring the theme.
    pub attribute: String,
    /// Native JSON storage file; `None` disables native persistence.
    pub storage_path: Option<PathBuf>,
    /// How often the native watcher re-reads the OS preference.
    pub poll_interval_secs: u64,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            attribute: DEFAULT_ATTRIBUTE.to_string(),
            storage_path: None,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

impl ThemeConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `THEME_STORAGE_KEY`: default `theme`
    /// - `THEME_ATTRIBUTE`: default `data-theme`
    /// - `THEME_STORAGE_PATH`: unset by default
    /// - `THEME_POLL_INTERVAL_SECS`: default 5, must be positive
    pub fn from_env() -> Result<Self, ThemeError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed config from any variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ThemeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_key = non_empty("THEME_STORAGE_KEY", lookup("THEME_STORAGE_KEY"), DEFAULT_STORAGE_KEY)?;
        let attribute = non_empty("THEME_ATTRIBUTE", lookup("THEME_ATTRIBUTE"), DEFAULT_ATTRIBUTE)?;
        let storage_path = lookup("THEME_STORAGE_PATH")
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);
        let poll_interval_secs = parse_interval(lookup("THEME_POLL_INTERVAL_SECS").as_deref())?;

        Ok(Self { storage_key, attribute, storage_path, poll_interval_secs })
    }
}

fn non_empty(var: &str, raw: Option<String>, default: &str) -> Result<String, ThemeError> {
    match raw {
        None => Ok(default.to_string()),
        Some(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(ThemeError::ConfigParse(format!("{var} must not be empty")))
            } else {
                Ok(trimmed.to_string())
            }
        }
    }
}

fn parse_interval(raw: Option<&str>) -> Result<u64, ThemeError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_POLL_INTERVAL_SECS);
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ThemeError::ConfigParse("THEME_POLL_INTERVAL_SECS must be positive".into())),
        Ok(secs) => Ok(secs),
        Err(_) => Err(ThemeError::ConfigParse(format!("invalid THEME_POLL_INTERVAL_SECS: {raw}"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
