//! Runtime configuration.
//!
//! Values come from the environment (a `.env` file is loaded first when
//! present) and can be overridden by CLI flags.
//!
//! | Variable                       | Default |
//! |--------------------------------|---------|
//! | `COLSPLIT_KEY_COLUMN`          | `RU`    |
//! | `COLSPLIT_INCLUDE_KEY_COLUMN`  | `true`  |
//! | `COLSPLIT_PORT`                | `3000`  |
//! | `COLSPLIT_MAX_UPLOAD_BYTES`    | 50 MiB  |

use std::env;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::models::{PivotOptions, DEFAULT_KEY_COLUMN};

pub const ENV_KEY_COLUMN: &str = "COLSPLIT_KEY_COLUMN";
pub const ENV_INCLUDE_KEY_COLUMN: &str = "COLSPLIT_INCLUDE_KEY_COLUMN";
pub const ENV_PORT: &str = "COLSPLIT_PORT";
pub const ENV_MAX_UPLOAD_BYTES: &str = "COLSPLIT_MAX_UPLOAD_BYTES";

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Column used as the pivot key.
    pub key_column: String,
    /// Whether the key column is pivoted onto itself.
    pub include_key_column: bool,
    /// HTTP listen port.
    pub port: u16,
    /// Upload size limit for `POST /api/pivot`.
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            key_column: DEFAULT_KEY_COLUMN.to_string(),
            include_key_column: true,
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl AppConfig {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let key_column = lookup(ENV_KEY_COLUMN)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.key_column);

        Ok(Self {
            key_column,
            include_key_column: parse_var(&lookup, ENV_INCLUDE_KEY_COLUMN, parse_bool)?
                .unwrap_or(defaults.include_key_column),
            port: parse_var(&lookup, ENV_PORT, parse_from_str)?.unwrap_or(defaults.port),
            max_upload_bytes: parse_var(&lookup, ENV_MAX_UPLOAD_BYTES, parse_from_str)?
                .unwrap_or(defaults.max_upload_bytes),
        })
    }

    /// Pivot options implied by this configuration.
    pub fn pivot_options(&self) -> PivotOptions {
        PivotOptions {
            key_column: self.key_column.clone(),
            include_key_column: self.include_key_column,
        }
    }
}

fn parse_var<F, T>(
    lookup: &F,
    key: &str,
    parse: fn(&str) -> Result<T, String>,
) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }

    parse(value).map(Some).map_err(|message| ConfigError::Invalid {
        key: key.to_string(),
        value: value.to_string(),
        message,
    })
}

fn parse_from_str<T>(value: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| e.to_string())
}

pub(crate) fn parse_bool(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err("expected true/false".to_string()),
    }
}
