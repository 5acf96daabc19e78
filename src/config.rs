//! Host configuration parsed from environment variables.

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

const BASE_URL_VAR: &str = "FERRYDECK_BASE_URL";
const CONNECT_TIMEOUT_VAR: &str = "FERRYDECK_CONNECT_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base URL '{0}': expected http:// or https://")]
    InvalidBaseUrl(String),

    #[error("invalid {var}: '{value}' is not a whole number of seconds")]
    InvalidTimeout { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// API root without a trailing slash.
    pub base_url: String,
    /// Bounds connection establishment only; requests themselves are not timed out.
    pub connect_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

impl Config {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `FERRYDECK_BASE_URL`: default `http://127.0.0.1:8080`
    /// - `FERRYDECK_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Rejects a non-HTTP base URL or a non-numeric timeout.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var_os(key).map(|v| v.to_string_lossy().into_owned()))
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`Config::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(&lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()))?;
        let connect_timeout_secs = match lookup(CONNECT_TIMEOUT_VAR) {
            Some(raw) => parse_secs(CONNECT_TIMEOUT_VAR, &raw)?,
            None => DEFAULT_CONNECT_TIMEOUT_SECS,
        };
        Ok(Self { base_url, connect_timeout_secs })
    }

    /// Apply command-line overrides on top of the environment.
    ///
    /// # Errors
    ///
    /// Rejects a non-HTTP base URL.
    pub fn with_overrides(
        mut self,
        base_url: Option<&str>,
        connect_timeout_secs: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if let Some(raw) = base_url {
            self.base_url = normalize_base_url(raw)?;
        }
        if let Some(secs) = connect_timeout_secs {
            self.connect_timeout_secs = secs;
        }
        Ok(self)
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidBaseUrl(raw.to_string()))
    }
}

fn parse_secs(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidTimeout { var, value: raw.to_string() })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
