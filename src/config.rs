use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not a valid number: {value}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("{name} is not a valid socket address: {value}")]
    InvalidAddress { name: &'static str, value: String },
}

/// Process-wide settings, read once at startup and passed down explicitly
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base_url: String,
    pub catalog_path: PathBuf,
    pub chart_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub http_timeout: Duration,
    pub chart_retention: Duration,
}

impl Config {
    const DEFAULT_BASE_URL: &'static str = "https://www.alphavantage.co";

    /// Build the config from environment variables (after `.env` is loaded)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let bind_value = get("BIND_ADDR", "0.0.0.0:5000");
        let bind_addr = bind_value
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidAddress { name: "BIND_ADDR", value: bind_value.clone() })?;

        Ok(Self {
            api_key: get("ALPHAVANTAGE_API_KEY", "demo"),
            api_base_url: get("ALPHAVANTAGE_BASE_URL", Self::DEFAULT_BASE_URL),
            catalog_path: PathBuf::from(get("SYMBOL_CATALOG_PATH", "stocks.csv")),
            chart_dir: PathBuf::from(get("CHART_OUTPUT_DIR", "static/charts")),
            bind_addr,
            http_timeout: Duration::from_secs(parse_secs("HTTP_TIMEOUT_SECS", &get("HTTP_TIMEOUT_SECS", "10"))?),
            chart_retention: Duration::from_secs(parse_secs("CHART_RETENTION_SECS", &get("CHART_RETENTION_SECS", "600"))?),
        })
    }
}

fn parse_secs(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { name, value: value.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.api_key, "demo");
        assert_eq!(config.api_base_url, "https://www.alphavantage.co");
        assert_eq!(config.catalog_path, PathBuf::from("stocks.csv"));
        assert_eq!(config.chart_dir, PathBuf::from("static/charts"));
        assert_eq!(config.bind_addr.port(), 5000);
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert_eq!(config.chart_retention, Duration::from_secs(600));
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            ("ALPHAVANTAGE_API_KEY", "secret"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("HTTP_TIMEOUT_SECS", "3"),
        ])
        .unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.http_timeout, Duration::from_secs(3));
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            config_from(&[("HTTP_TIMEOUT_SECS", "soon")]),
            Err(ConfigError::InvalidNumber { name: "HTTP_TIMEOUT_SECS", .. })
        ));
        assert!(matches!(
            config_from(&[("BIND_ADDR", "localhost")]),
            Err(ConfigError::InvalidAddress { .. })
        ));
    }
}
