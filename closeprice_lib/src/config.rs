//! Service configuration loaded from an optional YAML file.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::resolver::{SymbolResolver, DEFAULT_MARKET_SUFFIX};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_TIINGO_BASE_URL: &str = "https://api.tiingo.com";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config YAML: {0}")]
    YamlParse(#[from] serde_yml::Error),
    #[error("Unknown provider '{0}'. Valid values: yahoo, tiingo")]
    UnknownProvider(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
    #[error("TIINGO_API_KEY must be set when the provider is tiingo")]
    MissingApiKey,
}

/// Upstream historical-price provider.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Yahoo,
    Tiingo,
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yahoo" => Ok(Provider::Yahoo),
            "tiingo" => Ok(Provider::Tiingo),
            _ => Err(ConfigError::UnknownProvider(s.to_string())),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Yahoo => write!(f, "yahoo"),
            Provider::Tiingo => write!(f, "tiingo"),
        }
    }
}

/// All keys are optional; missing keys take the defaults above.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub provider: Provider,
    pub market_suffixes: Vec<String>,
    pub upstream_timeout_secs: u64,
    pub yahoo_base_url: String,
    pub tiingo_base_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            provider: Provider::Yahoo,
            market_suffixes: vec![DEFAULT_MARKET_SUFFIX.to_string()],
            upstream_timeout_secs: DEFAULT_TIMEOUT_SECS,
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            tiingo_base_url: DEFAULT_TIINGO_BASE_URL.to_string(),
        }
    }
}

impl ServiceConfig {
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn resolver(&self) -> SymbolResolver {
        SymbolResolver::new(self.market_suffixes.clone(), self.upstream_timeout())
    }

    /// Checks values the YAML types cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.market_suffixes.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "market_suffixes must not contain empty entries".to_string(),
            ));
        }
        if self.upstream_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "upstream_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Parse and validate configuration from YAML content.
pub fn parse_config(yaml_content: &str) -> Result<ServiceConfig, ConfigError> {
    if yaml_content.trim().is_empty() {
        return Ok(ServiceConfig::default());
    }
    let config: ServiceConfig = serde_yml::from_str(yaml_content)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from a YAML file.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&content)
}
